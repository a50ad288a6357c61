use evo_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Session(#[from] SessionError),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Could not determine a state directory; pass --home or set {0}")]
	NoHome(&'static str),
}

pub type Result<T> = std::result::Result<T, CliError>;
