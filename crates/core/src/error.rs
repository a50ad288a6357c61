//! Error types for session establishment and persistence.

use thiserror::Error;

/// Failures that can escape the core.
///
/// Transport variants are produced by [`Transport`](crate::Transport)
/// implementations and are absorbed by the verifier and classifier; only
/// storage failures propagate out of a login.
#[derive(Debug, Error)]
pub enum SessionError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Unexpected status {status} from {url}")]
	Status { url: String, status: u16 },

	#[error("Invalid URL: {0}")]
	InvalidUrl(String),

	#[error("Token store error: {0}")]
	Store(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;
