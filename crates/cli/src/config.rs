//! State directory and configuration file handling.
//!
//! Everything the CLI persists lives under one state directory, resolved from
//! `--home`, then `EVO_HOME`, then the platform config dir (`~/.config/evo`
//! on Linux). The directory holds `config.json` (optional) and the session
//! file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CliError, Result};

/// Environment variable overriding the state directory.
pub const HOME_ENV: &str = "EVO_HOME";

const CONFIG_FILE: &str = "config.json";
const SESSION_FILE: &str = "session.json";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Contents of `config.json`. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
	/// Per-request timeout for the server and instance endpoints.
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
	/// Server URL used by `login` when `--server-url` is omitted.
	#[serde(default)]
	pub default_server_url: Option<String>,
	/// Session file location; relative paths resolve against the state dir.
	#[serde(default)]
	pub session_file: Option<PathBuf>,
}

fn default_request_timeout_ms() -> u64 {
	DEFAULT_REQUEST_TIMEOUT_MS
}

impl Default for CliConfig {
	fn default() -> Self {
		Self {
			request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
			default_server_url: None,
			session_file: None,
		}
	}
}

impl CliConfig {
	/// Loads `path`, falling back to defaults when the file is missing or
	/// unparsable.
	pub fn load(path: &Path) -> Self {
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
			Err(err) => {
				warn!(target: "evo.cli", path = %path.display(), error = %err, "config unreadable; using defaults");
				return Self::default();
			}
		};

		serde_json::from_str(&content).unwrap_or_else(|err| {
			warn!(target: "evo.cli", path = %path.display(), error = %err, "config malformed; using defaults");
			Self::default()
		})
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}
}

/// Resolved on-disk locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
	pub home: PathBuf,
	pub config_file: PathBuf,
	pub session_file: PathBuf,
}

impl StatePaths {
	/// Resolves the state directory and loads its configuration.
	pub fn resolve(home_override: Option<&Path>) -> Result<(Self, CliConfig)> {
		let home = resolve_home(home_override)?;
		let config_file = home.join(CONFIG_FILE);
		let config = CliConfig::load(&config_file);

		let session_file = match &config.session_file {
			Some(path) if path.is_absolute() => path.clone(),
			Some(path) => home.join(path),
			None => home.join(SESSION_FILE),
		};

		Ok((
			Self {
				home,
				config_file,
				session_file,
			},
			config,
		))
	}
}

fn resolve_home(home_override: Option<&Path>) -> Result<PathBuf> {
	if let Some(home) = home_override {
		return Ok(home.to_path_buf());
	}
	if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
		return Ok(PathBuf::from(home));
	}
	dirs::config_dir().map(|dir| dir.join("evo")).ok_or(CliError::NoHome(HOME_ENV))
}
