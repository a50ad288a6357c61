use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::TokenStore;
use crate::error::Result;
use crate::session::{Session, TokenField};

/// JSON-file token store.
///
/// The file holds a flat object keyed by [`TokenField::key`]. Every save
/// writes its own uniquely named sibling file and renames it over the
/// target, so a reader sees one complete session and concurrent saves end
/// with the last rename.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
	path: PathBuf,
}

impl FileTokenStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn parent_dir(&self) -> &Path {
		match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		}
	}

	fn load(&self) -> Option<BTreeMap<String, String>> {
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
			Err(err) => {
				debug!(target: "evo.store", path = %self.path.display(), error = %err, "session file unreadable");
				return None;
			}
		};

		// Non-string values are skipped so the remaining fields still read.
		match serde_json::from_str::<Map<String, Value>>(&content) {
			Ok(map) => Some(
				map.into_iter()
					.filter_map(|(key, value)| match value {
						Value::String(value) => Some((key, value)),
						_ => None,
					})
					.collect(),
			),
			Err(err) => {
				debug!(target: "evo.store", path = %self.path.display(), error = %err, "session file malformed");
				None
			}
		}
	}
}

impl TokenStore for FileTokenStore {
	fn save(&self, session: &Session) -> Result<()> {
		let map: BTreeMap<&str, &str> = session.entries().map(|(field, value)| (field.key(), value)).collect();
		let json = serde_json::to_string_pretty(&map)?;

		let dir = self.parent_dir();
		fs::create_dir_all(dir)?;

		let mut staging = NamedTempFile::new_in(dir)?;
		staging.write_all(json.as_bytes())?;
		staging.persist(&self.path).map_err(|err| err.error)?;

		info!(target: "evo.store", path = %self.path.display(), instance_id = %session.instance_id, "session saved");
		Ok(())
	}

	fn read(&self, field: TokenField) -> Option<String> {
		self.load()?.remove(field.key())
	}

	fn clear(&self) -> Result<()> {
		match fs::remove_file(&self.path) {
			Ok(()) => {
				info!(target: "evo.store", path = %self.path.display(), "session cleared");
				Ok(())
			}
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(err.into()),
		}
	}

	fn read_session(&self) -> Option<Session> {
		let mut map = self.load()?;
		Session::from_fields(|field| map.remove(field.key()))
	}
}
