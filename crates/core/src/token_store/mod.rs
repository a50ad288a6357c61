//! Session token persistence.
//!
//! A [`TokenStore`] holds the fields of at most one [`Session`]. Writers
//! replace the whole session at once; readers look fields up one at a time
//! and always get an explicit `None` for anything not stored.

mod file;
mod memory;

#[cfg(test)]
mod tests;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::Result;
use crate::session::{Session, TokenField};

/// Storage medium shared by the orchestrator and the route guard.
pub trait TokenStore: Send + Sync {
	/// Replaces any stored session with `session`.
	///
	/// Readers observe either the previous session or the new one, never a
	/// mix of both.
	fn save(&self, session: &Session) -> Result<()>;

	/// Reads one field. Missing storage, missing fields and unreadable
	/// storage all yield `None`.
	fn read(&self, field: TokenField) -> Option<String>;

	/// Removes every session field. Clearing an empty store succeeds.
	fn clear(&self) -> Result<()>;

	/// Reads back the stored session if all required fields are present.
	fn read_session(&self) -> Option<Session> {
		Session::from_fields(|field| self.read(field))
	}
}
