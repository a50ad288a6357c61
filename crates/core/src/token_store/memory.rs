use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::TokenStore;
use crate::error::Result;
use crate::session::{Session, TokenField};

/// In-process token store.
///
/// Backs tests and embedders that keep the session for the lifetime of the
/// process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
	fields: RwLock<BTreeMap<TokenField, String>>,
}

impl MemoryTokenStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store pre-populated with raw field values, bypassing the
	/// whole-session write path. Useful for reproducing partial state.
	pub fn with_fields<'a>(fields: impl IntoIterator<Item = (TokenField, &'a str)>) -> Self {
		let map = fields.into_iter().map(|(field, value)| (field, value.to_string())).collect();
		Self { fields: RwLock::new(map) }
	}

	pub fn is_empty(&self) -> bool {
		self.fields.read().is_empty()
	}
}

impl TokenStore for MemoryTokenStore {
	fn save(&self, session: &Session) -> Result<()> {
		let next: BTreeMap<_, _> = session.entries().map(|(field, value)| (field, value.to_string())).collect();
		*self.fields.write() = next;
		Ok(())
	}

	fn read(&self, field: TokenField) -> Option<String> {
		self.fields.read().get(&field).cloned()
	}

	fn clear(&self) -> Result<()> {
		self.fields.write().clear();
		Ok(())
	}
}
