//! Session-completeness gate for protected paths.

use std::sync::Arc;

use tracing::debug;

use crate::LOGIN_PATH;
use crate::session::TokenField;
use crate::token_store::TokenStore;

/// What a protected path should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
	/// Render the requested path.
	Render(String),
	/// Navigate to the login entry point instead.
	Redirect(&'static str),
}

/// Allows protected paths only while a complete session is stored.
///
/// The guard only reads the store; clearing stale state is the
/// orchestrator's job.
#[derive(Clone)]
pub struct RouteGuard {
	store: Arc<dyn TokenStore>,
}

impl RouteGuard {
	pub fn new(store: Arc<dyn TokenStore>) -> Self {
		Self { store }
	}

	/// Returns `true` when every required field is present and non-empty.
	pub fn is_authorized(&self) -> bool {
		is_authorized(self.store.as_ref())
	}

	/// Decides whether `path` renders or redirects to the login path.
	pub fn check(&self, path: &str) -> GuardDecision {
		if self.is_authorized() {
			GuardDecision::Render(path.to_string())
		} else {
			debug!(target: "evo.guard", %path, "incomplete session; redirecting to login");
			GuardDecision::Redirect(LOGIN_PATH)
		}
	}
}

/// Store-level form of [`RouteGuard::is_authorized`].
pub fn is_authorized(store: &dyn TokenStore) -> bool {
	TokenField::REQUIRED
		.into_iter()
		.all(|field| store.read(field).is_some_and(|value| !value.is_empty()))
}
