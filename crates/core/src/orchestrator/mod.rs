//! Login sequencing: verify the server, classify the key, persist the session.

mod form;


use std::sync::Arc;

use tracing::{info, warn};

pub use self::form::{FieldError, LoginErrorKind, LoginField, LoginForm};
use crate::classifier::{InstanceKeyClassifier, InstanceValidation};
use crate::error::Result;
use crate::session::Session;
use crate::token_store::TokenStore;
use crate::transport::Transport;
use crate::verifier::ServerVerifier;
use crate::{LOGIN_PATH, dashboard_path};

/// Result of a login attempt that did not hit a storage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
	/// The session was persisted; navigate to `target`.
	Authenticated { target: String },
	/// The attempt stopped at a field-level error. Nothing was persisted.
	Rejected { errors: Vec<FieldError> },
}

impl LoginOutcome {
	fn rejected(kind: LoginErrorKind) -> Self {
		Self::Rejected { errors: vec![kind.into()] }
	}

	pub fn is_authenticated(&self) -> bool {
		matches!(self, Self::Authenticated { .. })
	}

	pub fn target(&self) -> Option<&str> {
		match self {
			Self::Authenticated { target } => Some(target),
			Self::Rejected { .. } => None,
		}
	}

	pub fn field_errors(&self) -> &[FieldError] {
		match self {
			Self::Authenticated { .. } => &[],
			Self::Rejected { errors } => errors,
		}
	}
}

/// Drives verifier, classifier and token store through one login.
#[derive(Clone)]
pub struct SessionOrchestrator {
	verifier: ServerVerifier,
	classifier: InstanceKeyClassifier,
	store: Arc<dyn TokenStore>,
}

impl SessionOrchestrator {
	pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>) -> Self {
		Self {
			verifier: ServerVerifier::new(Arc::clone(&transport)),
			classifier: InstanceKeyClassifier::new(transport),
			store,
		}
	}

	/// Store shared with the route guard.
	pub fn store(&self) -> &Arc<dyn TokenStore> {
		&self.store
	}

	/// Validates a submitted form, then runs [`login`](Self::login).
	///
	/// Invalid input is rejected without network access or store changes.
	pub async fn submit(&self, form: &LoginForm) -> Result<LoginOutcome> {
		let errors = form.validate();
		if !errors.is_empty() {
			return Ok(LoginOutcome::Rejected { errors });
		}
		self.login(&form.server_url, &form.api_key).await
	}

	/// Establishes a session for the instance `apikey` resolves to on `url`.
	///
	/// Each step gates the next. The store is cleared when the server check
	/// fails and written only once the key resolves to a single instance.
	/// Storage failures are the only errors returned.
	pub async fn login(&self, url: &str, apikey: &str) -> Result<LoginOutcome> {
		let Some(server) = self.verifier.verify(url).await else {
			self.store.clear()?;
			warn!(target: "evo.session", %url, "server unreachable or incompatible; session cleared");
			return Ok(LoginOutcome::rejected(LoginErrorKind::InvalidServer));
		};

		let instance = match self.classifier.classify(url, apikey).await {
			InstanceValidation::Valid(instance) => instance,
			InstanceValidation::InvalidGlobalKey { instances } => {
				warn!(target: "evo.session", %url, instances, "global key rejected for interactive login");
				return Ok(LoginOutcome::rejected(LoginErrorKind::GlobalKeyDetected));
			}
			rejected @ (InstanceValidation::InvalidNoMatch | InstanceValidation::InvalidResponse { .. }) => {
				warn!(target: "evo.session", %url, reason = ?rejected.reason(), "credentials rejected");
				return Ok(LoginOutcome::rejected(LoginErrorKind::InvalidCredentials));
			}
		};

		let Some(instance) = instance else {
			warn!(target: "evo.session", %url, "listing carried no usable instance");
			return Ok(LoginOutcome::rejected(LoginErrorKind::NoInstanceFound));
		};

		let session = Session {
			api_url: url.to_string(),
			instance_token: instance.token,
			instance_id: instance.id,
			instance_name: instance.name,
			version: server.version,
			client_name: server.client_name,
		};
		self.store.save(&session)?;

		let target = dashboard_path(&session.instance_id);
		info!(target: "evo.session", instance_id = %session.instance_id, instance = %session.instance_name, version = %session.version, "logged in");
		Ok(LoginOutcome::Authenticated { target })
	}

	/// Destroys the session and returns the login entry path.
	pub fn logout(&self) -> Result<&'static str> {
		logout(self.store.as_ref())
	}
}

/// Store-level form of [`SessionOrchestrator::logout`]; needs no transport.
pub fn logout(store: &dyn TokenStore) -> Result<&'static str> {
	store.clear()?;
	info!(target: "evo.session", "logged out");
	Ok(LOGIN_PATH)
}
