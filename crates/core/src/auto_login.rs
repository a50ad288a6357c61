//! One-shot login from credentials embedded in an entry URL.

use std::sync::atomic::{AtomicBool, Ordering};

use evo_protocol::{API_KEY_PARAM, SERVER_URL_PARAM};
use tracing::{debug, info};
use url::Url;

use crate::error::Result;
use crate::orchestrator::{LoginForm, LoginOutcome, SessionOrchestrator};

/// Credentials carried by an entry URL's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoLoginParams {
	pub server_url: String,
	pub api_key: String,
}

impl AutoLoginParams {
	/// Extracts `serverUrl` and `apiKey` from `entry`.
	///
	/// Both must be present and non-empty. The first occurrence of each wins.
	pub fn from_entry_url(entry: &Url) -> Option<Self> {
		let mut server_url = None;
		let mut api_key = None;
		for (name, value) in entry.query_pairs() {
			match name.as_ref() {
				SERVER_URL_PARAM if server_url.is_none() => server_url = Some(value.into_owned()),
				API_KEY_PARAM if api_key.is_none() => api_key = Some(value.into_owned()),
				_ => {}
			}
		}

		let server_url = server_url.filter(|v| !v.is_empty())?;
		let api_key = api_key.filter(|v| !v.is_empty())?;
		Some(Self { server_url, api_key })
	}

	pub fn into_form(self) -> LoginForm {
		LoginForm::new(self.server_url, self.api_key)
	}
}

/// Submits entry-URL credentials at most once for its lifetime.
///
/// Create one trigger per mounted login surface and call
/// [`on_mount`](Self::on_mount) on every render; only the first render that
/// carries credentials submits them.
#[derive(Debug, Default)]
pub struct AutoLoginTrigger {
	fired: AtomicBool,
}

impl AutoLoginTrigger {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn has_fired(&self) -> bool {
		self.fired.load(Ordering::SeqCst)
	}

	/// Submits the credentials found in `entry`, unless the trigger already
	/// fired.
	///
	/// Returns `Ok(None)` when nothing was submitted. The latch is set before
	/// the orchestrator runs and is never reset.
	pub async fn on_mount(&self, entry: &Url, orchestrator: &SessionOrchestrator) -> Result<Option<LoginOutcome>> {
		if self.has_fired() {
			debug!(target: "evo.auto_login", "already triggered; ignoring");
			return Ok(None);
		}

		let Some(params) = AutoLoginParams::from_entry_url(entry) else {
			return Ok(None);
		};

		if self.fired.swap(true, Ordering::SeqCst) {
			return Ok(None);
		}

		info!(target: "evo.auto_login", server_url = %params.server_url, "submitting entry URL credentials");
		orchestrator.submit(&params.into_form()).await.map(Some)
	}
}
