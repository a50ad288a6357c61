//! Server reachability and compatibility check.

use std::sync::Arc;

use evo_protocol::{SERVER_INFO_PATH, ServerInfoBody};
use serde::Serialize;
use tracing::{debug, info};

use crate::transport::{Transport, endpoint};

/// Identity reported by a compatible server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
	pub version: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_name: Option<String>,
}

impl ServerInfo {
	/// Extracts server identity from a decoded info body.
	///
	/// A missing or empty `version` marks the server as incompatible.
	pub fn from_body(body: ServerInfoBody) -> Option<Self> {
		let version = body.version.filter(|v| !v.is_empty())?;
		Some(Self {
			version,
			client_name: body.client_name,
		})
	}
}

/// Checks that a base URL hosts a reachable, compatible server.
#[derive(Clone)]
pub struct ServerVerifier {
	transport: Arc<dyn Transport>,
}

impl ServerVerifier {
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self { transport }
	}

	/// Fetches the root info endpoint of `url`.
	///
	/// Returns `None` when the request fails, the body is not a server info
	/// object, or it lacks a version. Callers cannot tell these apart.
	pub async fn verify(&self, url: &str) -> Option<ServerInfo> {
		let info_url = endpoint(url, SERVER_INFO_PATH);

		let body = match self.transport.get_json(&info_url, &[]).await {
			Ok(body) => body,
			Err(err) => {
				debug!(target: "evo.verify", url = %info_url, error = %err, "server info request failed");
				return None;
			}
		};

		let parsed: ServerInfoBody = match serde_json::from_value(body) {
			Ok(parsed) => parsed,
			Err(err) => {
				debug!(target: "evo.verify", url = %info_url, error = %err, "server info body malformed");
				return None;
			}
		};

		let Some(info) = ServerInfo::from_body(parsed) else {
			debug!(target: "evo.verify", url = %info_url, "server info lacks version");
			return None;
		};

		info!(target: "evo.verify", url = %info_url, version = %info.version, client = ?info.client_name, "server verified");
		Some(info)
	}
}
