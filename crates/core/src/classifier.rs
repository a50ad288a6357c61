//! API key classification by the number of instances it resolves to.

use std::sync::Arc;

use evo_protocol::{API_KEY_HEADER, FETCH_INSTANCES_PATH, InstanceRecord};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::transport::{Transport, endpoint};

/// Instance fields carried by a valid classification, copied from the server.
pub type Instance = InstanceRecord;

pub(crate) const INVALID_RESPONSE_REASON: &str = "Invalid API response";
pub(crate) const NO_MATCH_REASON: &str = "No instance found with this key";
pub(crate) const GLOBAL_KEY_REASON: &str = "Global API Key detected";
pub(crate) const TRANSPORT_FAILURE_REASON: &str = "Authentication failed";

/// Outcome of classifying an API key.
///
/// Transport failures share the [`InvalidResponse`](Self::InvalidResponse)
/// tag with malformed bodies; only [`reason`](Self::reason) differs, and it is
/// for display and logs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceValidation {
	/// The key resolves to exactly one instance. The payload is `None` when
	/// that lone element is not a usable instance record.
	Valid(Option<Instance>),
	/// The key resolves to no instance.
	InvalidNoMatch,
	/// The key administers several instances and cannot back a session.
	InvalidGlobalKey { instances: usize },
	/// The listing was not a collection, or could not be fetched.
	InvalidResponse { reason: String },
}

impl InstanceValidation {
	/// Classifies a decoded instance-listing body.
	pub fn from_body(body: &Value) -> Self {
		let Some(records) = body.as_array() else {
			return Self::InvalidResponse {
				reason: INVALID_RESPONSE_REASON.to_string(),
			};
		};

		match records.as_slice() {
			[] => Self::InvalidNoMatch,
			[record] => Self::Valid(serde_json::from_value(record.clone()).ok()),
			many => Self::InvalidGlobalKey { instances: many.len() },
		}
	}

	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid(_))
	}

	pub fn is_global_key(&self) -> bool {
		matches!(self, Self::InvalidGlobalKey { .. })
	}

	/// Human-readable reason for invalid outcomes.
	pub fn reason(&self) -> Option<&str> {
		match self {
			Self::Valid(_) => None,
			Self::InvalidNoMatch => Some(NO_MATCH_REASON),
			Self::InvalidGlobalKey { .. } => Some(GLOBAL_KEY_REASON),
			Self::InvalidResponse { reason } => Some(reason),
		}
	}
}

/// Resolves an API key against the instance-listing endpoint.
#[derive(Clone)]
pub struct InstanceKeyClassifier {
	transport: Arc<dyn Transport>,
}

impl InstanceKeyClassifier {
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self { transport }
	}

	/// Lists the instances visible to `apikey` on `url` and classifies the key.
	pub async fn classify(&self, url: &str, apikey: &str) -> InstanceValidation {
		let list_url = endpoint(url, FETCH_INSTANCES_PATH);

		let body = match self.transport.get_json(&list_url, &[(API_KEY_HEADER, apikey)]).await {
			Ok(body) => body,
			Err(err) => {
				warn!(target: "evo.classify", url = %list_url, error = %err, "instance listing failed");
				return InstanceValidation::InvalidResponse {
					reason: TRANSPORT_FAILURE_REASON.to_string(),
				};
			}
		};

		let validation = InstanceValidation::from_body(&body);
		match &validation {
			InstanceValidation::Valid(Some(instance)) => {
				info!(target: "evo.classify", instance_id = %instance.id, status = %instance.connection_status, "key bound to single instance")
			}
			other => debug!(target: "evo.classify", url = %list_url, outcome = ?other.reason(), "key rejected"),
		}
		validation
	}
}
