//! Scripted transport for exercising the login flow without a server.
//!
//! # Example
//!
//! ```ignore
//! let transport = FakeTransport::new()
//!     .respond("https://host/", json!({ "version": "1.2.0" }))
//!     .respond("https://host/instance/fetchInstances", json!([]));
//! let orchestrator = SessionOrchestrator::new(Arc::new(transport.clone()), store);
//! orchestrator.login("https://host/", "key").await?;
//! assert_eq!(transport.requests().len(), 2);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{Result, SessionError};
use crate::transport::Transport;

#[derive(Debug, Clone)]
enum Reply {
	Body(Value),
	Status(u16),
}

/// A request captured by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
	pub url: String,
	pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
	}
}

/// In-memory [`Transport`] answering from a URL-keyed script.
///
/// Unscripted URLs fail like an unreachable host. Clones share the script
/// and the request log.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
	replies: Arc<Mutex<HashMap<String, Reply>>>,
	requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers `GET url` with `body`.
	pub fn respond(self, url: &str, body: Value) -> Self {
		self.replies.lock().insert(url.to_string(), Reply::Body(body));
		self
	}

	/// Answers `GET url` with a non-success `status`.
	pub fn fail_with_status(self, url: &str, status: u16) -> Self {
		self.replies.lock().insert(url.to_string(), Reply::Status(status));
		self
	}

	/// Returns every request issued so far.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}
}

#[async_trait]
impl Transport for FakeTransport {
	async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value> {
		self.requests.lock().push(RecordedRequest {
			url: url.to_string(),
			headers: headers.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect(),
		});

		let reply = self.replies.lock().get(url).cloned();
		match reply {
			Some(Reply::Body(body)) => Ok(body),
			Some(Reply::Status(status)) => Err(SessionError::Status {
				url: url.to_string(),
				status,
			}),
			None => Err(SessionError::Io(std::io::Error::new(
				std::io::ErrorKind::ConnectionRefused,
				format!("no scripted reply for {url}"),
			))),
		}
	}
}
