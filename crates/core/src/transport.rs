//! HTTP seam used by the verifier and the classifier.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use crate::error::{Result, SessionError};

/// Issues read-only JSON requests.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Sends `GET url` with `headers` and returns the decoded JSON body.
	///
	/// Non-success statuses are errors.
	async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
}

impl HttpTransport {
	/// Builds a transport whose requests fail after `timeout`.
	pub fn new(timeout: Duration) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.user_agent(concat!("evo/", env!("CARGO_PKG_VERSION")))
			.build()?;
		Ok(Self { client })
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value> {
		let mut request = self.client.get(url);
		for (name, value) in headers {
			request = request.header(*name, *value);
		}

		let response = request.send().await?;
		let status = response.status();
		trace!(target: "evo.http", %url, status = status.as_u16(), "response received");

		if !status.is_success() {
			return Err(SessionError::Status {
				url: url.to_string(),
				status: status.as_u16(),
			});
		}

		Ok(response.json().await?)
	}
}

/// Strips exactly one trailing `/` from a base URL.
pub fn normalize_base_url(url: &str) -> &str {
	url.strip_suffix('/').unwrap_or(url)
}

/// Joins a normalized base URL with an endpoint path starting with `/`.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
	format!("{}{}", normalize_base_url(base), path)
}
