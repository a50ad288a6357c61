//! Root info endpoint (`GET <base>/`).

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Path of the server info endpoint, relative to the base URL.
pub const SERVER_INFO_PATH: &str = "/";

/// Body returned by the server info endpoint.
///
/// Only `version` decides compatibility. Fields of an unexpected type read
/// as absent instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfoBody {
	#[serde(default, deserialize_with = "lenient_string")]
	pub version: Option<String>,
	#[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
	pub client_name: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Field {
		Text(String),
		Other(IgnoredAny),
	}

	Ok(match Field::deserialize(deserializer)? {
		Field::Text(text) => Some(text),
		Field::Other(_) => None,
	})
}
