//! Persisted session schema.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Keys of the token store schema.
///
/// Every field is stored and read independently under [`TokenField::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenField {
	ApiUrl,
	InstanceToken,
	InstanceId,
	InstanceName,
	Version,
	ClientName,
}

impl TokenField {
	/// Every field of the schema, in storage order.
	pub const ALL: [TokenField; 6] = [
		TokenField::ApiUrl,
		TokenField::InstanceToken,
		TokenField::InstanceId,
		TokenField::InstanceName,
		TokenField::Version,
		TokenField::ClientName,
	];

	/// Fields that must all be present and non-empty for a usable session.
	pub const REQUIRED: [TokenField; 4] = [TokenField::ApiUrl, TokenField::InstanceToken, TokenField::InstanceId, TokenField::Version];

	/// Storage key for this field.
	pub fn key(self) -> &'static str {
		match self {
			TokenField::ApiUrl => "apiUrl",
			TokenField::InstanceToken => "instanceToken",
			TokenField::InstanceId => "instanceId",
			TokenField::InstanceName => "instanceName",
			TokenField::Version => "version",
			TokenField::ClientName => "clientName",
		}
	}

	/// Looks a field up by its storage key.
	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|field| field.key() == key)
	}

	pub fn is_required(self) -> bool {
		Self::REQUIRED.contains(&self)
	}
}

impl fmt::Display for TokenField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

/// Credentials and metadata addressing one instance as an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	pub api_url: String,
	pub instance_token: String,
	pub instance_id: String,
	pub instance_name: String,
	pub version: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_name: Option<String>,
}

impl Session {
	/// Returns the value stored under `field`, if the session carries one.
	pub fn get(&self, field: TokenField) -> Option<&str> {
		match field {
			TokenField::ApiUrl => Some(&self.api_url),
			TokenField::InstanceToken => Some(&self.instance_token),
			TokenField::InstanceId => Some(&self.instance_id),
			TokenField::InstanceName => Some(&self.instance_name),
			TokenField::Version => Some(&self.version),
			TokenField::ClientName => self.client_name.as_deref(),
		}
	}

	/// Field/value pairs to persist. Absent optional fields are skipped.
	pub fn entries(&self) -> impl Iterator<Item = (TokenField, &str)> {
		TokenField::ALL.into_iter().filter_map(|field| self.get(field).map(|value| (field, value)))
	}

	/// Rebuilds a session from per-field reads.
	///
	/// Returns `None` unless every required field is present; a missing
	/// `instanceName` reads back as an empty string.
	pub fn from_fields(mut read: impl FnMut(TokenField) -> Option<String>) -> Option<Self> {
		Some(Self {
			api_url: read(TokenField::ApiUrl)?,
			instance_token: read(TokenField::InstanceToken)?,
			instance_id: read(TokenField::InstanceId)?,
			version: read(TokenField::Version)?,
			instance_name: read(TokenField::InstanceName).unwrap_or_default(),
			client_name: read(TokenField::ClientName),
		})
	}
}
