//! Login form inputs and the field-level error taxonomy.

use std::fmt;

use serde::Serialize;
use url::Url;

/// Input a field error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginField {
	ServerUrl,
	ApiKey,
}

impl LoginField {
	pub fn name(self) -> &'static str {
		match self {
			LoginField::ServerUrl => "serverUrl",
			LoginField::ApiKey => "apiKey",
		}
	}
}

impl fmt::Display for LoginField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Reasons a login attempt is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginErrorKind {
	/// The server URL is unreachable or does not report a version.
	InvalidServer,
	/// The key administers several instances.
	GlobalKeyDetected,
	/// No instance, a malformed listing, or a failed listing request.
	InvalidCredentials,
	/// The listing was valid but carried no usable instance.
	NoInstanceFound,
	/// The server URL is not an absolute URL.
	InvalidUrl,
	/// The API key is empty.
	ApiKeyRequired,
}

impl LoginErrorKind {
	pub fn field(self) -> LoginField {
		match self {
			LoginErrorKind::InvalidServer | LoginErrorKind::InvalidUrl => LoginField::ServerUrl,
			LoginErrorKind::GlobalKeyDetected
			| LoginErrorKind::InvalidCredentials
			| LoginErrorKind::NoInstanceFound
			| LoginErrorKind::ApiKeyRequired => LoginField::ApiKey,
		}
	}

	/// Translation key under `login.message`.
	pub fn message_key(self) -> &'static str {
		match self {
			LoginErrorKind::InvalidServer => "login.message.invalidServer",
			LoginErrorKind::GlobalKeyDetected => "login.message.globalKeyDetected",
			LoginErrorKind::InvalidCredentials => "login.message.invalidCredentials",
			LoginErrorKind::NoInstanceFound => "login.message.noInstanceFound",
			LoginErrorKind::InvalidUrl => "login.message.invalidUrl",
			LoginErrorKind::ApiKeyRequired => "login.message.apiKeyRequired",
		}
	}

	/// Default English message.
	pub fn message(self) -> &'static str {
		match self {
			LoginErrorKind::InvalidServer => "invalid server",
			LoginErrorKind::GlobalKeyDetected => "global key detected",
			LoginErrorKind::InvalidCredentials => "invalid credentials",
			LoginErrorKind::NoInstanceFound => "no instance found",
			LoginErrorKind::InvalidUrl => "invalid URL",
			LoginErrorKind::ApiKeyRequired => "API key is required",
		}
	}
}

/// Error attached to one login input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
	pub field: LoginField,
	pub kind: LoginErrorKind,
	pub message_key: &'static str,
	pub message: &'static str,
}

impl From<LoginErrorKind> for FieldError {
	fn from(kind: LoginErrorKind) -> Self {
		Self {
			field: kind.field(),
			kind,
			message_key: kind.message_key(),
			message: kind.message(),
		}
	}
}

impl fmt::Display for FieldError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.field, self.message)
	}
}

/// Values submitted through the login surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
	pub server_url: String,
	pub api_key: String,
}

impl LoginForm {
	pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
		Self {
			server_url: server_url.into(),
			api_key: api_key.into(),
		}
	}

	/// Checks the inputs before anything touches the network.
	///
	/// The server URL must be absolute with a host; the key must be non-empty.
	/// Every failing field is reported.
	pub fn validate(&self) -> Vec<FieldError> {
		let mut errors = Vec::new();
		let url_ok = Url::parse(&self.server_url).is_ok_and(|url| url.has_host());
		if !url_ok {
			errors.push(LoginErrorKind::InvalidUrl.into());
		}
		if self.api_key.is_empty() {
			errors.push(LoginErrorKind::ApiKeyRequired.into());
		}
		errors
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn each_kind_targets_its_input() {
		assert_eq!(LoginErrorKind::InvalidServer.field(), LoginField::ServerUrl);
		assert_eq!(LoginErrorKind::GlobalKeyDetected.field(), LoginField::ApiKey);
		assert_eq!(LoginErrorKind::NoInstanceFound.field(), LoginField::ApiKey);
	}

	#[test]
	fn global_key_message_is_distinct_from_invalid_credentials() {
		assert_ne!(LoginErrorKind::GlobalKeyDetected.message(), LoginErrorKind::InvalidCredentials.message());
		assert_ne!(LoginErrorKind::GlobalKeyDetected.message_key(), LoginErrorKind::InvalidCredentials.message_key());
	}

	#[test]
	fn field_error_serializes_for_output() {
		let value = serde_json::to_value(FieldError::from(LoginErrorKind::GlobalKeyDetected)).unwrap();
		assert_eq!(value["field"], "apiKey");
		assert_eq!(value["kind"], "globalKeyDetected");
		assert_eq!(value["messageKey"], "login.message.globalKeyDetected");
		assert_eq!(value["message"], "global key detected");
	}

	#[test]
	fn validate_accepts_absolute_urls() {
		assert!(LoginForm::new("https://evo.example.com/", "k").validate().is_empty());
		assert!(LoginForm::new("http://127.0.0.1:8080", "k").validate().is_empty());
	}

	#[test]
	fn validate_reports_every_bad_field() {
		let kinds: Vec<_> = LoginForm::new("evo.example.com", "").validate().into_iter().map(|e| e.kind).collect();
		assert_eq!(kinds, [LoginErrorKind::InvalidUrl, LoginErrorKind::ApiKeyRequired]);

		let kinds: Vec<_> = LoginForm::new("mailto:ops@example.com", "k").validate().into_iter().map(|e| e.kind).collect();
		assert_eq!(kinds, [LoginErrorKind::InvalidUrl]);
	}
}
