//! `status`: inspect the stored session without touching it.

use evo_session::{TokenField, TokenStore};
use serde_json::json;

use super::CommandOutcome;
use crate::context::CommandContext;
use crate::output::DiagnosticLevel;

pub(super) fn run(ctx: &CommandContext) -> CommandOutcome {
	let store = ctx.store();
	let authorized = ctx.guard().is_authorized();

	let mut data = serde_json::Map::new();
	data.insert("authorized".into(), authorized.into());
	for field in TokenField::ALL {
		let value = store.read(field).map(|v| if field == TokenField::InstanceToken { mask_secret(&v) } else { v });
		data.insert(field.key().into(), value.into());
	}

	let missing: Vec<_> = missing_required(store.as_ref());
	data.insert("missing".into(), json!(missing));

	let diagnostics = if authorized {
		Vec::new()
	} else if missing.len() == TokenField::REQUIRED.len() {
		vec![(DiagnosticLevel::Info, "No session stored; run `evo login`".to_string())]
	} else {
		vec![(DiagnosticLevel::Warning, format!("Incomplete session (missing {}); protected paths redirect to login", missing.join(", ")))]
	};

	CommandOutcome {
		data: data.into(),
		diagnostics,
		..Default::default()
	}
}

fn missing_required(store: &dyn TokenStore) -> Vec<&'static str> {
	TokenField::REQUIRED
		.into_iter()
		.filter(|field| store.read(*field).is_none_or(|v| v.is_empty()))
		.map(TokenField::key)
		.collect()
}

/// Keeps the first four characters of a secret.
fn mask_secret(secret: &str) -> String {
	let visible: String = secret.chars().take(4).collect();
	if visible.len() == secret.len() {
		"****".to_string()
	} else {
		format!("{visible}****")
	}
}

#[cfg(test)]
mod tests {
	use evo_session::MemoryTokenStore;

	use super::*;

	#[test]
	fn masks_all_but_prefix() {
		assert_eq!(mask_secret("B6D711FCDE4D"), "B6D7****");
		assert_eq!(mask_secret("abc"), "****");
		assert_eq!(mask_secret(""), "****");
	}

	#[test]
	fn lists_missing_and_empty_required_fields() {
		let store = MemoryTokenStore::with_fields([(TokenField::ApiUrl, "https://host"), (TokenField::InstanceId, "abc"), (TokenField::Version, "")]);
		assert_eq!(missing_required(&store), ["instanceToken", "version"]);
	}
}
