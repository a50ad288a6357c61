//! `login`: manual form submission.

use evo_session::{LoginForm, LoginOutcome};
use serde_json::{Value, json};

use super::CommandOutcome;
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{CommandError, CommandInputs, ErrorCode};

pub(super) async fn run(ctx: &CommandContext, server_url: Option<String>, api_key: String) -> Result<CommandOutcome> {
	let server_url = server_url.or_else(|| ctx.config.default_server_url.clone()).unwrap_or_default();
	let form = LoginForm::new(server_url, api_key);

	let outcome = ctx.orchestrator()?.submit(&form).await?;

	let inputs = CommandInputs {
		server_url: Some(form.server_url),
		..Default::default()
	};
	Ok(report(ctx, outcome, inputs, json!({})))
}

/// Turns a login outcome into command output, merging `extra` into the data.
pub(super) fn report(ctx: &CommandContext, outcome: LoginOutcome, inputs: CommandInputs, extra: Value) -> CommandOutcome {
	match outcome {
		LoginOutcome::Authenticated { target } => {
			let session = ctx.store().read_session();
			let data = json!({
				"authenticated": true,
				"target": target,
				"instanceId": session.as_ref().map(|s| &s.instance_id),
				"instanceName": session.as_ref().map(|s| &s.instance_name),
				"version": session.as_ref().map(|s| &s.version),
			});
			CommandOutcome {
				inputs,
				data: merge(data, extra),
				..Default::default()
			}
		}
		LoginOutcome::Rejected { errors } => {
			let message = errors.iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
			CommandOutcome {
				inputs,
				data: merge(json!({ "authenticated": false }), extra),
				error: Some(CommandError {
					code: ErrorCode::LoginRejected,
					message,
					details: Some(json!({ "fieldErrors": errors })),
				}),
				..Default::default()
			}
		}
	}
}

fn merge(mut base: Value, extra: Value) -> Value {
	if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
		base.extend(extra);
	}
	base
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_adds_extra_keys() {
		let merged = merge(json!({ "authenticated": true }), json!({ "triggered": true }));
		assert_eq!(merged, json!({ "authenticated": true, "triggered": true }));
	}

	#[test]
	fn merge_ignores_non_object_extra() {
		assert_eq!(merge(json!({ "a": 1 }), Value::Null), json!({ "a": 1 }));
	}
}
