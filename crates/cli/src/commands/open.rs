//! `open`: one-shot login from entry URL query parameters.

use evo_session::AutoLoginTrigger;
use serde_json::json;
use url::Url;

use super::CommandOutcome;
use super::login::report;
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{CommandError, CommandInputs, DiagnosticLevel, ErrorCode};

pub(super) async fn run(ctx: &CommandContext, entry_url: &str) -> Result<CommandOutcome> {
	let entry = match Url::parse(entry_url) {
		Ok(entry) => entry,
		Err(err) => {
			return Ok(CommandOutcome {
				data: json!({ "triggered": false }),
				error: Some(CommandError {
					code: ErrorCode::InvalidInput,
					message: format!("Invalid entry URL: {err}"),
					details: None,
				}),
				..Default::default()
			});
		}
	};

	// Entry URLs carry the API key; echo only the path.
	let inputs = CommandInputs {
		path: Some(entry.path().to_string()),
		..Default::default()
	};

	let trigger = AutoLoginTrigger::new();
	match trigger.on_mount(&entry, &ctx.orchestrator()?).await? {
		Some(outcome) => Ok(report(ctx, outcome, inputs, json!({ "triggered": true }))),
		None => Ok(CommandOutcome {
			inputs,
			data: json!({ "triggered": false }),
			diagnostics: vec![(DiagnosticLevel::Info, "Entry URL carries no serverUrl/apiKey pair; nothing submitted".into())],
			..Default::default()
		}),
	}
}
