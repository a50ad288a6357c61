//! `guard`: route-guard decision for a protected path.

use evo_session::GuardDecision;
use serde_json::json;

use super::CommandOutcome;
use crate::context::CommandContext;
use crate::output::{CommandError, CommandInputs, ErrorCode};

pub(super) fn run(ctx: &CommandContext, path: &str) -> CommandOutcome {
	let inputs = CommandInputs {
		path: Some(path.to_string()),
		..Default::default()
	};

	match ctx.guard().check(path) {
		GuardDecision::Render(path) => CommandOutcome {
			inputs,
			data: json!({ "decision": "render", "path": path }),
			..Default::default()
		},
		GuardDecision::Redirect(login) => CommandOutcome {
			inputs,
			data: json!({ "decision": "redirect", "redirect": login }),
			error: Some(CommandError {
				code: ErrorCode::Unauthorized,
				message: format!("No complete session; redirect to {login}"),
				details: None,
			}),
			..Default::default()
		},
	}
}
