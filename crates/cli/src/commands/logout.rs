//! `logout`: destroy the stored session.

use serde_json::json;

use super::CommandOutcome;
use crate::context::CommandContext;
use crate::error::Result;

pub(super) fn run(ctx: &CommandContext) -> Result<CommandOutcome> {
	let had_session = ctx.paths.session_file.exists();
	let redirect = evo_session::logout(ctx.store().as_ref())?;

	Ok(CommandOutcome {
		data: json!({
			"loggedOut": true,
			"cleared": had_session,
			"redirect": redirect,
		}),
		..Default::default()
	})
}
