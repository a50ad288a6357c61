//! Command implementations and dispatch.

mod guard;
mod login;
mod logout;
mod open;
mod status;

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{CommandError, CommandInputs, DiagnosticLevel, ResultBuilder, print_error_stderr, print_result};

/// What a command produced, before it is wrapped in the result envelope.
#[derive(Debug, Default)]
pub struct CommandOutcome {
	pub inputs: CommandInputs,
	pub data: Value,
	pub error: Option<CommandError>,
	pub diagnostics: Vec<(DiagnosticLevel, String)>,
}

/// Runs the parsed command and prints its result. Returns whether it succeeded.
pub async fn dispatch(cli: Cli) -> Result<bool> {
	let start = Instant::now();
	let name = cli.command.name();
	let ctx = CommandContext::new(cli.home.as_deref())?;
	debug!(target: "evo.cli", command = name, home = %ctx.paths.home.display(), "dispatching");

	let outcome = match cli.command {
		Commands::Login { server_url, api_key } => login::run(&ctx, server_url, api_key).await?,
		Commands::Open { entry_url } => open::run(&ctx, &entry_url).await?,
		Commands::Logout => logout::run(&ctx)?,
		Commands::Status => status::run(&ctx),
		Commands::Guard { path } => guard::run(&ctx, &path),
	};

	let mut builder = ResultBuilder::new(name)
		.started_at(start)
		.inputs(outcome.inputs)
		.data(outcome.data)
		.config(ctx.effective_config());
	for (level, message) in outcome.diagnostics {
		builder = builder.diagnostic(level, message);
	}
	if let Some(error) = outcome.error {
		builder = builder.error(error);
	}

	let result = builder.build();
	print_result(&result, cli.format);
	if let Some(error) = &result.error {
		print_error_stderr(error);
	}
	Ok(result.ok)
}
