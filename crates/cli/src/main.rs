use anyhow::Context;
use clap::Parser;
use evo_cli::{cli::Cli, commands, logging};
use tracing::error;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	match run(cli).await {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(err) => {
			error!(target: "evo.cli", error = %format!("{err:#}"), "command failed");
			eprintln!("Error: {err:#}");
			std::process::exit(2);
		}
	}
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
	let command = cli.command.name();
	commands::dispatch(cli).await.with_context(|| format!("`{command}` did not complete"))
}
