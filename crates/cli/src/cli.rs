use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "evo")]
#[command(about = "Evolution API manager - instance login and session gate")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Toon)]
	pub format: OutputFormat,

	/// State directory holding config.json and the session file
	#[arg(long, global = true, value_name = "DIR")]
	pub home: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Verify a server and bind a session to the instance an API key resolves to
	Login {
		/// Server base URL (defaults to `defaultServerUrl` from config.json)
		#[arg(long, short = 's', value_name = "URL")]
		server_url: Option<String>,

		/// Instance API key
		#[arg(long, short = 'k', value_name = "KEY")]
		api_key: String,
	},

	/// Log in from an entry URL carrying `serverUrl` and `apiKey` query parameters
	Open {
		/// Entry URL, e.g. https://manager.example.com/manager/login?serverUrl=...&apiKey=...
		#[arg(value_name = "ENTRY_URL")]
		entry_url: String,
	},

	/// Destroy the stored session
	Logout,

	/// Show the stored session
	Status,

	/// Check whether a protected path may render
	Guard {
		/// Protected path to check
		#[arg(default_value = "/manager")]
		path: String,
	},
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Login { .. } => "login",
			Commands::Open { .. } => "open",
			Commands::Logout => "logout",
			Commands::Status => "status",
			Commands::Guard { .. } => "guard",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_login_flags() {
		let cli = Cli::try_parse_from(["evo", "-f", "json", "login", "--server-url", "https://host", "--api-key", "k"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Json);
		match cli.command {
			Commands::Login { server_url, api_key } => {
				assert_eq!(server_url.as_deref(), Some("https://host"));
				assert_eq!(api_key, "k");
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn guard_defaults_to_manager_root() {
		let cli = Cli::try_parse_from(["evo", "guard"]).unwrap();
		assert!(matches!(cli.command, Commands::Guard { ref path } if path == "/manager"));
		assert_eq!(cli.format, OutputFormat::Toon);
	}

	#[test]
	fn login_requires_api_key() {
		assert!(Cli::try_parse_from(["evo", "login", "--server-url", "https://host"]).is_err());
	}

	#[test]
	fn verify_cli() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}
}
