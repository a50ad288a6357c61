//! Per-invocation wiring of configuration, token store and HTTP transport.

use std::path::Path;
use std::sync::Arc;

use evo_session::{FileTokenStore, HttpTransport, RouteGuard, SessionOrchestrator, TokenStore};

use crate::config::{CliConfig, StatePaths};
use crate::error::Result;
use crate::output::EffectiveConfig;

/// Shared state for one command execution.
#[derive(Debug)]
pub struct CommandContext {
	pub paths: StatePaths,
	pub config: CliConfig,
	store: Arc<FileTokenStore>,
}

impl CommandContext {
	pub fn new(home_override: Option<&Path>) -> Result<Self> {
		let (paths, config) = StatePaths::resolve(home_override)?;
		let store = Arc::new(FileTokenStore::new(&paths.session_file));
		Ok(Self { paths, config, store })
	}

	/// Session store backing every command of this invocation.
	pub fn store(&self) -> Arc<dyn TokenStore> {
		self.store.clone()
	}

	/// Builds an orchestrator over an HTTP transport honouring the configured timeout.
	pub fn orchestrator(&self) -> Result<SessionOrchestrator> {
		let transport = HttpTransport::new(self.config.request_timeout())?;
		Ok(SessionOrchestrator::new(Arc::new(transport), self.store()))
	}

	pub fn guard(&self) -> RouteGuard {
		RouteGuard::new(self.store())
	}

	pub fn effective_config(&self) -> EffectiveConfig {
		EffectiveConfig {
			home: self.paths.home.clone(),
			session_file: self.paths.session_file.clone(),
			request_timeout_ms: self.config.request_timeout_ms,
		}
	}
}
