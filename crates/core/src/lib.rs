//! Instance-scoped login and session gating for Evolution API managers.
//!
//! The crate sequences three steps into a login:
//!
//! 1. [`ServerVerifier`] checks that a base URL hosts a compatible server.
//! 2. [`InstanceKeyClassifier`] resolves an API key to exactly one instance.
//! 3. [`TokenStore`] persists the resulting [`Session`] as a unit.
//!
//! [`SessionOrchestrator`] drives the sequence and turns every failure into a
//! field-level error. [`RouteGuard`] gates protected paths on a complete
//! session and [`AutoLoginTrigger`] replays a login from an entry URL once.
//!
//! # Example
//!
//! ```ignore
//! let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(path));
//! let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(Duration::from_secs(10))?);
//! let orchestrator = SessionOrchestrator::new(transport, Arc::clone(&store));
//!
//! match orchestrator.login("https://evo.example.com/", "instance-key").await? {
//!     LoginOutcome::Authenticated { target } => println!("go to {target}"),
//!     LoginOutcome::Rejected { errors } => eprintln!("{errors:?}"),
//! }
//! assert!(RouteGuard::new(store).is_authorized());
//! ```

pub mod auto_login;
pub mod classifier;
pub mod error;
pub mod guard;
pub mod orchestrator;
pub mod session;
pub mod testing;
pub mod token_store;
pub mod transport;
pub mod verifier;

pub use auto_login::{AutoLoginParams, AutoLoginTrigger};
pub use classifier::{Instance, InstanceKeyClassifier, InstanceValidation};
pub use error::{Result, SessionError};
pub use guard::{GuardDecision, RouteGuard};
pub use orchestrator::{FieldError, LoginErrorKind, LoginField, LoginForm, LoginOutcome, SessionOrchestrator, logout};
pub use session::{Session, TokenField};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{HttpTransport, Transport, normalize_base_url};
pub use verifier::{ServerInfo, ServerVerifier};

/// Path of the login entry point that unauthorized navigation redirects to.
pub const LOGIN_PATH: &str = "/manager/login";

/// Returns the post-login navigation target for an instance.
pub fn dashboard_path(instance_id: &str) -> String {
	format!("/manager/instance/{instance_id}/dashboard")
}
