//! Wire types for the Evolution API endpoints used during login.
//!
//! This crate contains the serde-serializable shapes exchanged with the
//! server's root info endpoint and its instance-listing endpoint, plus the
//! query parameter and header names the login flow depends on.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * Lenient on input: Unknown fields are ignored
//! * Stable: Changes only when the server's response shapes change
//!
//! Classification and session rules live in `evo-session`.

pub mod instance;
pub mod server;

pub use instance::*;
pub use server::*;

/// Header carrying the API key on authenticated requests.
pub const API_KEY_HEADER: &str = "apikey";

/// Entry URL query parameter naming the server base URL.
pub const SERVER_URL_PARAM: &str = "serverUrl";

/// Entry URL query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "apiKey";
