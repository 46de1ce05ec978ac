//! Client side of the REST surface: a typed API client and the transient
//! UI session state it drives.
//!
//! Moderation ordering is enforced here only. The server does not re-check
//! a verdict before running a generation call.

pub mod api;
pub mod state;

pub use api::ApiClient;
pub use state::{ChatEntry, GeneratedImage, Platform, Session, SessionState, Speaker};
