//! Client-side session layer for the notice board.
//!
//! Holds the current authenticated identity and bearer token, persists them
//! across restarts, and projects what the presentation layer may offer:
//! - [`api::ApiClient`] - typed HTTP client for the backend contracts
//! - [`cache::SessionCache`] - versioned on-disk `{token, user}` cache
//! - [`session::Session`] - lifecycle state machine and capability checks
//!
//! The cached identity is not authoritative: it is a local copy of the last
//! successful auth response and can go stale relative to server state. Every
//! call the server rejects is surfaced as an error and leaves the local
//! state untouched.

pub mod api;
pub mod cache;
pub mod errors;
pub mod session;

pub use api::ApiClient;
pub use api::NewNotice;
pub use api::NewUser;
pub use api::NoticeView;
pub use api::Role;
pub use api::SessionUser;
pub use api::UserView;
pub use cache::SessionCache;
pub use errors::ClientError;
pub use session::Identity;
pub use session::Session;
pub use session::SessionState;
