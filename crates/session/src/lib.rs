//! `medconsole-session` — the authenticated session service and its
//! collaborators.
//!
//! [`Session`] owns the token, profile, granted menus and permissions, and
//! the menus-loaded flag, and orchestrates login, profile/menu fetches and
//! logout. The transport ([`PortalApi`]) and the durable key/value store
//! ([`KeyValueStore`]) are traits so the guard and UI layers can be driven
//! against in-memory doubles.

pub mod api;
pub mod config;
pub mod http;
pub mod session;
pub mod store;

pub use api::{Credentials, PortalApi, RegisterForm};
pub use config::ClientConfig;
pub use http::HttpPortalApi;
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, keys};
