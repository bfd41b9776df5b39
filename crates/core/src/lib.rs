//! `medconsole-core` — shared client foundation.
//!
//! Error model, server response envelope, and the validated payload types
//! (menu tree, user profile) consumed by the session and routing layers.
//! No transport or storage concerns live here.

pub mod envelope;
pub mod error;
pub mod menu;
pub mod profile;

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use menu::{MenuNode, RawMenuNode, sanitize_menus};
pub use profile::{ROLE_ADMIN, ROLE_DOCTOR, ROLE_ORDINARY_USER, UserProfile};
