//! `medconsole-auth` — pure authorization predicates.
//!
//! Stateless boolean checks over the session's granted permission codes and
//! the profile's role codes. No IO, no session mutation; safe to call from
//! rendering code. Absent or empty grant sets simply evaluate to false.

pub mod evaluate;
pub mod permissions;
pub mod visibility;

pub use evaluate::{
    has_all_permissions, has_any_permission, has_any_role, has_permission, has_role,
};
pub use permissions::Permission;
pub use visibility::{VisibilityRule, element_visible};
