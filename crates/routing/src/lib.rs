//! `medconsole-routing` — route catalogs and the live route registry.
//!
//! The static catalog (login, register, not-found) is always installed. The
//! dynamic-template catalog declares every authenticated page once; the
//! registry merges the server's granted menu list against it to produce the
//! installed route tree the shell navigates.

use std::sync::{Arc, RwLock};

pub mod catalog;
pub mod node;
pub mod registry;

pub use node::{PageRef, RouteMeta, RouteNode, join_paths, normalize_menu_path};
pub use registry::{MergeReport, RouteRegistry};

/// Registry handle shared between the session service and the guard.
pub type SharedRegistry = Arc<RwLock<RouteRegistry>>;

/// Wrap a registry for sharing across the session and guard services.
pub fn shared(registry: RouteRegistry) -> SharedRegistry {
    Arc::new(RwLock::new(registry))
}
