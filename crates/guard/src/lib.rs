//! `medconsole-guard` — the per-navigation decision function.
//!
//! The routing runtime calls [`NavigationGuard::before_each`] ahead of
//! every route transition; the guard reads session and registry state and
//! returns exactly one verdict: allow, redirect, or defer-and-replay.

use std::sync::Arc;

use medconsole_routing::{RouteRegistry, SharedRegistry, shared};
use medconsole_session::{KeyValueStore, PortalApi, Session};

pub mod guard;

pub use guard::{GuardVerdict, NavigationGuard, NavigationRequest};

/// The wired core services, the way the UI shell boots them.
pub struct AppCore {
    pub session: Arc<Session>,
    pub registry: SharedRegistry,
    pub guard: NavigationGuard,
}

/// Install the static catalog, restore any persisted session, and wire the
/// guard to the shared services.
pub fn bootstrap(api: Arc<dyn PortalApi>, store: Arc<dyn KeyValueStore>) -> AppCore {
    let registry = shared(RouteRegistry::new());
    {
        let mut registry = registry
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        registry.install_static();
    }

    let session = Arc::new(Session::new(api, store, registry.clone()));
    session.restore();

    let guard = NavigationGuard::new(session.clone(), registry.clone());
    AppCore {
        session,
        registry,
        guard,
    }
}
