//! Navigation guard state machine.
//!
//! No state of its own: each decision is computed fresh from the session
//! (token, loaded flag, role), the installed route tree, and the target.
//! Rule order is load-bearing; later rules assume the invariants earlier
//! rules established (the not-found check, for one, is only meaningful
//! after the menu load has had its chance to install dynamic routes).

use std::sync::{Arc, PoisonError};

use medconsole_core::ROLE_ORDINARY_USER;
use medconsole_routing::catalog::paths;
use medconsole_routing::SharedRegistry;
use medconsole_session::Session;

/// A navigation attempt as handed over by the routing runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl NavigationRequest {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Outcome of a guard evaluation. Exactly one per navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    Allow,
    /// Send the navigation elsewhere. `replace` keeps the aborted attempt
    /// out of the history stack.
    Redirect { to: String, replace: bool },
    /// Dynamic routes were installed mid-flight; re-run the original
    /// navigation (same path and query) with replace semantics.
    Replay(NavigationRequest),
}

impl GuardVerdict {
    fn redirect(to: &str) -> Self {
        Self::Redirect {
            to: to.to_string(),
            replace: false,
        }
    }
}

pub struct NavigationGuard {
    session: Arc<Session>,
    registry: SharedRegistry,
}

impl NavigationGuard {
    pub fn new(session: Arc<Session>, registry: SharedRegistry) -> Self {
        Self { session, registry }
    }

    /// Decide a navigation attempt.
    pub async fn before_each(&self, to: &NavigationRequest) -> GuardVerdict {
        let authenticated = self.session.is_authenticated();
        let entry_page = to.path == paths::LOGIN || to.path == paths::REGISTER;

        // 1. Unauthenticated sessions only reach the entry pages.
        if !authenticated {
            if entry_page {
                return GuardVerdict::Allow;
            }
            return GuardVerdict::redirect(paths::LOGIN);
        }

        // 2. Authenticated users skip the entry pages toward their landing.
        if entry_page {
            return GuardVerdict::redirect(self.landing());
        }

        // 3. First gated navigation after login: load menus, then replay
        //    the exact original target.
        if !self.session.menus_loaded() {
            return match self.session.fetch_menus().await {
                Ok(()) => GuardVerdict::Replay(to.clone()),
                Err(err) => {
                    tracing::warn!(path = %to.path, "menu load failed during navigation: {err}");
                    if err.is_auth() {
                        self.session.clear();
                    }
                    GuardVerdict::redirect(paths::LOGIN)
                }
            };
        }

        // 4. Menus are loaded; anything still unmatched does not exist.
        let required_permission = {
            let registry = self
                .registry
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            match registry.resolve(&to.path) {
                None => return GuardVerdict::redirect(paths::NOT_FOUND),
                Some(route) => route.meta.required_permission.clone(),
            }
        };

        // 5. Route-level permission gate.
        if let Some(required) = required_permission {
            if !self.session.has_permission(&required) {
                tracing::debug!(path = %to.path, permission = %required, "permission denied");
                return GuardVerdict::redirect(paths::DASHBOARD);
            }
        }

        // 6. Ordinary users land on the consultation page, overriding the
        //    tree's static dashboard redirect for the root path.
        if to.path == paths::ROOT && self.session.role() == Some(ROLE_ORDINARY_USER) {
            return GuardVerdict::redirect(paths::CONSULTATION);
        }

        // 7. Nothing left to object to.
        GuardVerdict::Allow
    }

    /// Role-dependent default landing page.
    fn landing(&self) -> &'static str {
        if self.session.role() == Some(ROLE_ORDINARY_USER) {
            paths::CONSULTATION
        } else {
            paths::ROOT
        }
    }
}
