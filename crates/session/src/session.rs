//! The authenticated session service.
//!
//! One instance is constructed at application bootstrap and shared (behind
//! `Arc`) with the navigation guard and the UI layer. All state mutation
//! funnels through the operations here; the durable store mirrors the
//! state but never drives it except at [`Session::restore`].

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use medconsole_auth::{Permission, VisibilityRule, evaluate, visibility};
use medconsole_core::{ApiResult, MenuNode, UserProfile};
use medconsole_routing::SharedRegistry;

use crate::api::{Credentials, PortalApi, RegisterForm};
use crate::store::{KeyValueStore, keys};

#[derive(Debug, Default)]
struct SessionState {
    /// Empty string means unauthenticated.
    token: String,
    profile: Option<UserProfile>,
    menus: Vec<MenuNode>,
    permissions: HashSet<String>,
    /// Set only after the merged routes are observable by the routing
    /// runtime. The guard keys its load-then-replay step off this flag.
    menus_loaded: bool,
}

pub struct Session {
    api: Arc<dyn PortalApi>,
    store: Arc<dyn KeyValueStore>,
    registry: SharedRegistry,
    state: RwLock<SessionState>,
    /// Serializes `fetch_menus`. A second navigation arriving mid-fetch
    /// waits here instead of re-entering the merge.
    fetch_gate: tokio::sync::Mutex<()>,
}

impl Session {
    pub fn new(
        api: Arc<dyn PortalApi>,
        store: Arc<dyn KeyValueStore>,
        registry: SharedRegistry,
    ) -> Self {
        Self {
            api,
            store,
            registry,
            state: RwLock::new(SessionState::default()),
            fetch_gate: tokio::sync::Mutex::new(()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle operations
    // ─────────────────────────────────────────────────────────────────────

    /// Rehydrate token and profile from the durable store at bootstrap.
    ///
    /// Menus are never rehydrated: the route registry starts empty each
    /// process, so `menus_loaded` stays false and the next gated navigation
    /// re-fetches and re-merges.
    pub fn restore(&self) {
        let mut state = self.state_mut();
        if let Some(token) = self.store.get(keys::TOKEN) {
            if !token.is_empty() {
                state.token = token;
            }
        }
        if let Some(raw) = self.store.get(keys::USER_INFO) {
            match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => state.profile = Some(profile),
                Err(err) => tracing::warn!("discarding persisted profile: {err}"),
            }
        }
        if !state.token.is_empty() {
            tracing::info!("session restored from durable storage");
        }
    }

    /// Authenticate and persist the token. Profile and menus are explicit
    /// follow-up calls so callers control the sequencing.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        let token = self.api.login(credentials).await?;
        self.persist(keys::TOKEN, &token);
        self.state_mut().token = token;
        tracing::info!(username = %credentials.username, "logged in");
        Ok(())
    }

    /// Create an account; the server logs the new user straight in.
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<()> {
        let token = self.api.register(form).await?;
        self.persist(keys::TOKEN, &token);
        self.state_mut().token = token;
        tracing::info!(username = %form.username, "registered and logged in");
        Ok(())
    }

    /// Fetch and store the current user's profile.
    pub async fn get_info(&self) -> ApiResult<()> {
        let profile = self.api.fetch_profile().await?;
        self.persist_json(keys::USER_INFO, &profile);
        self.state_mut().profile = Some(profile);
        Ok(())
    }

    /// Load the granted menu tree and permission set, merge the dynamic
    /// routes, and mark the session ready.
    ///
    /// Idempotent: once `menus_loaded` is true this is a no-op. The two
    /// server calls run concurrently and both must succeed; on any failure
    /// the flag stays false and no state is touched. The flag is set only
    /// after a scheduler yield so the routing runtime has durably
    /// registered the merged routes before a replayed navigation can
    /// observe `menus_loaded == true`.
    pub async fn fetch_menus(&self) -> ApiResult<()> {
        let _gate = self.fetch_gate.lock().await;
        if self.menus_loaded() {
            return Ok(());
        }

        let (menus, permissions) =
            tokio::try_join!(self.api.fetch_menus(), self.api.fetch_permissions())?;
        let permissions: HashSet<String> = permissions.into_iter().collect();

        self.persist_json(keys::MENUS, &menus);
        self.persist_json(keys::PERMISSIONS, &permissions);
        {
            let mut state = self.state_mut();
            state.menus = menus.clone();
            state.permissions = permissions;
        }

        let report = {
            let mut registry = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            registry.merge_dynamic_routes(&menus)
        };
        tracing::debug!(added = ?report.added, ignored = ?report.ignored, "merged dynamic routes");

        // Let the routing runtime drain any pending registration work
        // before the loaded flag becomes visible to the guard.
        tokio::task::yield_now().await;

        self.state_mut().menus_loaded = true;
        tracing::info!(menus = self.granted_menus().len(), "menus loaded");
        Ok(())
    }

    /// Test/bootstrap escape hatch: install a menu list and mark the
    /// session ready without a network round trip.
    pub fn set_menus(&self, menus: Vec<MenuNode>) {
        self.persist_json(keys::MENUS, &menus);
        {
            let mut registry = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            registry.merge_dynamic_routes(&menus);
        }
        let mut state = self.state_mut();
        state.menus = menus;
        state.menus_loaded = true;
    }

    /// Invalidate the session server-side (best effort), then clear all
    /// local and persisted state. Idempotent.
    pub async fn logout(&self) {
        if self.is_authenticated() {
            if let Err(err) = self.api.logout().await {
                tracing::debug!("server-side logout failed: {err}");
            }
        }
        self.clear();
    }

    /// Wipe state and persisted entries. Also the handler for any 401
    /// detected on the transport, regardless of endpoint.
    pub fn clear(&self) {
        *self.state_mut() = SessionState::default();
        for key in keys::ALL {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(key, "failed to remove persisted entry: {err}");
            }
        }
        tracing::info!("session cleared");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn token(&self) -> String {
        self.state_ref().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.state_ref().token.is_empty()
    }

    pub fn menus_loaded(&self) -> bool {
        self.state_ref().menus_loaded
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state_ref().profile.clone()
    }

    /// Primary role value, when a profile is loaded.
    pub fn role(&self) -> Option<i32> {
        self.state_ref().profile.as_ref().map(|p| p.role)
    }

    pub fn granted_menus(&self) -> Vec<MenuNode> {
        self.state_ref().menus.clone()
    }

    pub fn granted_permissions(&self) -> HashSet<String> {
        self.state_ref().permissions.clone()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Evaluator conveniences (what the guard and rendering code call)
    // ─────────────────────────────────────────────────────────────────────

    pub fn has_permission(&self, permission: &Permission) -> bool {
        evaluate::has_permission(&self.state_ref().permissions, permission)
    }

    pub fn has_any_permission(&self, required: &[Permission]) -> bool {
        evaluate::has_any_permission(&self.state_ref().permissions, required)
    }

    pub fn has_all_permissions(&self, required: &[Permission]) -> bool {
        evaluate::has_all_permissions(&self.state_ref().permissions, required)
    }

    pub fn has_role(&self, role: &str) -> bool {
        let state = self.state_ref();
        state
            .profile
            .as_ref()
            .is_some_and(|p| evaluate::has_role(&p.roles, role))
    }

    pub fn has_any_role(&self, required: &[&str]) -> bool {
        let state = self.state_ref();
        state
            .profile
            .as_ref()
            .is_some_and(|p| evaluate::has_any_role(&p.roles, required))
    }

    pub fn element_visible(&self, rule: &VisibilityRule) -> bool {
        visibility::element_visible(&self.state_ref().permissions, rule)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn state_ref(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.store.put(key, value) {
            tracing::warn!(key, "failed to persist session entry: {err}");
        }
    }

    fn persist_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.persist(key, &raw),
            Err(err) => tracing::warn!(key, "failed to encode session entry: {err}"),
        }
    }
}
