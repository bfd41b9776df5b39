//! Client-declared page definitions.

use medconsole_auth::Permission;

/// Opaque handle to a view component, resolved by the UI shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef(pub &'static str);

impl PageRef {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Display and gating metadata attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: String,
    pub icon: Option<String>,
    /// Hidden routes are navigable but omitted from menu rendering.
    pub hidden: bool,
    /// When set, the guard denies navigation unless the code is granted.
    pub required_permission: Option<Permission>,
}

impl RouteMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
            hidden: false,
            required_permission: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn requires(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }
}

/// A page definition in either catalog or in the installed tree.
///
/// `name` is unique across the whole tree; the routing runtime rejects a
/// second registration under an existing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNode {
    /// Absolute for top-level routes, relative (no leading separator) for
    /// template children nested under the root layout.
    pub path: String,
    pub name: String,
    pub page: PageRef,
    /// Static redirect target applied when the route itself is hit.
    pub redirect: Option<String>,
    pub meta: RouteMeta,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        page: PageRef,
        meta: RouteMeta,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            page,
            redirect: None,
            meta,
            children: Vec::new(),
        }
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }
}

/// Strip a single leading path separator so `/dashboard` and `dashboard`
/// compare equal as menu/template keys.
pub fn normalize_menu_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Join a child path onto its parent's full path. Absolute child paths are
/// kept as-is (children appended after the root was installed are absolute).
pub fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') || parent.is_empty() {
        return child.to_string();
    }
    if parent.ends_with('/') {
        format!("{parent}{child}")
    } else {
        format!("{parent}/{child}")
    }
}
