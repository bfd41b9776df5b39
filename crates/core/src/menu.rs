//! Server-declared menu tree.
//!
//! The server owns this data; the client validates it at the decode boundary
//! and keeps only the fields it consumes. Menu nesting is capped at one
//! level: a top-level entry may carry children, children may not.

use serde::{Deserialize, Serialize};

/// A permitted page granted to the current session, keyed by route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    /// Route path, possibly with a leading separator (`/dashboard` and
    /// `dashboard` are equivalent keys for route matching).
    pub path: String,
    /// Display label for the menu entry.
    pub permission_name: String,
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(path: impl Into<String>, permission_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            permission_name: permission_name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }
}

/// Wire form of a menu entry as the server sends it. The server includes
/// more fields (ids, icons, sort order); only what the client reads is
/// modeled, and required fields are optional here so malformed entries can
/// be quarantined instead of failing the whole decode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMenuNode {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub permission_name: Option<String>,
    #[serde(default)]
    pub children: Vec<RawMenuNode>,
}

/// Validate a server menu payload.
///
/// Entries without a usable `path` are dropped with a warning rather than
/// propagated. Children are validated the same way; anything nested below
/// the first child level is discarded to hold the one-level invariant.
pub fn sanitize_menus(raw: Vec<RawMenuNode>) -> Vec<MenuNode> {
    raw.into_iter()
        .filter_map(|entry| sanitize_node(entry, 0))
        .collect()
}

fn sanitize_node(raw: RawMenuNode, depth: usize) -> Option<MenuNode> {
    let path = match raw.path {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            tracing::warn!(
                label = raw.permission_name.as_deref().unwrap_or("<unnamed>"),
                "quarantined menu entry without a path"
            );
            return None;
        }
    };

    let children = if depth == 0 {
        raw.children
            .into_iter()
            .filter_map(|child| sanitize_node(child, depth + 1))
            .collect()
    } else {
        if !raw.children.is_empty() {
            tracing::debug!(path = %path, "dropping menu nesting below one level");
        }
        Vec::new()
    };

    Some(MenuNode {
        path,
        permission_name: raw.permission_name.unwrap_or_default(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Vec<RawMenuNode> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn well_formed_payload_survives_intact() {
        let raw = decode(
            r#"[
                {"path":"/dashboard","permissionName":"Workbench","children":[]},
                {"path":"/patient","permissionName":"Patient Management"}
            ]"#,
        );
        let menus = sanitize_menus(raw);
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].path, "/dashboard");
        assert_eq!(menus[1].permission_name, "Patient Management");
    }

    #[test]
    fn entry_without_path_is_quarantined() {
        let raw = decode(
            r#"[
                {"permissionName":"Broken"},
                {"path":"  ","permissionName":"Blank"},
                {"path":"/dashboard","permissionName":"Workbench"}
            ]"#,
        );
        let menus = sanitize_menus(raw);
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].path, "/dashboard");
    }

    #[test]
    fn extra_server_fields_are_ignored() {
        let raw = decode(
            r#"[{"id":7,"parentId":0,"path":"/dashboard","permissionName":"Workbench",
                "menuType":"menu","icon":"Odometer","sortOrder":1,"visible":1}]"#,
        );
        assert_eq!(sanitize_menus(raw).len(), 1);
    }

    #[test]
    fn nesting_below_one_level_is_dropped() {
        let raw = decode(
            r#"[{"path":"/system","permissionName":"System","children":[
                {"path":"/system/user","permissionName":"Users","children":[
                    {"path":"/system/user/detail","permissionName":"Detail"}
                ]}
            ]}]"#,
        );
        let menus = sanitize_menus(raw);
        assert_eq!(menus[0].children.len(), 1);
        assert!(menus[0].children[0].children.is_empty());
    }

    #[test]
    fn malformed_child_is_quarantined_without_losing_the_parent() {
        let raw = decode(
            r#"[{"path":"/system","permissionName":"System","children":[
                {"permissionName":"No Path"},
                {"path":"/system/user","permissionName":"Users"}
            ]}]"#,
        );
        let menus = sanitize_menus(raw);
        assert_eq!(menus[0].children.len(), 1);
        assert_eq!(menus[0].children[0].path, "/system/user");
    }
}
