//! Live route tree, session-scoped.
//!
//! The registry owns the installed tree the routing runtime consumes. All
//! mutation goes through [`RouteRegistry::install_static`] and
//! [`RouteRegistry::merge_dynamic_routes`]; the merge is idempotent so a
//! re-entrant load (second login in the same process) cannot register a
//! route name twice.

use medconsole_core::MenuNode;

use crate::catalog;
use crate::node::{RouteNode, join_paths, normalize_menu_path};

/// What a merge changed, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Route names newly installed under the root.
    pub added: Vec<String>,
    /// Menu paths with no template counterpart, skipped.
    pub ignored: Vec<String>,
}

#[derive(Debug)]
pub struct RouteRegistry {
    statics: Vec<RouteNode>,
    template: RouteNode,
    installed: Vec<RouteNode>,
    statics_installed: bool,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self {
            statics: catalog::static_routes(),
            template: catalog::dynamic_root_template(),
            installed: Vec::new(),
            statics_installed: false,
        }
    }

    /// Install the pre-authentication catalog. Idempotent.
    pub fn install_static(&mut self) {
        if self.statics_installed {
            return;
        }
        self.installed.extend(self.statics.iter().cloned());
        self.statics_installed = true;
    }

    /// Whether the dynamic root entry has been installed.
    pub fn is_installed(&self) -> bool {
        self.root().is_some()
    }

    /// Merge the granted menu list into the installed tree.
    ///
    /// Template children whose path equals a normalized menu path are
    /// selected in template order. On first call the root layout is
    /// installed together with exactly that child set; a re-entrant call
    /// appends only children not yet present, each under an absolute path,
    /// since the routing runtime forbids re-registering an existing name.
    ///
    /// Menu entries with no template counterpart are an expected outcome
    /// (permissions modeled server-side only) and are skipped.
    // TODO: expand menu children into nested child routes; menu nesting is
    // capped at one level today and children are carried but not installed.
    pub fn merge_dynamic_routes(&mut self, menus: &[MenuNode]) -> MergeReport {
        let granted: Vec<&str> = menus
            .iter()
            .map(|m| normalize_menu_path(&m.path))
            .collect();

        let matched: Vec<RouteNode> = self
            .template
            .children
            .iter()
            .filter(|child| granted.contains(&child.path.as_str()))
            .cloned()
            .collect();

        let mut report = MergeReport::default();
        for menu in menus {
            let key = normalize_menu_path(&menu.path);
            if !self.template.children.iter().any(|c| c.path == key) {
                tracing::debug!(path = %menu.path, "menu entry has no route template, skipping");
                report.ignored.push(menu.path.clone());
            }
        }

        if !self.is_installed() {
            let mut root = self.template.clone();
            root.children = matched;
            report.added = root.children.iter().map(|c| c.name.clone()).collect();
            self.installed.push(root);
        } else if let Some(root) = self.root_mut() {
            for child in matched {
                if root.children.iter().any(|c| c.name == child.name) {
                    continue;
                }
                let mut appended = child;
                appended.path = format!("/{}", appended.path);
                report.added.push(appended.name.clone());
                root.children.push(appended);
            }
        }

        report
    }

    /// Exact-path lookup over the installed tree, recursing into children.
    /// Not on the navigation hot path; the routing runtime matches on its
    /// own copy.
    pub fn resolve(&self, path: &str) -> Option<&RouteNode> {
        find_in(&self.installed, "", path)
    }

    /// The live tree, in installation order.
    pub fn installed_routes(&self) -> &[RouteNode] {
        &self.installed
    }

    fn root(&self) -> Option<&RouteNode> {
        self.installed.iter().find(|r| r.path == catalog::paths::ROOT)
    }

    fn root_mut(&mut self) -> Option<&mut RouteNode> {
        self.installed
            .iter_mut()
            .find(|r| r.path == catalog::paths::ROOT)
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn find_in<'a>(nodes: &'a [RouteNode], parent: &str, target: &str) -> Option<&'a RouteNode> {
    for node in nodes {
        let full = join_paths(parent, &node.path);
        if full == target {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, &full, target) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::paths;
    use proptest::prelude::*;

    fn menus(paths: &[&str]) -> Vec<MenuNode> {
        paths.iter().map(|p| MenuNode::new(*p, *p)).collect()
    }

    fn installed_child_paths(registry: &RouteRegistry) -> Vec<String> {
        registry
            .resolve(paths::ROOT)
            .map(|root| {
                root.children
                    .iter()
                    .map(|c| normalize_menu_path(&c.path).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn install_static_is_idempotent() {
        let mut registry = RouteRegistry::new();
        registry.install_static();
        registry.install_static();
        assert_eq!(registry.installed_routes().len(), 3);
        assert!(registry.resolve(paths::LOGIN).is_some());
        assert!(registry.resolve(paths::NOT_FOUND).is_some());
    }

    #[test]
    fn merge_installs_the_granted_subset_in_template_order() {
        let mut registry = RouteRegistry::new();
        registry.install_static();
        // menu order deliberately reversed; template order must win
        let report = registry.merge_dynamic_routes(&menus(&["/patient", "/dashboard"]));

        assert_eq!(report.added, vec!["Dashboard", "Patient"]);
        assert_eq!(installed_child_paths(&registry), vec!["dashboard", "patient"]);
        assert!(registry.resolve("/dashboard").is_some());
        assert!(registry.resolve("/diagnosis").is_none());
    }

    #[test]
    fn leading_separator_is_optional_in_menu_paths() {
        let mut registry = RouteRegistry::new();
        let report = registry.merge_dynamic_routes(&menus(&["dashboard", "/patient"]));
        assert_eq!(report.added.len(), 2);
        assert!(report.ignored.is_empty());
    }

    #[test]
    fn unmatched_menu_entries_are_ignored_silently() {
        let mut registry = RouteRegistry::new();
        let report = registry.merge_dynamic_routes(&menus(&["/dashboard", "/reporting"]));
        assert_eq!(report.added, vec!["Dashboard"]);
        assert_eq!(report.ignored, vec!["/reporting"]);
        assert!(registry.resolve("/reporting").is_none());
    }

    #[test]
    fn re_merge_with_the_same_menus_changes_nothing() {
        let mut registry = RouteRegistry::new();
        registry.merge_dynamic_routes(&menus(&["/dashboard", "/patient"]));
        let before = installed_child_paths(&registry);

        let report = registry.merge_dynamic_routes(&menus(&["/dashboard", "/patient"]));
        assert!(report.added.is_empty());
        assert_eq!(installed_child_paths(&registry), before);
    }

    #[test]
    fn re_entrant_merge_appends_new_children_as_absolute_paths() {
        let mut registry = RouteRegistry::new();
        registry.merge_dynamic_routes(&menus(&["/dashboard"]));
        let report = registry.merge_dynamic_routes(&menus(&["/dashboard", "/diagnosis"]));

        assert_eq!(report.added, vec!["Diagnosis"]);
        let root = registry.resolve(paths::ROOT).unwrap();
        let appended = root.children.iter().find(|c| c.name == "Diagnosis").unwrap();
        assert_eq!(appended.path, "/diagnosis");
        // both addressing forms resolve to the same node
        assert!(registry.resolve("/diagnosis").is_some());
    }

    #[test]
    fn resolve_misses_outside_the_installed_tree() {
        let mut registry = RouteRegistry::new();
        registry.install_static();
        registry.merge_dynamic_routes(&menus(&["/dashboard"]));
        assert!(registry.resolve("/user-management").is_none());
        assert!(registry.resolve("/nowhere").is_none());
    }

    #[test]
    fn root_is_resolvable_once_installed() {
        let mut registry = RouteRegistry::new();
        assert!(!registry.is_installed());
        registry.merge_dynamic_routes(&menus(&["/dashboard"]));
        assert!(registry.is_installed());
        let root = registry.resolve(paths::ROOT).unwrap();
        assert_eq!(root.redirect.as_deref(), Some(paths::DASHBOARD));
    }

    proptest! {
        // Exact subset: installed children equal template entries whose path
        // is granted, regardless of menu order, duplicates, or junk paths.
        #[test]
        fn merge_installs_exactly_the_granted_template_subset(
            grants in proptest::collection::vec(
                prop_oneof![
                    Just("dashboard".to_string()),
                    Just("/patient".to_string()),
                    Just("/diagnosis".to_string()),
                    Just("diagnosis-record".to_string()),
                    Just("/user-management".to_string()),
                    Just("/role-management".to_string()),
                    Just("/change-password".to_string()),
                    Just("/bogus".to_string()),
                    Just("".to_string()),
                ],
                0..12,
            )
        ) {
            let menu_list: Vec<MenuNode> =
                grants.iter().map(|p| MenuNode::new(p.clone(), "entry")).collect();

            let mut registry = RouteRegistry::new();
            registry.merge_dynamic_routes(&menu_list);

            let granted: Vec<&str> =
                grants.iter().map(|p| normalize_menu_path(p)).collect();
            let expected: Vec<String> = catalog::dynamic_root_template()
                .children
                .iter()
                .filter(|c| granted.contains(&c.path.as_str()))
                .map(|c| normalize_menu_path(&c.path).to_string())
                .collect();

            prop_assert_eq!(installed_child_paths(&registry), expected);
        }

        // Idempotence: a second identical merge leaves the tree unchanged.
        #[test]
        fn double_merge_is_idempotent(
            grants in proptest::collection::vec(
                prop_oneof![
                    Just("/dashboard".to_string()),
                    Just("patient".to_string()),
                    Just("/user-management".to_string()),
                    Just("/bogus".to_string()),
                ],
                0..8,
            )
        ) {
            let menu_list: Vec<MenuNode> =
                grants.iter().map(|p| MenuNode::new(p.clone(), "entry")).collect();

            let mut registry = RouteRegistry::new();
            registry.merge_dynamic_routes(&menu_list);
            let before = installed_child_paths(&registry);

            let report = registry.merge_dynamic_routes(&menu_list);
            prop_assert!(report.added.is_empty());
            prop_assert_eq!(installed_child_paths(&registry), before);
        }
    }
}
