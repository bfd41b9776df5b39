//! Element-visibility rule backing the UI permission directive.
//!
//! The UI shell removes elements whose rule does not hold; the removal
//! itself belongs to the shell, only the decision lives here.

use std::collections::HashSet;

use crate::{Permission, evaluate};

/// Requirement attached to a UI element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityRule {
    /// A single permission must be granted.
    One(Permission),
    /// At least one of the listed permissions must be granted. An empty
    /// list hides the element (same policy as the evaluator).
    AnyOf(Vec<Permission>),
}

/// Decide whether an element bound to `rule` should stay visible.
pub fn element_visible(granted: &HashSet<String>, rule: &VisibilityRule) -> bool {
    match rule {
        VisibilityRule::One(permission) => evaluate::has_permission(granted, permission),
        VisibilityRule::AnyOf(permissions) => evaluate::has_any_permission(granted, permissions),
    }
}
