//! Boolean predicates over granted permission and role sets.
//!
//! Policy note: an empty requirement list is never satisfied. Both
//! [`has_any_permission`] and [`has_all_permissions`] return false for an
//! empty slice; this deliberately differs from a vacuous-truth convention
//! and callers depend on it.

use std::collections::HashSet;

use crate::Permission;

/// True iff the exact code is granted.
pub fn has_permission(granted: &HashSet<String>, permission: &Permission) -> bool {
    granted.contains(permission.as_str())
}

/// True iff `required` is non-empty and at least one element is granted.
pub fn has_any_permission(granted: &HashSet<String>, required: &[Permission]) -> bool {
    !required.is_empty() && required.iter().any(|p| has_permission(granted, p))
}

/// True iff `required` is non-empty and every element is granted.
pub fn has_all_permissions(granted: &HashSet<String>, required: &[Permission]) -> bool {
    !required.is_empty() && required.iter().all(|p| has_permission(granted, p))
}

/// True iff the exact role code appears in the profile's role list.
pub fn has_role(roles: &[String], role: &str) -> bool {
    roles.iter().any(|r| r == role)
}

/// True iff `required` is non-empty and at least one role is held.
pub fn has_any_role(roles: &[String], required: &[&str]) -> bool {
    !required.is_empty() && required.iter().any(|r| has_role(roles, r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn exact_match_only() {
        let set = granted(&["user:list", "user:add"]);
        assert!(has_permission(&set, &Permission::new("user:list")));
        assert!(!has_permission(&set, &Permission::new("user:lis")));
        assert!(!has_permission(&set, &Permission::new("user:list ")));
    }

    #[test]
    fn any_requires_at_least_one_grant() {
        let set = granted(&["role:list"]);
        assert!(has_any_permission(
            &set,
            &[Permission::new("user:list"), Permission::new("role:list")]
        ));
        assert!(!has_any_permission(&set, &[Permission::new("user:list")]));
    }

    #[test]
    fn all_requires_every_grant() {
        let set = granted(&["user:list", "user:add"]);
        assert!(has_all_permissions(
            &set,
            &[Permission::new("user:list"), Permission::new("user:add")]
        ));
        assert!(!has_all_permissions(
            &set,
            &[Permission::new("user:list"), Permission::new("user:delete")]
        ));
    }

    #[test]
    fn empty_requirement_list_is_never_satisfied() {
        let set = granted(&["user:list"]);
        assert!(!has_any_permission(&set, &[]));
        assert!(!has_all_permissions(&set, &[]));
        assert!(!has_any_role(&["admin".to_string()], &[]));
    }

    #[test]
    fn absent_grants_evaluate_to_false() {
        let empty = HashSet::new();
        assert!(!has_permission(&empty, &Permission::new("user:list")));
        assert!(!has_any_permission(&empty, &[Permission::new("user:list")]));
        assert!(!has_role(&[], "admin"));
    }

    #[test]
    fn role_codes_match_exactly() {
        let roles = vec!["doctor".to_string(), "auditor".to_string()];
        assert!(has_role(&roles, "doctor"));
        assert!(!has_role(&roles, "admin"));
        assert!(has_any_role(&roles, &["admin", "auditor"]));
    }
}
