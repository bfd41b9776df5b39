//! Static and dynamic route catalogs.
//!
//! Declared once; the registry clones out of these, never mutates them.

use medconsole_auth::Permission;

use crate::node::{PageRef, RouteMeta, RouteNode};

/// Well-known paths referenced by the guard and the catalogs.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const NOT_FOUND: &str = "/404";
    /// Default landing for staff roles.
    pub const DASHBOARD: &str = "/dashboard";
    /// Default landing for ordinary users (role 2).
    pub const CONSULTATION: &str = "/diagnosis";
}

/// Pre-authentication routes, installed unconditionally at bootstrap.
pub fn static_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new(
            paths::LOGIN,
            "Login",
            PageRef("views/Login"),
            RouteMeta::titled("Sign In"),
        ),
        RouteNode::new(
            paths::REGISTER,
            "Register",
            PageRef("views/Register"),
            RouteMeta::titled("Sign Up"),
        ),
        RouteNode::new(
            paths::NOT_FOUND,
            "NotFound",
            PageRef("views/404"),
            RouteMeta::titled("Page Not Found"),
        ),
    ]
}

/// The full catalog of authenticated pages, declared once under the root
/// layout. Child paths are relative; the merge installs the subset granted
/// to the session.
pub fn dynamic_root_template() -> RouteNode {
    RouteNode::new(
        paths::ROOT,
        "Layout",
        PageRef("layout/Index"),
        RouteMeta::titled("Console"),
    )
    .with_redirect(paths::DASHBOARD)
    .with_children(vec![
        RouteNode::new(
            "dashboard",
            "Dashboard",
            PageRef("views/Dashboard"),
            RouteMeta::titled("Workbench").icon("Odometer"),
        ),
        RouteNode::new(
            "patient",
            "Patient",
            PageRef("views/Patient"),
            RouteMeta::titled("Patient Management").icon("UserFilled"),
        ),
        RouteNode::new(
            "diagnosis",
            "Diagnosis",
            PageRef("views/Diagnosis"),
            RouteMeta::titled("AI Consultation").icon("ChatLineRound"),
        ),
        RouteNode::new(
            "diagnosis-record",
            "DiagnosisRecord",
            PageRef("views/DiagnosisRecord"),
            RouteMeta::titled("Diagnosis Records").icon("Document"),
        ),
        RouteNode::new(
            "user-management",
            "UserManagement",
            PageRef("views/UserManagement"),
            RouteMeta::titled("User Management")
                .icon("User")
                .requires(Permission::new("user:list")),
        ),
        RouteNode::new(
            "role-management",
            "RoleManagement",
            PageRef("views/RoleManagement"),
            RouteMeta::titled("Role Management")
                .icon("Lock")
                .requires(Permission::new("role:list")),
        ),
        RouteNode::new(
            "change-password",
            "ChangePassword",
            PageRef("views/ChangePassword"),
            RouteMeta::titled("Change Password").hidden(),
        ),
    ])
}
