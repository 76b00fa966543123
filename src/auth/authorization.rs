//! Role-based authorization checks.
//!
//! The role gate is a pass-through over an already-resolved identity, kept
//! separate from resolution so additional role sets can be composed without
//! touching the resolver.

use tracing::warn;

use crate::auth::user::{Role, User};
use crate::errors::{AuthErrorType, Error, Result};

/// Permit the user when their role is in the allowed set, otherwise deny.
///
/// The denial message names the required role set and the caller's actual
/// role, matching the established API behavior.
pub fn require_role<'a>(user: &'a User, allowed: &[Role]) -> Result<&'a User> {
    if allowed.contains(&user.role) {
        return Ok(user);
    }

    warn!(
        user_id = %user.id,
        role = %user.role,
        required = %format_roles(allowed),
        "role check failed"
    );

    Err(Error::auth(
        format!(
            "Access denied: {} role required, current role is {}",
            format_roles(allowed),
            user.role
        ),
        AuthErrorType::InsufficientRole,
    ))
}

/// Shorthand for the only gated tier in this system.
pub fn require_principal(user: &User) -> Result<&User> {
    require_role(user, &[Role::Principal])
}

fn format_roles(roles: &[Role]) -> String {
    roles.iter().map(Role::as_str).collect::<Vec<_>>().join(" or ")
}
