//! Authorization gate.
//!
//! An explicit check evaluated once per request, independent of
//! routing: the handler passes in whoever the session says is calling
//! and the role the operation demands.

use railtrace_core::error::RailtraceError;
use railtrace_core::models::session::SessionUser;
use railtrace_core::models::user::Role;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("access denied for {username} to {resource}")]
    Forbidden { username: String, resource: String },
}

impl From<GateError> for RailtraceError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::Unauthenticated => RailtraceError::Unauthenticated,
            GateError::Forbidden { username, resource } => {
                RailtraceError::Forbidden { username, resource }
            }
        }
    }
}

/// Authorize `viewer` against an operation on `resource`.
///
/// No viewer fails with `Unauthenticated`. A required role is matched
/// exactly — there is no hierarchy. A role mismatch fails with
/// `Forbidden` and leaves an audit entry naming the acting user and
/// the denied resource.
pub fn authorize<'a>(
    viewer: Option<&'a SessionUser>,
    required_role: Option<Role>,
    resource: &str,
) -> Result<&'a SessionUser, GateError> {
    let user = viewer.ok_or(GateError::Unauthenticated)?;

    if let Some(required) = required_role {
        if user.role != required {
            warn!(
                username = %user.username,
                user_id = user.user_id,
                resource = %resource,
                required_role = required.as_str(),
                "authorization denied"
            );
            return Err(GateError::Forbidden {
                username: user.username.clone(),
                resource: resource.to_string(),
            });
        }
    }

    Ok(user)
}
