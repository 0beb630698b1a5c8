//! Cookie-session glue.
//!
//! The authenticated identity lives in the `tower-sessions` store
//! under a single key. Login rotates the session id and discards any
//! prior state so a pre-login cookie can never be fixated onto an
//! authenticated session.

use railtrace_core::error::RailtraceError;
use railtrace_core::models::session::SessionUser;
use railtrace_core::models::user::Role;
use railtrace_auth::{GateError, authorize};
use tower_sessions::Session;

use crate::error::AppError;

/// Key for storing the authenticated identity in the session.
pub const SESSION_USER_KEY: &str = "auth_user";

fn session_failure(e: tower_sessions::session::Error) -> AppError {
    AppError::Core(RailtraceError::Internal(format!("session store: {e}")))
}

/// The identity the session says is calling, if any.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await
        .map_err(session_failure)
}

/// Bind a freshly authenticated identity to the session, discarding
/// whatever the session held before.
pub async fn establish(session: &Session, user: &SessionUser) -> Result<(), AppError> {
    session.clear().await;
    session.cycle_id().await.map_err(session_failure)?;
    session
        .insert(SESSION_USER_KEY, user.clone())
        .await
        .map_err(session_failure)
}

/// Drop the session entirely (logout). A missing session is a no-op
/// with the same end state.
pub async fn terminate(session: &Session) -> Result<(), AppError> {
    session.flush().await.map_err(session_failure)
}

/// Gate an admin-only handler: loads the viewer from the session and
/// authorizes against the admin role.
///
/// Unauthenticated callers are redirected to login with `resource` as
/// the post-login destination.
pub async fn require_admin(session: &Session, resource: &str) -> Result<SessionUser, AppError> {
    let viewer = current_user(session).await?;
    match authorize(viewer.as_ref(), Some(Role::Admin), resource) {
        Ok(user) => Ok(user.clone()),
        Err(GateError::Unauthenticated) => Err(AppError::Unauthenticated {
            next: resource.to_string(),
        }),
        Err(err) => Err(AppError::Core(err.into())),
    }
}

/// Gate a handler that only needs a logged-in user, any role.
pub async fn require_user(session: &Session, resource: &str) -> Result<SessionUser, AppError> {
    let viewer = current_user(session).await?;
    match authorize(viewer.as_ref(), None, resource) {
        Ok(user) => Ok(user.clone()),
        Err(GateError::Unauthenticated) => Err(AppError::Unauthenticated {
            next: resource.to_string(),
        }),
        Err(err) => Err(AppError::Core(err.into())),
    }
}
