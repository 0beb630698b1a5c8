//! Authentication service — credential verification for login.

use railtrace_core::error::{RailtraceError, RailtraceResult};
use railtrace_core::models::session::SessionUser;
use railtrace_core::repository::UserRepository;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Authentication service.
///
/// Generic over the repository implementation so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    /// Authenticate a user with username + password.
    ///
    /// An unknown username and a wrong password both fail with
    /// `InvalidCredentials`, so the response never reveals which half
    /// was wrong. On success the caller receives the identity to bind
    /// into a fresh session.
    pub async fn login(&self, input: LoginInput) -> RailtraceResult<SessionUser> {
        let user = match self.user_repo.get_by_username(&input.username).await {
            Ok(u) => u,
            Err(RailtraceError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(SessionUser {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
        })
    }
}
