//! Authentication error types.

use railtrace_core::error::RailtraceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for RailtraceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => RailtraceError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => RailtraceError::Internal(msg),
        }
    }
}
