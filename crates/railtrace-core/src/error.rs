//! Error types for the Railtrace system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RailtraceError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Invalid reference: {entity} does not exist with id {id}")]
    InvalidReference { entity: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid tracking identifier: {input:?}")]
    InvalidIdentifier { input: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied for {username} to {resource}")]
    Forbidden { username: String, resource: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RailtraceResult<T> = Result<T, RailtraceError>;
