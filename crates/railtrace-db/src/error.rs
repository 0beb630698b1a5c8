//! Database-specific error types and conversions.

use railtrace_core::error::RailtraceError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for RailtraceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => RailtraceError::NotFound { entity, id },
            other => RailtraceError::Database(other.to_string()),
        }
    }
}
