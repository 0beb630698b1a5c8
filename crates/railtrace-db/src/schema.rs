//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! Record identifiers are integers drawn from the `sequence` table,
//! since the engine has no autoincrement of its own. Enums are stored
//! as strings with ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Id sequences (one record per entity table)
-- =======================================================================
DEFINE TABLE sequence SCHEMAFULL;
DEFINE FIELD value ON TABLE sequence TYPE int DEFAULT 0;

-- =======================================================================
-- Trains
-- =======================================================================
DEFINE TABLE train SCHEMAFULL;
DEFINE FIELD name ON TABLE train TYPE string;
DEFINE FIELD departure_station ON TABLE train TYPE option<string>;
DEFINE FIELD arrival_station ON TABLE train TYPE option<string>;
DEFINE FIELD departure_time ON TABLE train TYPE option<string>;
DEFINE FIELD arrival_time ON TABLE train TYPE option<string>;
DEFINE FIELD last_operation_station ON TABLE train TYPE option<string>;
DEFINE FIELD last_operation_time ON TABLE train TYPE option<string>;
DEFINE FIELD distance_to_arrival ON TABLE train TYPE option<int>;
DEFINE FIELD operation_desc ON TABLE train TYPE option<string>;

-- =======================================================================
-- Cargo (train_id references train; checked at the repository layer,
-- removal cascades from train deletion)
-- =======================================================================
DEFINE TABLE cargo SCHEMAFULL;
DEFINE FIELD cargo_type ON TABLE cargo TYPE option<string>;
DEFINE FIELD train_id ON TABLE cargo TYPE option<int>;
DEFINE FIELD current_station ON TABLE cargo TYPE option<string>;
DEFINE FIELD status ON TABLE cargo TYPE option<string>;
DEFINE FIELD last_stop_time ON TABLE cargo TYPE option<string>;
DEFINE FIELD next_station ON TABLE cargo TYPE option<string>;
DEFINE FIELD distance_to_arrival ON TABLE cargo TYPE option<int>;
DEFINE FIELD last_operation ON TABLE cargo TYPE option<string>;
DEFINE INDEX idx_cargo_train ON TABLE cargo COLUMNS train_id;

-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string DEFAULT 'user' \
    ASSERT $value IN ['user', 'admin'];
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;

-- =======================================================================
-- Contact messages (append-only from the application's viewpoint)
-- =======================================================================
DEFINE TABLE contact SCHEMAFULL;
DEFINE FIELD name ON TABLE contact TYPE string;
DEFINE FIELD email ON TABLE contact TYPE string;
DEFINE FIELD message ON TABLE contact TYPE string;
DEFINE FIELD created_at ON TABLE contact TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_is_nonempty() {
        assert!(!SCHEMA_V1.is_empty());
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
