//! Server configuration, read from the environment.

use std::env;

use railtrace_db::DbConfig;

/// Configuration for the whole server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: String,
    /// SurrealDB connection settings.
    pub db: DbConfig,
    /// Optional pepper prepended to passwords before hashing and
    /// verification.
    pub pepper: Option<String>,
    /// Password for the seeded admin account (stored hashed).
    pub admin_password: String,
    /// Whether to seed default data on startup.
    pub seed: bool,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ServerConfig {
    /// Build the configuration from environment variables, falling
    /// back to development defaults. `.env` files are honored when
    /// loaded by the caller beforehand.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("RAILTRACE_BIND_ADDR", "0.0.0.0:5000"),
            db: DbConfig {
                url: env_or("RAILTRACE_DB_URL", "127.0.0.1:8000"),
                namespace: env_or("RAILTRACE_DB_NAMESPACE", "railtrace"),
                database: env_or("RAILTRACE_DB_DATABASE", "main"),
                username: env_or("RAILTRACE_DB_USERNAME", "root"),
                password: env_or("RAILTRACE_DB_PASSWORD", "root"),
            },
            pepper: env::var("RAILTRACE_PEPPER").ok(),
            admin_password: env_or("RAILTRACE_ADMIN_PASSWORD", "change-me"),
            seed: env_or("RAILTRACE_SEED", "true").to_lowercase() == "true",
        }
    }
}
