//! Railtrace Server — application entry point.

use railtrace_db::DbManager;
use railtrace_server::config::ServerConfig;
use railtrace_server::routes;
use railtrace_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("railtrace=info".parse().unwrap()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    let db = DbManager::connect(&config.db).await?;
    railtrace_db::run_migrations(db.client()).await?;

    if config.seed {
        railtrace_db::seed_default_data(
            db.client(),
            &config.admin_password,
            config.pepper.as_deref(),
        )
        .await?;
    }

    let state = AppState::new(db.client().clone(), config.pepper.clone());
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Railtrace server listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
