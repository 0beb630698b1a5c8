//! Admin dashboard.

use axum::response::Html;
use tower_sessions::Session;

use crate::error::AppError;
use crate::session;
use crate::views;

pub async fn dashboard(session: Session) -> Result<Html<String>, AppError> {
    let viewer = session::require_admin(&session, "/admin").await?;
    Ok(Html(views::admin_dashboard_page(&viewer.username)))
}
