//! Login and logout.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use railtrace_auth::LoginInput;
use railtrace_core::error::RailtraceError;
use serde::Deserialize;
use surrealdb::Connection;
use tower_sessions::Session;

use crate::error::AppError;
use crate::forms::LoginForm;
use crate::session;
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: String,
}

/// Only same-site absolute paths are honored as post-login
/// destinations; anything else falls back to the dashboard.
fn sanitize_next(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        "/admin"
    }
}

pub async fn login_form(Query(query): Query<NextQuery>) -> Html<String> {
    Html(views::login_page(&query.next, &[]))
}

pub async fn login_submit<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::login_page(&form.next, &errors)),
        )
            .into_response());
    }

    match state
        .auth()
        .login(LoginInput {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        })
        .await
    {
        Ok(user) => {
            session::establish(&session, &user).await?;
            Ok(Redirect::to(sanitize_next(&form.next)).into_response())
        }
        Err(RailtraceError::AuthenticationFailed { .. }) => Ok((
            StatusCode::UNAUTHORIZED,
            Html(views::login_page(
                &form.next,
                &["Invalid username or password".into()],
            )),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session::require_user(&session, "/logout").await?;
    session::terminate(&session).await?;
    Ok(Redirect::to("/"))
}
