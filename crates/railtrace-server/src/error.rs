//! HTTP-boundary error handling.
//!
//! Expected conditions become user-facing pages or redirects;
//! everything unexpected is logged with full detail and collapses to a
//! generic failure page with no internal detail in the response.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use railtrace_core::error::RailtraceError;
use tracing::error;

use crate::views;

#[derive(Debug)]
pub enum AppError {
    /// Authentication required; redirect to login and come back to
    /// `next` afterwards.
    Unauthenticated { next: String },
    Core(RailtraceError),
}

impl From<RailtraceError> for AppError {
    fn from(err: RailtraceError) -> Self {
        AppError::Core(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated { next } => {
                Redirect::to(&format!("/login?next={next}")).into_response()
            }
            AppError::Core(err) => match err {
                RailtraceError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    Html(views::notice(
                        "Not found",
                        &format!("No {entity} with id {id}."),
                    )),
                )
                    .into_response(),
                RailtraceError::InvalidReference { entity, id } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Html(views::notice(
                        "Invalid reference",
                        &format!("No {entity} with id {id} exists."),
                    )),
                )
                    .into_response(),
                RailtraceError::Validation { message } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Html(views::notice("Invalid input", &message)),
                )
                    .into_response(),
                RailtraceError::InvalidIdentifier { input } => (
                    StatusCode::BAD_REQUEST,
                    Html(views::notice(
                        "Invalid identifier",
                        &format!("{input:?} is not a numeric identifier."),
                    )),
                )
                    .into_response(),
                RailtraceError::AuthenticationFailed { .. } => (
                    StatusCode::UNAUTHORIZED,
                    Html(views::notice("Login failed", "Invalid username or password.")),
                )
                    .into_response(),
                RailtraceError::Unauthenticated => {
                    Redirect::to("/login").into_response()
                }
                RailtraceError::Forbidden { .. } => (
                    StatusCode::FORBIDDEN,
                    Html(views::notice(
                        "Access denied",
                        "You do not have permission to view this page.",
                    )),
                )
                    .into_response(),
                err @ (RailtraceError::Database(_) | RailtraceError::Internal(_)) => {
                    error!(error = %err, "request failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Html(views::notice(
                            "Server error",
                            "An internal error occurred. Please try again later.",
                        )),
                    )
                        .into_response()
                }
            },
        }
    }
}
