//! Public pages: landing, about, contact intake, and tracking.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use railtrace_core::error::RailtraceError;
use railtrace_core::repository::ContactRepository;
use surrealdb::Connection;

use crate::error::AppError;
use crate::forms::{ContactForm, TrackForm};
use crate::state::AppState;
use crate::tracking::{TrackCategory, TrackingService};
use crate::views;

pub async fn index() -> Html<String> {
    Html(views::index_page())
}

pub async fn about() -> Html<String> {
    Html(views::about_page())
}

pub async fn contact_form() -> Html<String> {
    Html(views::contact_page("", "", "", &[]))
}

pub async fn contact_submit<C: Connection>(
    State(state): State<AppState<C>>,
    Form(form): Form<ContactForm>,
) -> Result<Response, AppError> {
    match form.clone().into_create() {
        Ok(input) => {
            let contact = state.contacts().create(input).await?;
            Ok(Html(views::contact_success_page(&contact.name)).into_response())
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::contact_page(
                &form.name,
                &form.email,
                &form.message,
                &errors,
            )),
        )
            .into_response()),
    }
}

pub async fn track_form() -> Html<String> {
    Html(views::track_page(&[]))
}

pub async fn track_submit<C: Connection>(
    State(state): State<AppState<C>>,
    Form(form): Form<TrackForm>,
) -> Result<Response, AppError> {
    let Some(category) = TrackCategory::parse(form.search_type.trim()) else {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::track_page(&["Choose train or cargo".into()])),
        )
            .into_response());
    };

    let service = TrackingService::new(state.trains(), state.cargos());
    match service.track(category, &form.identifier).await {
        Ok(Some(record)) => Ok(Html(views::track_result_page(&record)).into_response()),
        Ok(None) => Ok(Html(views::track_not_found_page()).into_response()),
        Err(RailtraceError::InvalidIdentifier { input }) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::track_page(&[format!(
                "{input:?} is not a numeric identifier"
            )])),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
