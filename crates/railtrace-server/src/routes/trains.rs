//! Admin CRUD for trains.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use railtrace_core::repository::TrainRepository;
use surrealdb::Connection;
use tower_sessions::Session;

use crate::error::AppError;
use crate::forms::TrainForm;
use crate::session;
use crate::state::AppState;
use crate::views;

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
) -> Result<Html<String>, AppError> {
    session::require_admin(&session, "/admin/trains").await?;
    let trains = state.trains().list().await?;
    Ok(Html(views::train_list_page(&trains)))
}

pub async fn add_form(session: Session) -> Result<Html<String>, AppError> {
    session::require_admin(&session, "/admin/trains/add").await?;
    Ok(Html(views::train_form_page(
        "Add train",
        "/admin/trains/add",
        None,
        &[],
    )))
}

pub async fn add_submit<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Form(form): Form<TrainForm>,
) -> Result<Response, AppError> {
    session::require_admin(&session, "/admin/trains/add").await?;
    match form.into_create() {
        Ok(input) => {
            state.trains().create(input).await?;
            Ok(Redirect::to("/admin/trains").into_response())
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::train_form_page(
                "Add train",
                "/admin/trains/add",
                None,
                &errors,
            )),
        )
            .into_response()),
    }
}

pub async fn edit_form<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    session::require_admin(&session, &format!("/admin/trains/edit/{id}")).await?;
    let train = state.trains().get_by_id(id).await?;
    Ok(Html(views::train_form_page(
        "Edit train",
        &format!("/admin/trains/edit/{id}"),
        Some(&train),
        &[],
    )))
}

pub async fn edit_submit<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<TrainForm>,
) -> Result<Response, AppError> {
    session::require_admin(&session, &format!("/admin/trains/edit/{id}")).await?;
    match form.into_update() {
        Ok(input) => {
            state.trains().update(id, input).await?;
            Ok(Redirect::to("/admin/trains").into_response())
        }
        Err(errors) => {
            let train = state.trains().get_by_id(id).await?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::train_form_page(
                    "Edit train",
                    &format!("/admin/trains/edit/{id}"),
                    Some(&train),
                    &errors,
                )),
            )
                .into_response())
        }
    }
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    session::require_admin(&session, &format!("/admin/trains/delete/{id}")).await?;
    state.trains().delete(id).await?;
    Ok(Redirect::to("/admin/trains"))
}
