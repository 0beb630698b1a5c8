//! Admin CRUD for cargo.
//!
//! Create and update reject a `train_id` that references no existing
//! train; the message is surfaced inline on the form and nothing is
//! written.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use railtrace_core::error::RailtraceError;
use railtrace_core::repository::CargoRepository;
use surrealdb::Connection;
use tower_sessions::Session;

use crate::error::AppError;
use crate::forms::CargoForm;
use crate::session;
use crate::state::AppState;
use crate::views;

fn reference_error(entity: &str, id: &str) -> String {
    format!("No {entity} with id {id} exists")
}

pub async fn list<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
) -> Result<Html<String>, AppError> {
    session::require_admin(&session, "/admin/cargos").await?;
    let items = state.cargos().list_with_train().await?;
    Ok(Html(views::cargo_list_page(&items)))
}

pub async fn add_form(session: Session) -> Result<Html<String>, AppError> {
    session::require_admin(&session, "/admin/cargos/add").await?;
    Ok(Html(views::cargo_form_page(
        "Add cargo",
        "/admin/cargos/add",
        None,
        &[],
    )))
}

pub async fn add_submit<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Form(form): Form<CargoForm>,
) -> Result<Response, AppError> {
    session::require_admin(&session, "/admin/cargos/add").await?;

    let input = match form.into_create() {
        Ok(input) => input,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::cargo_form_page(
                    "Add cargo",
                    "/admin/cargos/add",
                    None,
                    &errors,
                )),
            )
                .into_response());
        }
    };

    match state.cargos().create(input).await {
        Ok(_) => Ok(Redirect::to("/admin/cargos").into_response()),
        Err(RailtraceError::InvalidReference { entity, id }) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(views::cargo_form_page(
                "Add cargo",
                "/admin/cargos/add",
                None,
                &[reference_error(&entity, &id)],
            )),
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_form<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    session::require_admin(&session, &format!("/admin/cargos/edit/{id}")).await?;
    let cargo = state.cargos().get_by_id(id).await?;
    Ok(Html(views::cargo_form_page(
        "Edit cargo",
        &format!("/admin/cargos/edit/{id}"),
        Some(&cargo),
        &[],
    )))
}

pub async fn edit_submit<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<CargoForm>,
) -> Result<Response, AppError> {
    session::require_admin(&session, &format!("/admin/cargos/edit/{id}")).await?;

    let input = match form.into_update() {
        Ok(input) => input,
        Err(errors) => {
            let cargo = state.cargos().get_by_id(id).await?;
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::cargo_form_page(
                    "Edit cargo",
                    &format!("/admin/cargos/edit/{id}"),
                    Some(&cargo),
                    &errors,
                )),
            )
                .into_response());
        }
    };

    match state.cargos().update(id, input).await {
        Ok(_) => Ok(Redirect::to("/admin/cargos").into_response()),
        Err(RailtraceError::InvalidReference { entity, id: train_id }) => {
            let cargo = state.cargos().get_by_id(id).await?;
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::cargo_form_page(
                    "Edit cargo",
                    &format!("/admin/cargos/edit/{id}"),
                    Some(&cargo),
                    &[reference_error(&entity, &train_id)],
                )),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete<C: Connection>(
    State(state): State<AppState<C>>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    session::require_admin(&session, &format!("/admin/cargos/delete/{id}")).await?;
    state.cargos().delete(id).await?;
    Ok(Redirect::to("/admin/cargos"))
}
