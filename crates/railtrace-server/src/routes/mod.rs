//! Route table and application assembly.

use axum::Router;
use axum::routing::{get, post};
use surrealdb::Connection;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cargos;
pub mod public;
pub mod trains;

/// The route table. Auth requirements are enforced inside each
/// handler through the authorization gate, not by the router.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route("/", get(public::index))
        .route("/about", get(public::about))
        .route(
            "/contact",
            get(public::contact_form).post(public::contact_submit::<C>),
        )
        .route(
            "/track",
            get(public::track_form).post(public::track_submit::<C>),
        )
        .route("/login", get(auth::login_form).post(auth::login_submit::<C>))
        .route("/logout", get(auth::logout))
        .route("/admin", get(admin::dashboard))
        .route("/admin/trains", get(trains::list::<C>))
        .route(
            "/admin/trains/add",
            get(trains::add_form).post(trains::add_submit::<C>),
        )
        .route(
            "/admin/trains/edit/{id}",
            get(trains::edit_form::<C>).post(trains::edit_submit::<C>),
        )
        .route("/admin/trains/delete/{id}", post(trains::delete::<C>))
        .route("/admin/cargos", get(cargos::list::<C>))
        .route(
            "/admin/cargos/add",
            get(cargos::add_form).post(cargos::add_submit::<C>),
        )
        .route(
            "/admin/cargos/edit/{id}",
            get(cargos::edit_form::<C>).post(cargos::edit_submit::<C>),
        )
        .route("/admin/cargos/delete/{id}", post(cargos::delete::<C>))
        .with_state(state)
}

/// The full application: routes plus the cookie-session layer.
///
/// Sessions are ephemeral by design, so the in-memory store is the
/// right fit; they expire after a day of inactivity.
pub fn app<C: Connection>(state: AppState<C>) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    router(state).layer(session_layer)
}
