//! Railtrace Server — the HTTP surface of the tracking system.
//!
//! Public pages (landing, about, contact, tracking), the login flow,
//! and the role-gated admin panel for trains and cargo, served by axum
//! with cookie-backed sessions.

pub mod config;
pub mod error;
pub mod forms;
pub mod routes;
pub mod session;
pub mod state;
pub mod tracking;
pub mod views;
