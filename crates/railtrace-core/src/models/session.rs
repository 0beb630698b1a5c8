//! Ephemeral per-session authentication state.

use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// The authenticated identity carried in the cookie-backed session.
///
/// Established at login, cleared at logout. Never persisted to durable
/// storage and never shared across requests except through the session
/// store itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}
