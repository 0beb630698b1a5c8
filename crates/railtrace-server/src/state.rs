//! Shared application state.
//!
//! Holds the database handle and hands out repositories scoped to one
//! logical operation, so no handler keeps storage state across
//! requests.

use railtrace_auth::{AuthConfig, AuthService};
use railtrace_db::repository::{
    SurrealCargoRepository, SurrealContactRepository, SurrealTrainRepository,
    SurrealUserRepository,
};
use surrealdb::{Connection, Surreal};

pub struct AppState<C: Connection> {
    db: Surreal<C>,
    pepper: Option<String>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            pepper: self.pepper.clone(),
        }
    }
}

impl<C: Connection> AppState<C> {
    pub fn new(db: Surreal<C>, pepper: Option<String>) -> Self {
        Self { db, pepper }
    }

    pub fn trains(&self) -> SurrealTrainRepository<C> {
        SurrealTrainRepository::new(self.db.clone())
    }

    pub fn cargos(&self) -> SurrealCargoRepository<C> {
        SurrealCargoRepository::new(self.db.clone())
    }

    pub fn contacts(&self) -> SurrealContactRepository<C> {
        SurrealContactRepository::new(self.db.clone())
    }

    pub fn users(&self) -> SurrealUserRepository<C> {
        match &self.pepper {
            Some(p) => SurrealUserRepository::with_pepper(self.db.clone(), p.clone()),
            None => SurrealUserRepository::new(self.db.clone()),
        }
    }

    pub fn auth(&self) -> AuthService<SurrealUserRepository<C>> {
        AuthService::new(
            self.users(),
            AuthConfig {
                pepper: self.pepper.clone(),
            },
        )
    }
}
