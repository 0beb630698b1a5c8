//! SurrealDB implementation of [`ContactRepository`].

use chrono::{DateTime, Utc};
use railtrace_core::error::RailtraceResult;
use railtrace_core::models::contact::{Contact, CreateContact};
use railtrace_core::repository::ContactRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ContactRowWithId {
    contact_id: i64,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl ContactRowWithId {
    fn into_contact(self) -> Contact {
        Contact {
            contact_id: self.contact_id,
            name: self.name,
            email: self.email,
            message: self.message,
            created_at: self.created_at,
        }
    }
}

/// SurrealDB implementation of the Contact repository.
#[derive(Clone)]
pub struct SurrealContactRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealContactRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ContactRepository for SurrealContactRepository<C> {
    async fn create(&self, input: CreateContact) -> RailtraceResult<Contact> {
        // created_at is stamped by the schema's time::now() default.
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 LET $next = (UPSERT type::record('sequence', 'contact') \
                     SET value += 1 RETURN AFTER)[0].value; \
                 CREATE type::record('contact', $next) SET \
                     name = $name, \
                     email = $email, \
                     message = $message \
                     RETURN NONE; \
                 SELECT meta::id(id) AS contact_id, * \
                     FROM type::record('contact', $next); \
                 COMMIT TRANSACTION;",
            )
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("message", input.message))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<ContactRowWithId> = result.take(2).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::Query(
            "contact insert returned no row".into(),
        ))?;

        Ok(row.into_contact())
    }
}
