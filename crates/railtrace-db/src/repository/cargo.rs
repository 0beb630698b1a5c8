//! SurrealDB implementation of [`CargoRepository`].
//!
//! The engine enforces no foreign keys, so the train reference is
//! checked here before any write: a cargo pointing at a missing train
//! fails with `InvalidReference` and nothing is stored.

use railtrace_core::error::{RailtraceError, RailtraceResult};
use railtrace_core::models::cargo::{Cargo, CargoWithTrain, CreateCargo, UpdateCargo};
use railtrace_core::models::train::Train;
use railtrace_core::repository::CargoRepository;
use std::collections::HashMap;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// DB-side row struct for queries where the id is already known.
#[derive(Debug, SurrealValue)]
struct CargoRow {
    cargo_type: Option<String>,
    train_id: Option<i64>,
    current_station: Option<String>,
    status: Option<String>,
    last_stop_time: Option<String>,
    next_station: Option<String>,
    distance_to_arrival: Option<i64>,
    last_operation: Option<String>,
}

/// DB-side row struct that includes the record id via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct CargoRowWithId {
    cargo_id: i64,
    cargo_type: Option<String>,
    train_id: Option<i64>,
    current_station: Option<String>,
    status: Option<String>,
    last_stop_time: Option<String>,
    next_station: Option<String>,
    distance_to_arrival: Option<i64>,
    last_operation: Option<String>,
}

/// Train row as fetched for the joined `CargoWithTrain` shape.
#[derive(Debug, SurrealValue)]
struct JoinedTrainRow {
    train_id: i64,
    name: String,
    departure_station: Option<String>,
    arrival_station: Option<String>,
    departure_time: Option<String>,
    arrival_time: Option<String>,
    last_operation_station: Option<String>,
    last_operation_time: Option<String>,
    distance_to_arrival: Option<i64>,
    operation_desc: Option<String>,
}

impl CargoRow {
    fn into_cargo(self, id: i64) -> Cargo {
        Cargo {
            cargo_id: id,
            cargo_type: self.cargo_type,
            train_id: self.train_id,
            current_station: self.current_station,
            status: self.status,
            last_stop_time: self.last_stop_time,
            next_station: self.next_station,
            distance_to_arrival: self.distance_to_arrival,
            last_operation: self.last_operation,
        }
    }
}

impl CargoRowWithId {
    fn into_cargo(self) -> Cargo {
        Cargo {
            cargo_id: self.cargo_id,
            cargo_type: self.cargo_type,
            train_id: self.train_id,
            current_station: self.current_station,
            status: self.status,
            last_stop_time: self.last_stop_time,
            next_station: self.next_station,
            distance_to_arrival: self.distance_to_arrival,
            last_operation: self.last_operation,
        }
    }
}

impl JoinedTrainRow {
    fn into_train(self) -> Train {
        Train {
            train_id: self.train_id,
            name: self.name,
            departure_station: self.departure_station,
            arrival_station: self.arrival_station,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            last_operation_station: self.last_operation_station,
            last_operation_time: self.last_operation_time,
            distance_to_arrival: self.distance_to_arrival,
            operation_desc: self.operation_desc,
        }
    }
}

/// SurrealDB implementation of the Cargo repository.
#[derive(Clone)]
pub struct SurrealCargoRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCargoRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Referential check: the train a cargo points at must exist.
    async fn ensure_train_exists(&self, train_id: i64) -> RailtraceResult<()> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS train_id FROM type::record('train', $id)")
            .bind(("id", train_id))
            .await
            .map_err(DbError::from)?;

        #[derive(Debug, SurrealValue)]
        struct IdRow {
            #[allow(dead_code)]
            train_id: i64,
        }

        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(RailtraceError::InvalidReference {
                entity: "train".into(),
                id: train_id.to_string(),
            });
        }
        Ok(())
    }

    async fn fetch_train(&self, train_id: i64) -> RailtraceResult<Option<Train>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS train_id, * \
                 FROM type::record('train', $id)",
            )
            .bind(("id", train_id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<JoinedTrainRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(JoinedTrainRow::into_train))
    }
}

impl<C: Connection> CargoRepository for SurrealCargoRepository<C> {
    async fn create(&self, input: CreateCargo) -> RailtraceResult<Cargo> {
        if let Some(train_id) = input.train_id {
            self.ensure_train_exists(train_id).await?;
        }

        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 LET $next = (UPSERT type::record('sequence', 'cargo') \
                     SET value += 1 RETURN AFTER)[0].value; \
                 CREATE type::record('cargo', $next) SET \
                     cargo_type = $cargo_type, \
                     train_id = $train_id, \
                     current_station = $current_station, \
                     status = $status, \
                     last_stop_time = $last_stop_time, \
                     next_station = $next_station, \
                     distance_to_arrival = $distance_to_arrival, \
                     last_operation = $last_operation \
                     RETURN NONE; \
                 SELECT meta::id(id) AS cargo_id, * \
                     FROM type::record('cargo', $next); \
                 COMMIT TRANSACTION;",
            )
            .bind(("cargo_type", input.cargo_type))
            .bind(("train_id", input.train_id))
            .bind(("current_station", input.current_station))
            .bind(("status", input.status))
            .bind(("last_stop_time", input.last_stop_time))
            .bind(("next_station", input.next_station))
            .bind(("distance_to_arrival", input.distance_to_arrival))
            .bind(("last_operation", input.last_operation))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CargoRowWithId> = result.take(2).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::Query(
            "cargo insert returned no row".into(),
        ))?;

        Ok(row.into_cargo())
    }

    async fn get_by_id(&self, id: i64) -> RailtraceResult<Cargo> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('cargo', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CargoRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cargo".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_cargo(id))
    }

    async fn get_with_train(&self, id: i64) -> RailtraceResult<CargoWithTrain> {
        let cargo = self.get_by_id(id).await?;
        let train = match cargo.train_id {
            Some(train_id) => self.fetch_train(train_id).await?,
            None => None,
        };
        Ok(CargoWithTrain { cargo, train })
    }

    async fn update(&self, id: i64, input: UpdateCargo) -> RailtraceResult<Cargo> {
        if let Some(Some(train_id)) = input.train_id {
            self.ensure_train_exists(train_id).await?;
        }

        let mut sets = Vec::new();
        if input.cargo_type.is_some() {
            sets.push("cargo_type = $cargo_type");
        }
        if input.train_id.is_some() {
            sets.push("train_id = $train_id");
        }
        if input.current_station.is_some() {
            sets.push("current_station = $current_station");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.last_stop_time.is_some() {
            sets.push("last_stop_time = $last_stop_time");
        }
        if input.next_station.is_some() {
            sets.push("next_station = $next_station");
        }
        if input.distance_to_arrival.is_some() {
            sets.push("distance_to_arrival = $distance_to_arrival");
        }
        if input.last_operation.is_some() {
            sets.push("last_operation = $last_operation");
        }

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('cargo', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id));

        if let Some(cargo_type) = input.cargo_type {
            builder = builder.bind(("cargo_type", cargo_type));
        }
        if let Some(train_id) = input.train_id {
            builder = builder.bind(("train_id", train_id));
        }
        if let Some(current_station) = input.current_station {
            builder = builder.bind(("current_station", current_station));
        }
        if let Some(status) = input.status {
            builder = builder.bind(("status", status));
        }
        if let Some(last_stop_time) = input.last_stop_time {
            builder = builder.bind(("last_stop_time", last_stop_time));
        }
        if let Some(next_station) = input.next_station {
            builder = builder.bind(("next_station", next_station));
        }
        if let Some(distance_to_arrival) = input.distance_to_arrival {
            builder = builder.bind(("distance_to_arrival", distance_to_arrival));
        }
        if let Some(last_operation) = input.last_operation {
            builder = builder.bind(("last_operation", last_operation));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CargoRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "cargo".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_cargo(id))
    }

    async fn delete(&self, id: i64) -> RailtraceResult<()> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('cargo', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CargoRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "cargo".into(),
                id: id.to_string(),
            }
            .into());
        }

        self.db
            .query("DELETE type::record('cargo', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_with_train(&self) -> RailtraceResult<Vec<CargoWithTrain>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS cargo_id, * FROM cargo ORDER BY id ASC")
            .await
            .map_err(DbError::from)?;
        let cargo_rows: Vec<CargoRowWithId> = result.take(0).map_err(DbError::from)?;

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS train_id, * FROM train")
            .await
            .map_err(DbError::from)?;
        let train_rows: Vec<JoinedTrainRow> = result.take(0).map_err(DbError::from)?;

        let trains: HashMap<i64, Train> = train_rows
            .into_iter()
            .map(|row| (row.train_id, row.into_train()))
            .collect();

        Ok(cargo_rows
            .into_iter()
            .map(|row| {
                let cargo = row.into_cargo();
                let train = cargo.train_id.and_then(|id| trains.get(&id).cloned());
                CargoWithTrain { cargo, train }
            })
            .collect())
    }
}
