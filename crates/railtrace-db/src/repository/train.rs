//! SurrealDB implementation of [`TrainRepository`].
//!
//! Train ids are integers allocated from the `sequence` table inside
//! the same transaction as the insert. Deleting a train removes every
//! cargo referencing it in one transaction with the train row itself.

use railtrace_core::error::RailtraceResult;
use railtrace_core::models::train::{CreateTrain, Train, UpdateTrain};
use railtrace_core::repository::TrainRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// DB-side row struct for queries where the id is already known.
#[derive(Debug, SurrealValue)]
struct TrainRow {
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

/// DB-side row struct that includes the record id via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TrainRowWithId {
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

impl TrainRow {
    fn into_train(self, id: i64) -> Train {
        Train {
            train_id: id,
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

impl TrainRowWithId {
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

/// SurrealDB implementation of the Train repository.
#[derive(Clone)]
pub struct SurrealTrainRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTrainRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TrainRepository for SurrealTrainRepository<C> {
    async fn create(&self, input: CreateTrain) -> RailtraceResult<Train> {
        let result = self
            .db
            .query(
                "BEGIN TRANSACTION; \
                 LET $next = (UPSERT type::record('sequence', 'train') \
                     SET value += 1 RETURN AFTER)[0].value; \
                 CREATE type::record('train', $next) SET \
                     name = $name, \
                     departure_station = $departure_station, \
                     arrival_station = $arrival_station, \
                     departure_time = $departure_time, \
                     arrival_time = $arrival_time, \
                     last_operation_station = $last_operation_station, \
                     last_operation_time = $last_operation_time, \
                     distance_to_arrival = $distance_to_arrival, \
                     operation_desc = $operation_desc \
                     RETURN NONE; \
                 SELECT meta::id(id) AS train_id, * \
                     FROM type::record('train', $next); \
                 COMMIT TRANSACTION;",
            )
            .bind(("name", input.name))
            .bind(("departure_station", input.departure_station))
            .bind(("arrival_station", input.arrival_station))
            .bind(("departure_time", input.departure_time))
            .bind(("arrival_time", input.arrival_time))
            .bind(("last_operation_station", input.last_operation_station))
            .bind(("last_operation_time", input.last_operation_time))
            .bind(("distance_to_arrival", input.distance_to_arrival))
            .bind(("operation_desc", input.operation_desc))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<TrainRowWithId> = result.take(2).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::Query(
            "train insert returned no row".into(),
        ))?;

        Ok(row.into_train())
    }

    async fn get_by_id(&self, id: i64) -> RailtraceResult<Train> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('train', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TrainRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "train".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_train(id))
    }

    async fn update(&self, id: i64, input: UpdateTrain) -> RailtraceResult<Train> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.departure_station.is_some() {
            sets.push("departure_station = $departure_station");
        }
        if input.arrival_station.is_some() {
            sets.push("arrival_station = $arrival_station");
        }
        if input.departure_time.is_some() {
            sets.push("departure_time = $departure_time");
        }
        if input.arrival_time.is_some() {
            sets.push("arrival_time = $arrival_time");
        }
        if input.last_operation_station.is_some() {
            sets.push("last_operation_station = $last_operation_station");
        }
        if input.last_operation_time.is_some() {
            sets.push("last_operation_time = $last_operation_time");
        }
        if input.distance_to_arrival.is_some() {
            sets.push("distance_to_arrival = $distance_to_arrival");
        }
        if input.operation_desc.is_some() {
            sets.push("operation_desc = $operation_desc");
        }

        if sets.is_empty() {
            // Nothing to change; still surfaces NotFound for absent ids.
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE type::record('train', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(departure_station) = input.departure_station {
            builder = builder.bind(("departure_station", departure_station));
        }
        if let Some(arrival_station) = input.arrival_station {
            builder = builder.bind(("arrival_station", arrival_station));
        }
        if let Some(departure_time) = input.departure_time {
            builder = builder.bind(("departure_time", departure_time));
        }
        if let Some(arrival_time) = input.arrival_time {
            builder = builder.bind(("arrival_time", arrival_time));
        }
        if let Some(last_operation_station) = input.last_operation_station {
            builder = builder.bind(("last_operation_station", last_operation_station));
        }
        if let Some(last_operation_time) = input.last_operation_time {
            builder = builder.bind(("last_operation_time", last_operation_time));
        }
        if let Some(distance_to_arrival) = input.distance_to_arrival {
            builder = builder.bind(("distance_to_arrival", distance_to_arrival));
        }
        if let Some(operation_desc) = input.operation_desc {
            builder = builder.bind(("operation_desc", operation_desc));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<TrainRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "train".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_train(id))
    }

    async fn delete(&self, id: i64) -> RailtraceResult<()> {
        // Existence check first, so a repeated delete reports NotFound
        // instead of silently succeeding.
        let mut result = self
            .db
            .query("SELECT * FROM type::record('train', $id)")
            .bind(("id", id))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<TrainRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "train".into(),
                id: id.to_string(),
            }
            .into());
        }

        // The cargo cascade and the train removal commit together.
        self.db
            .query(
                "BEGIN TRANSACTION; \
                 DELETE cargo WHERE train_id = $id; \
                 DELETE type::record('train', $id); \
                 COMMIT TRANSACTION;",
            )
            .bind(("id", id))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> RailtraceResult<Vec<Train>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS train_id, * FROM train ORDER BY id ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TrainRowWithId> = result.take(0).map_err(DbError::from)?;

        Ok(rows.into_iter().map(TrainRowWithId::into_train).collect())
    }
}
