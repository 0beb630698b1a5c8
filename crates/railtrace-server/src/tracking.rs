//! Public tracking lookup.
//!
//! Accepts a free-form identifier and a category, parses the
//! identifier as an integer, and looks the record up by primary key.
//! Non-numeric input is a user-facing `InvalidIdentifier`, never a
//! storage error; a missing record is a valid empty result, not a
//! failure.

use railtrace_core::error::{RailtraceError, RailtraceResult};
use railtrace_core::models::cargo::CargoWithTrain;
use railtrace_core::models::train::Train;
use railtrace_core::repository::{CargoRepository, TrainRepository};

/// What kind of record a tracking query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackCategory {
    Train,
    Cargo,
}

impl TrackCategory {
    pub fn parse(s: &str) -> Option<TrackCategory> {
        match s {
            "train" => Some(TrackCategory::Train),
            "cargo" => Some(TrackCategory::Cargo),
            _ => None,
        }
    }
}

/// A successful tracking lookup. Cargo results carry the associated
/// train so presentation needs no follow-up query.
#[derive(Debug, Clone)]
pub enum TrackRecord {
    Train(Train),
    Cargo(CargoWithTrain),
}

/// Tracking lookup service, generic over the repositories.
pub struct TrackingService<T: TrainRepository, G: CargoRepository> {
    trains: T,
    cargos: G,
}

impl<T: TrainRepository, G: CargoRepository> TrackingService<T, G> {
    pub fn new(trains: T, cargos: G) -> Self {
        Self { trains, cargos }
    }

    /// Look up at most one record by its numeric identifier.
    pub async fn track(
        &self,
        category: TrackCategory,
        identifier: &str,
    ) -> RailtraceResult<Option<TrackRecord>> {
        let id: i64 = identifier
            .trim()
            .parse()
            .map_err(|_| RailtraceError::InvalidIdentifier {
                input: identifier.to_string(),
            })?;

        match category {
            TrackCategory::Train => match self.trains.get_by_id(id).await {
                Ok(train) => Ok(Some(TrackRecord::Train(train))),
                Err(RailtraceError::NotFound { .. }) => Ok(None),
                Err(e) => Err(e),
            },
            TrackCategory::Cargo => match self.cargos.get_with_train(id).await {
                Ok(cargo) => Ok(Some(TrackRecord::Cargo(cargo))),
                Err(RailtraceError::NotFound { .. }) => Ok(None),
                Err(e) => Err(e),
            },
        }
    }
}
