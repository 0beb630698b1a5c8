//! Cargo domain model.
//!
//! A cargo record optionally references the train carrying it. The
//! reference must point at an existing train at create/update time;
//! deleting a train removes its cargo.

use serde::{Deserialize, Serialize};

use crate::models::train::Train;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cargo {
    pub cargo_id: i64,
    pub cargo_type: Option<String>,
    pub train_id: Option<i64>,
    pub current_station: Option<String>,
    pub status: Option<String>,
    pub last_stop_time: Option<String>,
    pub next_station: Option<String>,
    pub distance_to_arrival: Option<i64>,
    pub last_operation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCargo {
    pub cargo_type: Option<String>,
    pub train_id: Option<i64>,
    pub current_station: Option<String>,
    pub status: Option<String>,
    pub last_stop_time: Option<String>,
    pub next_station: Option<String>,
    pub distance_to_arrival: Option<i64>,
    pub last_operation: Option<String>,
}

/// Partial update. `None` = no change; for nullable fields
/// `Some(Some(val))` = set, `Some(None)` = clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCargo {
    pub cargo_type: Option<Option<String>>,
    pub train_id: Option<Option<i64>>,
    pub current_station: Option<Option<String>>,
    pub status: Option<Option<String>>,
    pub last_stop_time: Option<Option<String>>,
    pub next_station: Option<Option<String>>,
    pub distance_to_arrival: Option<Option<i64>>,
    pub last_operation: Option<Option<String>>,
}

/// A cargo record together with its carrying train, if any.
///
/// Read operations that need the related train return this shape so
/// presentation never performs a follow-up lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoWithTrain {
    pub cargo: Cargo,
    pub train: Option<Train>,
}
