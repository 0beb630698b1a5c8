//! Train domain model.
//!
//! Departure/arrival times and operation timestamps are stored as
//! free-form text, not parsed temporal values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub train_id: i64,
    pub name: String,
    pub departure_station: Option<String>,
    pub arrival_station: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub last_operation_station: Option<String>,
    pub last_operation_time: Option<String>,
    /// Remaining distance to the terminal station, in kilometres.
    pub distance_to_arrival: Option<i64>,
    pub operation_desc: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTrain {
    pub name: String,
    pub departure_station: Option<String>,
    pub arrival_station: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub last_operation_station: Option<String>,
    pub last_operation_time: Option<String>,
    pub distance_to_arrival: Option<i64>,
    pub operation_desc: Option<String>,
}

/// Partial update. `None` = no change; for nullable fields
/// `Some(Some(val))` = set, `Some(None)` = clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrain {
    pub name: Option<String>,
    pub departure_station: Option<Option<String>>,
    pub arrival_station: Option<Option<String>>,
    pub departure_time: Option<Option<String>>,
    pub arrival_time: Option<Option<String>>,
    pub last_operation_station: Option<Option<String>>,
    pub last_operation_time: Option<Option<String>>,
    pub distance_to_arrival: Option<Option<i64>>,
    pub operation_desc: Option<Option<String>>,
}
