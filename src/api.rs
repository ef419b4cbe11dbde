//! Wire-level request and response types.
//!
//! Mirrors the JSON shapes of the optimization endpoint. Incoming records
//! keep every field optional so missing-field validation can produce its
//! own error message instead of a deserialization failure.

use serde::{Deserialize, Serialize};

/// A validated stop to visit, identified elsewhere by its index in the
/// request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub stop_name: String,
}

/// A raw incoming stop record, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopRecord {
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub stop_name: Option<String>,
}

impl StopRecord {
    /// `None` when any required field is missing.
    pub fn into_stop(self) -> Option<Stop> {
        Some(Stop {
            stop_lat: self.stop_lat?,
            stop_lon: self.stop_lon?,
            stop_name: self.stop_name?,
        })
    }
}

/// The optimization request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizeRequest {
    pub locations: Option<Vec<StopRecord>>,
}

/// The optimization response body, tagged by `status`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OptimizeResponse {
    Success {
        /// Stops in solved visiting order, depot first and last.
        route: Vec<Stop>,
        /// Simplified drawable path as `[lat, lon]` pairs.
        path_coordinates: Vec<[f64; 2]>,
        /// Total tour distance in matrix units (meters).
        total_distance: i64,
    },
    Error {
        message: String,
    },
}
