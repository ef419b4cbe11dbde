//! Polyline representation for route geometries.
//!
//! Stores the drawable route as decoded `(lat, lon)` points. The pipeline
//! works in `(lon, lat)` internally and converts exactly once, when the
//! polyline is built for emission.

use serde::{Deserialize, Serialize};

/// A route geometry as an ordered sequence of `(lat, lon)` points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Create from `(lat, lon)` points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Create from internal `(lon, lat)` points, swapping each pair. This
    /// is the single lon/lat to lat/lon conversion in the pipeline.
    pub fn from_lon_lat(points: Vec<(f64, f64)>) -> Self {
        Self {
            points: points.into_iter().map(|(x, y)| (y, x)).collect(),
        }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(f64, f64)> {
        self.points.last().copied()
    }

    /// Wire form: `[lat, lon]` pairs.
    pub fn into_pairs(self) -> Vec<[f64; 2]> {
        self.points.into_iter().map(|(lat, lon)| [lat, lon]).collect()
    }
}
