//! Capability interfaces for the optimization pipeline.
//!
//! These are intentionally minimal. The pipeline only needs nearest-node
//! snapping, shortest-path queries, and line simplification, so concrete
//! road-network and geometry backends stay swappable (and fakeable in
//! tests).

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use crate::graph::BoundingBox;

/// A routable road network with `length`-weighted edges.
///
/// Node coordinates follow the road-network convention: `x` is longitude,
/// `y` is latitude.
pub trait RoadNetwork {
    type NodeId: Copy + Eq + Hash + Debug;

    /// Snap a coordinate to the nearest graph node, if the network has any.
    fn nearest_node(&self, lon: f64, lat: f64) -> Option<Self::NodeId>;

    /// Length of the shortest path between two nodes, weighted by edge
    /// `length`. `None` when no path exists.
    fn shortest_path_length(&self, from: Self::NodeId, to: Self::NodeId) -> Option<f64>;

    /// Node sequence of the shortest path between two nodes, weighted by
    /// edge `length`. `None` when no path exists.
    fn shortest_path(&self, from: Self::NodeId, to: Self::NodeId) -> Option<Vec<Self::NodeId>>;

    /// Coordinates of a node as `(x, y)` = `(lon, lat)`.
    fn node_coordinates(&self, node: Self::NodeId) -> Option<(f64, f64)>;
}

/// Produces a road network covering a bounding region.
///
/// Each call builds a fresh network owned by the caller; implementations
/// must not cache across calls.
pub trait RoadNetworkSource {
    type Network: RoadNetwork;

    fn fetch(&self, bbox: &BoundingBox) -> Result<Self::Network, FetchError>;
}

/// Failure to acquire a road network for a region.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("road network request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed road network payload: {0}")]
    Payload(String),
    #[error("no routable road network in the requested area")]
    EmptyNetwork,
}

/// Reduces a coordinate sequence to a visually equivalent shorter one.
///
/// Implementations must be deterministic, preserve the first and last
/// points of any input with at least 2 points, and return inputs with
/// fewer than 2 points unchanged.
pub trait LineSimplifier {
    fn simplify(&self, points: &[(f64, f64)], tolerance: f64) -> Vec<(f64, f64)>;
}
