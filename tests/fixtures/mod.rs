//! Shared test fixtures: small in-memory road networks and stop sets.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use route_optimizer::api::{OptimizeRequest, Stop, StopRecord};
use route_optimizer::graph::{BoundingBox, RoadGraph};
use route_optimizer::traits::{FetchError, RoadNetworkSource};

pub fn stop(name: &str, lat: f64, lon: f64) -> Stop {
    Stop {
        stop_lat: lat,
        stop_lon: lon,
        stop_name: name.to_string(),
    }
}

pub fn record(stop: &Stop) -> StopRecord {
    StopRecord {
        stop_lat: Some(stop.stop_lat),
        stop_lon: Some(stop.stop_lon),
        stop_name: Some(stop.stop_name.clone()),
    }
}

pub fn request_for(stops: &[Stop]) -> OptimizeRequest {
    OptimizeRequest {
        locations: Some(stops.iter().map(record).collect()),
    }
}

/// Three mutually reachable nodes with asymmetric segment lengths.
///
/// Node ids 1..=3 sit exactly at the [`triangle_stops`] coordinates, so
/// nearest-node snapping is exact.
pub fn triangle_graph() -> RoadGraph {
    let mut graph = RoadGraph::new();
    graph.add_node(1, 0.00, 0.00);
    graph.add_node(2, 0.01, 0.00);
    graph.add_node(3, 0.00, 0.01);
    // clockwise is cheap, counter-clockwise expensive
    graph.add_segment(1, 2, 100.0);
    graph.add_segment(2, 1, 900.0);
    graph.add_segment(2, 3, 150.0);
    graph.add_segment(3, 2, 900.0);
    graph.add_segment(3, 1, 120.0);
    graph.add_segment(1, 3, 900.0);
    graph
}

/// Stops placed exactly on the triangle graph nodes, depot first.
pub fn triangle_stops() -> Vec<Stop> {
    vec![
        stop("Depot", 0.00, 0.00),
        stop("North", 0.01, 0.00),
        stop("East", 0.00, 0.01),
    ]
}

/// Triangle graph plus a two-node island far away, unreachable from the
/// triangle in either direction.
pub fn triangle_with_island() -> RoadGraph {
    let mut graph = triangle_graph();
    graph.add_node(8, 0.50, 0.50);
    graph.add_node(9, 0.50, 0.51);
    graph.add_segment(8, 9, 50.0);
    graph.add_segment(9, 8, 50.0);
    graph
}

/// A stop sitting on the island, disconnected from the triangle stops.
pub fn island_stop() -> Stop {
    stop("Island", 0.50, 0.50)
}

/// In-memory network source that hands out clones of a prebuilt graph and
/// counts how often it is asked.
pub struct FakeSource {
    graph: RoadGraph,
    fetches: Rc<Cell<usize>>,
}

impl FakeSource {
    pub fn new(graph: RoadGraph) -> Self {
        Self {
            graph,
            fetches: Rc::new(Cell::new(0)),
        }
    }

    /// Shared fetch counter, usable after the source moves into a planner.
    pub fn fetch_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.fetches)
    }
}

impl RoadNetworkSource for FakeSource {
    type Network = RoadGraph;

    fn fetch(&self, _bbox: &BoundingBox) -> Result<RoadGraph, FetchError> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.graph.clone())
    }
}

/// Source that always fails, for exercising the fetch-error path.
pub struct FailingSource;

impl RoadNetworkSource for FailingSource {
    type Network = RoadGraph;

    fn fetch(&self, _bbox: &BoundingBox) -> Result<RoadGraph, FetchError> {
        Err(FetchError::EmptyNetwork)
    }
}
