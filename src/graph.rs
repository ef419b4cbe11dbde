//! In-memory road graph backed by petgraph.
//!
//! Nodes carry `(x, y)` = `(lon, lat)` coordinates, edges carry a `length`
//! weight in meters. The graph is directed so one-way streets keep their
//! direction; two-way segments are stored as a pair of opposing edges.

use std::collections::{HashMap, HashSet};

use petgraph::algo::{astar, kosaraju_scc};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::api::Stop;
use crate::haversine::haversine_m;
use crate::traits::RoadNetwork;

/// Margin added on each side of the stop bounding box, in degrees.
pub const BBOX_MARGIN_DEGREES: f64 = 0.01;

/// Geographic bounding region, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Bounding box covering all stops plus `margin` degrees on each side.
    /// `None` when the stop list is empty.
    pub fn around_stops(stops: &[Stop], margin: f64) -> Option<Self> {
        let first = stops.first()?;
        let mut bbox = Self {
            south: first.stop_lat,
            north: first.stop_lat,
            west: first.stop_lon,
            east: first.stop_lon,
        };
        for stop in &stops[1..] {
            bbox.south = bbox.south.min(stop.stop_lat);
            bbox.north = bbox.north.max(stop.stop_lat);
            bbox.west = bbox.west.min(stop.stop_lon);
            bbox.east = bbox.east.max(stop.stop_lon);
        }
        bbox.south -= margin;
        bbox.north += margin;
        bbox.west -= margin;
        bbox.east += margin;
        Some(bbox)
    }
}

/// A road-graph node: `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, Copy)]
pub struct RoadNode {
    pub x: f64,
    pub y: f64,
}

/// A road segment between two nodes, `length` in meters.
#[derive(Debug, Clone, Copy)]
pub struct RoadEdge {
    pub length: f64,
}

/// A routable road network for one pipeline invocation.
///
/// Built fresh per request and discarded afterwards; never cached or shared.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    graph: StableDiGraph<RoadNode, RoadEdge>,
    ids: HashMap<i64, NodeIndex>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node keyed by an external id. Re-inserting an id returns
    /// the existing index without duplicating the node.
    pub fn add_node(&mut self, id: i64, lon: f64, lat: f64) -> NodeIndex {
        match self.ids.get(&id) {
            Some(&index) => index,
            None => {
                let index = self.graph.add_node(RoadNode { x: lon, y: lat });
                self.ids.insert(id, index);
                index
            }
        }
    }

    /// Insert a directed segment between two previously added nodes.
    /// Returns `false` when either endpoint is unknown.
    pub fn add_segment(&mut self, from: i64, to: i64, length: f64) -> bool {
        let (Some(&a), Some(&b)) = (self.ids.get(&from), self.ids.get(&to)) else {
            return false;
        };
        self.graph.add_edge(a, b, RoadEdge { length });
        true
    }

    /// Segment length from stored node coordinates, meters.
    pub fn segment_length(&self, from: i64, to: i64) -> Option<f64> {
        let a = self.graph.node_weight(*self.ids.get(&from)?)?;
        let b = self.graph.node_weight(*self.ids.get(&to)?)?;
        Some(haversine_m((a.y, a.x), (b.y, b.x)))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Restrict the graph to its largest strongly-connected component so
    /// every remaining node is mutually reachable.
    pub fn retain_largest_component(&mut self) {
        let components = kosaraju_scc(&self.graph);
        let Some(largest) = components.iter().max_by_key(|component| component.len()) else {
            return;
        };
        let keep: HashSet<NodeIndex> = largest.iter().copied().collect();
        self.graph.retain_nodes(|_, index| keep.contains(&index));
        let graph = &self.graph;
        self.ids.retain(|_, index| graph.contains_node(*index));
    }
}

impl RoadNetwork for RoadGraph {
    type NodeId = NodeIndex;

    fn nearest_node(&self, lon: f64, lat: f64) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .map(|index| {
                let node = &self.graph[index];
                (index, haversine_m((lat, lon), (node.y, node.x)))
            })
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index)
    }

    fn shortest_path_length(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        astar(
            &self.graph,
            from,
            |node| node == to,
            |edge| edge.weight().length,
            |_| 0.0,
        )
        .map(|(length, _)| length)
    }

    fn shortest_path(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
        astar(
            &self.graph,
            from,
            |node| node == to,
            |edge| edge.weight().length,
            |_| 0.0,
        )
        .map(|(_, path)| path)
    }

    fn node_coordinates(&self, node: NodeIndex) -> Option<(f64, f64)> {
        self.graph.node_weight(node).map(|n| (n.x, n.y))
    }
}
