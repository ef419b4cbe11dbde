//! Pairwise travel-distance matrix over a road network.
//!
//! Every ordered stop pair gets a shortest-path-length query after snapping
//! both stops to their nearest graph nodes: O(N^2) queries, the dominant
//! cost for larger inputs. A failed pair never fails the build; the cell
//! falls back to [`UNREACHABLE_DISTANCE`] and the pair is left out of the
//! node-pair index.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::api::Stop;
use crate::traits::RoadNetwork;

/// Sentinel distance for unreachable pairs. Finite so the matrix stays a
/// total function, large enough to dominate any real tour cost.
pub const UNREACHABLE_DISTANCE: i64 = 1_000_000;

/// N×N matrix of non-negative integer travel distances, indexed by stop
/// position in the request order. Diagonal is always 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<i64>,
}

impl DistanceMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Number of stops (matrix is `len` × `len`).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.cells[from * self.n + to]
    }

    pub fn set(&mut self, from: usize, to: usize, distance: i64) {
        self.cells[from * self.n + to] = distance;
    }
}

/// Graph node pair used for each reachable ordered stop pair, needed later
/// to reconstruct the leg geometry. Absence of a pair means no recorded
/// path: reconstruction skips that leg.
#[derive(Debug, Clone)]
pub struct NodePairIndex<N> {
    pairs: HashMap<(usize, usize), (N, N)>,
}

impl<N: Copy> NodePairIndex<N> {
    pub fn new() -> Self {
        Self {
            pairs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, from: usize, to: usize, nodes: (N, N)) {
        self.pairs.insert((from, to), nodes);
    }

    pub fn get(&self, from: usize, to: usize) -> Option<(N, N)> {
        self.pairs.get(&(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.keys().copied()
    }
}

impl<N: Copy> Default for NodePairIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the distance matrix and node-pair index for the given stops.
pub fn build_distance_matrix<G: RoadNetwork>(
    network: &G,
    stops: &[Stop],
) -> (DistanceMatrix, NodePairIndex<G::NodeId>) {
    let n = stops.len();
    let mut matrix = DistanceMatrix::new(n);
    let mut pairs = NodePairIndex::new();

    for (i, origin) in stops.iter().enumerate() {
        for (j, destination) in stops.iter().enumerate() {
            if i == j {
                continue;
            }

            let snapped = network
                .nearest_node(origin.stop_lon, origin.stop_lat)
                .zip(network.nearest_node(destination.stop_lon, destination.stop_lat));
            let Some((origin_node, destination_node)) = snapped else {
                warn!(from = i, to = j, "could not snap stop pair to the road network");
                matrix.set(i, j, UNREACHABLE_DISTANCE);
                continue;
            };

            match network.shortest_path_length(origin_node, destination_node) {
                Some(distance) => {
                    matrix.set(i, j, distance as i64);
                    pairs.insert(i, j, (origin_node, destination_node));
                }
                None => {
                    debug!(
                        from = i,
                        to = j,
                        ?origin_node,
                        ?destination_node,
                        "no path between snapped nodes"
                    );
                    matrix.set(i, j, UNREACHABLE_DISTANCE);
                }
            }
        }
    }

    (matrix, pairs)
}
