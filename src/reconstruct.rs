//! Road-following path reconstruction for a solved tour.
//!
//! Each tour leg is resolved to its recorded node pair, expanded into the
//! shortest node path over the road network, and simplified individually.
//! Legs are then concatenated, dropping each subsequent leg's first point
//! so leg boundaries never repeat a coordinate, and the full sequence is
//! simplified once more. A failed leg leaves a gap in the drawn route but
//! never aborts the rest.

use tracing::{debug, warn};

use crate::matrix::NodePairIndex;
use crate::polyline::Polyline;
use crate::traits::{LineSimplifier, RoadNetwork};

/// Build the drawable path for a tour order.
///
/// Works in `(lon, lat)` internally; the returned [`Polyline`] holds
/// `(lat, lon)` points, converted once at the end.
pub fn reconstruct_route<G, S>(
    network: &G,
    order: &[usize],
    pairs: &NodePairIndex<G::NodeId>,
    simplifier: &S,
    tolerance: f64,
) -> Polyline
where
    G: RoadNetwork,
    S: LineSimplifier,
{
    let mut path: Vec<(f64, f64)> = Vec::new();

    for leg in order.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        let Some((origin_node, destination_node)) = pairs.get(from, to) else {
            debug!(from, to, "no recorded node pair for leg, skipping");
            continue;
        };
        let Some(node_path) = network.shortest_path(origin_node, destination_node) else {
            warn!(from, to, "no path for recorded leg, skipping");
            continue;
        };

        let coords: Vec<(f64, f64)> = node_path
            .into_iter()
            .filter_map(|node| network.node_coordinates(node))
            .collect();
        let simplified = simplifier.simplify(&coords, tolerance);

        if path.is_empty() {
            path.extend(simplified);
        } else {
            // first point duplicates the previous leg's terminal point
            path.extend(simplified.into_iter().skip(1));
        }
    }

    Polyline::from_lon_lat(simplifier.simplify(&path, tolerance))
}
