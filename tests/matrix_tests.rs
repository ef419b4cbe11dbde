//! Distance matrix construction over an in-memory road network.

mod fixtures;

use fixtures::{island_stop, triangle_graph, triangle_stops, triangle_with_island};
use route_optimizer::matrix::{UNREACHABLE_DISTANCE, build_distance_matrix};
use route_optimizer::traits::RoadNetwork;

#[test]
fn triangle_stops_sit_exactly_on_their_nodes() {
    let graph = triangle_graph();
    for stop in triangle_stops() {
        let node = graph.nearest_node(stop.stop_lon, stop.stop_lat).unwrap();
        let (lon, lat) = graph.node_coordinates(node).unwrap();
        assert_eq!(
            (lat, lon),
            (stop.stop_lat, stop.stop_lon),
            "{} should snap to a node at its own coordinates",
            stop.stop_name
        );
    }
}

#[test]
fn diagonal_is_zero() {
    let graph = triangle_graph();
    let stops = triangle_stops();
    let (matrix, _) = build_distance_matrix(&graph, &stops);
    for i in 0..stops.len() {
        assert_eq!(matrix.get(i, i), 0);
    }
}

#[test]
fn cells_are_non_negative() {
    let graph = triangle_with_island();
    let mut stops = triangle_stops();
    stops.push(island_stop());
    let (matrix, _) = build_distance_matrix(&graph, &stops);
    for i in 0..stops.len() {
        for j in 0..stops.len() {
            assert!(matrix.get(i, j) >= 0);
        }
    }
}

#[test]
fn reachable_pairs_use_shortest_path_lengths() {
    let graph = triangle_graph();
    let stops = triangle_stops();
    let (matrix, pairs) = build_distance_matrix(&graph, &stops);

    // stops: 0 = Depot (node 1), 1 = North (node 3), 2 = East (node 2);
    // direct segments 1->2 = 100, 2->3 = 150, 3->1 = 120, reverses 900
    assert_eq!(matrix.get(0, 2), 100);
    assert_eq!(matrix.get(2, 1), 150);
    assert_eq!(matrix.get(1, 0), 120);
    // reverse directions route around the cheap cycle instead of the
    // expensive direct segment
    assert_eq!(matrix.get(2, 0), 270);
    assert_eq!(matrix.get(0, 1), 250);
    assert_eq!(matrix.get(1, 2), 220);

    assert_eq!(pairs.len(), 6);
}

#[test]
fn unreachable_pairs_get_the_exact_sentinel_and_no_index_entry() {
    let graph = triangle_with_island();
    let mut stops = triangle_stops();
    stops.push(island_stop());
    let (matrix, pairs) = build_distance_matrix(&graph, &stops);

    let island = stops.len() - 1;
    for other in 0..island {
        assert_eq!(matrix.get(other, island), UNREACHABLE_DISTANCE);
        assert_eq!(matrix.get(island, other), UNREACHABLE_DISTANCE);
        assert!(pairs.get(other, island).is_none());
        assert!(pairs.get(island, other).is_none());
    }
}

#[test]
fn every_index_entry_has_a_finite_cell() {
    let graph = triangle_with_island();
    let mut stops = triangle_stops();
    stops.push(island_stop());
    let (matrix, pairs) = build_distance_matrix(&graph, &stops);

    for (from, to) in pairs.keys() {
        assert!(matrix.get(from, to) < UNREACHABLE_DISTANCE);
    }
}
