//! route-optimizer core
//!
//! Road-network tour optimization: builds a pairwise travel-distance matrix
//! over a road graph, solves the visiting order with a time-bounded
//! metaheuristic, and reconstructs a simplified road-following polyline for
//! the chosen tour.
//!
//! The road network and line-simplification primitives are expressed as
//! traits so the pipeline can run against an in-memory fake in tests.

pub mod api;
pub mod graph;
pub mod haversine;
pub mod matrix;
pub mod overpass;
pub mod pipeline;
pub mod polyline;
pub mod reconstruct;
pub mod simplify;
pub mod solver;
pub mod traits;
