//! Optimization orchestrator: validate, fetch, solve, reconstruct.

use thiserror::Error;
use tracing::{error, info};

use crate::api::{OptimizeRequest, OptimizeResponse, Stop};
use crate::graph::{BBOX_MARGIN_DEGREES, BoundingBox};
use crate::matrix::build_distance_matrix;
use crate::reconstruct::reconstruct_route;
use crate::simplify::DEFAULT_TOLERANCE;
use crate::solver::{SolveOptions, solve};
use crate::traits::{FetchError, LineSimplifier, RoadNetworkSource};

/// Everything that can go wrong in one optimization request.
///
/// Client-class failures (validation, no feasible tour) map to a
/// 4xx-equivalent status; fetch and internal failures map to 5xx.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("No locations provided")]
    MissingLocations,
    #[error("At least 2 locations are required")]
    TooFewLocations,
    #[error("Missing required columns. Required: stop_lat, stop_lon, stop_name")]
    MissingColumns,
    #[error("No solution found")]
    NoSolution,
    #[error("Failed to fetch road network: {0}")]
    Fetch(#[from] FetchError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlanError {
    /// Whether the failure is the caller's (4xx-equivalent) rather than
    /// the service's (5xx-equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLocations | Self::TooFewLocations | Self::MissingColumns | Self::NoSolution
        )
    }
}

/// The optimization pipeline, parameterized over its road-network source
/// and line simplifier so tests can run it against in-memory fakes.
#[derive(Debug, Clone)]
pub struct Planner<P, S> {
    source: P,
    simplifier: S,
    solve_options: SolveOptions,
    tolerance: f64,
}

impl<P, S> Planner<P, S>
where
    P: RoadNetworkSource,
    S: LineSimplifier,
{
    pub fn new(source: P, simplifier: S) -> Self {
        Self {
            source,
            simplifier,
            solve_options: SolveOptions::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_solve_options(mut self, options: SolveOptions) -> Self {
        self.solve_options = options;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Run one request to completion. Every failure is caught here and
    /// folded into the error response; nothing propagates to the caller.
    pub fn optimize(&self, request: &OptimizeRequest) -> OptimizeResponse {
        match self.run(request) {
            Ok(response) => response,
            Err(err) => {
                error!(client = err.is_client_error(), "optimization failed: {err}");
                OptimizeResponse::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    fn run(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, PlanError> {
        let stops = validate(request)?;
        info!(stops = stops.len(), "processing optimization request");

        let bbox = BoundingBox::around_stops(&stops, BBOX_MARGIN_DEGREES)
            .ok_or(PlanError::TooFewLocations)?;
        let network = self.source.fetch(&bbox)?;

        let (matrix, pairs) = build_distance_matrix(&network, &stops);
        info!(reachable_pairs = pairs.len(), "distance matrix calculated");

        let solution = solve(&matrix, 0, &self.solve_options).ok_or(PlanError::NoSolution)?;
        info!(total_distance = solution.total_distance, "solution found");

        let polyline = reconstruct_route(
            &network,
            &solution.order,
            &pairs,
            &self.simplifier,
            self.tolerance,
        );

        let route = solution
            .order
            .iter()
            .map(|&index| {
                stops
                    .get(index)
                    .cloned()
                    .ok_or_else(|| PlanError::Internal(format!("stop index {index} out of range")))
            })
            .collect::<Result<Vec<Stop>, _>>()?;

        Ok(OptimizeResponse::Success {
            route,
            path_coordinates: polyline.into_pairs(),
            total_distance: solution.total_distance,
        })
    }
}

/// Fail-fast request validation, one distinct error per failure category.
fn validate(request: &OptimizeRequest) -> Result<Vec<Stop>, PlanError> {
    let records = request
        .locations
        .as_ref()
        .ok_or(PlanError::MissingLocations)?;
    if records.len() < 2 {
        return Err(PlanError::TooFewLocations);
    }
    records
        .iter()
        .map(|record| record.clone().into_stop().ok_or(PlanError::MissingColumns))
        .collect()
}
