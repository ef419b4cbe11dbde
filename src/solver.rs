//! Tour solver: single-vehicle visiting order over a distance matrix.
//!
//! Nearest-neighbour construction followed by simulated-annealing local
//! search over segment-reversal and relocation moves. Worsening moves are
//! accepted with decaying probability to escape local optima. The search is
//! bounded by a wall-clock limit, a cap on accepted improving solutions,
//! and a stagnation cutoff, and always returns the best incumbent found.
//!
//! Candidate tours are costed in full, so asymmetric matrices (directional
//! road distances) are handled correctly.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::matrix::{DistanceMatrix, UNREACHABLE_DISTANCE};

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Wall-clock bound for the whole search.
    pub time_limit: Duration,
    /// Stop after this many accepted improving solutions.
    pub solution_limit: usize,
    /// RNG seed; fixed so a given matrix solves deterministically.
    pub seed: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            solution_limit: 100,
            seed: 0,
        }
    }
}

/// A solved tour.
///
/// `order` holds N+1 stop indices: every stop exactly once, with the depot
/// repeated as both first and last element (explicit depot return). The
/// total distance is the sum of the matrix cells along consecutive pairs
/// of `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSolution {
    pub order: Vec<usize>,
    pub total_distance: i64,
}

/// Find a low-cost tour visiting every stop, starting and ending at
/// `depot`.
///
/// Returns `None` when no feasible tour exists: the matrix is empty, the
/// depot index is out of range, or the best tour found still crosses an
/// unreachable leg (total at or above the sentinel distance).
pub fn solve(matrix: &DistanceMatrix, depot: usize, options: &SolveOptions) -> Option<TourSolution> {
    let n = matrix.len();
    if n == 0 || depot >= n {
        return None;
    }
    if n == 1 {
        return Some(TourSolution {
            order: vec![depot, depot],
            total_distance: 0,
        });
    }

    let start = Instant::now();
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);

    let mut current = nearest_neighbour_order(matrix, depot);
    let mut current_cost = tour_cost(matrix, depot, &current);
    let mut best = current.clone();
    let mut best_cost = current_cost;

    let mut temperature = (current_cost as f64 / n as f64).max(1.0);
    let mut improvements = 0usize;
    let mut stagnant = 0usize;
    let stagnation_limit = 2_000.max(200 * n * n);

    while current.len() >= 2
        && improvements < options.solution_limit
        && stagnant < stagnation_limit
        && start.elapsed() < options.time_limit
    {
        let candidate = propose_move(&current, &mut rng);
        let candidate_cost = tour_cost(matrix, depot, &candidate);
        let delta = candidate_cost - current_cost;

        if delta < 0 || rng.random::<f64>() < (-(delta as f64) / temperature).exp() {
            current = candidate;
            current_cost = candidate_cost;
        }

        if current_cost < best_cost {
            best = current.clone();
            best_cost = current_cost;
            improvements += 1;
            stagnant = 0;
        } else {
            stagnant += 1;
        }

        temperature = (temperature * 0.995).max(1e-3);
    }

    debug!(
        best_cost,
        improvements,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "tour search finished"
    );

    if best_cost >= UNREACHABLE_DISTANCE {
        return None;
    }

    let mut order = Vec::with_capacity(n + 1);
    order.push(depot);
    order.extend(best);
    order.push(depot);
    Some(TourSolution {
        order,
        total_distance: best_cost,
    })
}

/// Greedy construction: repeatedly visit the nearest unvisited stop,
/// starting from the depot. Returns the tour interior (all stops except
/// the depot, in visiting order).
fn nearest_neighbour_order(matrix: &DistanceMatrix, depot: usize) -> Vec<usize> {
    let n = matrix.len();
    let mut remaining: Vec<usize> = (0..n).filter(|&stop| stop != depot).collect();
    let mut order = Vec::with_capacity(n - 1);
    let mut at = depot;

    while !remaining.is_empty() {
        let (pick, _) = remaining
            .iter()
            .enumerate()
            .min_by_key(|&(_, &stop)| matrix.get(at, stop))
            .map(|(position, &stop)| (position, stop))
            .unwrap_or((0, remaining[0]));
        at = remaining.remove(pick);
        order.push(at);
    }

    order
}

/// Total cost of depot -> interior stops -> depot.
fn tour_cost(matrix: &DistanceMatrix, depot: usize, interior: &[usize]) -> i64 {
    let mut cost = 0;
    let mut at = depot;
    for &stop in interior {
        cost += matrix.get(at, stop);
        at = stop;
    }
    cost + matrix.get(at, depot)
}

/// One neighbourhood move: either reverse a random segment or relocate a
/// random stop to another position.
fn propose_move(interior: &[usize], rng: &mut ChaCha8Rng) -> Vec<usize> {
    let mut candidate = interior.to_vec();
    let len = candidate.len();

    if rng.random_bool(0.5) {
        let i = rng.random_range(0..len - 1);
        let j = rng.random_range(i + 1..len);
        candidate[i..=j].reverse();
    } else {
        let from = rng.random_range(0..len);
        let stop = candidate.remove(from);
        let to = rng.random_range(0..len);
        candidate.insert(to, stop);
    }

    candidate
}
