//! Engine parameters: self-play loop control.
//!
//! [`EngineParams`] groups the static parameters that control the round
//! loop in [`SelfPlayEngine`](crate::use_cases::run_selfplay::SelfPlayEngine).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Early-termination thresholds for the DECIDE phase.
///
/// A session may stop before `task.max_iterations` when the mean critical
/// score has stopped improving and the Pareto front has collapsed. Both
/// thresholds are deployment-tunable rather than hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceParams {
    /// Minimum round-over-round improvement of the mean critical score
    /// still considered progress.
    pub epsilon: f64,
    /// Terminate only when the front has at most this many candidates.
    pub front_collapse_size: usize,
}

impl Default for ConvergenceParams {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            front_collapse_size: 1,
        }
    }
}

/// Self-play loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineParams {
    /// Maximum concurrent capability calls within one phase.
    pub max_in_flight: usize,
    /// Early-termination thresholds.
    pub convergence: ConvergenceParams,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_in_flight: 4,
            convergence: ConvergenceParams::default(),
        }
    }
}

impl EngineParams {
    // ==================== Builder Methods ====================

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.convergence.epsilon = epsilon;
        self
    }

    pub fn with_front_collapse_size(mut self, size: usize) -> Self {
        self.convergence.front_collapse_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = EngineParams::default();
        assert_eq!(params.max_in_flight, 4);
        assert_eq!(params.convergence.epsilon, 0.05);
        assert_eq!(params.convergence.front_collapse_size, 1);
    }

    #[test]
    fn test_builder() {
        let params = EngineParams::default()
            .with_max_in_flight(8)
            .with_epsilon(0.2)
            .with_front_collapse_size(2);

        assert_eq!(params.max_in_flight, 8);
        assert_eq!(params.convergence.epsilon, 0.2);
        assert_eq!(params.convergence.front_collapse_size, 2);
    }

    #[test]
    fn test_max_in_flight_floor() {
        let params = EngineParams::default().with_max_in_flight(0);
        assert_eq!(params.max_in_flight, 1);
    }
}
