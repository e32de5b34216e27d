//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`EngineParams`]: self-play loop control (concurrency, convergence)

pub mod engine_params;

pub use engine_params::{ConvergenceParams, EngineParams};
