//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod build_team;
pub mod run_selfplay;
pub(crate) mod shared;
