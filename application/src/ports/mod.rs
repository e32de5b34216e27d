//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod capabilities;
pub mod completion;
pub mod progress;
pub mod transcript;
