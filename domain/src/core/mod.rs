//! Core domain concepts shared across all subdomains.
//!
//! - [`task::Task`]: the work item a team is assembled for

pub mod task;
