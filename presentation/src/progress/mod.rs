//! Progress reporting during round execution

pub mod reporter;
