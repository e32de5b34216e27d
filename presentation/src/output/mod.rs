//! Output formatting for sessions

pub mod console;
pub mod formatter;
