//! Session report rendering.
//!
//! Provides [`MarkdownReport`], which renders a finished
//! [`Session`](roundtable_domain::Session) into a markdown document and
//! writes it to a report directory.

mod markdown;

pub use markdown::MarkdownReport;
