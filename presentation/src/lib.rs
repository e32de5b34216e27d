// Presentation layer: CLI argument parsing, console formatting, progress display

pub mod cli;
pub mod output;
pub mod progress;

pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::SessionFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
