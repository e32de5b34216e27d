//! Output formatter trait

use roundtable_domain::Session;

/// Trait for formatting finished sessions
pub trait SessionFormatter {
    /// Format the complete session, round by round
    fn format(&self, session: &Session) -> String;

    /// Format as JSON
    fn format_json(&self, session: &Session) -> String;

    /// Format the final result only (concise output)
    fn format_result_only(&self, session: &Session) -> String;
}
