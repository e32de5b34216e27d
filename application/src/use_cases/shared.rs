//! Shared utilities for use cases.

use tokio_util::sync::CancellationToken;

/// Check whether cancellation has been requested.
pub(crate) fn cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_token_is_not_cancelled() {
        assert!(!cancelled(&None));
    }

    #[test]
    fn test_cancelled_token() {
        let token = CancellationToken::new();
        assert!(!cancelled(&Some(token.clone())));
        token.cancel();
        assert!(cancelled(&Some(token)));
    }
}
