//! Critic and novelty response parsing.
//!
//! These functions extract structured scores from free-form LLM responses.
//! They are pure text pattern matching with no I/O.
//!
//! # Functions
//!
//! | Function | Use Case | Formats |
//! |----------|----------|---------|
//! | [`parse_critic_response`] | Peer critique scoring | JSON, `N/10`, standalone 0-10 |
//! | [`parse_novelty_response`] | Novelty assessment | JSON, standalone 0-1 |
//!
//! Both return `None` instead of a silent neutral score when nothing
//! parses; the caller decides whether to drop the record or substitute a
//! default.

use crate::extract::extract_json_payload;

/// A critique parsed out of a critic response.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticAssessment {
    /// Overall quality score, 0-10
    pub overall_score: f64,
    /// Requirement satisfaction, 0-1
    pub satisfaction_score: f64,
    /// Free-form critique text
    pub summary_critique: String,
}

/// Parse a critic response into scores plus critique text.
///
/// # Supported Formats
///
/// 1. **JSON** (preferred): `{"overall_score": 8, "satisfaction_score": 0.9, "summary_critique": "..."}`
/// 2. **Fraction**: `8/10` or `Score: 7/10`
/// 3. **Standalone number**: `9` (if in valid range 0-10)
///
/// A JSON payload without `satisfaction_score` defaults it to 0.5; the
/// non-JSON fallbacks always do. Scores are clamped to their ranges.
/// Returns `None` when no score can be found at all.
pub fn parse_critic_response(response: &str) -> Option<CriticAssessment> {
    if let Ok(payload) = extract_json_payload(response)
        && let Some(overall) = payload.get("overall_score").and_then(|v| v.as_f64())
    {
        let satisfaction = payload
            .get("satisfaction_score")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.5);
        let summary = payload
            .get("summary_critique")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        return Some(CriticAssessment {
            overall_score: overall.clamp(0.0, 10.0),
            satisfaction_score: satisfaction.clamp(0.0, 1.0),
            summary_critique: summary,
        });
    }

    // Fallback: look for patterns like "8/10" or a standalone score word.
    for word in response.split_whitespace() {
        if let Some(num_str) = word.strip_suffix("/10")
            && let Ok(num) = num_str.parse::<f64>()
        {
            return Some(CriticAssessment {
                overall_score: num.clamp(0.0, 10.0),
                satisfaction_score: 0.5,
                summary_critique: response.trim().to_string(),
            });
        }
        if let Ok(num) = word
            .trim_matches(|c: char| !c.is_ascii_digit())
            .parse::<f64>()
            && (0.0..=10.0).contains(&num)
        {
            return Some(CriticAssessment {
                overall_score: num,
                satisfaction_score: 0.5,
                summary_critique: response.trim().to_string(),
            });
        }
    }

    None
}

/// Parse a novelty response into a 0-1 score.
///
/// Prefers a JSON payload with a `novelty_score` key, then falls back to
/// the first standalone number within 0-1. Returns `None` when nothing
/// parses.
pub fn parse_novelty_response(response: &str) -> Option<f64> {
    if let Ok(payload) = extract_json_payload(response)
        && let Some(score) = payload.get("novelty_score").and_then(|v| v.as_f64())
    {
        return Some(score.clamp(0.0, 1.0));
    }

    for word in response.split_whitespace() {
        if let Ok(num) = word
            .trim_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .parse::<f64>()
            && (0.0..=1.0).contains(&num)
        {
            return Some(num);
        }
    }

    None
}
