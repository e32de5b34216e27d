//! Pareto dominance over aggregated output scores.
//!
//! All three axes are maximized. The front keeps every non-dominated
//! output in input order, so repeated runs over the same scores produce
//! the same front.

use crate::selfplay::aggregate::OutputScores;
use crate::selfplay::outputs::OutputId;

/// True when `a` dominates `b`: at least as good on every axis and
/// strictly better on at least one.
pub fn dominates(a: &OutputScores, b: &OutputScores) -> bool {
    let ge = a.critical >= b.critical && a.novelty >= b.novelty && a.satisfaction >= b.satisfaction;
    let gt = a.critical > b.critical || a.novelty > b.novelty || a.satisfaction > b.satisfaction;
    ge && gt
}

/// Non-dominated subset of `scores`, preserving input order.
///
/// Outputs with identical score vectors do not dominate each other, so
/// both survive.
pub fn pareto_front(scores: &[OutputScores]) -> Vec<OutputId> {
    scores
        .iter()
        .filter(|candidate| !scores.iter().any(|other| dominates(other, candidate)))
        .map(|s| s.output_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(id: &str, critical: f64, novelty: f64, satisfaction: f64) -> OutputScores {
        OutputScores {
            output_id: OutputId::new(id),
            critical,
            novelty,
            satisfaction,
        }
    }

    #[test]
    fn strictly_better_dominates() {
        let a = scores("a", 8.0, 0.9, 0.8);
        let b = scores("b", 7.0, 0.8, 0.7);
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn equal_points_do_not_dominate_each_other() {
        let a = scores("a", 5.0, 0.5, 0.5);
        let b = scores("b", 5.0, 0.5, 0.5);
        assert!(!dominates(&a, &b));
        assert!(!dominates(&b, &a));
        let front = pareto_front(&[a, b]);
        assert_eq!(front.len(), 2);
    }

    #[test]
    fn trade_offs_keep_both_points() {
        // a is more critical-strong, b is more novel; neither dominates.
        let a = scores("a", 9.0, 0.2, 0.5);
        let b = scores("b", 6.0, 0.9, 0.5);
        let front = pareto_front(&[a, b]);
        assert_eq!(front, vec![OutputId::new("a"), OutputId::new("b")]);
    }

    #[test]
    fn dominated_points_are_excluded() {
        let a = scores("a", 9.0, 0.9, 0.9);
        let b = scores("b", 5.0, 0.5, 0.5);
        let c = scores("c", 9.0, 0.1, 0.9);
        let front = pareto_front(&[a, b, c]);
        assert_eq!(front, vec![OutputId::new("a")]);
    }

    #[test]
    fn front_preserves_input_order() {
        let a = scores("z-last", 9.0, 0.2, 0.5);
        let b = scores("a-first", 6.0, 0.9, 0.5);
        let front = pareto_front(&[a, b]);
        assert_eq!(front, vec![OutputId::new("z-last"), OutputId::new("a-first")]);
    }

    #[test]
    fn no_front_member_dominates_another() {
        let all = vec![
            scores("a", 9.0, 0.1, 0.3),
            scores("b", 5.0, 0.9, 0.3),
            scores("c", 7.0, 0.5, 0.9),
            scores("d", 4.0, 0.2, 0.2),
            scores("e", 9.0, 0.1, 0.2),
        ];
        let front = pareto_front(&all);
        let members: Vec<&OutputScores> = all
            .iter()
            .filter(|s| front.contains(&s.output_id))
            .collect();
        for a in &members {
            for b in &members {
                assert!(!dominates(a, b) || a.output_id == b.output_id);
            }
        }
        assert!(!front.contains(&OutputId::new("d")));
        assert!(!front.contains(&OutputId::new("e")));
    }

    #[test]
    fn single_point_is_the_whole_front() {
        let front = pareto_front(&[scores("only", 1.0, 0.0, 0.0)]);
        assert_eq!(front, vec![OutputId::new("only")]);
    }

    #[test]
    fn empty_scores_give_empty_front() {
        assert!(pareto_front(&[]).is_empty());
    }
}
