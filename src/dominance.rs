use crate::{criteria::Criterion, NormalizedScores};

/// Returns true when `a` dominates `b`: over every criterion scored on both sides, `a` is never
/// worse than `b` and is strictly better at least once. Criteria missing on either side are
/// skipped. Scores are already direction-corrected, so larger is always better.
///
/// Equal score vectors never dominate each other.
pub fn dominates(a: &NormalizedScores, b: &NormalizedScores, criteria: &[Criterion]) -> bool {
    let mut strictly_better = false;
    for criterion in criteria {
        let (Some(a), Some(b)) = (a.get(&criterion.attribute), b.get(&criterion.attribute)) else {
            continue;
        };
        if a < b {
            return false;
        }
        if a > b {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Decides which candidates dominate which, given their normalized scores.
pub trait FrontierStrategy {
    /// For each entry of `scores`, the indices of all other entries that dominate it. The result
    /// has the same length as `scores`. An empty list places the entry on the frontier.
    fn dominators(&self, scores: &[NormalizedScores], criteria: &[Criterion]) -> Vec<Vec<usize>>;
}

/// Tests every ordered pair of distinct entries: O(n² × criteria).
#[derive(Clone, Copy, Debug, Default)]
pub struct Exhaustive;

impl FrontierStrategy for Exhaustive {
    fn dominators(&self, scores: &[NormalizedScores], criteria: &[Criterion]) -> Vec<Vec<usize>> {
        scores
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                scores
                    .iter()
                    .enumerate()
                    .filter(|(other_index, other)| {
                        *other_index != index && dominates(other, candidate, criteria)
                    })
                    .map(|(other_index, _)| other_index)
                    .collect()
            })
            .collect()
    }
}
