pub mod criteria;
pub mod dominance;
pub mod num;
#[cfg(test)]
mod test;

use std::collections::BTreeMap;

pub use arrayvec::ArrayVec;

pub use crate::criteria::{Criteria, Criterion, Direction, MAX_CRITERIA};
pub use crate::dominance::{dominates, Exhaustive, FrontierStrategy};
pub use crate::num::{Normalized, Weight};

use crate::criteria::{normalize::normalize_all, statistics, weighted_score};

/// Weighted, direction-corrected scores keyed by attribute. Each value lies in [0, weight] and a
/// higher value is always better.
pub type NormalizedScores = BTreeMap<String, Normalized>;

pub trait Candidate {
    type Id: Clone + Eq + Ord;
    fn id(&self) -> Self::Id;
    /// Raw value of the attribute `key`, or `None` when the candidate has no value for it. Values
    /// are expected to be finite: callers must map NaN and infinities to `None`.
    fn attribute(&self, key: &str) -> Option<f64>;
}

/// Anything exposing the normalized scores of a candidate.
pub trait Scored {
    fn scores(&self) -> &NormalizedScores;
}

impl Scored for NormalizedScores {
    fn scores(&self) -> &NormalizedScores {
        self
    }
}

/// A candidate placed on one side of the frontier.
pub struct Ranked<'c, C: Candidate> {
    pub candidate: &'c C,
    pub scores: NormalizedScores,
    /// Advisory aggregate used to order entries within a partition.
    pub score: Normalized,
    /// Identifiers of every other candidate dominating this one, in ascending order.
    pub dominated_by: Vec<C::Id>,
    /// 1-based position within the partition.
    pub rank: usize,
}

impl<C: Candidate> Ranked<'_, C> {
    pub fn is_pareto_optimal(&self) -> bool {
        self.dominated_by.is_empty()
    }
}

impl<C: Candidate> Scored for Ranked<'_, C> {
    fn scores(&self) -> &NormalizedScores {
        &self.scores
    }
}

impl<C> std::fmt::Debug for Ranked<'_, C>
where
    C: Candidate + std::fmt::Debug,
    C::Id: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranked")
            .field("candidate", &self.candidate)
            .field("scores", &self.scores)
            .field("score", &self.score)
            .field("dominated_by", &self.dominated_by)
            .field("rank", &self.rank)
            .finish()
    }
}

/// An exact partition of a candidate set into its Pareto frontier and the dominated remainder.
pub struct Frontier<'c, C: Candidate> {
    pub frontier: Vec<Ranked<'c, C>>,
    pub dominated: Vec<Ranked<'c, C>>,
}

impl<C: Candidate> Frontier<'_, C> {
    pub fn total_count(&self) -> usize {
        self.frontier.len() + self.dominated.len()
    }
}

impl<C> std::fmt::Debug for Frontier<'_, C>
where
    C: Candidate + std::fmt::Debug,
    C::Id: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("frontier", &self.frontier)
            .field("dominated", &self.dominated)
            .finish()
    }
}

/// Partition `candidates` into the Pareto frontier and the dominated set under `criteria`, using
/// exhaustive pairwise dominance.
///
/// Raw attribute values are min-max normalized against the statistics of the whole set, inverted
/// for minimized criteria and scaled by their weight. A candidate lands on the frontier when no
/// other candidate dominates it. Criteria missing on either side of a pair are skipped for that
/// pair. Within each partition, entries are ordered by their aggregate score (descending), then by
/// identifier, and ranked from 1.
pub fn extract_frontier<'c, C>(candidates: &'c [C], criteria: &[Criterion]) -> Frontier<'c, C>
where
    C: Candidate,
{
    extract_frontier_with(&Exhaustive, candidates, criteria)
}

/// [`extract_frontier`] with a custom partitioning strategy.
pub fn extract_frontier_with<'c, S, C>(
    strategy: &S,
    candidates: &'c [C],
    criteria: &[Criterion],
) -> Frontier<'c, C>
where
    S: FrontierStrategy + ?Sized,
    C: Candidate,
{
    let stats = statistics::collect(candidates, criteria);
    let scores: Vec<NormalizedScores> = candidates
        .iter()
        .map(|candidate| normalize_all(candidate, criteria, &stats))
        .collect();
    let dominators = strategy.dominators(&scores, criteria);

    let mut frontier = Vec::new();
    let mut dominated = Vec::new();
    for ((candidate, scores), dominators) in candidates.iter().zip(scores).zip(dominators) {
        let mut dominated_by: Vec<C::Id> = dominators
            .into_iter()
            .filter_map(|index| candidates.get(index))
            .map(C::id)
            .collect();
        dominated_by.sort();
        let entry = Ranked {
            candidate,
            score: weighted_score(&scores, criteria),
            scores,
            dominated_by,
            rank: 0,
        };
        if entry.is_pareto_optimal() {
            frontier.push(entry);
        } else {
            dominated.push(entry);
        }
    }
    rank(&mut frontier);
    rank(&mut dominated);

    tracing::debug!(
        candidates = candidates.len(),
        criteria = criteria.len(),
        frontier = frontier.len(),
        dominated = dominated.len(),
        "extracted pareto frontier"
    );
    Frontier {
        frontier,
        dominated,
    }
}

/// Return the items that no other item dominates, in input order. Items are compared by position,
/// so two equal score maps are still tested against each other.
pub fn find_frontier<'i, T>(items: &'i [T], criteria: &[Criterion]) -> Vec<&'i T>
where
    T: Scored,
{
    items
        .iter()
        .enumerate()
        .filter(|(index, item)| {
            !items.iter().enumerate().any(|(other_index, other)| {
                other_index != *index && dominates(other.scores(), item.scores(), criteria)
            })
        })
        .map(|(_, item)| item)
        .collect()
}

fn rank<C: Candidate>(entries: &mut [Ranked<'_, C>]) {
    let mut order = permutation::sort_by(&*entries, |a: &Ranked<'_, C>, b: &Ranked<'_, C>| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.candidate.id().cmp(&b.candidate.id()))
    });
    order.apply_slice_in_place(entries);
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
}
