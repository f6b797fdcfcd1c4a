use std::collections::{BTreeMap, BTreeSet};

use proptest::{prelude::prop, prop_assert, prop_assert_eq, prop_compose, proptest};
use rand::{rngs::SmallRng, seq::SliceRandom as _, SeedableRng as _};

use crate::{
    dominates, extract_frontier, extract_frontier_with, find_frontier, Candidate, Criterion,
    Direction, FrontierStrategy, Normalized, NormalizedScores, Ranked, Weight,
};

#[derive(Clone, Debug)]
pub struct TestCandidate {
    pub id: usize,
    pub attributes: BTreeMap<String, f64>,
}

impl TestCandidate {
    pub fn new(id: usize, attributes: BTreeMap<String, f64>) -> Self {
        Self { id, attributes }
    }
}

impl Candidate for TestCandidate {
    type Id = usize;
    fn id(&self) -> Self::Id {
        self.id
    }
    fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).copied()
    }
}

pub fn attrs(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn ids<'a, 'c: 'a>(entries: impl IntoIterator<Item = &'a Ranked<'c, TestCandidate>>) -> Vec<usize> {
    entries.into_iter().map(|e| e.candidate.id).collect()
}

fn half() -> Weight {
    Weight::new(0.5).unwrap()
}

#[test]
fn cheaper_candidate_dominates() {
    let candidates = [
        TestCandidate::new(200, attrs(&[("price", 200.0)])),
        TestCandidate::new(400, attrs(&[("price", 400.0)])),
    ];
    let criteria = [Criterion::minimize("price", Weight::ONE)];
    let result = extract_frontier(&candidates, &criteria);

    assert_eq!(ids(&result.frontier), vec![200]);
    assert_eq!(ids(&result.dominated), vec![400]);
    assert_eq!(result.frontier[0].scores["price"].as_f64(), 1.0);
    assert_eq!(result.dominated[0].scores["price"].as_f64(), 0.0);
    assert_eq!(result.dominated[0].dominated_by, vec![200]);
}

#[test]
fn extreme_finite_values_keep_their_scores() {
    let candidates = [
        TestCandidate::new(0, attrs(&[("x", -1e308)])),
        TestCandidate::new(1, attrs(&[("x", 1e308)])),
    ];
    let criteria = [Criterion::maximize("x", Weight::ONE)];
    let result = extract_frontier(&candidates, &criteria);

    assert_eq!(ids(&result.frontier), vec![1]);
    assert_eq!(ids(&result.dominated), vec![0]);
    assert_eq!(result.frontier[0].scores["x"], Normalized::ONE);
    assert_eq!(result.dominated[0].scores["x"], Normalized::ZERO);
    assert_eq!(result.dominated[0].dominated_by, vec![1]);
}

#[test]
fn cheaper_with_more_battery_dominates() {
    let candidates = [
        TestCandidate::new(0, attrs(&[("price", 200.0), ("battery", 3000.0)])),
        TestCandidate::new(1, attrs(&[("price", 150.0), ("battery", 4000.0)])),
    ];
    let criteria = [
        Criterion::minimize("price", half()),
        Criterion::maximize("battery", half()),
    ];
    let result = extract_frontier(&candidates, &criteria);

    assert_eq!(ids(&result.frontier), vec![1]);
    assert_eq!(ids(&result.dominated), vec![0]);
    assert_eq!(result.dominated[0].dominated_by, vec![1]);
}

#[test]
fn trade_offs_form_the_frontier() {
    let candidates = [
        TestCandidate::new(0, attrs(&[("price", 100.0), ("battery", 2000.0)])),
        TestCandidate::new(1, attrs(&[("price", 200.0), ("battery", 4000.0)])),
        TestCandidate::new(2, attrs(&[("price", 150.0), ("battery", 1000.0)])),
    ];
    let criteria = [
        Criterion::minimize("price", half()),
        Criterion::maximize("battery", half()),
    ];
    let result = extract_frontier(&candidates, &criteria);

    let frontier: BTreeSet<usize> = ids(&result.frontier).into_iter().collect();
    assert_eq!(frontier, BTreeSet::from([0, 1]));
    assert_eq!(ids(&result.dominated), vec![2]);
    // Only A is both cheaper and longer lasting than C.
    assert_eq!(result.dominated[0].dominated_by, vec![0]);
    assert_eq!(result.total_count(), 3);
}

#[test]
fn empty_candidate_list() {
    let candidates: [TestCandidate; 0] = [];
    let criteria = [Criterion::minimize("price", Weight::ONE)];
    let result = extract_frontier(&candidates, &criteria);
    assert!(result.frontier.is_empty());
    assert!(result.dominated.is_empty());
    assert_eq!(result.total_count(), 0);
}

#[test]
fn all_equal_candidates_are_on_the_frontier() {
    let candidates: Vec<TestCandidate> = (0..5)
        .map(|id| TestCandidate::new(id, attrs(&[("camera", 90.0)])))
        .collect();
    let criteria = [Criterion::maximize("camera", Weight::ONE)];
    let result = extract_frontier(&candidates, &criteria);
    assert_eq!(result.frontier.len(), 5);
    assert!(result.dominated.is_empty());
    assert!(result
        .frontier
        .iter()
        .all(|e| e.scores["camera"].as_f64() == 0.5));
}

#[test]
fn no_criteria_places_everything_on_the_frontier() {
    let candidates = [
        TestCandidate::new(0, attrs(&[("price", 1.0)])),
        TestCandidate::new(1, attrs(&[("price", 2.0)])),
    ];
    let result = extract_frontier(&candidates, &[]);
    assert_eq!(result.frontier.len(), 2);
    assert!(result.dominated.is_empty());
}

#[test]
fn ranks_follow_aggregate_score_then_id() {
    let candidates = [
        TestCandidate::new(3, attrs(&[("price", 100.0), ("battery", 1000.0)])),
        TestCandidate::new(1, attrs(&[("price", 300.0), ("battery", 3000.0)])),
        TestCandidate::new(2, attrs(&[("price", 200.0), ("battery", 2000.0)])),
        TestCandidate::new(0, attrs(&[("price", 250.0), ("battery", 2500.0)])),
    ];
    let criteria = [
        Criterion::minimize("price", half()),
        Criterion::maximize("battery", half()),
    ];
    let result = extract_frontier(&candidates, &criteria);

    // Every candidate trades price against battery, and all aggregate to 0.5.
    assert!(result.dominated.is_empty());
    assert_eq!(ids(&result.frontier), vec![0, 1, 2, 3]);
    let ranks: Vec<usize> = result.frontier.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn dominated_ranks_by_aggregate_score() {
    let candidates = [
        TestCandidate::new(0, attrs(&[("price", 100.0)])),
        TestCandidate::new(1, attrs(&[("price", 400.0)])),
        TestCandidate::new(2, attrs(&[("price", 200.0)])),
    ];
    let criteria = [Criterion::minimize("price", Weight::ONE)];
    let result = extract_frontier(&candidates, &criteria);
    assert_eq!(ids(&result.frontier), vec![0]);
    assert_eq!(ids(&result.dominated), vec![2, 1]);
    assert_eq!(result.dominated[0].rank, 1);
    assert_eq!(result.dominated[1].rank, 2);
    assert_eq!(result.dominated[1].dominated_by, vec![0, 2]);
}

#[test]
fn missing_attribute_does_not_exclude_candidate() {
    let candidates = [
        TestCandidate::new(0, attrs(&[("price", 100.0), ("battery", 2000.0)])),
        TestCandidate::new(1, attrs(&[("price", 150.0)])),
        TestCandidate::new(2, attrs(&[("battery", 5000.0)])),
    ];
    let criteria = [
        Criterion::minimize("price", half()),
        Criterion::maximize("battery", half()),
    ];
    let result = extract_frontier(&candidates, &criteria);
    // 1 only shares price with 0 and loses; 2 only shares battery with 0 and wins.
    assert_eq!(ids(&result.frontier), vec![2]);
    let dominated: BTreeMap<usize, Vec<usize>> = result
        .dominated
        .iter()
        .map(|e| (e.candidate.id, e.dominated_by.clone()))
        .collect();
    assert_eq!(dominated[&0], vec![2]);
    assert_eq!(dominated[&1], vec![0]);
}

#[test]
fn custom_strategy_is_used() {
    struct NothingDominates;
    impl FrontierStrategy for NothingDominates {
        fn dominators(&self, scores: &[NormalizedScores], _: &[Criterion]) -> Vec<Vec<usize>> {
            vec![Vec::new(); scores.len()]
        }
    }
    let candidates = [
        TestCandidate::new(0, attrs(&[("price", 100.0)])),
        TestCandidate::new(1, attrs(&[("price", 400.0)])),
    ];
    let criteria = [Criterion::minimize("price", Weight::ONE)];
    let result = extract_frontier_with(&NothingDominates, &candidates, &criteria);
    assert_eq!(result.frontier.len(), 2);
}

#[test]
fn find_frontier_over_score_maps() {
    let criteria = [
        Criterion::minimize("price", half()),
        Criterion::maximize("battery", half()),
    ];
    let scores: Vec<NormalizedScores> = [(0.5, 0.0), (0.0, 0.5), (0.0, 0.0), (0.5, 0.0)]
        .into_iter()
        .map(|(price, battery)| {
            NormalizedScores::from([
                ("price".to_string(), Normalized::new(price).unwrap()),
                ("battery".to_string(), Normalized::new(battery).unwrap()),
            ])
        })
        .collect();
    let frontier = find_frontier(&scores, &criteria);
    assert_eq!(frontier, vec![&scores[0], &scores[1], &scores[3]]);
}

prop_compose! {
    fn criterion()(
        attribute in 0..4_usize,
        weight in 0.0_f64..=1.0,
        minimize: bool,
    ) -> Criterion {
        let direction = if minimize { Direction::Minimize } else { Direction::Maximize };
        Criterion::new(format!("a{attribute}"), Weight::new(weight).unwrap(), direction)
    }
}
prop_compose! {
    fn candidates()(
        rows in prop::collection::vec(
            prop::collection::vec(prop::option::of(0..20_i32), 4),
            0..24,
        ),
    ) -> Vec<TestCandidate> {
        rows.into_iter()
            .enumerate()
            .map(|(id, row)| {
                let attributes = row
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, value)| value.map(|v| (format!("a{index}"), v as f64)))
                    .collect();
                TestCandidate::new(id, attributes)
            })
            .collect()
    }
}
proptest! {
    #[test]
    fn frontier_partitions_candidates(
        candidates in candidates(),
        criteria in prop::collection::vec(criterion(), 1..=4),
    ) {
        let result = extract_frontier(&candidates, &criteria);
        let frontier = ids(&result.frontier);
        let dominated = ids(&result.dominated);
        prop_assert_eq!(frontier.len() + dominated.len(), candidates.len());
        let all: BTreeSet<usize> = frontier.iter().chain(&dominated).copied().collect();
        prop_assert_eq!(all, (0..candidates.len()).collect::<BTreeSet<usize>>());

        for entry in result.frontier.iter().chain(&result.dominated) {
            prop_assert!(!entry.dominated_by.contains(&entry.candidate.id));
        }
        for entry in &result.frontier {
            let dominated_by_any = result
                .frontier
                .iter()
                .chain(&result.dominated)
                .filter(|other| other.candidate.id != entry.candidate.id)
                .any(|other| dominates(&other.scores, &entry.scores, &criteria));
            prop_assert!(!dominated_by_any);
        }
        for entry in &result.dominated {
            prop_assert!(!entry.dominated_by.is_empty());
            for dominator in &entry.dominated_by {
                let dominator = result
                    .frontier
                    .iter()
                    .chain(&result.dominated)
                    .find(|other| other.candidate.id == *dominator)
                    .unwrap();
                prop_assert!(dominates(&dominator.scores, &entry.scores, &criteria));
            }
        }
        for partition in [&result.frontier, &result.dominated] {
            let ranks: Vec<usize> = partition.iter().map(|e| e.rank).collect();
            prop_assert_eq!(ranks, (1..=partition.len()).collect::<Vec<usize>>());
            prop_assert!(partition.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn frontier_ignores_input_order(
        seed: u64,
        candidates in candidates(),
        criteria in prop::collection::vec(criterion(), 1..=4),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut shuffled = candidates.clone();
        shuffled.shuffle(&mut rng);

        let expected = extract_frontier(&candidates, &criteria);
        let actual = extract_frontier(&shuffled, &criteria);
        prop_assert_eq!(ids(&expected.frontier), ids(&actual.frontier));
        prop_assert_eq!(ids(&expected.dominated), ids(&actual.dominated));
        for (e, a) in expected.dominated.iter().zip(&actual.dominated) {
            prop_assert_eq!(&e.dominated_by, &a.dominated_by);
        }
    }
}
