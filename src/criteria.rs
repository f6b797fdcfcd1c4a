pub mod normalize;
pub mod statistics;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Normalized, NormalizedScores, Weight};

/// Upper bound on the number of criteria carried by a single comparison.
pub const MAX_CRITERIA: usize = 10;

pub type Criteria = ArrayVec<Criterion, MAX_CRITERIA>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

/// A named attribute to optimize, with its direction and relative weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub attribute: String,
    pub weight: Weight,
    pub direction: Direction,
}

impl Criterion {
    pub fn new(attribute: impl Into<String>, weight: Weight, direction: Direction) -> Self {
        Self {
            attribute: attribute.into(),
            weight,
            direction,
        }
    }

    pub fn maximize(attribute: impl Into<String>, weight: Weight) -> Self {
        Self::new(attribute, weight, Direction::Maximize)
    }

    pub fn minimize(attribute: impl Into<String>, weight: Weight) -> Self {
        Self::new(attribute, weight, Direction::Minimize)
    }
}

/// The advisory aggregate of a candidate's normalized scores: the sum of present scores divided by
/// the sum of the weights of the criteria that contributed them. A candidate without any present
/// score, or whose present criteria all carry zero weight, scores 0.
///
/// This only orders candidates for display. It never affects frontier membership.
pub fn weighted_score(scores: &NormalizedScores, criteria: &[Criterion]) -> Normalized {
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for criterion in criteria {
        if let Some(score) = scores.get(&criterion.attribute) {
            total += score.as_f64();
            weight_sum += criterion.weight.as_f64();
        }
    }
    if weight_sum == 0.0 {
        return Normalized::ZERO;
    }
    Normalized::clamp(total / weight_sum).unwrap_or(Normalized::ZERO)
}

#[cfg(test)]
mod test {
    use super::{weighted_score, Criterion, Direction};
    use crate::{num::assert_within, Normalized, NormalizedScores, Weight};

    fn scores(entries: &[(&str, f64)]) -> NormalizedScores {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), Normalized::new(*v).unwrap()))
            .collect()
    }

    #[test]
    fn weighted_score_ignores_absent_criteria() {
        let criteria = [
            Criterion::minimize("price", Weight::new(0.5).unwrap()),
            Criterion::maximize("battery", Weight::new(0.25).unwrap()),
        ];
        let only_price = scores(&[("price", 0.4)]);
        assert_within(weighted_score(&only_price, &criteria).as_f64(), 0.8, 1e-12);

        let both = scores(&[("price", 0.5), ("battery", 0.25)]);
        assert_within(weighted_score(&both, &criteria).as_f64(), 1.0, 1e-12);
    }

    #[test]
    fn weighted_score_without_present_criteria_is_zero() {
        let criteria = [Criterion::maximize("camera", Weight::ONE)];
        assert_eq!(
            weighted_score(&NormalizedScores::new(), &criteria),
            Normalized::ZERO
        );
        let zero_weight = [Criterion::maximize("camera", Weight::ZERO)];
        assert_eq!(
            weighted_score(&scores(&[("camera", 0.0)]), &zero_weight),
            Normalized::ZERO
        );
    }

    #[test]
    fn direction_serde() {
        let criterion: Criterion =
            serde_json::from_str(r#"{"attribute":"price","weight":0.5,"direction":"minimize"}"#)
                .unwrap();
        assert_eq!(criterion.direction, Direction::Minimize);
        assert_eq!(criterion.weight.as_f64(), 0.5);
        assert!(serde_json::from_str::<Criterion>(
            r#"{"attribute":"price","weight":2,"direction":"minimize"}"#
        )
        .is_err());
    }
}
