use crate::{
    criteria::{statistics::Statistics, Criterion, Direction},
    Candidate, Normalized, NormalizedScores,
};

/// Rescale `value` onto [0, 1] relative to `min` and `max`. When every value ties (`max == min`)
/// the result is the neutral midpoint 0.5.
pub fn min_max(value: f64, min: f64, max: f64) -> Option<Normalized> {
    if max == min {
        return Some(Normalized::HALF);
    }
    let range = max - min;
    if range.is_finite() {
        return Normalized::clamp((value - min) / range);
    }
    // The range overflows f64, so halve every term before subtracting.
    Normalized::clamp((value / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0))
}

/// Standard score of `value`. Zero when the attribute has no variance.
///
/// Not part of the default pipeline, which uses [`min_max`].
pub fn z_score(value: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev == 0.0 {
        return 0.0;
    }
    (value - mean) / std_dev
}

/// Normalize one criterion for one candidate into [0, weight], inverted for minimized criteria so
/// that a higher score is always better.
///
/// Returns `None` when the candidate has no value for the attribute, or no statistic exists for
/// it. An absent score is not the same as a zero score.
pub fn normalize<C>(candidate: &C, criterion: &Criterion, stats: &Statistics) -> Option<Normalized>
where
    C: Candidate + ?Sized,
{
    let value = candidate.attribute(&criterion.attribute)?;
    let stat = stats.get(&criterion.attribute)?;
    let t = min_max(value, stat.min, stat.max)?;
    let t = match criterion.direction {
        Direction::Maximize => t,
        Direction::Minimize => t.complement(),
    };
    Some(t * criterion.weight)
}

/// Build the full score map of one candidate. When several criteria name the same attribute, the
/// last one wins.
pub fn normalize_all<C>(candidate: &C, criteria: &[Criterion], stats: &Statistics) -> NormalizedScores
where
    C: Candidate + ?Sized,
{
    criteria
        .iter()
        .filter_map(|criterion| {
            normalize(candidate, criterion, stats).map(|score| (criterion.attribute.clone(), score))
        })
        .collect()
}
