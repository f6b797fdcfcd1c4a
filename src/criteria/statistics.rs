use std::collections::BTreeMap;

use crate::{criteria::Criterion, Candidate};

/// Summary of the values present for one attribute across a candidate set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeStatistic {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl AttributeStatistic {
    /// Returns `None` when `values` is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &value in values {
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }
        let mean = sum / count;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
        Some(Self {
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

pub type Statistics = BTreeMap<String, AttributeStatistic>;

/// Gather statistics for the attribute of each criterion. Candidates missing an attribute are
/// skipped for that attribute only. Attributes without any present value are left out of the
/// result.
pub fn collect<C>(candidates: &[C], criteria: &[Criterion]) -> Statistics
where
    C: Candidate,
{
    let mut stats = Statistics::new();
    let mut values: Vec<f64> = Vec::with_capacity(candidates.len());
    for criterion in criteria {
        if stats.contains_key(&criterion.attribute) {
            continue;
        }
        values.clear();
        values.extend(candidates.iter().filter_map(|c| c.attribute(&criterion.attribute)));
        match AttributeStatistic::from_values(&values) {
            Some(stat) => {
                stats.insert(criterion.attribute.clone(), stat);
            }
            None => tracing::debug!(
                attribute = %criterion.attribute,
                "no candidate has a value for attribute"
            ),
        }
    }
    stats
}
