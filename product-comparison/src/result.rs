use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pareto_selection::{Criterion, Frontier, NormalizedScores, Ranked};

use crate::product::{raw_value, Listing, Price, Product};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub criteria: Vec<Criterion>,
    pub pareto_frontier: Vec<ParetoProduct>,
    pub dominated: Vec<ParetoProduct>,
    pub total_products: usize,
    pub computed_at: DateTime<Utc>,
}

/// A product with its place relative to the Pareto frontier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoProduct {
    pub product: Product,
    pub best_price: Option<Price>,
    pub normalized_scores: NormalizedScores,
    pub pareto_optimal: bool,
    /// Ids of the products dominating this one. Empty on the frontier.
    pub dominated_by: Vec<String>,
    pub rank: usize,
}

impl ParetoProduct {
    fn from_ranked(entry: Ranked<'_, Listing>) -> Self {
        Self {
            product: entry.candidate.product.clone(),
            best_price: entry.candidate.best_price().cloned(),
            pareto_optimal: entry.is_pareto_optimal(),
            normalized_scores: entry.scores,
            dominated_by: entry.dominated_by,
            rank: entry.rank,
        }
    }

    /// Raw comparable value of `key`, as fed to normalization.
    pub fn raw_value(&self, key: &str) -> Option<f64> {
        raw_value(&self.product, self.best_price.as_ref(), key)
    }
}

impl ComparisonResult {
    pub fn new(
        criteria: &[Criterion],
        frontier: Frontier<'_, Listing>,
        computed_at: DateTime<Utc>,
    ) -> Self {
        let total_products = frontier.total_count();
        Self {
            criteria: criteria.to_vec(),
            pareto_frontier: frontier
                .frontier
                .into_iter()
                .map(ParetoProduct::from_ranked)
                .collect(),
            dominated: frontier
                .dominated
                .into_iter()
                .map(ParetoProduct::from_ranked)
                .collect(),
            total_products,
            computed_at,
        }
    }

    pub fn products(&self) -> impl Iterator<Item = &ParetoProduct> {
        self.pareto_frontier.iter().chain(&self.dominated)
    }
}
