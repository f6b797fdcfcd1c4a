use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use pareto_selection::{Criteria, Criterion};

use crate::{error::ComparisonError, product::AttributeValue};

/// Largest number of products a single comparison may consider.
pub const MAX_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRequest {
    pub category_id: String,
    pub criteria: Vec<Criterion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ComparisonFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<String>>,
    #[serde(default)]
    pub in_stock_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeValue>>,
}

/// A request that passed validation. Criteria are bounded by [`pareto_selection::MAX_CRITERIA`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidRequest {
    pub category_id: String,
    pub criteria: Criteria,
    pub filters: ComparisonFilters,
    pub limit: Option<usize>,
}

impl ComparisonRequest {
    pub fn new(category_id: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        Self {
            category_id: category_id.into(),
            criteria,
            filters: None,
            limit: None,
        }
    }

    /// Check the request shape: a category, 1 to [`pareto_selection::MAX_CRITERIA`] criteria over distinct,
    /// non-empty attributes, a limit within 1..=[`MAX_LIMIT`] and a coherent price range. Weights
    /// are range-checked by [`pareto_selection::Weight`] itself.
    pub fn validate(&self) -> Result<ValidRequest, ComparisonError> {
        if self.category_id.trim().is_empty() {
            return Err(ComparisonError::MissingCategory);
        }
        if self.criteria.is_empty() {
            return Err(ComparisonError::NoCriteria);
        }
        let mut criteria = Criteria::new();
        let mut seen = BTreeSet::new();
        for (index, criterion) in self.criteria.iter().enumerate() {
            if criterion.attribute.trim().is_empty() {
                return Err(ComparisonError::EmptyAttribute { index });
            }
            if !seen.insert(criterion.attribute.as_str()) {
                return Err(ComparisonError::DuplicateAttribute {
                    attribute: criterion.attribute.clone(),
                });
            }
            criteria
                .try_push(criterion.clone())
                .map_err(|_| ComparisonError::TooManyCriteria {
                    count: self.criteria.len(),
                })?;
        }
        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(ComparisonError::InvalidLimit { limit });
            }
        }
        let filters = self.filters.clone().unwrap_or_default();
        if let Some(value) = filters.min_price {
            if !value.is_finite() || value < 0.0 {
                return Err(ComparisonError::InvalidPrice { value });
            }
        }
        if let Some(value) = filters.max_price {
            if !value.is_finite() || value <= 0.0 {
                return Err(ComparisonError::InvalidPrice { value });
            }
        }
        if let (Some(min), Some(max)) = (filters.min_price, filters.max_price) {
            if min > max {
                return Err(ComparisonError::InvalidPriceRange { min, max });
            }
        }
        Ok(ValidRequest {
            category_id: self.category_id.clone(),
            criteria,
            filters,
            limit: self.limit,
        })
    }
}
