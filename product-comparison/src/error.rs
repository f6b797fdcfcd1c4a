use thiserror::Error;

use pareto_selection::MAX_CRITERIA;

use crate::request::MAX_LIMIT;

/// Reasons a comparison request is rejected before any candidate is scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    #[error("categoryId is required")]
    MissingCategory,
    #[error("at least one criterion is required")]
    NoCriteria,
    #[error("{count} criteria given, at most {max} are allowed", max = MAX_CRITERIA)]
    TooManyCriteria { count: usize },
    #[error("criterion {index} has an empty attribute")]
    EmptyAttribute { index: usize },
    #[error("attribute {attribute:?} appears in more than one criterion")]
    DuplicateAttribute { attribute: String },
    #[error("limit {limit} is outside of 1..={max}", max = MAX_LIMIT)]
    InvalidLimit { limit: usize },
    #[error("price bound {value} is invalid: minPrice must be finite and non-negative, maxPrice finite and positive")]
    InvalidPrice { value: f64 },
    #[error("minPrice {min} is greater than maxPrice {max}")]
    InvalidPriceRange { min: f64, max: f64 },
}
