//! Product comparison on top of [`pareto_selection`]: validates a comparison request, narrows
//! the product listings with its filters and limit, extracts the Pareto frontier and shapes the
//! response.

pub mod chart;
mod error;
pub mod filter;
pub mod product;
pub mod request;
pub mod result;

use chrono::{DateTime, Utc};

pub use crate::chart::ParetoChartData;
pub use crate::error::ComparisonError;
pub use crate::product::{AttributeValue, Listing, Price, Product, Retailer, PRICE_ATTRIBUTE};
pub use crate::request::{ComparisonFilters, ComparisonRequest, ValidRequest, MAX_LIMIT};
pub use crate::result::{ComparisonResult, ParetoProduct};
pub use pareto_selection::{Criterion, Direction, Normalized, NormalizedScores, Weight};

pub fn compare(
    listings: Vec<Listing>,
    request: &ComparisonRequest,
) -> Result<ComparisonResult, ComparisonError> {
    compare_at(listings, request, Utc::now())
}

/// [`compare`] with an explicit computation timestamp.
pub fn compare_at(
    listings: Vec<Listing>,
    request: &ComparisonRequest,
    computed_at: DateTime<Utc>,
) -> Result<ComparisonResult, ComparisonError> {
    let request = request.validate()?;
    let candidates = prepare(listings, &request);
    let frontier = pareto_selection::extract_frontier(&candidates, &request.criteria);
    Ok(ComparisonResult::new(
        &request.criteria,
        frontier,
        computed_at,
    ))
}

/// Keep the listings of the requested category that pass the filters, up to the limit, in input
/// order.
pub fn prepare(listings: Vec<Listing>, request: &ValidRequest) -> Vec<Listing> {
    let (in_category, other): (Vec<Listing>, Vec<Listing>) = listings
        .into_iter()
        .partition(|l| l.product.category_id == request.category_id);
    if !other.is_empty() {
        tracing::debug!(
            category = %request.category_id,
            skipped = other.len(),
            "skipped listings from other categories"
        );
    }
    let mut candidates = filter::apply(in_category, &request.filters);
    if let Some(limit) = request.limit {
        candidates.truncate(limit);
    }
    candidates
}
