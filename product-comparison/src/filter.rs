use crate::{product::Listing, request::ComparisonFilters};

/// Narrow `listings` to those matching `filters`. Retailer and stock filters drop the offers that
/// do not match, and then any listing left without offers. Price bounds apply to the best
/// remaining price, so a listing without any price fails them.
pub fn apply(listings: Vec<Listing>, filters: &ComparisonFilters) -> Vec<Listing> {
    let before = listings.len();
    let filtered: Vec<Listing> = listings
        .into_iter()
        .filter_map(|listing| filter_listing(listing, filters))
        .collect();
    tracing::debug!(before, after = filtered.len(), "applied comparison filters");
    filtered
}

fn filter_listing(mut listing: Listing, filters: &ComparisonFilters) -> Option<Listing> {
    if let Some(brands) = &filters.brands {
        let brand = listing.product.brand_id.as_ref()?;
        if !brands.contains(brand) {
            return None;
        }
    }
    if let Some(expected) = &filters.attributes {
        let matches_all = expected.iter().all(|(key, value)| {
            listing
                .product
                .attributes
                .get(key)
                .is_some_and(|actual| actual.matches(value))
        });
        if !matches_all {
            return None;
        }
    }

    let restrict_offers = filters.retailers.is_some() || filters.in_stock_only;
    if restrict_offers {
        listing.prices.retain(|price| {
            let retailer_ok = filters
                .retailers
                .as_ref()
                .map_or(true, |retailers| retailers.contains(&price.retailer.id));
            retailer_ok && (!filters.in_stock_only || price.in_stock)
        });
        if listing.prices.is_empty() {
            return None;
        }
    }

    if filters.min_price.is_some() || filters.max_price.is_some() {
        let total = listing.best_price()?.total_price;
        if filters.min_price.is_some_and(|min| total < min) {
            return None;
        }
        if filters.max_price.is_some_and(|max| total > max) {
            return None;
        }
    }
    Some(listing)
}
