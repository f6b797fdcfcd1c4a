use std::{collections::BTreeMap, io::Read};

use anyhow::{bail, Context as _};

use product_comparison::{AttributeValue, Listing, Price, Product, Retailer};

const ID: &str = "id";
const NAME: &str = "name";
const BRAND: &str = "brand";
const CATEGORY: &str = "category";
const RETAILER: &str = "retailer";
const PRICE: &str = "price";
const SHIPPING: &str = "shipping";
const IN_STOCK: &str = "in_stock";

/// Read listings from CSV with a header row. `id` is required. `name`, `brand`, `category`,
/// `retailer`, `price`, `shipping` and `in_stock` are optional. Every other column is a product
/// attribute. Rows sharing an id add offers to the first row's product. Rows without a `category`
/// belong to `default_category`.
pub fn read_listings<R: Read>(input: R, default_category: &str) -> anyhow::Result<Vec<Listing>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers().context("reading CSV header")?.clone();
    if !headers.iter().any(|h| h == ID) {
        bail!("CSV header has no {ID:?} column");
    }

    let mut listings: Vec<Listing> = Vec::new();
    let mut positions: BTreeMap<String, usize> = BTreeMap::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.with_context(|| format!("reading row {row}"))?;
        let field = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
        };
        let Some(id) = field(ID) else {
            bail!("row {row} has no id");
        };

        let position = match positions.get(id) {
            Some(&position) => position,
            None => {
                let attributes = headers
                    .iter()
                    .zip(record.iter())
                    .filter(|(header, value)| !is_reserved(header) && !value.is_empty())
                    .map(|(header, value)| (header.to_string(), attribute_value(value)))
                    .collect();
                listings.push(Listing::new(Product {
                    id: id.to_string(),
                    slug: id.to_string(),
                    name: field(NAME).unwrap_or(id).to_string(),
                    gtin: None,
                    category_id: field(CATEGORY).unwrap_or(default_category).to_string(),
                    brand_id: field(BRAND).map(str::to_string),
                    attributes,
                }));
                positions.insert(id.to_string(), listings.len() - 1);
                listings.len() - 1
            }
        };

        if let Some(price) = field(PRICE) {
            let price = price
                .parse::<f64>()
                .with_context(|| format!("row {row}: invalid price {price:?}"))?;
            let shipping = field(SHIPPING)
                .map(|s| s.parse::<f64>())
                .transpose()
                .with_context(|| format!("row {row}: invalid shipping"))?;
            let retailer = field(RETAILER).unwrap_or("unknown");
            let listing = &mut listings[position];
            let mut offer = Price::new(
                format!("{id}-{}", listing.prices.len() + 1),
                Retailer {
                    id: retailer.to_string(),
                    name: retailer.to_string(),
                },
                price,
                shipping,
            );
            if let Some(in_stock) = field(IN_STOCK) {
                offer.in_stock = in_stock
                    .parse::<bool>()
                    .with_context(|| format!("row {row}: invalid in_stock {in_stock:?}"))?;
            }
            listing.prices.push(offer);
        }
    }
    tracing::debug!(listings = listings.len(), "read listings");
    Ok(listings)
}

fn is_reserved(header: &str) -> bool {
    [ID, NAME, BRAND, CATEGORY, RETAILER, PRICE, SHIPPING, IN_STOCK].contains(&header)
}

fn attribute_value(value: &str) -> AttributeValue {
    if let Ok(number) = value.parse::<f64>() {
        return AttributeValue::Number(number);
    }
    match value {
        "true" => AttributeValue::Flag(true),
        "false" => AttributeValue::Flag(false),
        _ => AttributeValue::Text(value.to_string()),
    }
}
