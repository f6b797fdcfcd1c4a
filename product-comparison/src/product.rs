use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The attribute resolved from a listing's best price rather than from the product's attributes.
pub const PRICE_ATTRIBUTE: &str = "price";

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+(?:[.,]\d+)?)").expect("valid leading number pattern"));

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Numeric view of the value, used for comparison. Text contributes its leading number
    /// ("5000 mAh" is 5000, "6,1 in" is 6.1), flags count as 1 or 0. Non-finite numbers and text
    /// without a leading number are missing.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Flag(flag) => f64::from(u8::from(*flag)),
            Self::Text(text) => {
                let captures = LEADING_NUMBER.captures(text)?;
                captures.get(1)?.as_str().replace(',', ".").parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }

    /// Equality used by attribute filters. Numbers match numerically, text case-insensitively.
    pub fn matches(&self, expected: &Self) -> bool {
        match (self, expected) {
            (Self::Text(a), Self::Text(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
            (Self::Flag(a), Self::Flag(b)) => a == b,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub gtin: Option<String>,
    pub category_id: String,
    pub brand_id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retailer {
    pub id: String,
    pub name: String,
}

/// One retailer's offer for a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: String,
    pub retailer: Retailer,
    pub price: f64,
    pub shipping: Option<f64>,
    pub total_price: f64,
    pub in_stock: bool,
}

impl Price {
    pub fn new(id: impl Into<String>, retailer: Retailer, price: f64, shipping: Option<f64>) -> Self {
        Self {
            id: id.into(),
            retailer,
            price,
            shipping,
            total_price: price + shipping.unwrap_or(0.0),
            in_stock: true,
        }
    }
}

/// A product together with the offers collected for it. This is the candidate fed to the frontier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub product: Product,
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl Listing {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            prices: Vec::new(),
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.prices.push(price);
        self
    }

    /// The lowest total price among in-stock offers, or among all offers when none is in stock.
    pub fn best_price(&self) -> Option<&Price> {
        let cheapest = |in_stock_only: bool| {
            self.prices
                .iter()
                .filter(|p| p.total_price.is_finite())
                .filter(|p| !in_stock_only || p.in_stock)
                .min_by(|a, b| a.total_price.total_cmp(&b.total_price))
        };
        cheapest(true).or_else(|| cheapest(false))
    }
}

/// Raw comparable value of `key` for a product and its best price.
pub fn raw_value(product: &Product, best_price: Option<&Price>, key: &str) -> Option<f64> {
    if key == PRICE_ATTRIBUTE {
        return best_price
            .map(|p| p.total_price)
            .filter(|total| total.is_finite());
    }
    product.attributes.get(key)?.as_number()
}

impl pareto_selection::Candidate for Listing {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.product.id.clone()
    }

    fn attribute(&self, key: &str) -> Option<f64> {
        raw_value(&self.product, self.best_price(), key)
    }
}
