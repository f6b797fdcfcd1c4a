use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use pareto_selection::{Criterion, Direction, Weight};
use product_comparison::ComparisonRequest;

/// A comparison described in TOML. Keys follow the JSON request format, plus an optional pair of
/// chart axes.
#[derive(Debug, Deserialize)]
pub struct ComparisonConfig {
    #[serde(flatten)]
    pub request: ComparisonRequest,
    pub chart: Option<ChartAxes>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChartAxes {
    pub x: String,
    pub y: String,
}

impl ComparisonConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Parse a criterion written as `attribute:direction:weight`, e.g. `price:min:0.6`.
pub fn parse_criterion(s: &str) -> Result<Criterion, String> {
    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    let [attribute, direction, weight] = parts.as_slice() else {
        return Err(format!("expected attribute:direction:weight, got {s:?}"));
    };
    if attribute.is_empty() {
        return Err("empty attribute".to_string());
    }
    let direction = match direction.to_ascii_lowercase().as_str() {
        "max" | "maximize" => Direction::Maximize,
        "min" | "minimize" => Direction::Minimize,
        other => return Err(format!("unknown direction {other:?}")),
    };
    let weight = weight
        .parse::<f64>()
        .ok()
        .and_then(Weight::new)
        .ok_or_else(|| format!("weight must be a number in [0, 1], got {weight:?}"))?;
    Ok(Criterion::new(*attribute, weight, direction))
}
