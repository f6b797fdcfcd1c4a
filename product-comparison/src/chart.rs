use serde::{Deserialize, Serialize};

use crate::result::{ComparisonResult, ParetoProduct};

/// One product plotted against two attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoPoint {
    pub product_id: String,
    pub product_name: String,
    pub x: f64,
    pub y: f64,
    pub x_label: String,
    pub y_label: String,
    pub pareto_optimal: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoChartData {
    pub points: Vec<ParetoPoint>,
    /// Frontier points ordered along the x axis.
    pub frontier_line: Vec<ParetoPoint>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl ParetoChartData {
    /// Plot the raw values of attributes `x` and `y`. Products lacking either value are left out.
    pub fn new(result: &ComparisonResult, x: &str, y: &str) -> Self {
        let point = |product: &ParetoProduct| {
            Some(ParetoPoint {
                product_id: product.product.id.clone(),
                product_name: product.product.name.clone(),
                x: product.raw_value(x)?,
                y: product.raw_value(y)?,
                x_label: x.to_string(),
                y_label: y.to_string(),
                pareto_optimal: product.pareto_optimal,
            })
        };
        let points: Vec<ParetoPoint> = result.products().filter_map(point).collect();
        let mut frontier_line: Vec<ParetoPoint> =
            points.iter().filter(|p| p.pareto_optimal).cloned().collect();
        frontier_line.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

        let axis = |label: &str, value: fn(&ParetoPoint) -> f64| {
            let (min, max) = points
                .iter()
                .map(value)
                .fold(None, |bounds: Option<(f64, f64)>, v| match bounds {
                    None => Some((v, v)),
                    Some((min, max)) => Some((min.min(v), max.max(v))),
                })
                .unwrap_or((0.0, 0.0));
            Axis {
                label: label.to_string(),
                min,
                max,
            }
        };
        let x_axis = axis(x, |p| p.x);
        let y_axis = axis(y, |p| p.y);
        Self {
            points,
            frontier_line,
            x_axis,
            y_axis,
        }
    }
}
