//! Options-space coordinates
//!
//! Each live requirement is plotted at (value-to-cost, volatility). Exact
//! zeros are lifted to [`CHART_FLOOR`] so points on an axis stay visible.

use roa_core::Requirement;
use serde::{Deserialize, Serialize};

/// Smallest coordinate a point is drawn at
pub const CHART_FLOOR: f64 = 0.001;

/// One point of the options-space scatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Value-to-cost axis
    pub x: f64,
    /// Volatility axis
    pub y: f64,
    /// Requirement code shown on hover
    pub title: String,
}

fn lift(coordinate: f64) -> f64 {
    if coordinate == 0.0 {
        CHART_FLOOR
    } else {
        coordinate
    }
}

/// Chart coordinates of a valued requirement, `None` if unvalued
#[must_use]
pub fn chart_point(req: &Requirement) -> Option<ChartPoint> {
    let (Some(vtc), Some(vol)) = (req.value_to_cost, req.volatility) else {
        return None;
    };
    Some(ChartPoint {
        x: lift(vtc),
        y: lift(vol),
        title: req.code.clone(),
    })
}

/// Chart coordinates for every valued requirement, in input order
#[must_use]
pub fn chart_points(requirements: &[Requirement]) -> Vec<ChartPoint> {
    requirements.iter().filter_map(chart_point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_coordinates_are_lifted() {
        let req = Requirement::new("R1", 1.0, 1.0).with_valuation(0.0, 0.0);
        let point = chart_point(&req).unwrap();
        assert_eq!(point.x, CHART_FLOOR);
        assert_eq!(point.y, CHART_FLOOR);
        assert_eq!(point.title, "R1");
        // requirement itself is untouched
        assert_eq!(req.value_to_cost, Some(0.0));
    }

    #[test]
    fn unvalued_requirements_are_skipped() {
        let reqs = vec![
            Requirement::new("A", 1.0, 1.0).with_valuation(1.2, 0.4),
            Requirement::new("B", 1.0, 1.0),
        ];
        let points = chart_points(&reqs);
        assert_eq!(
            points,
            vec![ChartPoint {
                x: 1.2,
                y: 0.4,
                title: "A".into()
            }]
        );
    }

    #[test]
    fn serializes_as_xy_title() {
        let point = ChartPoint {
            x: 0.5,
            y: 1.5,
            title: "R9".into(),
        };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"x":0.5,"y":1.5,"title":"R9"}"#);
    }
}
