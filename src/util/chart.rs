//! Price-series chart and risk-gauge adapters.
//!
//! SYSTEM CONTEXT
//! ==============
//! Report and market pages receive flat `dates[]`/`prices[]` arrays. These
//! helpers turn them into a labels/datasets structure and then into SVG
//! polyline geometry, so the chart component only renders strings.
//!
//! TRADE-OFFS
//! ==========
//! All datasets share one y-range so overlaid series stay comparable; a
//! single extreme series flattens the others.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use crate::net::types::{PriceSeries, ReportDetails};

/// Dataset colors, cycled by index.
pub const PALETTE: [&str; 5] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
];

pub const GAUGE_DANGER_COLOR: &str = "#e74c3c";
pub const GAUGE_SAFE_COLOR: &str = "#2ecc71";

/// Threshold the gauge slider starts at.
pub const DEFAULT_RISK_THRESHOLD: f64 = 60.0;

/// Highest risk class the backend reports.
pub const MAX_RISK_CLASS: u8 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: &'static str,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// One dataset per series; labels come from the first series.
    #[must_use]
    pub fn from_series(series: &[PriceSeries]) -> Self {
        let labels = series.first().map(|s| s.dates.clone()).unwrap_or_default();
        let datasets = series
            .iter()
            .enumerate()
            .map(|(i, s)| Dataset { label: s.stock.clone(), data: s.prices.clone(), color: palette_color(i) })
            .collect();
        Self { labels, datasets }
    }

    #[must_use]
    pub fn from_details(details: &ReportDetails) -> Self {
        Self::from_series(std::slice::from_ref(&details.series()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.iter().all(|d| d.data.is_empty())
    }

    /// Min and max over every dataset, widened when flat.
    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut values = self.datasets.iter().flat_map(|d| d.data.iter().copied()).filter(|v| v.is_finite());
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if (max - min).abs() < f64::EPSILON { Some((min - 1.0, max + 1.0)) } else { Some((min, max)) }
    }
}

#[must_use]
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Map `data` into a `width` x `height` box with y growing downward.
///
/// A single point is centered horizontally.
#[must_use]
pub fn polyline_points(data: &[f64], (min, max): (f64, f64), width: f64, height: f64) -> Vec<(f64, f64)> {
    let span = max - min;
    let y_of = |v: f64| if span > 0.0 { height - (v - min) / span * height } else { height / 2.0 };
    match data.len() {
        0 => Vec::new(),
        1 => vec![(width / 2.0, y_of(data[0]))],
        n => {
            #[allow(clippy::cast_precision_loss)]
            let step = width / (n - 1) as f64;
            data.iter()
                .enumerate()
                .map(|(i, v)| {
                    #[allow(clippy::cast_precision_loss)]
                    let x = i as f64 * step;
                    (x, y_of(*v))
                })
                .collect()
        }
    }
}

/// SVG `points` attribute for a polyline.
#[must_use]
pub fn points_attr(points: &[(f64, f64)]) -> String {
    points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect::<Vec<_>>().join(" ")
}

// =============================================================
// Risk gauge
// =============================================================

/// Gauge fill in percent: `class / 5 * 100`, clamped to 0..=100.
#[must_use]
pub fn risk_gauge_value(risk_class: u8) -> f64 {
    (f64::from(risk_class) / f64::from(MAX_RISK_CLASS) * 100.0).clamp(0.0, 100.0)
}

/// Danger color once the value reaches the threshold.
#[must_use]
pub fn gauge_color(value: f64, threshold: f64) -> &'static str {
    if value >= threshold { GAUGE_DANGER_COLOR } else { GAUGE_SAFE_COLOR }
}
