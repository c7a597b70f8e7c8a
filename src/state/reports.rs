//! Reports tab: report cards, performance graphs, and per-ticker details.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two read paths feed this tab. "View Graph" on a card loads the
//! multi-series `/api/report/:name` data. The ticker search loads
//! `/api/report_details/:ticker` with model metrics and a risk gauge whose
//! threshold the user can drag.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use super::view::Loadable;
use crate::net::error::ApiError;
use crate::net::types::{ReportDetails, ReportSeriesResponse, ReportSummary, StockSuggestion};
use crate::util::chart::{ChartData, DEFAULT_RISK_THRESHOLD, gauge_color, risk_gauge_value};
use crate::util::filter::filter_reports;

/// Graph opened from a report card.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportGraph {
    pub report: ReportSummary,
    pub chart: Loadable<ChartData>,
}

#[derive(Clone, Debug)]
pub struct ReportsState {
    pub reports: Loadable<Vec<ReportSummary>>,
    pub search: String,
    pub suggestions: Vec<StockSuggestion>,
    pub graph: Option<ReportGraph>,
    pub details: Option<Loadable<ReportDetails>>,
    /// Gauge threshold in percent.
    pub threshold: f64,
}

impl Default for ReportsState {
    fn default() -> Self {
        Self {
            reports: Loadable::default(),
            search: String::new(),
            suggestions: Vec::new(),
            graph: None,
            details: None,
            threshold: DEFAULT_RISK_THRESHOLD,
        }
    }
}

impl ReportsState {
    #[must_use]
    pub fn visible_reports(&self) -> Vec<ReportSummary> {
        self.reports.data.as_deref().map(|list| filter_reports(list, &self.search)).unwrap_or_default()
    }

    /// Search text worth asking the server for suggestions about.
    #[must_use]
    pub fn suggestion_query(&self) -> Option<String> {
        let query = self.search.trim();
        (!query.is_empty()).then(|| query.to_owned())
    }

    /// Suggestions are a convenience; failures just clear them.
    pub fn apply_suggestions(&mut self, result: Result<Vec<StockSuggestion>, ApiError>) {
        self.suggestions = result.unwrap_or_else(|err| {
            log::warn!("stock suggestions unavailable: {err}");
            Vec::new()
        });
    }

    /// Open the graph panel for `report`; returns the series key to fetch.
    pub fn open_graph(&mut self, report: ReportSummary) -> String {
        let key = report.series_key().to_owned();
        self.graph = Some(ReportGraph { report, chart: Loadable::default() });
        key
    }

    pub fn apply_series(&mut self, result: Result<ReportSeriesResponse, ApiError>) {
        if let Some(graph) = self.graph.as_mut() {
            graph.chart.apply(result.map(|resp| ChartData::from_series(&resp.data)));
        }
    }

    /// Start loading details for `ticker`; returns the normalized ticker.
    pub fn open_details(&mut self, ticker: &str) -> Option<String> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return None;
        }
        self.search = ticker.clone();
        self.suggestions.clear();
        self.details = Some(Loadable::default());
        Some(ticker)
    }

    pub fn apply_details(&mut self, result: Result<ReportDetails, ApiError>) {
        if let Some(details) = self.details.as_mut() {
            details.apply(result);
        }
    }

    #[must_use]
    pub fn loaded_details(&self) -> Option<&ReportDetails> {
        self.details.as_ref().and_then(|d| d.data.as_ref())
    }

    #[must_use]
    pub fn details_chart(&self) -> Option<ChartData> {
        self.loaded_details().map(ChartData::from_details)
    }

    #[must_use]
    pub fn gauge_value(&self) -> Option<f64> {
        self.loaded_details().map(|d| risk_gauge_value(d.risk_metrics.risk_class))
    }

    #[must_use]
    pub fn gauge_color(&self) -> Option<&'static str> {
        self.gauge_value().map(|value| gauge_color(value, self.threshold))
    }

    /// `model_performance` entries as display rows, in key order.
    #[must_use]
    pub fn performance_rows(&self) -> Vec<(String, String)> {
        self.loaded_details()
            .map(|d| d.model_performance.iter().map(|(k, v)| (k.clone(), metric_text(v))).collect())
            .unwrap_or_default()
    }

    /// Slider input; ignored unless numeric. Clamped to 0..=100.
    pub fn set_threshold(&mut self, raw: &str) {
        if let Ok(value) = raw.trim().parse::<f64>()
            && value.is_finite()
        {
            self.threshold = value.clamp(0.0, 100.0);
        }
    }
}

/// Numbers to four decimals, strings verbatim, anything else as JSON.
#[must_use]
pub fn metric_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| format!("{f:.4}")),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
