//! Wire DTOs for the trading backend.
//!
//! DESIGN
//! ======
//! The backend is loose about shapes: prices arrive as numbers or as
//! formatted strings (`"$1,234.56"`), holdings use two different key sets,
//! and optional fields are frequently omitted. Decoding absorbs that here so
//! pages only ever see typed values.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================
// Auth & profile
// =============================================================

/// A signed-in user as returned by `/api/profile`, `/api/login`, and `/api/account`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub balance: Option<f64>,
    #[serde(rename = "subscriptionStatus", default)]
    pub subscription_status: Option<bool>,
    #[serde(rename = "notificationPreferences", default)]
    pub notification_preferences: Option<NotificationPreferences>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    /// Bearer token, when the backend issues one in addition to its cookie.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecoverRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// =============================================================
// Account
// =============================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub sms: bool,
}

/// `GET /api/account` payload.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AccountSummary {
    #[serde(default)]
    pub user: User,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub profit: f64,
    #[serde(rename = "subscriptionStatus", default)]
    pub subscription_active: bool,
    #[serde(rename = "notificationPreferences", default)]
    pub notification_preferences: NotificationPreferences,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DepositRequest {
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DepositResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "newBalance", deserialize_with = "deserialize_lenient_f64")]
    pub new_balance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionAction {
    Activate,
    Deactivate,
}

impl SubscriptionAction {
    /// Action that flips the current subscription state.
    #[must_use]
    pub fn toggle_from(active: bool) -> Self {
        if active { Self::Deactivate } else { Self::Activate }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SubscriptionRequest {
    pub action: SubscriptionAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "subscriptionStatus")]
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NotificationResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub preferences: NotificationPreferences,
}

// =============================================================
// Market data & model endpoints
// =============================================================

/// One row of `GET /api/stocks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(rename = "Ticker", alias = "ticker")]
    pub ticker: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub company_name: Option<String>,
    /// Latest close in dollars.
    #[serde(rename = "Close", alias = "close", default, deserialize_with = "deserialize_lenient_f64")]
    pub close: f64,
    #[serde(rename = "Volume", alias = "volume", default, deserialize_with = "deserialize_lenient_f64")]
    pub volume: f64,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sector: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(rename = "MA20", default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub ma20: Option<f64>,
    #[serde(rename = "Vol20", default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub vol20: Option<f64>,
    #[serde(default)]
    pub risk_class: Option<u8>,
}

/// `GET /api/model/dynamicRisk` payload (also nested in report details).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_class: u8,
    #[serde(default)]
    pub overall_risk: String,
    #[serde(default, alias = "explanation")]
    pub detailed_explanation: String,
}

impl RiskAssessment {
    /// Text block shown in the market-data risk panel.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Risk Class: {} ({})\n{}", self.risk_class, self.overall_risk, self.detailed_explanation)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForecastRequest {
    pub ticker: String,
}

/// `POST /api/model/forecast` payload. Different model versions fill
/// different subsets of these fields.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub predicted_norm: Option<f64>,
    #[serde(default)]
    pub last_norm_close: Option<f64>,
    #[serde(default)]
    pub percent_change: Option<f64>,
    #[serde(default)]
    pub predicted_close: Option<f64>,
}

impl Forecast {
    /// Text block shown in the market-data forecast panel.
    #[must_use]
    pub fn summary(&self) -> String {
        let Some(change) = self.percent_change else {
            return "Cannot compute % change (last close was zero).".to_owned();
        };
        let sign = if change >= 0.0 { "+" } else { "" };
        let mut lines = Vec::new();
        if let Some(norm) = self.predicted_norm {
            lines.push(format!("Predicted Norm: {norm:.11}"));
        }
        if let Some(last) = self.last_norm_close {
            lines.push(format!("Last Norm Close: {last:.11}"));
        }
        if let Some(close) = self.predicted_close {
            lines.push(format!("Predicted Close: ${close:.2}"));
        }
        lines.push(format!("=> {sign}{change:.2}% change"));
        lines.join("\n")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PurchaseRequest {
    pub ticker: String,
    pub quantity: f64,
    pub price: f64,
    pub confirm: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PurchaseReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub new_balance: Option<f64>,
}

// =============================================================
// Portfolio
// =============================================================

/// A position, from either `/api/portfolio` or `/api/rebalance`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    #[serde(alias = "symbol")]
    pub ticker: String,
    #[serde(alias = "name", default, deserialize_with = "deserialize_optional_string")]
    pub company_name: Option<String>,
    #[serde(alias = "shares", default, deserialize_with = "deserialize_lenient_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub average_cost: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub current_price: f64,
    #[serde(default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub predicted_future_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub profit_loss: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub total_profit_loss: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PortfolioResponse {
    #[serde(default)]
    pub portfolio: Vec<Holding>,
    #[serde(default)]
    pub summary: Option<PortfolioSummary>,
}

/// Per-sector allocation caps in percent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct SectorLimits(BTreeMap<String, f64>);

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SectorLimitError {
    #[error("Sector limit entry '{0}' must look like Sector=30.")]
    Malformed(String),

    #[error("Sector name cannot be empty.")]
    EmptySector,

    #[error("Sector limit for {sector} must be a number.")]
    NotANumber { sector: String },

    #[error("Sector limit for {sector} must be between 0 and 100 (got {value}).")]
    OutOfRange { sector: String, value: f64 },

    #[error("Sector {0} is listed more than once.")]
    Duplicate(String),
}

impl SectorLimits {
    /// Parse `Technology=30, Energy=20` (commas or semicolons, `=` or `:`).
    ///
    /// Blank input yields no limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`SectorLimitError`] encountered.
    pub fn parse(input: &str) -> Result<Self, SectorLimitError> {
        let mut limits = BTreeMap::new();
        for entry in input.split([',', ';']).map(str::trim).filter(|e| !e.is_empty()) {
            let (sector, raw) = entry
                .split_once(['=', ':'])
                .ok_or_else(|| SectorLimitError::Malformed(entry.to_owned()))?;
            let sector = sector.trim();
            let raw = raw.trim().trim_end_matches('%').trim();
            let value = raw
                .parse::<f64>()
                .map_err(|_| SectorLimitError::NotANumber { sector: sector.to_owned() })?;
            if limits.contains_key(sector) {
                return Err(SectorLimitError::Duplicate(sector.to_owned()));
            }
            validate_limit(sector, value)?;
            limits.insert(sector.to_owned(), value);
        }
        Ok(Self(limits))
    }

    #[must_use]
    pub fn get(&self, sector: &str) -> Option<f64> {
        self.0.get(sector).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn validate_limit(sector: &str, value: f64) -> Result<(), SectorLimitError> {
    if sector.is_empty() {
        return Err(SectorLimitError::EmptySector);
    }
    if !value.is_finite() {
        return Err(SectorLimitError::NotANumber { sector: sector.to_owned() });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(SectorLimitError::OutOfRange { sector: sector.to_owned(), value });
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, f64>> for SectorLimits {
    type Error = SectorLimitError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        for (sector, value) in &map {
            validate_limit(sector.trim(), *value)?;
        }
        Ok(Self(map))
    }
}

impl From<SectorLimits> for BTreeMap<String, f64> {
    fn from(limits: SectorLimits) -> Self {
        limits.0
    }
}

impl fmt::Display for SectorLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (sector, value) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{sector}={value}")?;
        }
        Ok(())
    }
}

/// Rebalancing constraints stored per user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(
        rename = "budgetLimit",
        default,
        deserialize_with = "deserialize_optional_lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub budget_limit: Option<f64>,
    #[serde(rename = "sectorLimits", default)]
    pub sector_limits: SectorLimits,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RebalanceRequest {
    pub constraints: Constraints,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RebalanceResponse {
    #[serde(rename = "rebalancedPortfolio", default)]
    pub rebalanced: Vec<Holding>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RecommendationRequest {
    pub budget: f64,
    pub risk_level: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "Ticker", alias = "ticker")]
    pub ticker: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub company_name: Option<String>,
    pub risk_class: u8,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub current_price: f64,
    pub recommended_quantity: u32,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub total_allocation: f64,
    #[serde(default)]
    pub predicted_percent: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommended_portfolio: Vec<Recommendation>,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub remaining_budget: f64,
}

// =============================================================
// Transactions
// =============================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_optional_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub quantity: f64,
    #[serde(rename = "totalPrice", default, deserialize_with = "deserialize_lenient_f64")]
    pub total_price: f64,
    #[serde(rename = "percentChange", default, deserialize_with = "deserialize_lenient_f64")]
    pub percent_change: f64,
    #[serde(rename = "profitLoss", default, deserialize_with = "deserialize_optional_lenient_f64")]
    pub profit_loss: Option<f64>,
    /// `YYYY-MM-DD HH:MM:SS`, or empty when the server has no timestamp.
    #[serde(default)]
    pub date: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

// =============================================================
// Reports
// =============================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

impl ReportSummary {
    /// Path segment for `/api/report/:name`: the part after `" - "` in
    /// `"Report - MSFT"`, falling back to the id.
    #[must_use]
    pub fn series_key(&self) -> &str {
        self.name
            .split_once(" - ")
            .map(|(_, key)| key.trim())
            .filter(|key| !key.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReportsResponse {
    #[serde(default)]
    pub reports: Vec<ReportSummary>,
}

/// Optional server-side filters for `/api/reports`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub search: Option<String>,
    pub sector: Option<String>,
    pub min_risk: Option<u8>,
    pub max_risk: Option<u8>,
}

/// One labelled price series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    #[serde(alias = "ticker", default)]
    pub stock: String,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64_vec")]
    pub prices: Vec<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReportSeriesResponse {
    #[serde(default)]
    pub data: Vec<PriceSeries>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSuggestion {
    pub ticker: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub company_name: Option<String>,
}

/// `GET /api/report_details/:ticker` payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReportDetails {
    pub stock: String,
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64_vec")]
    pub prices: Vec<f64>,
    #[serde(default)]
    pub predicted_close: Option<f64>,
    #[serde(default)]
    pub forecast_error: Option<f64>,
    pub risk_metrics: RiskAssessment,
    #[serde(default)]
    pub model_performance: BTreeMap<String, serde_json::Value>,
}

impl ReportDetails {
    #[must_use]
    pub fn series(&self) -> PriceSeries {
        PriceSeries { stock: self.stock.clone(), dates: self.dates.clone(), prices: self.prices.clone() }
    }
}

// =============================================================
// Lenient decoding helpers
// =============================================================

/// Parse `"$1,234.56"`, `"1234.56"`, or `" 12 "` into a float.
#[must_use]
pub fn parse_price_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lenient_f64_from_value<E: serde::de::Error>(value: &serde_json::Value) -> Result<Option<f64>, E> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| E::custom("invalid number")),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => parse_price_text(s)
            .map(Some)
            .ok_or_else(|| E::custom(format!("invalid numeric string: {s}"))),
        other => Err(E::custom(format!("expected number, got {other}"))),
    }
}

fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_f64_from_value::<D::Error>(&value)?.unwrap_or(0.0))
}

fn deserialize_optional_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    lenient_f64_from_value::<D::Error>(&value)
}

fn deserialize_lenient_f64_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    values
        .iter()
        .map(|v| {
            lenient_f64_from_value::<D::Error>(v)?.ok_or_else(|| D::Error::custom("missing price in series"))
        })
        .collect()
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
