//! Market-data tab: stock list, selection, model panels, and purchase.
//!
//! DESIGN
//! ======
//! Selecting a stock resets every panel that belongs to the previous
//! selection. A purchase is gated twice before anything is sent: a positive
//! quantity, then a successfully viewed risk assessment for the selection.

#[cfg(test)]
#[path = "market_test.rs"]
mod market_test;

use super::view::Loadable;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Forecast, PurchaseReceipt, PurchaseRequest, RiskAssessment, Stock};
use crate::util::filter::filter_stocks;
use crate::util::format::{money, parse_positive_amount};

pub const INVALID_QUANTITY: &str = "Please enter a valid quantity.";
pub const RISK_NOT_VIEWED: &str = "Please view the detailed risk assessment before confirming purchase.";
pub const NO_STOCK_SELECTED: &str = "Select a stock first.";

/// Contents of the risk panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RiskPanel {
    Assessed(RiskAssessment),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct MarketState {
    pub stocks: Loadable<Vec<Stock>>,
    pub query: String,
    pub selected: Option<Stock>,
    pub risk: Option<RiskPanel>,
    pub forecast: Option<String>,
    pub quantity: String,
    pub purchase_message: Option<String>,
}

impl MarketState {
    /// Stocks matching the search box.
    #[must_use]
    pub fn visible_stocks(&self) -> Vec<Stock> {
        self.stocks.data.as_deref().map(|list| filter_stocks(list, &self.query)).unwrap_or_default()
    }

    #[must_use]
    pub fn is_selected(&self, ticker: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s.ticker == ticker)
    }

    /// Switch selection and clear the previous stock's panels.
    pub fn select(&mut self, stock: Stock) {
        self.selected = Some(stock);
        self.risk = None;
        self.forecast = None;
        self.quantity.clear();
        self.purchase_message = None;
    }

    #[must_use]
    pub fn risk_viewed(&self) -> bool {
        matches!(self.risk, Some(RiskPanel::Assessed(_)))
    }

    #[must_use]
    pub fn risk_text(&self) -> Option<String> {
        self.risk.as_ref().map(|panel| match panel {
            RiskPanel::Assessed(risk) => risk.summary(),
            RiskPanel::Failed(message) => message.clone(),
        })
    }

    pub fn apply_risk(&mut self, result: Result<RiskAssessment, ApiError>) {
        self.risk = Some(match result {
            Ok(risk) => RiskPanel::Assessed(risk),
            Err(err) => RiskPanel::Failed(err.to_string()),
        });
    }

    pub fn apply_forecast(&mut self, result: Result<Forecast, ApiError>) {
        self.forecast = Some(match result {
            Ok(forecast) => forecast.summary(),
            Err(err) => err.to_string(),
        });
    }

    /// Validate the purchase form for the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with the message to show.
    pub fn purchase_request(&self) -> Result<PurchaseRequest, ApiError> {
        let stock = self.selected.as_ref().ok_or_else(|| ApiError::validation(NO_STOCK_SELECTED))?;
        validate_purchase(stock, &self.quantity, self.risk_viewed())
    }

    pub fn apply_purchase(&mut self, result: Result<PurchaseReceipt, ApiError>) {
        self.purchase_message = Some(match result {
            Ok(receipt) => purchase_success_message(&receipt),
            Err(err) => err.to_string(),
        });
    }
}

/// Build a confirmed purchase of `quantity` shares at the stock's last close.
///
/// # Errors
///
/// Quantity is checked before the risk gate, matching the order the form
/// reports problems in.
pub fn validate_purchase(stock: &Stock, quantity: &str, risk_viewed: bool) -> Result<PurchaseRequest, ApiError> {
    let quantity = parse_positive_amount(quantity).ok_or_else(|| ApiError::validation(INVALID_QUANTITY))?;
    if !risk_viewed {
        return Err(ApiError::validation(RISK_NOT_VIEWED));
    }
    Ok(PurchaseRequest { ticker: stock.ticker.clone(), quantity, price: stock.close, confirm: true })
}

#[must_use]
pub fn purchase_success_message(receipt: &PurchaseReceipt) -> String {
    match receipt.new_balance {
        Some(balance) => format!("Purchase successful! New balance: {}", money(balance)),
        None if !receipt.message.is_empty() => receipt.message.clone(),
        None => "Purchase successful!".to_owned(),
    }
}

/// Validate `state`'s purchase form and, only if it passes, send it.
///
/// # Errors
///
/// Validation failures are returned without any request being issued.
pub async fn submit_purchase(api: &ApiClient, state: &MarketState) -> Result<PurchaseReceipt, ApiError> {
    let request = state.purchase_request()?;
    log::info!("purchasing {} x {}", request.quantity, request.ticker);
    api.purchase(&request).await
}
