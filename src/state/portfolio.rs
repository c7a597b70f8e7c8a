//! Portfolio tab: holdings, rebalancing constraints, and recommendations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Holdings and constraints are fetched on mount. Constraints are edited as
//! text and only become typed [`Constraints`] when saved or used for a
//! rebalance. Buying from the recommendation modal purchases each row and
//! then the page refetches holdings.

#[cfg(test)]
#[path = "portfolio_test.rs"]
mod portfolio_test;

use super::view::Loadable;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{
    Constraints, Holding, MessageResponse, PortfolioResponse, PurchaseRequest, RebalanceResponse, Recommendation,
    RecommendationResponse, SectorLimits,
};
use crate::util::format::{parse_positive_amount, parse_risk_level};

pub const INVALID_BUDGET_LIMIT: &str = "Please enter a valid budget limit.";
pub const INVALID_BUDGET: &str = "Please enter a valid budget.";
pub const INVALID_RISK_LEVEL: &str = "Risk level must be between 1 and 5.";
pub const CONSTRAINTS_SAVED: &str = "Constraints saved.";
pub const NOTHING_TO_BUY: &str = "No recommended stocks to purchase.";

#[derive(Clone, Debug, Default)]
pub struct PortfolioState {
    pub holdings: Loadable<PortfolioResponse>,
    /// Budget limit input; blank means no limit.
    pub budget_input: String,
    /// Sector limits input, `Technology=30, Energy=20`.
    pub sectors_input: String,
    pub rebalanced: Vec<Holding>,
    /// Outcome of the last save/rebalance, shown as a dismissable message.
    pub message: Option<String>,
    pub recommendations: RecommendationForm,
}

impl PortfolioState {
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        self.holdings.data.as_ref().map_or(&[], |p| p.portfolio.as_slice())
    }

    /// Fill the constraint inputs from the stored constraints.
    pub fn apply_constraints(&mut self, result: Result<Constraints, ApiError>) {
        match result {
            Ok(constraints) => {
                self.budget_input = constraints.budget_limit.map(|b| b.to_string()).unwrap_or_default();
                self.sectors_input = constraints.sector_limits.to_string();
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Parse the constraint inputs.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a non-positive budget or a
    /// malformed sector entry.
    pub fn constraints(&self) -> Result<Constraints, ApiError> {
        let budget_limit = if self.budget_input.trim().is_empty() {
            None
        } else {
            Some(parse_positive_amount(&self.budget_input).ok_or_else(|| ApiError::validation(INVALID_BUDGET_LIMIT))?)
        };
        let sector_limits =
            SectorLimits::parse(&self.sectors_input).map_err(|e| ApiError::validation(e.to_string()))?;
        Ok(Constraints { budget_limit, sector_limits })
    }

    pub fn apply_saved(&mut self, result: Result<MessageResponse, ApiError>) {
        self.message = Some(match result {
            Ok(resp) if !resp.message.is_empty() => resp.message,
            Ok(_) => CONSTRAINTS_SAVED.to_owned(),
            Err(err) => err.to_string(),
        });
    }

    pub fn apply_rebalance(&mut self, result: Result<RebalanceResponse, ApiError>) {
        match result {
            Ok(resp) => {
                self.rebalanced = resp.rebalanced;
                self.message = None;
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }
}

/// Recommendation modal inputs and results.
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationForm {
    pub open: bool,
    pub budget: String,
    pub risk_level: String,
    pub result: Option<RecommendationResponse>,
    pub message: Option<String>,
    pub busy: bool,
}

impl Default for RecommendationForm {
    fn default() -> Self {
        Self {
            open: false,
            budget: String::new(),
            risk_level: "3".to_owned(),
            result: None,
            message: None,
            busy: false,
        }
    }
}

impl RecommendationForm {
    /// Budget and risk level to request with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the budget is not positive or
    /// the risk level is outside 1..=5.
    pub fn request(&self) -> Result<(f64, u8), ApiError> {
        let budget = parse_positive_amount(&self.budget).ok_or_else(|| ApiError::validation(INVALID_BUDGET))?;
        let risk = parse_risk_level(&self.risk_level).ok_or_else(|| ApiError::validation(INVALID_RISK_LEVEL))?;
        Ok((budget, risk))
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn apply_recommendations(&mut self, result: Result<RecommendationResponse, ApiError>) {
        self.busy = false;
        match result {
            Ok(resp) => {
                self.message = resp.recommended_portfolio.is_empty().then(|| NOTHING_TO_BUY.to_owned());
                self.result = Some(resp);
            }
            Err(err) => {
                self.result = None;
                self.message = Some(err.to_string());
            }
        }
    }

    /// Rows worth buying from the last result.
    #[must_use]
    pub fn purchasable(&self) -> Vec<Recommendation> {
        self.result
            .as_ref()
            .map(|r| r.recommended_portfolio.iter().filter(|row| row.recommended_quantity > 0).cloned().collect())
            .unwrap_or_default()
    }

    pub fn apply_purchase(&mut self, run: PurchaseRun) {
        self.busy = false;
        let bought = |n: usize| format!("Purchased {n} recommended stock{}", if n == 1 { "" } else { "s" });
        self.message = Some(match run {
            PurchaseRun { bought: 0, error: None } => NOTHING_TO_BUY.to_owned(),
            PurchaseRun { bought: n, error: None } => format!("{}.", bought(n)),
            PurchaseRun { bought: 0, error: Some(err) } => err.to_string(),
            PurchaseRun { bought: n, error: Some(err) } => format!("{} before an error: {err}", bought(n)),
        });
    }
}

/// Outcome of a "Buy Recommended" run.
///
/// Purchases are not transactional: rows bought before a failure stay bought,
/// so `bought` is reported alongside the error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurchaseRun {
    pub bought: usize,
    pub error: Option<ApiError>,
}

impl PurchaseRun {
    /// Holdings changed on the server.
    #[must_use]
    pub fn changed_holdings(&self) -> bool {
        self.bought > 0
    }
}

/// Validate the modal and fetch recommendations.
///
/// # Errors
///
/// Validation failures are returned without any request being issued.
pub async fn fetch_recommendations(
    api: &ApiClient,
    form: &RecommendationForm,
) -> Result<RecommendationResponse, ApiError> {
    let (budget, risk_level) = form.request()?;
    api.recommendations(budget, risk_level).await
}

/// Purchase every recommended row in order, stopping at the first failure.
pub async fn buy_recommendations(api: &ApiClient, rows: &[Recommendation]) -> PurchaseRun {
    let mut run = PurchaseRun::default();
    for row in rows.iter().filter(|row| row.recommended_quantity > 0) {
        let request = PurchaseRequest {
            ticker: row.ticker.clone(),
            quantity: f64::from(row.recommended_quantity),
            price: row.current_price,
            confirm: true,
        };
        if let Err(err) = api.purchase(&request).await {
            run.error = Some(err);
            break;
        }
        run.bought += 1;
    }
    run
}
