//! REST API client for the trading backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page talks to the backend through one `ApiClient` provided via
//! context. It owns the base URL, the session, and the transport, so pages
//! only pick an endpoint method and map the `Result` into their state.
//!
//! ERROR HANDLING
//! ==============
//! All failures come back as [`ApiError`]. Non-2xx bodies are normalized by
//! [`ApiError::from_response`]; a 2xx body carrying an `error` string is
//! treated as a server error too, because the model endpoints answer that way.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, embedded_error};
use super::transport::{BrowserTransport, HttpRequest, HttpResponse, Method, Transport};
use super::types::{
    AccountSummary, Constraints, DepositRequest, DepositResponse, Forecast, ForecastRequest, LoginRequest,
    LoginResponse, MessageResponse, NotificationPreferences, NotificationResponse, PortfolioResponse, ProfileResponse,
    PurchaseReceipt, PurchaseRequest, RebalanceRequest, RebalanceResponse, RecommendationRequest,
    RecommendationResponse, RecoverRequest, RegisterRequest, ReportDetails, ReportQuery, ReportSeriesResponse,
    ReportsResponse, ResetPasswordRequest, RiskAssessment, Stock, StockSuggestion, SubscriptionAction,
    SubscriptionRequest, SubscriptionResponse, TransactionsResponse, User,
};
use crate::config::ClientConfig;
use crate::state::auth::Session;

/// Handle used by pages to call the backend. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
    transport: Arc<dyn Transport + Send + Sync>,
}

impl ApiClient {
    /// Client backed by the browser `fetch` transport.
    #[must_use]
    pub fn new(config: &ClientConfig, session: Session) -> Self {
        Self::with_transport(config, session, Arc::new(BrowserTransport))
    }

    #[must_use]
    pub fn with_transport(config: &ClientConfig, session: Session, transport: Arc<dyn Transport + Send + Sync>) -> Self {
        Self { base_url: config.api_base_url.clone(), session, transport }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Build a request with credentials and, when present, the bearer token.
    pub(crate) fn request(&self, method: Method, path: &str) -> HttpRequest {
        let req = HttpRequest::new(method, self.url(path));
        match self.session.token() {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let result = match self.transport.send(request).await {
            Ok(response) => decode_response(&response),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            log::warn!("{method:?} {url} failed: {err}");
        }
        result
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::Get, path)).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let request = self.request(method, path).json(payload)?;
        self.execute(request).await
    }

    // =============================================================
    // Auth
    // =============================================================

    /// `POST /api/login`. Stores the bearer token when the server issues one.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let payload = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        let resp: LoginResponse = self.send_json(Method::Post, "/api/login", &payload).await?;
        if let Some(token) = resp.token.as_deref().filter(|t| !t.is_empty()) {
            self.session.set_token(token);
        }
        Ok(resp)
    }

    /// `POST /api/register`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<MessageResponse, ApiError> {
        let payload =
            RegisterRequest { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() };
        self.send_json(Method::Post, "/api/register", &payload).await
    }

    /// `POST /api/recover`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn recover(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.send_json(Method::Post, "/api/recover", &RecoverRequest { email: email.to_owned() }).await
    }

    /// `POST /api/reset/:token`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<MessageResponse, ApiError> {
        let path = reset_endpoint(token);
        self.send_json(Method::Post, &path, &ResetPasswordRequest { password: password.to_owned() }).await
    }

    /// `POST /api/logout`. The local session is cleared whatever the server says.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let result = self.send_json(Method::Post, "/api/logout", &serde_json::json!({})).await;
        self.session.clear();
        result
    }

    /// `GET /api/profile`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn profile(&self) -> Result<User, ApiError> {
        let resp: ProfileResponse = self.get("/api/profile").await?;
        Ok(resp.user)
    }

    // =============================================================
    // Account
    // =============================================================

    /// `GET /api/account`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn account(&self) -> Result<AccountSummary, ApiError> {
        self.get("/api/account").await
    }

    /// `POST /api/deposit`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn deposit(&self, amount: f64) -> Result<DepositResponse, ApiError> {
        self.send_json(Method::Post, "/api/deposit", &DepositRequest { amount }).await
    }

    /// `PUT /api/subscription`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn set_subscription(&self, action: SubscriptionAction) -> Result<SubscriptionResponse, ApiError> {
        self.send_json(Method::Put, "/api/subscription", &SubscriptionRequest { action }).await
    }

    /// `POST /api/notifications`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn update_notifications(
        &self,
        preferences: NotificationPreferences,
    ) -> Result<NotificationResponse, ApiError> {
        self.send_json(Method::Post, "/api/notifications", &preferences).await
    }

    // =============================================================
    // Market data & models
    // =============================================================

    /// `GET /api/stocks`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self.get("/api/stocks").await
    }

    /// `GET /api/model/dynamicRisk?ticker=`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn dynamic_risk(&self, ticker: &str) -> Result<RiskAssessment, ApiError> {
        self.get(&with_query("/api/model/dynamicRisk", &[("ticker", ticker.to_owned())])).await
    }

    /// `POST /api/model/forecast`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn forecast(&self, ticker: &str) -> Result<Forecast, ApiError> {
        self.send_json(Method::Post, "/api/model/forecast", &ForecastRequest { ticker: ticker.to_owned() }).await
    }

    /// `POST /api/purchase`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseReceipt, ApiError> {
        self.send_json(Method::Post, "/api/purchase", request).await
    }

    // =============================================================
    // Portfolio
    // =============================================================

    /// `GET /api/portfolio`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn portfolio(&self) -> Result<PortfolioResponse, ApiError> {
        self.get("/api/portfolio").await
    }

    /// `GET /api/constraints`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn constraints(&self) -> Result<Constraints, ApiError> {
        self.get("/api/constraints").await
    }

    /// `PUT /api/constraints`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn save_constraints(&self, constraints: &Constraints) -> Result<MessageResponse, ApiError> {
        self.send_json(Method::Put, "/api/constraints", constraints).await
    }

    /// `POST /api/rebalance`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn rebalance(&self, constraints: &Constraints) -> Result<RebalanceResponse, ApiError> {
        let payload = RebalanceRequest { constraints: constraints.clone() };
        self.send_json(Method::Post, "/api/rebalance", &payload).await
    }

    /// `POST /api/recommendations`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn recommendations(&self, budget: f64, risk_level: u8) -> Result<RecommendationResponse, ApiError> {
        self.send_json(Method::Post, "/api/recommendations", &RecommendationRequest { budget, risk_level }).await
    }

    // =============================================================
    // Reports & transactions
    // =============================================================

    /// `GET /api/reports` with optional server-side filters.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn reports(&self, query: &ReportQuery) -> Result<ReportsResponse, ApiError> {
        self.get(&with_query("/api/reports", &report_query_pairs(query))).await
    }

    /// `GET /api/report/:name`: the multi-series graph for one report.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn report_series(&self, name: &str) -> Result<ReportSeriesResponse, ApiError> {
        self.get(&report_endpoint(name)).await
    }

    /// `GET /api/stockSuggestions?search=`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn stock_suggestions(&self, search: &str) -> Result<Vec<StockSuggestion>, ApiError> {
        self.get(&with_query("/api/stockSuggestions", &[("search", search.to_owned())])).await
    }

    /// `GET /api/report_details/:ticker`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn report_details(&self, ticker: &str) -> Result<ReportDetails, ApiError> {
        self.get(&report_details_endpoint(ticker)).await
    }

    /// `GET /api/transactions?<filters>`.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`ApiError`] on failure.
    pub async fn transactions(&self, filters: &[(&str, String)]) -> Result<TransactionsResponse, ApiError> {
        self.get(&with_query("/api/transactions", filters)).await
    }
}

/// Map a completed exchange to a typed body or a normalized error.
pub(crate) fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::from_response(response.status, &response.body));
    }
    if let Some(message) = embedded_error(&response.body) {
        return Err(ApiError::Server { status: response.status, message });
    }
    let body = if response.body.trim().is_empty() { "null" } else { response.body.as_str() };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Append `key=value` pairs, skipping empty values.
pub(crate) fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value.trim())))
        .collect();
    if encoded.is_empty() { path.to_owned() } else { format!("{path}?{}", encoded.join("&")) }
}

fn report_query_pairs(query: &ReportQuery) -> Vec<(&'static str, String)> {
    vec![
        ("search", query.search.clone().unwrap_or_default()),
        ("sector", query.sector.clone().unwrap_or_default()),
        ("minRisk", query.min_risk.map(|r| r.to_string()).unwrap_or_default()),
        ("maxRisk", query.max_risk.map(|r| r.to_string()).unwrap_or_default()),
    ]
}

fn reset_endpoint(token: &str) -> String {
    format!("/api/reset/{}", urlencoding::encode(token))
}

fn report_endpoint(name: &str) -> String {
    format!("/api/report/{}", urlencoding::encode(name))
}

fn report_details_endpoint(ticker: &str) -> String {
    format!("/api/report_details/{}", urlencoding::encode(ticker))
}
