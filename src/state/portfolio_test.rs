use futures::executor::block_on;

use super::*;
use crate::net::transport::mock::MockTransport;

fn recommendation(ticker: &str, quantity: u32, price: f64) -> Recommendation {
    Recommendation {
        ticker: ticker.to_owned(),
        company_name: None,
        risk_class: 2,
        current_price: price,
        recommended_quantity: quantity,
        total_allocation: price * f64::from(quantity),
        predicted_percent: None,
    }
}

// =============================================================
// Constraints
// =============================================================

#[test]
fn loaded_constraints_fill_inputs() {
    let mut state = PortfolioState::default();
    state.apply_constraints(Ok(Constraints {
        budget_limit: Some(5000.0),
        sector_limits: SectorLimits::parse("Energy=20").unwrap(),
    }));
    assert_eq!(state.budget_input, "5000");
    assert_eq!(state.sectors_input, "Energy=20");
    assert_eq!(state.constraints().unwrap().budget_limit, Some(5000.0));
}

#[test]
fn blank_inputs_mean_no_constraints() {
    let state = PortfolioState::default();
    assert_eq!(state.constraints().unwrap(), Constraints::default());
}

#[test]
fn invalid_constraint_inputs_are_reported() {
    let mut state = PortfolioState { budget_input: "-10".to_owned(), ..PortfolioState::default() };
    assert_eq!(state.constraints().unwrap_err().to_string(), INVALID_BUDGET_LIMIT);

    state.budget_input.clear();
    state.sectors_input = "Energy=150".to_owned();
    assert_eq!(
        state.constraints().unwrap_err().to_string(),
        "Sector limit for Energy must be between 0 and 100 (got 150)."
    );
}

#[test]
fn save_constraints_puts_typed_body() {
    let (api, mock) = MockTransport::new().respond(200, serde_json::json!({})).into_client();
    let mut state = PortfolioState {
        budget_input: "1000".to_owned(),
        sectors_input: "Technology=40".to_owned(),
        ..PortfolioState::default()
    };
    let constraints = state.constraints().unwrap();
    state.apply_saved(block_on(api.save_constraints(&constraints)));

    assert_eq!(state.message.as_deref(), Some(CONSTRAINTS_SAVED));
    let sent = &mock.requests()[0];
    assert_eq!(sent.url, "http://api.test/api/constraints");
    assert_eq!(sent.body.as_deref(), Some(r#"{"budgetLimit":1000.0,"sectorLimits":{"Technology":40.0}}"#));
}

#[test]
fn rebalance_replaces_rebalanced_rows() {
    let (api, _mock) = MockTransport::new()
        .respond(
            200,
            serde_json::json!({"rebalancedPortfolio": [{"symbol": "AAPL", "name": "Apple", "shares": 4, "average_cost": 1, "current_price": 2, "profit_loss": 4}]}),
        )
        .into_client();
    let mut state = PortfolioState { message: Some("stale".to_owned()), ..PortfolioState::default() };
    state.apply_rebalance(block_on(api.rebalance(&Constraints::default())));
    assert_eq!(state.rebalanced.len(), 1);
    assert_eq!(state.rebalanced[0].quantity, 4.0);
    assert_eq!(state.message, None);
}

// =============================================================
// Recommendations
// =============================================================

#[test]
fn recommendation_form_validates_budget_then_risk() {
    let mut form = RecommendationForm::default();
    assert_eq!(form.request().unwrap_err().to_string(), INVALID_BUDGET);

    form.budget = "500".to_owned();
    form.risk_level = "7".to_owned();
    assert_eq!(form.request().unwrap_err().to_string(), INVALID_RISK_LEVEL);

    form.risk_level = "4".to_owned();
    assert_eq!(form.request().unwrap(), (500.0, 4));
}

#[test]
fn invalid_recommendation_form_sends_nothing() {
    let (api, mock) = MockTransport::new().into_client();
    let form = RecommendationForm { budget: "0".to_owned(), ..RecommendationForm::default() };
    assert!(block_on(fetch_recommendations(&api, &form)).is_err());
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn recommendations_populate_purchasable_rows() {
    let (api, mock) = MockTransport::new()
        .respond(
            200,
            serde_json::json!({
                "recommended_portfolio": [
                    {"Ticker": "KO", "risk_class": 1, "current_price": 60.0, "recommended_quantity": 3, "total_allocation": 180.0},
                    {"Ticker": "PEP", "risk_class": 1, "current_price": 170.0, "recommended_quantity": 0, "total_allocation": 0.0}
                ],
                "total_cost": 180.0,
                "remaining_budget": 20.0
            }),
        )
        .into_client();
    let mut form = RecommendationForm { budget: "200".to_owned(), risk_level: "1".to_owned(), ..RecommendationForm::default() };
    form.apply_recommendations(block_on(fetch_recommendations(&api, &form)));

    assert_eq!(form.message, None);
    assert_eq!(form.purchasable().len(), 1);
    let body: serde_json::Value = serde_json::from_str(mock.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"budget": 200.0, "risk_level": 1}));
}

#[test]
fn buy_recommendations_purchases_each_row_in_order() {
    let (api, mock) = MockTransport::new()
        .respond(200, serde_json::json!({"message": "ok", "new_balance": 10}))
        .respond(200, serde_json::json!({"message": "ok", "new_balance": 5}))
        .into_client();
    let rows = vec![recommendation("KO", 2, 60.0), recommendation("PEP", 0, 1.0), recommendation("JNJ", 1, 150.0)];
    let run = block_on(buy_recommendations(&api, &rows));

    assert_eq!(run, PurchaseRun { bought: 2, error: None });
    let tickers: Vec<String> = mock
        .requests()
        .iter()
        .map(|r| serde_json::from_str::<serde_json::Value>(r.body.as_deref().unwrap()).unwrap()["ticker"].to_string())
        .collect();
    assert_eq!(tickers, vec!["\"KO\"", "\"JNJ\""]);
}

#[test]
fn buy_recommendations_stops_at_first_failure() {
    let (api, mock) = MockTransport::new()
        .respond(400, serde_json::json!({"error": "Insufficient balance"}))
        .into_client();
    let rows = vec![recommendation("KO", 2, 60.0), recommendation("JNJ", 1, 150.0)];
    let mut form = RecommendationForm::default();
    form.apply_purchase(block_on(buy_recommendations(&api, &rows)));

    assert_eq!(form.message.as_deref(), Some("Insufficient balance"));
    assert_eq!(mock.request_count(), 1);
}

#[test]
fn buy_recommendations_keeps_count_of_rows_bought_before_a_failure() {
    let (api, mock) = MockTransport::new()
        .respond(200, serde_json::json!({"message": "ok", "new_balance": 30}))
        .respond(400, serde_json::json!({"error": "Insufficient balance"}))
        .into_client();
    let rows = vec![recommendation("KO", 2, 60.0), recommendation("JNJ", 1, 150.0), recommendation("PG", 1, 160.0)];
    let run = block_on(buy_recommendations(&api, &rows));

    assert_eq!(run.bought, 1);
    assert!(run.error.is_some());
    assert!(run.changed_holdings());
    assert_eq!(mock.request_count(), 2);

    let mut form = RecommendationForm { busy: true, ..RecommendationForm::default() };
    form.apply_purchase(run);
    assert!(!form.busy);
    assert_eq!(form.message.as_deref(), Some("Purchased 1 recommended stock before an error: Insufficient balance"));
}

#[test]
fn failed_first_purchase_leaves_holdings_unchanged() {
    let (api, _mock) = MockTransport::new()
        .respond(400, serde_json::json!({"error": "Insufficient balance"}))
        .into_client();
    let run = block_on(buy_recommendations(&api, &[recommendation("KO", 2, 60.0)]));
    assert!(!run.changed_holdings());
}

#[test]
fn purchase_message_pluralizes() {
    let mut form = RecommendationForm::default();
    form.apply_purchase(PurchaseRun { bought: 1, error: None });
    assert_eq!(form.message.as_deref(), Some("Purchased 1 recommended stock."));
    form.apply_purchase(PurchaseRun { bought: 3, error: None });
    assert_eq!(form.message.as_deref(), Some("Purchased 3 recommended stocks."));
}
