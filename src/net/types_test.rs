use super::*;

// =============================================================
// Stocks
// =============================================================

#[test]
fn stock_decodes_formatted_close_and_uppercase_keys() {
    let stock: Stock = serde_json::from_value(serde_json::json!({
        "Ticker": "AAPL",
        "company_name": "Apple Inc.",
        "Close": "$1,234.56",
        "Volume": 51234000,
        "sector": "Technology",
        "market_cap": 2.9e12,
        "MA20": 181.2
    }))
    .unwrap();
    assert_eq!(stock.ticker, "AAPL");
    assert_eq!(stock.company_name.as_deref(), Some("Apple Inc."));
    assert!((stock.close - 1234.56).abs() < 1e-9);
    assert_eq!(stock.volume, 51_234_000.0);
    assert_eq!(stock.ma20, Some(181.2));
    assert_eq!(stock.vol20, None);
}

#[test]
fn stock_treats_null_or_blank_company_name_as_missing() {
    let stock: Stock =
        serde_json::from_value(serde_json::json!({ "Ticker": "XYZ", "company_name": null, "Close": 3 })).unwrap();
    assert_eq!(stock.company_name, None);

    let stock: Stock =
        serde_json::from_value(serde_json::json!({ "Ticker": "XYZ", "company_name": "  ", "Close": 3 })).unwrap();
    assert_eq!(stock.company_name, None);
}

#[test]
fn stock_rejects_non_numeric_close() {
    let result = serde_json::from_value::<Stock>(serde_json::json!({ "Ticker": "BAD", "Close": "n/a" }));
    assert!(result.is_err());
}

#[test]
fn parse_price_text_strips_currency_formatting() {
    assert_eq!(parse_price_text("$145.60"), Some(145.6));
    assert_eq!(parse_price_text(" 1,004.30 "), Some(1004.3));
    assert_eq!(parse_price_text("$"), None);
    assert_eq!(parse_price_text("abc"), None);
}

// =============================================================
// Holdings
// =============================================================

#[test]
fn holding_accepts_portfolio_shape() {
    let holding: Holding = serde_json::from_value(serde_json::json!({
        "ticker": "MSFT",
        "company_name": "Microsoft",
        "quantity": 3,
        "average_cost": 300.0,
        "current_price": 310.5,
        "predicted_future_price": 340.5,
        "profit_loss": 30.0
    }))
    .unwrap();
    assert_eq!(holding.ticker, "MSFT");
    assert_eq!(holding.quantity, 3.0);
    assert_eq!(holding.predicted_future_price, Some(340.5));
}

#[test]
fn holding_accepts_rebalance_shape() {
    let resp: RebalanceResponse = serde_json::from_value(serde_json::json!({
        "rebalancedPortfolio": [
            {"symbol": "AAPL", "name": "Apple Inc.", "shares": 12, "average_cost": 140.0, "current_price": 153.0, "profit_loss": 156.0}
        ]
    }))
    .unwrap();
    let holding = &resp.rebalanced[0];
    assert_eq!(holding.ticker, "AAPL");
    assert_eq!(holding.company_name.as_deref(), Some("Apple Inc."));
    assert_eq!(holding.quantity, 12.0);
    assert_eq!(holding.predicted_future_price, None);
}

// =============================================================
// Account
// =============================================================

#[test]
fn account_summary_defaults_missing_preferences() {
    let account: AccountSummary = serde_json::from_value(serde_json::json!({
        "user": {"username": "alice", "email": "a@example.com", "balance": 1500.25},
        "profit": 12.5,
        "subscriptionStatus": true
    }))
    .unwrap();
    assert_eq!(account.user.username, "alice");
    assert_eq!(account.user.balance, Some(1500.25));
    assert!(account.subscription_active);
    assert_eq!(account.notification_preferences, NotificationPreferences::default());
}

#[test]
fn subscription_action_serializes_lowercase_and_toggles() {
    let body = serde_json::to_value(SubscriptionRequest { action: SubscriptionAction::toggle_from(true) }).unwrap();
    assert_eq!(body, serde_json::json!({ "action": "deactivate" }));
    assert_eq!(SubscriptionAction::toggle_from(false), SubscriptionAction::Activate);
}

// =============================================================
// Model endpoints
// =============================================================

#[test]
fn risk_assessment_summary_matches_panel_layout() {
    let risk = RiskAssessment {
        risk_class: 4,
        overall_risk: "High Risk".to_owned(),
        detailed_explanation: "Large swings.".to_owned(),
    };
    assert_eq!(risk.summary(), "Risk Class: 4 (High Risk)\nLarge swings.");
}

#[test]
fn forecast_summary_signs_positive_change() {
    let forecast = Forecast {
        predicted_norm: Some(0.5),
        last_norm_close: Some(0.25),
        percent_change: Some(2.345),
        predicted_close: None,
    };
    let text = forecast.summary();
    assert!(text.contains("Predicted Norm: 0.50000000000"));
    assert!(text.ends_with("=> +2.35% change") || text.ends_with("=> +2.34% change"));
}

#[test]
fn forecast_summary_without_change_explains_why() {
    let forecast = Forecast { predicted_close: Some(10.0), ..Forecast::default() };
    assert!(forecast.summary().starts_with("Cannot compute % change"));
}

// =============================================================
// Constraints
// =============================================================

#[test]
fn sector_limits_parse_accepts_common_separators() {
    let limits = SectorLimits::parse("Technology=30, Energy: 20%; Health Care = 12.5").unwrap();
    assert_eq!(limits.get("Technology"), Some(30.0));
    assert_eq!(limits.get("Energy"), Some(20.0));
    assert_eq!(limits.get("Health Care"), Some(12.5));
    assert!(SectorLimits::parse("   ").unwrap().is_empty());
}

#[test]
fn sector_limits_parse_reports_each_failure_kind() {
    assert_eq!(
        SectorLimits::parse("Technology"),
        Err(SectorLimitError::Malformed("Technology".to_owned()))
    );
    assert_eq!(SectorLimits::parse("=30"), Err(SectorLimitError::EmptySector));
    assert_eq!(
        SectorLimits::parse("Energy=lots"),
        Err(SectorLimitError::NotANumber { sector: "Energy".to_owned() })
    );
    assert_eq!(
        SectorLimits::parse("Energy=120"),
        Err(SectorLimitError::OutOfRange { sector: "Energy".to_owned(), value: 120.0 })
    );
    assert_eq!(
        SectorLimits::parse("Energy=10, Energy=20"),
        Err(SectorLimitError::Duplicate("Energy".to_owned()))
    );
}

#[test]
fn sector_limits_display_is_parseable() {
    let limits = SectorLimits::parse("Energy=20, Technology=30").unwrap();
    assert_eq!(limits.to_string(), "Energy=20, Technology=30");
    assert_eq!(SectorLimits::parse(&limits.to_string()).unwrap(), limits);
}

#[test]
fn constraints_wire_format_uses_camel_case_and_lenient_budget() {
    let constraints: Constraints = serde_json::from_value(serde_json::json!({
        "budgetLimit": "5000",
        "sectorLimits": {"Technology": 40}
    }))
    .unwrap();
    assert_eq!(constraints.budget_limit, Some(5000.0));
    assert_eq!(constraints.sector_limits.get("Technology"), Some(40.0));

    let body = serde_json::to_value(&constraints).unwrap();
    assert_eq!(body, serde_json::json!({ "budgetLimit": 5000.0, "sectorLimits": {"Technology": 40.0} }));
}

#[test]
fn constraints_reject_out_of_range_sector_limits_from_server() {
    let result = serde_json::from_value::<Constraints>(serde_json::json!({ "sectorLimits": {"Energy": 300} }));
    assert!(result.is_err());
}

#[test]
fn constraints_default_when_server_has_none() {
    let constraints: Constraints = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(constraints, Constraints::default());
}

// =============================================================
// Transactions & reports
// =============================================================

#[test]
fn transaction_decodes_camel_case_fields() {
    let resp: TransactionsResponse = serde_json::from_value(serde_json::json!({
        "transactions": [{
            "id": "t1", "symbol": "AAPL", "name": "AAPL", "type": "buy", "quantity": 2,
            "totalPrice": 300.5, "profitLoss": 20.0, "percentChange": 6.65, "date": "2024-05-01 10:00:00"
        }]
    }))
    .unwrap();
    let txn = &resp.transactions[0];
    assert_eq!(txn.kind.as_deref(), Some("buy"));
    assert_eq!(txn.total_price, 300.5);
    assert_eq!(txn.percent_change, 6.65);
    assert_eq!(txn.profit_loss, Some(20.0));
}

#[test]
fn transaction_with_null_total_price_defaults_to_zero() {
    let txn: Transaction =
        serde_json::from_value(serde_json::json!({ "symbol": "X", "totalPrice": null, "percentChange": 0 })).unwrap();
    assert_eq!(txn.total_price, 0.0);
}

#[test]
fn report_series_key_uses_suffix_after_dash() {
    let report = ReportSummary { id: "MSFT".to_owned(), name: "Report - MSFT".to_owned(), summary: String::new() };
    assert_eq!(report.series_key(), "MSFT");

    let report = ReportSummary { id: "GOOG".to_owned(), name: "Quarterly".to_owned(), summary: String::new() };
    assert_eq!(report.series_key(), "GOOG");
}

#[test]
fn report_details_decodes_nested_risk_metrics() {
    let details: ReportDetails = serde_json::from_value(serde_json::json!({
        "stock": "AAPL",
        "dates": ["2024-01-01", "2024-01-02"],
        "prices": [150.0, "$151.25"],
        "predicted_close": 152.0,
        "forecast_error": 0.5,
        "risk_metrics": {"risk_class": 2, "overall_risk": "Low Risk", "detailed_explanation": "Stable."},
        "model_performance": {"LSTM_MSE": 0.035, "XGBoost_accuracy": "75%"}
    }))
    .unwrap();
    assert_eq!(details.prices, vec![150.0, 151.25]);
    assert_eq!(details.risk_metrics.risk_class, 2);
    assert_eq!(details.model_performance.len(), 2);
    assert_eq!(details.series().stock, "AAPL");
}
