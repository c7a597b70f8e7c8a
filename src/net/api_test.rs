use futures::executor::block_on;

use super::*;
use crate::net::transport::mock::MockTransport;

fn client_with(mock: MockTransport) -> (ApiClient, std::sync::Arc<MockTransport>) {
    mock.into_client()
}

#[test]
fn base_url_trailing_slash_is_normalized() {
    let config = ClientConfig::new("http://api.test/").unwrap();
    let client = ApiClient::new(&config, Session::default());
    assert_eq!(client.base_url(), "http://api.test");
    assert_eq!(client.request(Method::Get, "/api/stocks").url, "http://api.test/api/stocks");
}

#[test]
fn requests_use_base_url_and_credentials() {
    let (client, mock) = client_with(MockTransport::new().respond(200, serde_json::json!([])));
    let stocks = block_on(client.stocks()).unwrap();
    assert!(stocks.is_empty());

    let sent = mock.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "http://api.test/api/stocks");
    assert!(sent[0].with_credentials);
    assert_eq!(sent[0].header_value("authorization"), None);
}

#[test]
fn session_token_is_sent_as_bearer_header() {
    let (client, mock) = client_with(MockTransport::new().respond(200, serde_json::json!({"user": {"username": "bo"}})));
    client.session().set_token("abc123");
    block_on(client.profile()).unwrap();
    assert_eq!(mock.requests()[0].header_value("Authorization"), Some("Bearer abc123"));
}

#[test]
fn login_posts_json_and_stores_issued_token() {
    let (client, mock) = client_with(MockTransport::new().respond(
        200,
        serde_json::json!({"message": "Login successful", "token": "t-1"}),
    ));
    let resp = block_on(client.login("a@example.com", "pw")).unwrap();
    assert_eq!(resp.message.as_deref(), Some("Login successful"));
    assert_eq!(client.session().token().as_deref(), Some("t-1"));

    let sent = &mock.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.header_value("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, serde_json::json!({"email": "a@example.com", "password": "pw"}));
}

#[test]
fn logout_clears_session_even_on_failure() {
    let (client, _mock) = client_with(MockTransport::new().respond(500, serde_json::json!({})));
    client.session().set_token("old");
    let result = block_on(client.logout());
    assert!(result.is_err());
    assert_eq!(client.session().token(), None);
}

#[test]
fn non_2xx_error_body_becomes_server_error() {
    let (client, _mock) = client_with(MockTransport::new().respond(401, serde_json::json!({"error": "Not logged in"})));
    let err = block_on(client.profile()).unwrap_err();
    assert_eq!(err, ApiError::Server { status: 401, message: "Not logged in".to_owned() });
    assert!(err.is_unauthorized());
}

#[test]
fn embedded_error_in_2xx_body_is_surfaced() {
    let (client, _mock) = client_with(
        MockTransport::new().respond(200, serde_json::json!({"error": "No historical data found for this ticker."})),
    );
    let err = block_on(client.forecast("ZZZ")).unwrap_err();
    assert_eq!(err.to_string(), "No historical data found for this ticker.");
}

#[test]
fn transport_failure_is_passed_through() {
    let (client, _mock) = client_with(MockTransport::new().fail(ApiError::Network("offline".to_owned())));
    let err = block_on(client.account()).unwrap_err();
    assert_eq!(err, ApiError::Network("offline".to_owned()));
}

#[test]
fn schema_mismatch_becomes_decode_error() {
    let (client, _mock) = client_with(MockTransport::new().respond(200, serde_json::json!({"unexpected": true})));
    let err = block_on(client.stocks()).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn dynamic_risk_encodes_ticker_query() {
    let (client, mock) = client_with(MockTransport::new().respond(
        200,
        serde_json::json!({"risk_class": 3, "overall_risk": "Moderate", "detailed_explanation": "ok"}),
    ));
    let risk = block_on(client.dynamic_risk("BRK B")).unwrap();
    assert_eq!(risk.risk_class, 3);
    assert_eq!(mock.requests()[0].url, "http://api.test/api/model/dynamicRisk?ticker=BRK%20B");
}

#[test]
fn subscription_uses_put_with_action() {
    let (client, mock) = client_with(
        MockTransport::new().respond(200, serde_json::json!({"message": "Subscription activated", "subscriptionStatus": true})),
    );
    let resp = block_on(client.set_subscription(SubscriptionAction::Activate)).unwrap();
    assert!(resp.active);
    let sent = &mock.requests()[0];
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.body.as_deref(), Some(r#"{"action":"activate"}"#));
}

#[test]
fn reset_password_puts_token_in_path() {
    let (client, mock) = client_with(MockTransport::new().respond(200, serde_json::json!({"message": "Password reset"})));
    block_on(client.reset_password("tok/1", "newpw")).unwrap();
    assert_eq!(mock.requests()[0].url, "http://api.test/api/reset/tok%2F1");
}

#[test]
fn empty_2xx_body_decodes_as_null() {
    let response = HttpResponse { status: 204, body: String::new() };
    let decoded: Option<MessageResponse> = decode_response(&response).unwrap();
    assert_eq!(decoded, None);
}

#[test]
fn with_query_skips_blank_values() {
    let pairs = [("dateRange", "week".to_owned()), ("minPrice", String::new()), ("maxPrice", " 50 ".to_owned())];
    assert_eq!(with_query("/api/transactions", &pairs), "/api/transactions?dateRange=week&maxPrice=50");
    assert_eq!(with_query("/api/transactions", &[]), "/api/transactions");
}

#[test]
fn report_query_pairs_carry_only_set_filters() {
    let query = ReportQuery { search: Some("app".to_owned()), max_risk: Some(3), ..ReportQuery::default() };
    assert_eq!(with_query("/api/reports", &report_query_pairs(&query)), "/api/reports?search=app&maxRisk=3");
}
