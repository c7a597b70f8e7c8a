use futures::executor::block_on;

use super::*;
use crate::net::transport::mock::MockTransport;

fn loaded(balance: f64, active: bool) -> AccountState {
    let mut state = AccountState::default();
    state.account.succeed(
        serde_json::from_value(serde_json::json!({
            "user": {"username": "alice", "email": "a@example.com", "balance": balance},
            "profit": 0,
            "subscriptionStatus": active,
            "notificationPreferences": {"email": true, "sms": false}
        }))
        .unwrap(),
    );
    state
}

#[test]
fn deposit_requires_positive_amount() {
    let mut state = loaded(100.0, false);
    for raw in ["", "0", "-5", "lots"] {
        state.deposit_input = raw.to_owned();
        assert_eq!(state.deposit_amount().unwrap_err().to_string(), INVALID_DEPOSIT);
    }
    state.deposit_input = "25".to_owned();
    assert_eq!(state.deposit_amount().unwrap(), 25.0);
}

#[test]
fn deposit_updates_balance_and_clears_input() {
    let (api, mock) = MockTransport::new()
        .respond(200, serde_json::json!({"message": "Deposit successful", "newBalance": 125.0}))
        .into_client();
    let mut state = loaded(100.0, false);
    state.deposit_input = "25".to_owned();
    let amount = state.deposit_amount().unwrap();
    state.apply_deposit(block_on(api.deposit(amount)));

    assert_eq!(state.account.data.as_ref().unwrap().user.balance, Some(125.0));
    assert!(state.deposit_input.is_empty());
    assert_eq!(state.message.as_deref(), Some("Deposit successful"));
    assert_eq!(mock.requests()[0].body.as_deref(), Some(r#"{"amount":25.0}"#));
}

#[test]
fn subscription_toggle_sends_opposite_action() {
    let (api, mock) = MockTransport::new()
        .respond(200, serde_json::json!({"message": "Subscription deactivated", "subscriptionStatus": false}))
        .into_client();
    let mut state = loaded(0.0, true);
    assert_eq!(state.subscription_label(), "Active");
    assert_eq!(state.subscription_action(), SubscriptionAction::Deactivate);

    state.apply_subscription(block_on(api.set_subscription(state.subscription_action())));
    assert_eq!(state.subscription_label(), "Inactive");
    assert_eq!(mock.requests()[0].body.as_deref(), Some(r#"{"action":"deactivate"}"#));
}

#[test]
fn notification_toggle_is_optimistic() {
    let mut state = loaded(0.0, false);
    let (updated, previous) = state.toggle_notification(NotificationChannel::Sms);
    assert_eq!(updated, NotificationPreferences { email: true, sms: true });
    assert_eq!(previous, NotificationPreferences { email: true, sms: false });
    assert_eq!(state.preferences(), updated);

    state.apply_notifications(Ok(NotificationResponse { message: "ok".to_owned(), preferences: updated }), previous);
    assert_eq!(state.preferences(), updated);
}

#[test]
fn rejected_notification_change_rolls_back() {
    let (api, _mock) = MockTransport::new().respond(500, serde_json::json!({"error": "Database error"})).into_client();
    let mut state = loaded(0.0, false);
    let (updated, previous) = state.toggle_notification(NotificationChannel::Email);
    assert!(!state.preferences().email);

    state.apply_notifications(block_on(api.update_notifications(updated)), previous);
    assert!(state.preferences().email);
    assert_eq!(state.message.as_deref(), Some("Database error"));
}

#[test]
fn account_fetch_failure_is_error_state() {
    let (api, _mock) = MockTransport::new().respond(401, serde_json::json!({"error": "Not logged in"})).into_client();
    let mut state = AccountState::default();
    state.account.apply(block_on(api.account()));
    assert_eq!(state.account.error.as_deref(), Some("Not logged in"));
    assert!(!state.subscription_active());
}
