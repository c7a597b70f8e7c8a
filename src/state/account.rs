//! Account tab: balance, deposit, subscription, and notification toggles.
//!
//! DESIGN
//! ======
//! Notification toggles update the UI optimistically and roll back if the
//! server rejects the change. Deposits and subscription changes wait for the
//! server and apply what it reports.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use super::view::Loadable;
use crate::net::error::ApiError;
use crate::net::types::{
    AccountSummary, DepositResponse, NotificationPreferences, NotificationResponse, SubscriptionAction,
    SubscriptionResponse,
};
use crate::util::format::parse_positive_amount;

pub const INVALID_DEPOSIT: &str = "Please enter a valid deposit amount.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationChannel {
    Email,
    Sms,
}

#[derive(Clone, Debug, Default)]
pub struct AccountState {
    pub account: Loadable<AccountSummary>,
    pub deposit_input: String,
    pub message: Option<String>,
}

impl AccountState {
    #[must_use]
    pub fn subscription_active(&self) -> bool {
        self.account.data.as_ref().is_some_and(|a| a.subscription_active)
    }

    #[must_use]
    pub fn subscription_label(&self) -> &'static str {
        if self.subscription_active() { "Active" } else { "Inactive" }
    }

    /// Action the toggle button performs.
    #[must_use]
    pub fn subscription_action(&self) -> SubscriptionAction {
        SubscriptionAction::toggle_from(self.subscription_active())
    }

    #[must_use]
    pub fn preferences(&self) -> NotificationPreferences {
        self.account.data.as_ref().map(|a| a.notification_preferences).unwrap_or_default()
    }

    /// Parsed deposit amount.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] unless the input is a positive number.
    pub fn deposit_amount(&self) -> Result<f64, ApiError> {
        parse_positive_amount(&self.deposit_input).ok_or_else(|| ApiError::validation(INVALID_DEPOSIT))
    }

    pub fn apply_deposit(&mut self, result: Result<DepositResponse, ApiError>) {
        match result {
            Ok(resp) => {
                if let Some(account) = self.account.data.as_mut() {
                    account.user.balance = Some(resp.new_balance);
                }
                self.deposit_input.clear();
                self.message = Some(resp.message);
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    pub fn apply_subscription(&mut self, result: Result<SubscriptionResponse, ApiError>) {
        match result {
            Ok(resp) => {
                if let Some(account) = self.account.data.as_mut() {
                    account.subscription_active = resp.active;
                }
                self.message = Some(resp.message);
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Flip one channel locally and return the full preference set to send,
    /// plus the previous set for rollback.
    pub fn toggle_notification(
        &mut self,
        channel: NotificationChannel,
    ) -> (NotificationPreferences, NotificationPreferences) {
        let previous = self.preferences();
        let mut updated = previous;
        match channel {
            NotificationChannel::Email => updated.email = !updated.email,
            NotificationChannel::Sms => updated.sms = !updated.sms,
        }
        self.set_preferences(updated);
        (updated, previous)
    }

    pub fn apply_notifications(
        &mut self,
        result: Result<NotificationResponse, ApiError>,
        previous: NotificationPreferences,
    ) {
        if let Err(err) = result {
            self.set_preferences(previous);
            self.message = Some(err.to_string());
        }
    }

    fn set_preferences(&mut self, preferences: NotificationPreferences) {
        if let Some(account) = self.account.data.as_mut() {
            account.notification_preferences = preferences;
        }
    }
}
