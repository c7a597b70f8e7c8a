//! Profile shell: signed-in user plus the active tab.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use super::auth::{Session, display_name};
use super::view::Loadable;
use crate::net::error::ApiError;
use crate::net::types::User;

/// Tab pages hosted by the profile screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Portfolio,
    Reports,
    Transactions,
    MarketData,
    Account,
}

impl ProfileTab {
    /// Sidebar order.
    pub const ALL: [Self; 5] = [Self::Portfolio, Self::Reports, Self::Transactions, Self::MarketData, Self::Account];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Portfolio => "Portfolio",
            Self::Reports => "Reports",
            Self::Transactions => "Transactions",
            Self::MarketData => "Market Data",
            Self::Account => "Account",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProfileState {
    pub user: Loadable<User>,
    pub tab: ProfileTab,
}

impl ProfileState {
    /// `Welcome, <username>`, falling back to `User` until the profile loads.
    #[must_use]
    pub fn welcome_heading(&self) -> String {
        format!("Welcome, {}", display_name(self.user.data.as_ref()))
    }

    /// Record a profile fetch. A 401 also drops the stale session.
    pub fn apply_profile(&mut self, result: Result<User, ApiError>, session: &Session) {
        if let Err(err) = &result
            && err.is_unauthorized()
        {
            session.clear();
        }
        self.user.apply(result);
    }
}
