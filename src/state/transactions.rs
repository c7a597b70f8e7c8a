//! Transactions tab: history table with client-side filters.

#[cfg(test)]
#[path = "transactions_test.rs"]
mod transactions_test;

use chrono::NaiveDateTime;

use super::view::Loadable;
use crate::net::types::Transaction;
use crate::util::filter::{TransactionFilters, filter_transactions};

#[derive(Clone, Debug, Default)]
pub struct TransactionsState {
    pub transactions: Loadable<Vec<Transaction>>,
    /// Inputs as currently edited.
    pub draft: TransactionFilters,
    /// Filters last applied with the Apply button.
    pub applied: TransactionFilters,
}

impl TransactionsState {
    /// Commit the edited filters. Returns `true` when they changed, which
    /// means the list should be refetched with the new query.
    pub fn apply_filters(&mut self) -> bool {
        if self.draft == self.applied {
            return false;
        }
        self.applied = self.draft.clone();
        true
    }

    #[must_use]
    pub fn visible(&self, now: NaiveDateTime) -> Vec<Transaction> {
        self.transactions.data.as_deref().map(|list| filter_transactions(list, &self.applied, now)).unwrap_or_default()
    }
}
