//! Client-side search and filtering over fetched lists.
//!
//! DESIGN
//! ======
//! Every function here is pure and idempotent: filtering an already filtered
//! list with the same inputs returns it unchanged. Pages re-run them from
//! memos whenever the list or an input changes.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};

use crate::net::types::{ReportSummary, Stock, Transaction};

/// Transaction timestamps as the backend formats them.
pub const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Case-insensitive substring match against any of `fields`.
///
/// The query is used as typed, surrounding whitespace included. Only the
/// empty query matches everything.
#[must_use]
pub fn matches_query(query: &str, fields: &[Option<&str>]) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().flatten().any(|field| field.to_lowercase().contains(&needle))
}

/// Stocks whose ticker or company name contains `query`.
#[must_use]
pub fn filter_stocks(stocks: &[Stock], query: &str) -> Vec<Stock> {
    stocks
        .iter()
        .filter(|s| matches_query(query, &[Some(s.ticker.as_str()), s.company_name.as_deref()]))
        .cloned()
        .collect()
}

/// Reports whose name or summary contains `query`.
#[must_use]
pub fn filter_reports(reports: &[ReportSummary], query: &str) -> Vec<ReportSummary> {
    reports
        .iter()
        .filter(|r| matches_query(query, &[Some(r.name.as_str()), Some(r.summary.as_str())]))
        .cloned()
        .collect()
}

// =============================================================
// Transactions
// =============================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl DateRange {
    pub const ALL: [Self; 4] = [Self::All, Self::Week, Self::Month, Self::Year];

    /// Value used in `<select>` options and the `dateRange` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Week => "Last Week",
            Self::Month => "Last Month",
            Self::Year => "Last Year",
        }
    }

    /// Unknown values mean no date filter.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::All,
        }
    }

    /// Oldest timestamp still inside the range, or `None` for `All`.
    #[must_use]
    pub fn cutoff(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::All => None,
            Self::Week => now.checked_sub_days(Days::new(7)),
            Self::Month => now.checked_sub_months(Months::new(1)),
            Self::Year => now.checked_sub_months(Months::new(12)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            _ => None,
        }
    }

    /// Zero change matches neither direction.
    #[must_use]
    pub fn matches(self, percent_change: f64) -> bool {
        match self {
            Self::Increase => percent_change > 0.0,
            Self::Decrease => percent_change < 0.0,
        }
    }
}

/// Transaction filter inputs, kept as typed text so the form round-trips.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    pub date_range: DateRange,
    pub min_price: String,
    pub max_price: String,
    pub direction: Option<Direction>,
}

impl TransactionFilters {
    /// Query parameters for `GET /api/transactions`. Blank values are skipped
    /// by the request builder.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("dateRange", self.date_range.as_str().to_owned()),
            ("minPrice", self.min_price.trim().to_owned()),
            ("maxPrice", self.max_price.trim().to_owned()),
            ("percentChange", self.direction.map(|d| d.as_str().to_owned()).unwrap_or_default()),
        ]
    }

    #[must_use]
    pub fn matches(&self, txn: &Transaction, now: NaiveDateTime) -> bool {
        if let Some(cutoff) = self.date_range.cutoff(now) {
            match parse_transaction_date(&txn.date) {
                Some(when) if when >= cutoff => {}
                _ => return false,
            }
        }
        if let Some(min) = parse_bound(&self.min_price)
            && txn.total_price < min
        {
            return false;
        }
        if let Some(max) = parse_bound(&self.max_price)
            && txn.total_price > max
        {
            return false;
        }
        self.direction.is_none_or(|d| d.matches(txn.percent_change))
    }
}

/// Apply all transaction filters. Price bounds are inclusive.
#[must_use]
pub fn filter_transactions(
    transactions: &[Transaction],
    filters: &TransactionFilters,
    now: NaiveDateTime,
) -> Vec<Transaction> {
    transactions.iter().filter(|t| filters.matches(t, now)).cloned().collect()
}

/// Blank or non-numeric bounds are ignored.
fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse `YYYY-MM-DD HH:MM:SS`, or a bare date at midnight.
#[must_use]
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TRANSACTION_DATE_FORMAT)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
}
