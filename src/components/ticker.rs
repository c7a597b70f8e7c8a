//! Scrolling quote strip on the landing page.
//!
//! Shows a fixed set of sample quotes until live closes from `/api/stocks`
//! arrive, then switches to those.

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use leptos::prelude::*;

use crate::net::types::Stock;
use crate::util::format::money;

/// Sample quotes shown before (or instead of) live data.
pub const DEFAULT_QUOTES: [(&str, f64, Trend); 4] = [
    ("AAPL", 145.60, Trend::Up),
    ("TSLA", 1004.30, Trend::Down),
    ("AMZN", 3200.10, Trend::Up),
    ("MSFT", 305.20, Trend::Up),
];

/// Live quotes shown at most.
pub const MAX_LIVE_QUOTES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn arrow(self) -> &'static str {
        match self {
            Self::Up => " ↑",
            Self::Down => " ↓",
            Self::Flat => "",
        }
    }

    /// Direction of the close relative to its 20-day average.
    #[must_use]
    pub fn of(stock: &Stock) -> Self {
        match stock.ma20 {
            Some(ma) if stock.close > ma => Self::Up,
            Some(ma) if stock.close < ma => Self::Down,
            _ => Self::Flat,
        }
    }
}

fn quote(ticker: &str, price: f64, trend: Trend) -> String {
    format!("{ticker}: {}{}", money(price), trend.arrow())
}

/// Text of the strip: live closes when available, sample quotes otherwise.
#[must_use]
pub fn ticker_line(stocks: &[Stock]) -> String {
    let quotes: Vec<String> = if stocks.is_empty() {
        DEFAULT_QUOTES.iter().map(|(t, p, trend)| quote(t, *p, *trend)).collect()
    } else {
        stocks.iter().take(MAX_LIVE_QUOTES).map(|s| quote(&s.ticker, s.close, Trend::of(s))).collect()
    };
    quotes.join(" | ")
}

#[component]
pub fn Ticker(#[prop(into)] stocks: Signal<Vec<Stock>>) -> impl IntoView {
    view! {
        <div class="ticker">
            <p class="ticker__text">{move || stocks.with(|list| ticker_line(list))}</p>
        </div>
    }
}
