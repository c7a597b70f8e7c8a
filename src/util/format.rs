//! Display formatting and numeric input coercion.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `$1,234.56`, with a leading minus for losses.
#[must_use]
pub fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Money, or `N/A` when the server omitted the value.
#[must_use]
pub fn money_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), money)
}

#[must_use]
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Whole-number count with thousands separators (volumes, market caps).
#[must_use]
pub fn count(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&format!("{:.0}", value.abs())))
}

/// Fixed two decimals, or `N/A`.
#[must_use]
pub fn decimal_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.2}"))
}

/// Share quantities print without a fractional part when whole.
#[must_use]
pub fn quantity(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON { format!("{value:.0}") } else { format!("{value}") }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// CSS modifier for profit/loss cells. Zero counts as a gain.
#[must_use]
pub fn pnl_class(value: f64) -> &'static str {
    if value >= 0.0 { "pnl pnl--gain" } else { "pnl pnl--loss" }
}

/// A finite number strictly greater than zero.
#[must_use]
pub fn parse_positive_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

/// A risk level between 1 and 5.
#[must_use]
pub fn parse_risk_level(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|level| (1..=5).contains(level))
}
