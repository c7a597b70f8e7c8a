//! Reusable view components shared across pages.

pub mod holdings_table;
pub mod line_chart;
pub mod recommendation_modal;
pub mod risk_gauge;
pub mod status_message;
pub mod ticker;
