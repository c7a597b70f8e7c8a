//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. `profile` is the only routed page with children: it
//! hosts the `portfolio`, `reports`, `transactions`, `market_data`, and
//! `account` tabs.

pub mod account;
pub mod landing;
pub mod login;
pub mod market_data;
pub mod portfolio;
pub mod profile;
pub mod recover;
pub mod register;
pub mod reports;
pub mod reset_password;
pub mod transactions;
