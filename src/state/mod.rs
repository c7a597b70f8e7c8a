//! Page view-state and the controllers that feed it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each tab page keeps one `RwSignal<...State>` built from these plain
//! structs. Requests go through `ApiClient`; their results are folded in by
//! the `apply_*` methods so the same transitions run in tests without a
//! browser.

pub mod account;
pub mod auth;
pub mod market;
pub mod portfolio;
pub mod profile;
pub mod reports;
pub mod transactions;
pub mod view;
