//! Utility helpers shared across pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure data shaping (filters, chart geometry, formatting) lives here so it
//! is testable on the host.

pub mod chart;
pub mod filter;
pub mod format;
