//! Networking modules for the trading backend's REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` exposes one method per backend endpoint, `transport` performs the
//! actual HTTP exchange, `error` normalizes every failure into one shape, and
//! `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod transport;
pub mod types;
