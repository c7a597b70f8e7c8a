//! # folio
//!
//! Leptos + WASM front-end for the portfolio and stock-trading backend.
//!
//! Every screen is a thin view over the backend's REST API: `net` issues the
//! requests, `state` holds each page's fetched data and form inputs, `util`
//! has the pure filtering, chart, and formatting helpers, and `pages` and
//! `components` render it all. The `ssr` feature adds the Axum host in
//! `server`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
#[cfg(feature = "ssr")]
pub mod server;
pub mod state;
pub mod util;

/// Browser entry point called by the generated JS glue.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
