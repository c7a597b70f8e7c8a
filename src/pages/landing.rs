//! Public landing page with the quote ticker.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::ticker::Ticker;
use crate::net::api::ApiClient;
use crate::net::types::Stock;
use crate::state::view::{mount_lifetime, spawn_guarded};

#[component]
pub fn LandingPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let stocks = RwSignal::new(Vec::<Stock>::new());
    let lifetime = mount_lifetime();

    // Live quotes are optional here; the ticker keeps its sample quotes on failure.
    spawn_guarded(
        lifetime.slot().begin(),
        async move { api.stocks().await },
        move |result| match result {
            Ok(list) => stocks.set(list),
            Err(e) => log::debug!("landing ticker keeps sample quotes: {e}"),
        },
    );

    view! {
        <div class="landing-page">
            <nav class="landing-page__nav">
                <A href="/login">"Login"</A>
                <A href="/register">"Register"</A>
            </nav>
            <section class="landing-page__hero">
                <h1>"Optimize Your Portfolio"</h1>
                <p>"Harness the power of AI and real-time data to make smarter investment decisions."</p>
                <a class="landing-page__cta" href="/register">"Get Started"</a>
            </section>
            <Ticker stocks=stocks/>
            <footer class="landing-page__footer">"Folio. All rights reserved."</footer>
        </div>
    }
}
