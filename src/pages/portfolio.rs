//! Portfolio tab: holdings, constraints, rebalancing, and recommendations.

use leptos::prelude::*;

use crate::components::holdings_table::HoldingsTable;
use crate::components::recommendation_modal::RecommendationModal;
use crate::components::status_message::{StatusMessage, Tone};
use crate::net::api::ApiClient;
use crate::state::portfolio::PortfolioState;
use crate::state::view::{RequestSlot, ViewPhase, mount_lifetime, spawn_guarded};
use crate::util::format::{money, pnl_class};

fn fetch_holdings(api: StoredValue<ApiClient>, slot: &RequestSlot, state: RwSignal<PortfolioState>) {
    state.update(|s| s.holdings.begin());
    let api = api.get_value();
    spawn_guarded(
        slot.begin(),
        async move { api.portfolio().await },
        move |result| state.update(|s| s.holdings.apply(result)),
    );
}

#[component]
pub fn PortfolioPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let state = RwSignal::new(PortfolioState::default());
    let lifetime = mount_lifetime();
    let holdings_slot = lifetime.slot();
    let constraints_slot = lifetime.slot();
    let rebalance_slot = lifetime.slot();

    fetch_holdings(api, &holdings_slot, state);
    let client = api.get_value();
    spawn_guarded(
        constraints_slot.begin(),
        async move { client.constraints().await },
        move |result| state.update(|s| s.apply_constraints(result)),
    );

    let on_save = move |_| {
        let constraints = match state.with(PortfolioState::constraints) {
            Ok(c) => c,
            Err(e) => {
                state.update(|s| s.message = Some(e.to_string()));
                return;
            }
        };
        let api = api.get_value();
        spawn_guarded(
            constraints_slot.begin(),
            async move { api.save_constraints(&constraints).await },
            move |result| state.update(|s| s.apply_saved(result)),
        );
    };

    let on_rebalance = move |_| {
        let constraints = match state.with(PortfolioState::constraints) {
            Ok(c) => c,
            Err(e) => {
                state.update(|s| s.message = Some(e.to_string()));
                return;
            }
        };
        let api = api.get_value();
        spawn_guarded(
            rebalance_slot.begin(),
            async move { api.rebalance(&constraints).await },
            move |result| state.update(|s| s.apply_rebalance(result)),
        );
    };

    let refetch_slot = holdings_slot.clone();
    let on_purchased = Callback::new(move |()| fetch_holdings(api, &refetch_slot, state));

    view! {
        <div class="portfolio-page">
            <h2>"Portfolio Management"</h2>
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.holdings.error.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.holdings.dismiss_error()))
            />
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.message.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.message = None))
                tone=Tone::Info
            />

            <section class="constraints">
                <h3>"Define Constraints"</h3>
                <label>
                    "Budget Limit ($):"
                    <input
                        type="number"
                        prop:value=move || state.with(|s| s.budget_input.clone())
                        on:input=move |ev| state.update(|s| s.budget_input = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Sector Limits (%):"
                    <input
                        type="text"
                        placeholder="Technology=30, Energy=20"
                        prop:value=move || state.with(|s| s.sectors_input.clone())
                        on:input=move |ev| state.update(|s| s.sectors_input = event_target_value(&ev))
                    />
                </label>
                <button type="button" on:click=on_save>"Save Constraints"</button>
                <button type="button" on:click=on_rebalance>"Rebalance Portfolio"</button>
                <button type="button" on:click=move |_| state.update(|s| s.recommendations.open = true)>
                    "Get Recommendations"
                </button>
            </section>

            <section class="portfolio-table">
                <h3>"Current Portfolio"</h3>
                {move || {
                    (state.with(|s| s.holdings.phase()) == ViewPhase::Loading)
                        .then(|| view! { <p class="loading">"Loading portfolio..."</p> })
                }}
                <HoldingsTable
                    holdings=Signal::derive(move || state.with(|s| s.holdings().to_vec()))
                    show_prediction=true
                />
                {move || {
                    state.with(|s| s.holdings.data.as_ref().and_then(|p| p.summary)).map(|summary| {
                        view! {
                            <p class="portfolio-summary">
                                {format!("Total value: {} | ", money(summary.total_value))}
                                <span class=pnl_class(summary.total_profit_loss)>
                                    {format!("Total P/L: {}", money(summary.total_profit_loss))}
                                </span>
                            </p>
                        }
                    })
                }}
            </section>

            <Show when=move || state.with(|s| !s.rebalanced.is_empty())>
                <section class="portfolio-table portfolio-table--rebalanced">
                    <h3>"Rebalanced Portfolio"</h3>
                    <HoldingsTable holdings=Signal::derive(move || state.with(|s| s.rebalanced.clone()))/>
                </section>
            </Show>

            <RecommendationModal state=state api=api requests=lifetime.slot() purchases=lifetime.slot() on_purchased=on_purchased/>
        </div>
    }
}
