//! Modal that asks the backend for a portfolio recommendation and can buy it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from the portfolio tab. Reads and writes the `recommendations`
//! sub-state of `PortfolioState`; after a purchase run that bought
//! at least one row it calls `on_purchased` so the tab refetches holdings.

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::state::portfolio::{PortfolioState, PurchaseRun, buy_recommendations, fetch_recommendations};
use crate::state::view::{RequestSlot, spawn_guarded};
use crate::util::format::{money, percent};

#[component]
pub fn RecommendationModal(
    state: RwSignal<PortfolioState>,
    api: StoredValue<ApiClient>,
    /// Request slot for recommendation fetches.
    requests: RequestSlot,
    /// Request slot for "Buy Recommended" runs.
    purchases: RequestSlot,
    on_purchased: Callback<()>,
) -> impl IntoView {
    let form = move || state.with(|s| s.recommendations.clone());
    let busy = move || state.with(|s| s.recommendations.busy);

    let on_fetch = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy() {
            return;
        }
        let snapshot = form();
        if let Err(err) = snapshot.request() {
            state.update(|s| s.recommendations.message = Some(err.to_string()));
            return;
        }
        state.update(|s| {
            s.recommendations.busy = true;
            s.recommendations.message = None;
        });
        let api = api.get_value();
        spawn_guarded(
            requests.begin(),
            async move { fetch_recommendations(&api, &snapshot).await },
            move |result| state.update(|s| s.recommendations.apply_recommendations(result)),
        );
    };

    let on_buy = move |_| {
        if busy() {
            return;
        }
        let rows = state.with(|s| s.recommendations.purchasable());
        state.update(|s| s.recommendations.busy = true);
        let api = api.get_value();
        spawn_guarded(
            purchases.begin(),
            async move { buy_recommendations(&api, &rows).await },
            move |run: PurchaseRun| {
                let changed = run.changed_holdings();
                state.update(|s| s.recommendations.apply_purchase(run));
                if changed {
                    on_purchased.run(());
                }
            },
        );
    };

    let on_close = move |_| state.update(|s| s.recommendations.close());

    view! {
        <Show when=move || state.with(|s| s.recommendations.open)>
            <div class="modal-backdrop">
                <div class="modal recommendation-modal" role="dialog" aria-label="Portfolio recommendations">
                    <h3>"Get Recommendations"</h3>
                    <form class="recommendation-modal__form" on:submit=on_fetch.clone()>
                        <label>
                            "Budget ($)"
                            <input
                                type="number"
                                min="0"
                                prop:value=move || form().budget
                                on:input=move |ev| {
                                    state.update(|s| s.recommendations.budget = event_target_value(&ev));
                                }
                            />
                        </label>
                        <label>
                            "Risk level (1-5)"
                            <select
                                prop:value=move || form().risk_level
                                on:change=move |ev| {
                                    state.update(|s| s.recommendations.risk_level = event_target_value(&ev));
                                }
                            >
                                {(1..=5).map(|level| view! { <option value=level.to_string()>{level}</option> }).collect_view()}
                            </select>
                        </label>
                        <button type="submit" disabled=busy>"Recommend"</button>
                    </form>

                    {move || form().message.map(|m| view! { <p class="recommendation-modal__message">{m}</p> })}

                    {move || {
                        form()
                            .result
                            .filter(|r| !r.recommended_portfolio.is_empty())
                            .map(|r| {
                                view! {
                                    <table class="recommendation-modal__table">
                                        <thead>
                                            <tr>
                                                <th>"Ticker"</th>
                                                <th>"Company"</th>
                                                <th>"Risk"</th>
                                                <th>"Price"</th>
                                                <th>"Quantity"</th>
                                                <th>"Allocation"</th>
                                                <th>"Predicted"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {r
                                                .recommended_portfolio
                                                .iter()
                                                .map(|row| {
                                                    view! {
                                                        <tr>
                                                            <td>{row.ticker.clone()}</td>
                                                            <td>{row.company_name.clone().unwrap_or_default()}</td>
                                                            <td>{row.risk_class}</td>
                                                            <td>{money(row.current_price)}</td>
                                                            <td>{row.recommended_quantity}</td>
                                                            <td>{money(row.total_allocation)}</td>
                                                            <td>{row.predicted_percent.map(percent).unwrap_or_else(|| "N/A".to_owned())}</td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                    <p class="recommendation-modal__totals">
                                        {format!("Total cost: {} | Remaining: {}", money(r.total_cost), money(r.remaining_budget))}
                                    </p>
                                }
                            })
                    }}

                    <div class="modal__actions">
                        <button
                            type="button"
                            disabled=move || busy() || form().purchasable().is_empty()
                            on:click=on_buy.clone()
                        >
                            "Buy Recommended"
                        </button>
                        <button type="button" on:click=on_close>"Close"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
