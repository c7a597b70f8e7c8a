//! Transactions tab: filterable history table.
//!
//! Filters are edited as a draft and committed with "Apply Filters". A
//! committed change refetches with the filters as query parameters and the
//! same filters are applied again locally to whatever the server returns.

use leptos::prelude::*;

use crate::components::status_message::StatusMessage;
use crate::net::api::ApiClient;
use crate::state::transactions::TransactionsState;
use crate::state::view::{RequestSlot, ViewPhase, mount_lifetime, spawn_guarded};
use crate::util::filter::{DateRange, Direction};
use crate::util::format::{money, percent, pnl_class, quantity};

fn fetch_transactions(api: StoredValue<ApiClient>, slot: &RequestSlot, state: RwSignal<TransactionsState>) {
    let query = state.with_untracked(|s| s.applied.to_query_pairs());
    state.update(|s| s.transactions.begin());
    let api = api.get_value();
    spawn_guarded(
        slot.begin(),
        async move {
            let pairs: Vec<(&str, String)> = query.iter().map(|(k, v)| (*k, v.clone())).collect();
            api.transactions(&pairs).await.map(|resp| resp.transactions)
        },
        move |result| state.update(|s| s.transactions.apply(result)),
    );
}

#[component]
pub fn TransactionsPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let state = RwSignal::new(TransactionsState::default());
    let slot = mount_lifetime().slot();

    fetch_transactions(api, &slot, state);

    let on_apply = move |_| {
        if state.try_update(TransactionsState::apply_filters).unwrap_or(false) {
            fetch_transactions(api, &slot, state);
        }
    };

    let rows = move || {
        let now = chrono::Local::now().naive_local();
        state
            .with(|s| s.visible(now))
            .into_iter()
            .map(|txn| {
                view! {
                    <tr>
                        <td>{txn.symbol.clone()}</td>
                        <td>{txn.name.clone().unwrap_or_default()}</td>
                        <td>{txn.kind.clone().unwrap_or_default()}</td>
                        <td>{quantity(txn.quantity)}</td>
                        <td>{money(txn.total_price)}</td>
                        <td class=pnl_class(txn.percent_change)>{percent(txn.percent_change)}</td>
                        <td>{txn.date.clone()}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="transaction-page">
            <h1>"Transaction Dashboard"</h1>
            <div class="filters">
                <label>
                    "Date Range:"
                    <select
                        prop:value=move || state.with(|s| s.draft.date_range.as_str())
                        on:change=move |ev| {
                            state.update(|s| s.draft.date_range = DateRange::parse(&event_target_value(&ev)));
                        }
                    >
                        {DateRange::ALL
                            .into_iter()
                            .map(|range| view! { <option value=range.as_str()>{range.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Min Price:"
                    <input
                        type="number"
                        prop:value=move || state.with(|s| s.draft.min_price.clone())
                        on:input=move |ev| state.update(|s| s.draft.min_price = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Max Price:"
                    <input
                        type="number"
                        prop:value=move || state.with(|s| s.draft.max_price.clone())
                        on:input=move |ev| state.update(|s| s.draft.max_price = event_target_value(&ev))
                    />
                </label>
                <label>
                    "% Change:"
                    <select
                        prop:value=move || state.with(|s| s.draft.direction.map_or("", Direction::as_str))
                        on:change=move |ev| {
                            state.update(|s| s.draft.direction = Direction::parse(&event_target_value(&ev)));
                        }
                    >
                        <option value="">"All"</option>
                        <option value="increase">"Increase"</option>
                        <option value="decrease">"Decrease"</option>
                    </select>
                </label>
                <button type="button" on:click=on_apply>"Apply Filters"</button>
            </div>
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.transactions.error.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.transactions.dismiss_error()))
            />
            {move || {
                (state.with(|s| s.transactions.phase()) == ViewPhase::Loading)
                    .then(|| view! { <p class="loading">"Loading transactions..."</p> })
            }}
            <table class="transaction-table">
                <thead>
                    <tr>
                        <th>"Stock Symbol"</th>
                        <th>"Stock Name"</th>
                        <th>"Transaction Type"</th>
                        <th>"Quantity"</th>
                        <th>"Total Price"</th>
                        <th>"Profit/Loss (%)"</th>
                        <th>"Date"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}
