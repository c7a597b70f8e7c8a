//! Market-data tab: searchable stock list and the selected stock's panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stocks load once on mount. The detail panel triggers model calls
//! (forecast, risk) and the purchase. Each of those has its own request slot,
//! and changing the selection cancels the slots so a late response for the
//! previous stock never lands on the new one.

use leptos::prelude::*;

use crate::components::status_message::StatusMessage;
use crate::net::api::ApiClient;
use crate::net::types::Stock;
use crate::state::market::{MarketState, submit_purchase};
use crate::state::view::{ViewPhase, mount_lifetime, spawn_guarded};
use crate::util::format::{count, decimal_or_na, money, money_or_na};

#[component]
pub fn MarketDataPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let state = RwSignal::new(MarketState::default());
    let lifetime = mount_lifetime();
    let risk_slot = lifetime.slot();
    let forecast_slot = lifetime.slot();
    let purchase_slot = lifetime.slot();

    let client = api.get_value();
    spawn_guarded(
        lifetime.slot().begin(),
        async move { client.stocks().await },
        move |result| state.update(|s| s.stocks.apply(result)),
    );

    let select = {
        let (risk_slot, forecast_slot, purchase_slot) = (risk_slot.clone(), forecast_slot.clone(), purchase_slot.clone());
        move |stock: Stock| {
            risk_slot.cancel();
            forecast_slot.cancel();
            purchase_slot.cancel();
            state.update(|s| s.select(stock));
        }
    };

    let on_forecast = move |_| {
        let Some(ticker) = state.with(|s| s.selected.as_ref().map(|st| st.ticker.clone())) else {
            return;
        };
        let api = api.get_value();
        spawn_guarded(
            forecast_slot.begin(),
            async move { api.forecast(&ticker).await },
            move |result| state.update(|s| s.apply_forecast(result)),
        );
    };

    let on_risk = move |_| {
        let Some(ticker) = state.with(|s| s.selected.as_ref().map(|st| st.ticker.clone())) else {
            return;
        };
        let api = api.get_value();
        spawn_guarded(
            risk_slot.begin(),
            async move { api.dynamic_risk(&ticker).await },
            move |result| state.update(|s| s.apply_risk(result)),
        );
    };

    let on_purchase = move |_| {
        // Gates are checked synchronously so a rejected form never reaches the network.
        if let Err(e) = state.with(MarketState::purchase_request) {
            state.update(|s| s.purchase_message = Some(e.to_string()));
            return;
        }
        let snapshot = state.get_untracked();
        let api = api.get_value();
        spawn_guarded(
            purchase_slot.begin(),
            async move { submit_purchase(&api, &snapshot).await },
            move |result| state.update(|s| s.apply_purchase(result)),
        );
    };

    let visible = Memo::new(move |_| state.with(MarketState::visible_stocks));
    let list = move || {
        visible
            .get()
            .into_iter()
            .map(|stock| {
                let ticker = stock.ticker.clone();
                let is_selected = move || state.with(|s| s.is_selected(&ticker));
                let select = select.clone();
                let row = stock.clone();
                view! {
                    <div class="stock-item" class:stock-item--selected=is_selected on:click=move |_| select(row.clone())>
                        <h2>{stock.ticker.clone()}</h2>
                        <p>{format!("Company: {}", stock.company_name.clone().unwrap_or_default())}</p>
                        <p>{format!("Price: {}", money(stock.close))}</p>
                        <p>{format!("Volume: {}", count(stock.volume))}</p>
                        <p>{format!("Sector: {}", stock.sector.clone().unwrap_or_default())}</p>
                        <p>{format!("Market Cap: {}", money_or_na(stock.market_cap))}</p>
                    </div>
                }
            })
            .collect_view()
    };

    let selected = Memo::new(move |_| state.with(|s| s.selected.clone()));
    let details = move || {
        selected.get().map(|stock| {
            view! {
                <div class="stock-details">
                    <h2>{format!("Details for {}", stock.ticker)}</h2>
                    <p>{format!("Company: {}", stock.company_name.clone().unwrap_or_default())}</p>
                    <p>{format!("Latest Price: {}", money(stock.close))}</p>
                    <p>{format!("Volume: {}", count(stock.volume))}</p>
                    <p>{format!("Sector: {}", stock.sector.clone().unwrap_or_default())}</p>
                    <p>{format!("Market Cap: {}", money_or_na(stock.market_cap))}</p>
                    <p>{format!("MA20: {}", decimal_or_na(stock.ma20))}</p>
                    <p>{format!("Vol20: {}", decimal_or_na(stock.vol20))}</p>
                    <div class="stock-details__actions">
                        <button type="button" on:click=on_forecast.clone()>"Forecast Price Change"</button>
                        <button type="button" class="big-button" on:click=on_risk.clone()>
                            "Show Detailed Risk Assessment"
                        </button>
                    </div>
                    {move || {
                        state.with(|s| s.forecast.clone()).map(|text| {
                            view! {
                                <div class="model-panel">
                                    <h3>"Forecast Result"</h3>
                                    <pre>{text}</pre>
                                </div>
                            }
                        })
                    }}
                    {move || {
                        state.with(MarketState::risk_text).map(|text| {
                            view! {
                                <div class="model-panel">
                                    <h3>"Risk Assessment"</h3>
                                    <pre>{text}</pre>
                                </div>
                            }
                        })
                    }}
                    <div class="purchase-section">
                        <h3>{format!("Purchase {}", stock.ticker)}</h3>
                        <input
                            type="number"
                            placeholder="Quantity"
                            prop:value=move || state.with(|s| s.quantity.clone())
                            on:input=move |ev| state.update(|s| s.quantity = event_target_value(&ev))
                        />
                        <button type="button" on:click=on_purchase.clone()>"Purchase"</button>
                        {move || {
                            state
                                .with(|s| s.purchase_message.clone())
                                .map(|m| view! { <p class="purchase-message">{m}</p> })
                        }}
                    </div>
                </div>
            }
        })
    };

    view! {
        <div class="market-data-page">
            <h1>"Market Data"</h1>
            <input
                class="search-bar"
                type="text"
                placeholder="Search by ticker or company name"
                prop:value=move || state.with(|s| s.query.clone())
                on:input=move |ev| state.update(|s| s.query = event_target_value(&ev))
            />
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.stocks.error.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.stocks.dismiss_error()))
            />
            {move || {
                (state.with(|s| s.stocks.phase()) == ViewPhase::Loading)
                    .then(|| view! { <p class="loading">"Loading stocks..."</p> })
            }}
            <div class="stock-list">{list}</div>
            {details}
        </div>
    }
}
