//! Reports tab: report cards, performance graphs, and ticker details.

use leptos::prelude::*;

use crate::components::line_chart::LineChart;
use crate::components::risk_gauge::RiskGauge;
use crate::components::status_message::StatusMessage;
use crate::net::api::ApiClient;
use crate::net::types::{ReportQuery, ReportSummary};
use crate::state::reports::ReportsState;
use crate::state::view::{ViewPhase, mount_lifetime, spawn_guarded};
use crate::util::format::money_or_na;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let state = RwSignal::new(ReportsState::default());
    let lifetime = mount_lifetime();
    let graph_slot = lifetime.slot();
    let suggest_slot = lifetime.slot();
    let details_slot = lifetime.slot();

    let client = api.get_value();
    spawn_guarded(
        lifetime.slot().begin(),
        async move { client.reports(&ReportQuery::default()).await.map(|resp| resp.reports) },
        move |result| state.update(|s| s.reports.apply(result)),
    );

    let view_graph = move |report: ReportSummary| {
        let key = state.try_update(|s| s.open_graph(report)).unwrap_or_default();
        let api = api.get_value();
        spawn_guarded(
            graph_slot.begin(),
            async move { api.report_series(&key).await },
            move |result| state.update(|s| s.apply_series(result)),
        );
    };

    let suggest_cancel = suggest_slot.clone();
    let on_search_input = move |ev: leptos::ev::Event| {
        state.update(|s| s.search = event_target_value(&ev));
        let Some(query) = state.with_untracked(ReportsState::suggestion_query) else {
            suggest_slot.cancel();
            state.update(|s| s.suggestions.clear());
            return;
        };
        let api = api.get_value();
        spawn_guarded(
            suggest_slot.begin(),
            async move { api.stock_suggestions(&query).await },
            move |result| state.update(|s| s.apply_suggestions(result)),
        );
    };

    let open_details = move |ticker: String| {
        let Some(ticker) = state.try_update(|s| s.open_details(&ticker)).flatten() else {
            return;
        };
        suggest_cancel.cancel();
        let api = api.get_value();
        spawn_guarded(
            details_slot.begin(),
            async move { api.report_details(&ticker).await },
            move |result| state.update(|s| s.apply_details(result)),
        );
    };

    let on_search_submit = {
        let open_details = open_details.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            open_details(state.with_untracked(|s| s.search.clone()));
        }
    };

    let visible_reports = Memo::new(move |_| state.with(ReportsState::visible_reports));
    let graph_panel = Memo::new(move |_| state.with(|s| s.graph.clone()));
    let details_panel = Memo::new(move |_| state.with(|s| s.details.clone()));

    let cards = move || {
        visible_reports
            .get()
            .into_iter()
            .map(|report| {
                let view_graph = view_graph.clone();
                let target = report.clone();
                view! {
                    <div class="report-card">
                        <h2>{report.name.clone()}</h2>
                        <p>{report.summary.clone()}</p>
                        <button type="button" on:click=move |_| view_graph(target.clone())>"View Graph"</button>
                    </div>
                }
            })
            .collect_view()
    };

    let suggestions = move || {
        state
            .with(|s| s.suggestions.clone())
            .into_iter()
            .map(|suggestion| {
                let open_details = open_details.clone();
                let ticker = suggestion.ticker.clone();
                let label = match &suggestion.company_name {
                    Some(name) => format!("{} ({name})", suggestion.ticker),
                    None => suggestion.ticker.clone(),
                };
                view! {
                    <li class="report-search__suggestion" on:click=move |_| open_details(ticker.clone())>
                        {label}
                    </li>
                }
            })
            .collect_view()
    };

    let graph = move || {
        graph_panel.get().map(|graph| {
            let title = format!("{} - Performance Graph", graph.report.name);
            match graph.chart.phase() {
                ViewPhase::Loading => view! { <p class="loading">"Loading graph..."</p> }.into_any(),
                ViewPhase::Error => {
                    view! { <p class="error">{graph.chart.error.clone().unwrap_or_default()}</p> }.into_any()
                }
                ViewPhase::Loaded => {
                    let data = graph.chart.data.clone().unwrap_or_default();
                    view! {
                        <div class="graph-container">
                            <LineChart data=Signal::derive(move || data.clone()) title=title/>
                        </div>
                    }
                        .into_any()
                }
            }
        })
    };

    let details = move || {
        let panel = details_panel.get()?;
        Some(match panel.phase() {
            ViewPhase::Loading => view! { <p class="loading">"Loading details..."</p> }.into_any(),
            ViewPhase::Error => view! { <p class="error">{panel.error.clone().unwrap_or_default()}</p> }.into_any(),
            ViewPhase::Loaded => {
                let details = panel.data.clone()?;
                let rows = state.with_untracked(ReportsState::performance_rows);
                let chart = state.with_untracked(ReportsState::details_chart).unwrap_or_default();
                view! {
                    <div class="report-details">
                        <h2>{format!("{} Details", details.stock)}</h2>
                        <LineChart data=Signal::derive(move || chart.clone())/>
                        <p>{format!("Predicted close: {}", money_or_na(details.predicted_close))}</p>
                        <p>
                            {format!(
                                "Forecast error: {}",
                                details.forecast_error.map_or_else(|| "N/A".to_owned(), |e| format!("{e:.4}")),
                            )}
                        </p>
                        <h3>"Model Performance"</h3>
                        <table class="report-details__metrics">
                            <tbody>
                                {rows
                                    .into_iter()
                                    .map(|(name, value)| view! { <tr><td>{name}</td><td>{value}</td></tr> })
                                    .collect_view()}
                            </tbody>
                        </table>
                        <h3>"Risk Assessment"</h3>
                        <pre>{details.risk_metrics.summary()}</pre>
                        <RiskGauge
                            value=Signal::derive(move || state.with(|s| s.gauge_value().unwrap_or_default()))
                            threshold=Signal::derive(move || state.with(|s| s.threshold))
                            on_threshold=Callback::new(move |raw: String| state.update(|s| s.set_threshold(&raw)))
                        />
                    </div>
                }
                    .into_any()
            }
        })
    };

    view! {
        <div class="report-page">
            <h1>"Performance Reports"</h1>
            <form class="report-search" on:submit=on_search_submit>
                <input
                    type="text"
                    placeholder="Search reports or enter a ticker"
                    prop:value=move || state.with(|s| s.search.clone())
                    on:input=on_search_input
                />
                <button type="submit">"Show Details"</button>
                <ul class="report-search__suggestions">{suggestions}</ul>
            </form>
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.reports.error.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.reports.dismiss_error()))
            />
            {move || {
                (state.with(|s| s.reports.phase()) == ViewPhase::Loading)
                    .then(|| view! { <p class="loading">"Loading reports..."</p> })
            }}
            <div class="reports-container">{cards}</div>
            {graph}
            {details}
        </div>
    }
}
