//! Horizontal risk gauge with an adjustable alert threshold.

use leptos::prelude::*;

use crate::util::chart::gauge_color;

#[component]
pub fn RiskGauge(
    /// Gauge fill in percent.
    #[prop(into)]
    value: Signal<f64>,
    #[prop(into)] threshold: Signal<f64>,
    /// Receives the raw slider value.
    on_threshold: Callback<String>,
) -> impl IntoView {
    let fill_style = move || {
        let v = value.get();
        format!("width:{v:.0}%;background:{}", gauge_color(v, threshold.get()))
    };
    let marker_style = move || format!("left:{:.0}%", threshold.get());

    view! {
        <div class="risk-gauge">
            <div class="risk-gauge__track">
                <div class="risk-gauge__fill" style=fill_style></div>
                <div class="risk-gauge__marker" style=marker_style></div>
            </div>
            <p class="risk-gauge__value">{move || format!("Risk: {:.0}%", value.get())}</p>
            <label class="risk-gauge__threshold">
                {move || format!("Alert threshold: {:.0}%", threshold.get())}
                <input
                    type="range"
                    min="0"
                    max="100"
                    step="5"
                    prop:value=move || threshold.get().to_string()
                    on:input=move |ev| on_threshold.run(event_target_value(&ev))
                />
            </label>
        </div>
    }
}
