//! Inline SVG line chart for price series.

use leptos::prelude::*;

use crate::util::chart::{ChartData, points_attr, polyline_points};
use crate::util::format::money;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 300.0;

#[component]
pub fn LineChart(#[prop(into)] data: Signal<ChartData>, #[prop(into, optional)] title: String) -> impl IntoView {
    let view_box = format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}");

    view! {
        <figure class="line-chart">
            {(!title.is_empty()).then(|| view! { <figcaption class="line-chart__title">{title.clone()}</figcaption> })}
            <ul class="line-chart__legend">
                {move || {
                    data.get()
                        .datasets
                        .into_iter()
                        .map(|d| {
                            view! {
                                <li class="line-chart__legend-item">
                                    <span class="line-chart__swatch" style=format!("background:{}", d.color)></span>
                                    {d.label}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <svg class="line-chart__plot" viewBox=view_box preserveAspectRatio="none" role="img">
                {move || {
                    let chart = data.get();
                    let Some(range) = chart.y_range() else {
                        return Vec::new();
                    };
                    chart
                        .datasets
                        .iter()
                        .map(|d| {
                            let points = points_attr(&polyline_points(&d.data, range, CHART_WIDTH, CHART_HEIGHT));
                            view! {
                                <polyline fill="none" stroke=d.color stroke-width="2" points=points></polyline>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </svg>
            <div class="line-chart__axis">
                {move || {
                    let chart = data.get();
                    let first = chart.labels.first().cloned().unwrap_or_default();
                    let last = chart.labels.last().cloned().unwrap_or_default();
                    let range = chart.y_range().map(|(lo, hi)| format!("{} to {}", money(lo), money(hi))).unwrap_or_default();
                    view! {
                        <span>{first}</span>
                        <span class="line-chart__range">{range}</span>
                        <span>{last}</span>
                    }
                }}
            </div>
        </figure>
    }
}
