//! Table of positions, shared by the current and rebalanced portfolio views.

use leptos::prelude::*;

use crate::net::types::Holding;
use crate::util::format::{money, money_or_na, pnl_class, quantity};

#[component]
pub fn HoldingsTable(
    #[prop(into)] holdings: Signal<Vec<Holding>>,
    /// Adds the model's predicted price column.
    #[prop(optional)]
    show_prediction: bool,
) -> impl IntoView {
    view! {
        <table class="holdings-table">
            <thead>
                <tr>
                    <th>"Symbol"</th>
                    <th>"Name"</th>
                    <th>"Shares"</th>
                    <th>"Average Cost"</th>
                    <th>"Current Price"</th>
                    {show_prediction.then(|| view! { <th>"Predicted Price"</th> })}
                    <th>"Profit/Loss"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    holdings
                        .get()
                        .into_iter()
                        .map(|h| {
                            view! {
                                <tr>
                                    <td>{h.ticker.clone()}</td>
                                    <td>{h.company_name.clone().unwrap_or_default()}</td>
                                    <td>{quantity(h.quantity)}</td>
                                    <td>{money(h.average_cost)}</td>
                                    <td>{money(h.current_price)}</td>
                                    {show_prediction.then(|| view! { <td>{money_or_na(h.predicted_future_price)}</td> })}
                                    <td class=pnl_class(h.profit_loss)>{money(h.profit_loss)}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}
