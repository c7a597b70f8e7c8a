//! Signed-in shell: welcome heading, logout, and the tab switcher.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fetches `/api/profile` on mount and mirrors the user into the shared
//! `AuthState`. Only the active tab is mounted, so switching tabs refetches
//! that tab's data and drops any response still in flight for the old one.

use leptos::prelude::*;

use crate::components::status_message::StatusMessage;
use crate::net::api::ApiClient;
use crate::pages::account::AccountPage;
use crate::pages::market_data::MarketDataPage;
use crate::pages::portfolio::PortfolioPage;
use crate::pages::reports::ReportsPage;
use crate::pages::transactions::TransactionsPage;
use crate::state::auth::AuthState;
use crate::state::profile::{ProfileState, ProfileTab};
use crate::state::view::{mount_lifetime, spawn_guarded};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let auth = expect_context::<RwSignal<AuthState>>();
    let state = RwSignal::new(ProfileState::default());
    let lifetime = mount_lifetime();

    auth.update(|a| a.loading = true);
    let client = api.get_value();
    spawn_guarded(
        lifetime.slot().begin(),
        async move { client.profile().await },
        move |result| {
            let session = api.with_value(|api| api.session().clone());
            state.update(|s| s.apply_profile(result, &session));
            let user = state.with_untracked(|s| s.user.data.clone());
            auth.update(|a| {
                a.user = user;
                a.loading = false;
            });
        },
    );

    let active_tab = Memo::new(move |_| state.with(|s| s.tab));

    let logout_slot = lifetime.slot();
    let on_logout = move |_| {
        let api = api.get_value();
        spawn_guarded(
            logout_slot.begin(),
            async move { api.logout().await },
            move |result| {
                auth.update(|a| a.apply_logout(result));
                #[cfg(feature = "hydrate")]
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            },
        );
    };

    view! {
        <div class="profile-page">
            <header class="profile-page__header">
                <h1>{move || state.with(ProfileState::welcome_heading)}</h1>
                <button class="profile-page__logout" type="button" on:click=on_logout>"Logout"</button>
            </header>
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.user.error.clone()))
                on_dismiss=Callback::new(move |()| {
                    state.update(|s| s.user.dismiss_error());
                })
            />
            <div class="profile-page__content">
                <nav class="profile-page__sidebar">
                    {ProfileTab::ALL
                        .into_iter()
                        .map(|tab| {
                            view! {
                                <button
                                    type="button"
                                    class="profile-page__tab"
                                    class:profile-page__tab--active=move || active_tab.get() == tab
                                    on:click=move |_| state.update(|s| s.tab = tab)
                                >
                                    {tab.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
                <main class="profile-page__main">
                    {move || match active_tab.get() {
                        ProfileTab::Portfolio => view! { <PortfolioPage/> }.into_any(),
                        ProfileTab::Reports => view! { <ReportsPage/> }.into_any(),
                        ProfileTab::Transactions => view! { <TransactionsPage/> }.into_any(),
                        ProfileTab::MarketData => view! { <MarketDataPage/> }.into_any(),
                        ProfileTab::Account => view! { <AccountPage/> }.into_any(),
                    }}
                </main>
            </div>
        </div>
    }
}
