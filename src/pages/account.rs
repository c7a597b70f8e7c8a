//! Account tab: user details, deposit, notifications, and subscription.

use leptos::prelude::*;

use crate::components::status_message::{StatusMessage, Tone};
use crate::net::api::ApiClient;
use crate::net::types::SubscriptionAction;
use crate::state::account::{AccountState, NotificationChannel};
use crate::state::view::{ViewPhase, mount_lifetime, spawn_guarded};
use crate::util::format::{money, money_or_na};

#[component]
pub fn AccountPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let state = RwSignal::new(AccountState::default());
    let lifetime = mount_lifetime();
    let deposit_slot = lifetime.slot();
    let subscription_slot = lifetime.slot();
    let notification_slot = lifetime.slot();

    let client = api.get_value();
    spawn_guarded(
        lifetime.slot().begin(),
        async move { client.account().await },
        move |result| state.update(|s| s.account.apply(result)),
    );

    let on_deposit = move |_| {
        let amount = match state.with(AccountState::deposit_amount) {
            Ok(amount) => amount,
            Err(e) => {
                state.update(|s| s.message = Some(e.to_string()));
                return;
            }
        };
        let api = api.get_value();
        spawn_guarded(
            deposit_slot.begin(),
            async move { api.deposit(amount).await },
            move |result| state.update(|s| s.apply_deposit(result)),
        );
    };

    let on_subscription = move |_| {
        let action = state.with(AccountState::subscription_action);
        let api = api.get_value();
        spawn_guarded(
            subscription_slot.begin(),
            async move { api.set_subscription(action).await },
            move |result| state.update(|s| s.apply_subscription(result)),
        );
    };

    // Toggles are applied locally first; a failed save restores the previous set.
    let toggle = move |channel: NotificationChannel| {
        let Some((updated, previous)) = state.try_update(|s| s.toggle_notification(channel)) else {
            return;
        };
        let api = api.get_value();
        spawn_guarded(
            notification_slot.begin(),
            async move { api.update_notifications(updated).await },
            move |result| state.update(|s| s.apply_notifications(result, previous)),
        );
    };

    let info = move || {
        state.with(|s| s.account.data.clone()).map(|account| {
            view! {
                <div class="account-info">
                    <p><strong>"Username: "</strong>{account.user.username.clone()}</p>
                    <p><strong>"Email: "</strong>{account.user.email.clone()}</p>
                    <p><strong>"Balance: "</strong>{money_or_na(account.user.balance)}</p>
                    <p><strong>"Profit: "</strong>{money(account.profit)}</p>
                    <p><strong>"Subscription Status: "</strong>{move || state.with(AccountState::subscription_label)}</p>
                </div>
            }
        })
    };

    view! {
        <div class="account-page">
            <h1>"Account Management"</h1>
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.account.error.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.account.dismiss_error()))
            />
            <StatusMessage
                message=Signal::derive(move || state.with(|s| s.message.clone()))
                on_dismiss=Callback::new(move |()| state.update(|s| s.message = None))
                tone=Tone::Info
            />
            {move || {
                (state.with(|s| s.account.phase()) == ViewPhase::Loading)
                    .then(|| view! { <p class="loading">"Loading..."</p> })
            }}
            {info}
            <Show when=move || state.with(|s| s.account.data.is_some())>
                <div class="account-actions">
                    <h3>"Deposit Money"</h3>
                    <input
                        type="number"
                        placeholder="Enter amount"
                        prop:value=move || state.with(|s| s.deposit_input.clone())
                        on:input=move |ev| state.update(|s| s.deposit_input = event_target_value(&ev))
                    />
                    <button type="button" on:click=on_deposit.clone()>"Deposit"</button>

                    <h3>"Notification Preferences"</h3>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || state.with(|s| s.preferences().email)
                            on:change={
                                let toggle = toggle.clone();
                                move |_| toggle(NotificationChannel::Email)
                            }
                        />
                        "Email Notifications"
                    </label>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || state.with(|s| s.preferences().sms)
                            on:change={
                                let toggle = toggle.clone();
                                move |_| toggle(NotificationChannel::Sms)
                            }
                        />
                        "SMS Notifications"
                    </label>

                    <h3>"Subscription Management"</h3>
                    <button type="button" on:click=on_subscription.clone()>
                        {move || match state.with(AccountState::subscription_action) {
                            SubscriptionAction::Activate => "Activate Subscription",
                            SubscriptionAction::Deactivate => "Deactivate Subscription",
                        }}
                    </button>
                </div>
            </Show>
        </div>
    }
}
