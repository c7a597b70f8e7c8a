//! Password recovery request page.

#[cfg(test)]
#[path = "recover_test.rs"]
mod recover_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::status_message::{StatusMessage, Tone};
use crate::net::api::ApiClient;
use crate::state::view::{mount_lifetime, spawn_guarded};

pub const MISSING_EMAIL: &str = "Please enter your email.";

/// # Errors
///
/// Returns [`MISSING_EMAIL`] when the field is blank.
pub fn validate_recover(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() { Err(MISSING_EMAIL) } else { Ok(email.to_owned()) }
}

#[component]
pub fn RecoverPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let email = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let slot = mount_lifetime().slot();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        message.set(None);
        error.set(None);
        let email_value = match validate_recover(&email.get()) {
            Ok(v) => v,
            Err(e) => {
                error.set(Some(e.to_owned()));
                return;
            }
        };
        let api = api.get_value();
        spawn_guarded(
            slot.begin(),
            async move { api.recover(&email_value).await },
            move |result| match result {
                Ok(resp) => message.set(Some(resp.message)),
                Err(e) => error.set(Some(e.to_string())),
            },
        );
    };

    view! {
        <div class="auth-page recover-page">
            <nav class="auth-page__home">
                <A href="/">"Home"</A>
            </nav>
            <div class="auth-page__form">
                <h2>"Recover Password"</h2>
                <StatusMessage message=message on_dismiss=Callback::new(move |()| message.set(None)) tone=Tone::Success/>
                <StatusMessage message=error on_dismiss=Callback::new(move |()| error.set(None))/>
                <form on:submit=on_submit>
                    <label for="email">"Email:"</label>
                    <input
                        id="email"
                        type="email"
                        placeholder="Enter your email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <button type="submit">"Send Recovery Email"</button>
                </form>
                <p class="auth-page__footer">
                    "Remember your password? "
                    <A href="/login">"Login here"</A>
                </p>
            </div>
        </div>
    }
}
