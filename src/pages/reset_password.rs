//! Password reset page reached from the recovery email (`/reset/:token`).

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::status_message::{StatusMessage, Tone};
use crate::net::api::ApiClient;
use crate::state::view::{mount_lifetime, spawn_guarded};

pub const MISSING_PASSWORD: &str = "Please enter a new password.";
pub const MISSING_TOKEN: &str = "This reset link is invalid.";

/// Token from the route plus the new password.
///
/// # Errors
///
/// Returns [`MISSING_TOKEN`] or [`MISSING_PASSWORD`] for blank input.
pub fn validate_reset(token: Option<&str>, password: &str) -> Result<(String, String), &'static str> {
    let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(MISSING_TOKEN)?;
    if password.trim().is_empty() {
        return Err(MISSING_PASSWORD);
    }
    Ok((token.to_owned(), password.to_owned()))
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let params = use_params_map();
    let password = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let slot = mount_lifetime().slot();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        message.set(None);
        error.set(None);
        let token = params.with(|p| p.get("token"));
        let (token, new_password) = match validate_reset(token.as_deref(), &password.get()) {
            Ok(pair) => pair,
            Err(e) => {
                error.set(Some(e.to_owned()));
                return;
            }
        };
        let api = api.get_value();
        spawn_guarded(
            slot.begin(),
            async move { api.reset_password(&token, &new_password).await },
            move |result| match result {
                Ok(resp) => {
                    password.set(String::new());
                    message.set(Some(resp.message));
                }
                Err(e) => error.set(Some(e.to_string())),
            },
        );
    };

    view! {
        <div class="auth-page reset-page">
            <div class="auth-page__form">
                <h2>"Reset Password"</h2>
                <StatusMessage message=message on_dismiss=Callback::new(move |()| message.set(None)) tone=Tone::Success/>
                <StatusMessage message=error on_dismiss=Callback::new(move |()| error.set(None))/>
                <form on:submit=on_submit>
                    <label for="password">"New Password:"</label>
                    <input
                        id="password"
                        type="password"
                        placeholder="Enter your new password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button type="submit">"Reset Password"</button>
                </form>
                <p class="auth-page__footer">
                    <A href="/login">"Back to login"</A>
                </p>
            </div>
        </div>
    }
}
