//! Login page: email + password, then a short pause on the success message
//! before moving to the profile.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_navigate;

use crate::components::status_message::{StatusMessage, Tone};
use crate::net::api::ApiClient;
use crate::state::view::{mount_lifetime, spawn_guarded};

pub const MISSING_CREDENTIALS: &str = "Please enter your email and password.";

/// Delay between showing the success message and navigating away.
pub const REDIRECT_DELAY_MS: u32 = 500;

/// Trimmed email plus the password as typed.
///
/// # Errors
///
/// Returns [`MISSING_CREDENTIALS`] when either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Server message to show after a successful login.
#[must_use]
pub fn login_success_message(message: Option<&str>) -> String {
    message.map(str::trim).filter(|m| !m.is_empty()).unwrap_or("Login successful!").to_owned()
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let slot = mount_lifetime().slot();

    #[cfg(feature = "hydrate")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        message.set(None);
        error.set(None);
        let (email_value, password_value) = match validate_login(&email.get(), &password.get()) {
            Ok(pair) => pair,
            Err(e) => {
                error.set(Some(e.to_owned()));
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        let navigate = navigate.clone();
        let api = api.get_value();
        spawn_guarded(
            slot.begin(),
            async move { api.login(&email_value, &password_value).await },
            move |result| {
                busy.set(false);
                match result {
                    Ok(resp) => {
                        message.set(Some(login_success_message(resp.message.as_deref())));
                        #[cfg(feature = "hydrate")]
                        leptos::task::spawn_local(async move {
                            gloo_timers::future::TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                            navigate("/profile", leptos_router::NavigateOptions::default());
                        });
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            },
        );
    };

    view! {
        <div class="auth-page login-page">
            <nav class="auth-page__home">
                <A href="/">"Home"</A>
            </nav>
            <div class="auth-page__form">
                <h2>"Login"</h2>
                <StatusMessage message=message on_dismiss=Callback::new(move |()| message.set(None)) tone=Tone::Success/>
                <StatusMessage message=error on_dismiss=Callback::new(move |()| error.set(None))/>
                <form on:submit=on_submit aria-label="Login Form">
                    <label for="email">"Email:"</label>
                    <input
                        id="email"
                        type="email"
                        placeholder="Enter your email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Password:"</label>
                    <input
                        id="password"
                        type="password"
                        placeholder="Enter your password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <A href="/recover">"Forgot your password? Recover here"</A>
                    <button type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-page__footer">
                    "Don't have an account? "
                    <A href="/register">"Register here"</A>
                </p>
            </div>
        </div>
    }
}
