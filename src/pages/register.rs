//! Registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::status_message::{StatusMessage, Tone};
use crate::net::api::ApiClient;
use crate::state::view::{mount_lifetime, spawn_guarded};

pub const MISSING_FIELDS: &str = "Please fill in username, email, and password.";

/// Validated registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Trim username and email; every field must be present.
///
/// # Errors
///
/// Returns [`MISSING_FIELDS`] when any field is blank.
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<Registration, &'static str> {
    let (username, email) = (username.trim(), email.trim());
    if username.is_empty() || email.is_empty() || password.trim().is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok(Registration { username: username.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = StoredValue::new(expect_context::<ApiClient>());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let slot = mount_lifetime().slot();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        message.set(None);
        error.set(None);
        let form = match validate_registration(&username.get(), &email.get(), &password.get()) {
            Ok(form) => form,
            Err(e) => {
                error.set(Some(e.to_owned()));
                return;
            }
        };
        busy.set(true);
        let api = api.get_value();
        spawn_guarded(
            slot.begin(),
            async move { api.register(&form.username, &form.email, &form.password).await },
            move |result| {
                busy.set(false);
                match result {
                    Ok(resp) if resp.message.is_empty() => message.set(Some("Registration successful!".to_owned())),
                    Ok(resp) => message.set(Some(resp.message)),
                    Err(e) => error.set(Some(e.to_string())),
                }
            },
        );
    };

    view! {
        <div class="auth-page register-page">
            <nav class="auth-page__home">
                <A href="/">"Home"</A>
            </nav>
            <div class="auth-page__form">
                <h2>"Register"</h2>
                <StatusMessage message=message on_dismiss=Callback::new(move |()| message.set(None)) tone=Tone::Success/>
                <StatusMessage message=error on_dismiss=Callback::new(move |()| error.set(None))/>
                <form on:submit=on_submit>
                    <label for="username">"Username:"</label>
                    <input
                        id="username"
                        type="text"
                        placeholder="Enter your username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
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
                    <button type="submit" disabled=move || busy.get()>"Register"</button>
                </form>
                <p class="auth-page__footer">
                    "Already have an account? "
                    <A href="/login">"Login here"</A>
                </p>
            </div>
        </div>
    }
}
