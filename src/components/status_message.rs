//! Dismissable inline message used for every error and confirmation.

use leptos::prelude::*;

/// Tone of an inline message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Error,
    Success,
    Info,
}

impl Tone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "status-message status-message--error",
            Self::Success => "status-message status-message--success",
            Self::Info => "status-message status-message--info",
        }
    }
}

/// Renders `message` when set, with a close button that calls `on_dismiss`.
#[component]
pub fn StatusMessage(
    #[prop(into)] message: Signal<Option<String>>,
    on_dismiss: Callback<()>,
    #[prop(optional)] tone: Tone,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class=tone.class() role="alert">
                <span class="status-message__text">{move || message.get().unwrap_or_default()}</span>
                <button
                    class="status-message__dismiss"
                    type="button"
                    aria-label="Dismiss"
                    on:click=move |_| on_dismiss.run(())
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}
