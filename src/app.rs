//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is rendered by the SSR host and carries the backend base URL in a
//! `<meta>` tag. `App` resolves that config once, builds the shared
//! `ApiClient` around the restored session, and hands both to every page
//! through context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::{API_BASE_URL_META, ClientConfig};
use crate::net::api::ApiClient;
use crate::pages::{
    landing::LandingPage, login::LoginPage, profile::ProfilePage, recover::RecoverPage, register::RegisterPage,
    reset_password::ResetPasswordPage,
};
use crate::state::auth::{AuthState, Session};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let api_base_url = ClientConfig::load().api_base_url;
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_BASE_URL_META content=api_base_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the config, API client, and auth state, then sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::load();
    let api = ApiClient::new(&config, Session::restore());
    log::debug!("api base url: {}", api.base_url());

    provide_context(config);
    provide_context(api);
    provide_context(RwSignal::new(AuthState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/folio.css"/>
        <Title text="Folio"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("recover") view=RecoverPage/>
                <Route path=(StaticSegment("reset"), ParamSegment("token")) view=ResetPasswordPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
            </Routes>
        </Router>
    }
}
