//! Session and signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend authenticates with a cookie, which the transport always sends.
//! Some deployments also issue a bearer token at login; `Session` carries it
//! into every request and keeps it across reloads in `localStorage`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, RwLock};

use crate::net::error::ApiError;
use crate::net::types::{MessageResponse, User};

const SESSION_TOKEN_KEY: &str = "folio.session.token";

/// Shared bearer-token holder. Clones share the same token.
#[derive(Clone, Debug, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Session seeded from browser storage, empty elsewhere.
    #[must_use]
    pub fn restore() -> Self {
        let session = Self::default();
        if let Some(token) = stored_token() {
            session.replace(Some(token));
        }
        session
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) {
        self.replace(Some(token.to_owned()));
        store_token(Some(token));
    }

    pub fn clear(&self) {
        self.replace(None);
        store_token(None);
    }

    fn replace(&self, value: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

// Token persistence is best effort: outside the browser, or when storage is
// blocked, nothing is restored and writes are skipped.

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn stored_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        local_storage()?.get_item(SESSION_TOKEN_KEY).ok().flatten().filter(|t| !t.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn store_token(token: Option<&str>) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let written = match token {
            Some(token) => storage.set_item(SESSION_TOKEN_KEY, token),
            None => storage.remove_item(SESSION_TOKEN_KEY),
        };
        if written.is_err() {
            log::warn!("session token not persisted");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

/// The signed-in user as last reported by the server.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    /// Name shown in the profile heading.
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(self.user.as_ref())
    }

    /// Forget the user once a logout settles.
    ///
    /// `ApiClient::logout` clears the local session whatever the server says,
    /// so a failed call still signs out here and is only logged.
    pub fn apply_logout(&mut self, result: Result<MessageResponse, ApiError>) {
        if let Err(err) = result {
            log::warn!("logout not confirmed by server: {err}");
        }
        *self = Self::default();
    }
}

/// `username`, or `"User"` when unknown or blank.
#[must_use]
pub fn display_name(user: Option<&User>) -> &str {
    user.map(|u| u.username.trim()).filter(|name| !name.is_empty()).unwrap_or("User")
}
