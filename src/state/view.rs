//! Fetch lifecycle shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page owns a `Loadable<T>` per fetched resource and moves it through
//! `loading -> (error | loaded)`. Async completions are routed through a
//! [`Ticket`] so a response that arrives after the page unmounted, or after a
//! newer request for the same slot, is dropped instead of applied.
//!
//! DESIGN
//! ======
//! `Lifetime` is the page-level liveness flag, ended from `on_cleanup` the
//! same way the dashboard clears its poll loop. `RequestSlot` adds a
//! monotonically increasing sequence so only the latest request wins.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::net::error::ApiError;

/// Coarse render state of a fetched resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Error,
    Loaded,
}

/// Data, loading flag, and error message for one fetched resource.
#[derive(Clone, Debug, PartialEq)]
pub struct Loadable<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Pages fetch on mount, so a fresh resource starts out loading.
impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self { data: None, loading: true, error: None }
    }
}

impl<T> Loadable<T> {
    /// Mark a (re)fetch as in flight. Existing data stays visible.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn apply(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => self.succeed(data),
            Err(err) => self.fail(err.to_string()),
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.error.is_some() {
            ViewPhase::Error
        } else {
            ViewPhase::Loaded
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.phase() == ViewPhase::Loaded
    }
}

/// Liveness of a mounted page.
#[derive(Clone, Debug)]
pub struct Lifetime(Arc<AtomicBool>);

impl Default for Lifetime {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Lifetime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on unmount. Every outstanding ticket becomes stale.
    pub fn end(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// A request slot tied to this lifetime.
    #[must_use]
    pub fn slot(&self) -> RequestSlot {
        RequestSlot { alive: self.0.clone(), latest: Arc::new(AtomicU64::new(0)) }
    }
}

/// Sequence counter for one piece of state that may be requested repeatedly.
#[derive(Clone, Debug)]
pub struct RequestSlot {
    alive: Arc<AtomicBool>,
    latest: Arc<AtomicU64>,
}

impl RequestSlot {
    /// Start a request, superseding every earlier ticket from this slot.
    #[must_use]
    pub fn begin(&self) -> Ticket {
        let seq = self.latest.fetch_add(1, Ordering::Relaxed) + 1;
        Ticket { alive: self.alive.clone(), latest: self.latest.clone(), seq }
    }

    /// Make every outstanding ticket stale without starting a new request.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::Relaxed);
    }
}

/// Permission to apply one completion.
#[derive(Clone, Debug)]
pub struct Ticket {
    alive: Arc<AtomicBool>,
    latest: Arc<AtomicU64>,
    seq: u64,
}

impl Ticket {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.alive.load(Ordering::Relaxed) && self.latest.load(Ordering::Relaxed) == self.seq
    }

    /// Pass `value` through only if the page is mounted and no newer request
    /// was started on the same slot.
    pub fn settle<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            log::debug!("dropping stale completion (request #{})", self.seq);
            None
        }
    }
}

/// Run `fut` in the browser and hand its output to `apply` if `ticket` is
/// still current when it resolves. No-op outside the browser build.
pub fn spawn_guarded<T, Fut, Apply>(ticket: Ticket, fut: Fut, apply: Apply)
where
    T: 'static,
    Fut: std::future::Future<Output = T> + 'static,
    Apply: FnOnce(T) + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let output = fut.await;
        if let Some(output) = ticket.settle(output) {
            apply(output);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ticket, fut, apply);
    }
}

/// A `Lifetime` ended when the calling component unmounts.
pub fn mount_lifetime() -> Lifetime {
    let lifetime = Lifetime::new();
    let handle = lifetime.clone();
    leptos::prelude::on_cleanup(move || handle.end());
    lifetime
}
