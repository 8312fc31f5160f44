//! `FetchController` - per-screen request lifecycle.
//!
//! Every issued request gets a fresh [`RequestToken`]. Only the outcome
//! carrying the current token is applied; outcomes of superseded
//! requests are dropped. Ordering is last-issued-wins, not
//! last-completed-wins. Superseded requests keep running; only their
//! result is ignored.

use std::fmt;
use std::future::Future;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Identifier minted for each issued request. Monotonic per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen-scoped fetch state.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    Idle,
    /// The current request is in flight.
    Loading,
    /// The current request succeeded.
    Success(T),
    /// The current request failed; holds the user-facing message.
    Failed(String),
}

impl<T> FetchState<T> {
    /// Returns `true` while the current request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the payload of a successful request.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome belonged to the current request and was applied.
    Applied,
    /// A newer request superseded this one; the outcome was dropped.
    Stale,
    /// The controller was torn down; nothing was changed.
    Detached,
}

/// A finished request, delivered back to its controller.
#[derive(Debug)]
pub struct Completion<T> {
    /// Token minted when the request was issued.
    pub token: RequestToken,
    /// Payload or user-facing failure message.
    pub outcome: Result<T, String>,
}

/// Owns one screen's fetch state and token counter.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FetchController<T> {
    /// Current state.
    state: FetchState<T>,
    /// Number of tokens minted so far.
    issued: u64,
    /// Token of the most recently issued request.
    current: Option<RequestToken>,
    /// Spawned requests whose completion has not been received yet.
    in_flight: usize,
    /// Cleared on teardown.
    alive: bool,
    /// Completion sender handed to spawned requests.
    tx: UnboundedSender<Completion<T>>,
    /// Completion receiver drained by the owner.
    rx: UnboundedReceiver<Completion<T>>,
}

impl<T> Default for FetchController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchController<T> {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: FetchState::Idle,
            issued: 0,
            current: None,
            in_flight: 0,
            alive: true,
            tx,
            rx,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Returns the token of the most recently issued request.
    #[must_use]
    pub const fn current_token(&self) -> Option<RequestToken> {
        self.current
    }

    /// Returns `false` once the controller has been torn down.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mints a new token, makes it current and moves to `Loading`.
    ///
    /// Returns `None` after teardown.
    pub fn begin(&mut self) -> Option<RequestToken> {
        if !self.alive {
            return None;
        }
        self.issued = self.issued.saturating_add(1);
        let token = RequestToken(self.issued);
        self.current = Some(token);
        self.state = FetchState::Loading;
        tracing::debug!(%token, "request issued");
        Some(token)
    }

    /// Applies `outcome` if `token` is still current.
    pub fn resolve(&mut self, token: RequestToken, outcome: Result<T, String>) -> Resolution {
        if !self.alive {
            return Resolution::Detached;
        }
        if self.current != Some(token) {
            tracing::debug!(%token, current = ?self.current, "discarding stale response");
            return Resolution::Stale;
        }
        self.state = match outcome {
            Ok(payload) => FetchState::Success(payload),
            Err(reason) => FetchState::Failed(reason),
        };
        Resolution::Applied
    }

    /// Applies a delivered completion.
    pub fn apply(&mut self, completion: Completion<T>) -> Resolution {
        self.resolve(completion.token, completion.outcome)
    }

    /// Applies every completion that has already arrived, without waiting.
    ///
    /// Returns the number of applied (non-stale) completions.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0usize;
        while self.alive {
            let Ok(completion) = self.rx.try_recv() else {
                break;
            };
            self.in_flight = self.in_flight.saturating_sub(1);
            if self.apply(completion) == Resolution::Applied {
                applied = applied.saturating_add(1);
            }
        }
        applied
    }

    /// Waits for the next completion and applies it.
    ///
    /// Returns `None` after teardown or when no spawned request is
    /// outstanding.
    #[allow(clippy::future_not_send)]
    pub async fn settle(&mut self) -> Option<Resolution> {
        if !self.alive || self.in_flight == 0 {
            return None;
        }
        let completion = self.rx.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(self.apply(completion))
    }

    /// Stops all further state changes.
    ///
    /// In-flight requests keep running but their results are never applied.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.current = None;
        self.rx.close();
        tracing::debug!(issued = self.issued, "fetch controller torn down");
    }
}

impl<T: Send + 'static> FetchController<T> {
    /// Begins a request and spawns `fetch` on the tokio runtime.
    ///
    /// The completion is delivered through the controller's own channel;
    /// drain it with [`pump`](Self::pump) or [`settle`](Self::settle).
    /// Returns `None` (and drops `fetch` unpolled) after teardown.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn issue<F>(&mut self, fetch: F) -> Option<RequestToken>
    where
        F: Future<Output = Result<T, String>> + Send + 'static,
    {
        let token = self.begin()?;
        self.in_flight = self.in_flight.saturating_add(1);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fetch.await;
            if tx.send(Completion { token, outcome }).is_err() {
                tracing::debug!(%token, "controller gone, dropping response");
            }
        });
        Some(token)
    }
}
