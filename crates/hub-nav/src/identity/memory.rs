//! In-memory identity source.
//!
//! Backs the CLI replay command and the tests. Clones share state, so a test
//! can keep one handle to drive sign-in/out while the hub owns another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use hub_model::{AuthChange, AuthEvent, Session};
use tokio::sync::mpsc;

use super::{AuthSubscription, IdentitySource};
use crate::error::IdentityError;

/// How `fetch_session` behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchBehavior {
    /// Answer immediately with the stored session.
    #[default]
    Resolve,
    /// Answer with the stored session after a delay.
    Delay(Duration),
    /// Never answer.
    Hang,
    /// Fail with a network error.
    Fail(String),
}

#[derive(Debug, Default)]
struct Inner {
    session: Option<Session>,
    fetch: FetchBehavior,
    sign_out_error: Option<String>,
    sign_out_calls: usize,
    subscribers: Vec<mpsc::UnboundedSender<AuthChange>>,
}

impl Inner {
    fn broadcast(&mut self, change: &AuthChange) {
        self.subscribers
            .retain(|sender| sender.send(change.clone()).is_ok());
    }

    fn prune_closed(&mut self) {
        self.subscribers.retain(|sender| !sender.is_closed());
    }
}

/// Identity source held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentitySource {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryIdentitySource {
    /// Source with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with an existing session.
    pub fn with_session(session: Session) -> Self {
        let source = Self::new();
        source.lock().session = Some(session);
        source
    }

    /// Set how `fetch_session` answers.
    #[must_use]
    pub fn fetch_behavior(self, behavior: FetchBehavior) -> Self {
        self.set_fetch_behavior(behavior);
        self
    }

    pub fn set_fetch_behavior(&self, behavior: FetchBehavior) {
        self.lock().fetch = behavior;
    }

    /// Make `sign_out` fail with the given message.
    pub fn fail_sign_out(&self, message: impl Into<String>) {
        self.lock().sign_out_error = Some(message.into());
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// Store a session and announce it as a sign-in.
    pub fn sign_in(&self, session: Session) {
        self.emit(AuthChange::signed_in(session));
    }

    /// Push a change to every live subscriber, updating the stored session.
    pub fn emit(&self, change: AuthChange) {
        let mut inner = self.lock();
        match change.event {
            AuthEvent::SignedOut => inner.session = None,
            _ => inner.session.clone_from(&change.session),
        }
        inner.broadcast(&change);
    }

    /// Subscribers whose handle is still alive.
    pub fn live_subscribers(&self) -> usize {
        self.lock()
            .subscribers
            .iter()
            .filter(|sender| !sender.is_closed())
            .count()
    }

    pub fn sign_out_calls(&self) -> usize {
        self.lock().sign_out_calls
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentitySource for MemoryIdentitySource {
    async fn fetch_session(&self) -> Result<Option<Session>, IdentityError> {
        let behavior = self.lock().fetch.clone();
        match behavior {
            FetchBehavior::Resolve => Ok(self.session()),
            FetchBehavior::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(self.session())
            }
            FetchBehavior::Hang => std::future::pending().await,
            FetchBehavior::Fail(message) => Err(IdentityError::network(message)),
        }
    }

    fn subscribe(&self) -> AuthSubscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().subscribers.push(sender);
        let inner = Arc::downgrade(&self.inner);
        AuthSubscription::with_teardown(receiver, move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .prune_closed();
            }
        })
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let mut inner = self.lock();
        inner.sign_out_calls += 1;
        if let Some(message) = inner.sign_out_error.clone() {
            return Err(IdentityError::rejected(message));
        }
        inner.session = None;
        inner.broadcast(&AuthChange::signed_out());
        Ok(())
    }
}
