//! Identity source seam.
//!
//! The hub talks to its auth backend through [`IdentitySource`]: a one-shot
//! session fetch, a change stream, and sign-out. Change streams are plain
//! channels wrapped in [`AuthSubscription`], which unsubscribes on drop.

mod memory;

use std::fmt;
use std::future::Future;

use hub_model::{AuthChange, Session};
use tokio::sync::mpsc;

use crate::error::IdentityError;

pub use memory::{FetchBehavior, MemoryIdentitySource};

/// Authentication/session provider consumed by the hub.
///
/// The hub runs on a single cooperative task, so the returned futures are not
/// required to be `Send`.
pub trait IdentitySource {
    /// Fetch the current session once. `Ok(None)` means nobody is signed in.
    fn fetch_session(&self) -> impl Future<Output = Result<Option<Session>, IdentityError>>;

    /// Open a change stream for the lifetime of the returned handle.
    fn subscribe(&self) -> AuthSubscription;

    /// End the session at the provider.
    fn sign_out(&self) -> impl Future<Output = Result<(), IdentityError>>;
}

/// Handle to an identity change stream.
///
/// Dropping the handle closes the channel and runs the teardown hook, so a
/// source never keeps delivering to a listener that went away.
pub struct AuthSubscription {
    receiver: mpsc::UnboundedReceiver<AuthChange>,
    teardown: Option<Box<dyn FnOnce()>>,
}

impl AuthSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<AuthChange>) -> Self {
        Self {
            receiver,
            teardown: None,
        }
    }

    /// Subscription that runs `teardown` when dropped.
    pub fn with_teardown(
        receiver: mpsc::UnboundedReceiver<AuthChange>,
        teardown: impl FnOnce() + 'static,
    ) -> Self {
        let mut subscription = Self::new(receiver);
        subscription.teardown = Some(Box::new(teardown));
        subscription
    }

    /// Wait for the next change. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<AuthChange> {
        self.receiver.recv().await
    }

    /// Take a buffered change without waiting.
    pub fn try_recv(&mut self) -> Option<AuthChange> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.receiver.close();
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("has_teardown", &self.teardown.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn drop_runs_teardown_and_closes_channel() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let torn_down = Rc::new(Cell::new(false));
        let flag = Rc::clone(&torn_down);
        let subscription = AuthSubscription::with_teardown(receiver, move || flag.set(true));

        assert!(!sender.is_closed());
        drop(subscription);
        assert!(torn_down.get());
        assert!(sender.is_closed());
    }

    #[test]
    fn try_recv_is_non_blocking() {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscription = AuthSubscription::new(receiver);
        assert_eq!(subscription.try_recv(), None);
        sender
            .send(AuthChange::signed_out())
            .expect("subscription is open");
        assert_eq!(subscription.try_recv(), Some(AuthChange::signed_out()));
    }
}
