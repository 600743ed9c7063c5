//! Startup sequencing.
//!
//! Bootstrap races the identity source's session fetch against a timeout.
//! Whichever finishes first decides the outcome; the other is dropped. The
//! load phase moves from `Checking` to `Ready` exactly once, whatever the
//! outcome, so the loading screen never hangs.

use std::future::Future;
use std::time::Duration;

use hub_model::Session;
use serde::Serialize;

use crate::error::IdentityError;
use crate::identity::IdentitySource;

/// Loading phase of the hub.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// Identity not known yet; the access guard is suspended.
    #[default]
    Checking,
    Ready,
}

/// Result of [`first_wins`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Race<T> {
    Completed(T),
    TimedOut,
}

/// Run `future` until it completes or `limit` elapses, whichever is first.
///
/// On timeout the future is dropped, so a result it would have produced later
/// can never be observed.
pub async fn first_wins<F: Future>(future: F, limit: Duration) -> Race<F::Output> {
    match tokio::time::timeout(limit, future).await {
        Ok(output) => Race::Completed(output),
        Err(_) => Race::TimedOut,
    }
}

/// What the bootstrap fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapOutcome {
    /// A signed-in session.
    Session(Session),
    /// The fetch succeeded but nobody is signed in.
    NoSession,
    TimedOut,
    Failed(IdentityError),
}

impl BootstrapOutcome {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Session(session) => Some(session),
            _ => None,
        }
    }

    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::NoSession => "no-session",
            Self::TimedOut => "timed-out",
            Self::Failed(_) => "failed",
        }
    }
}

/// Fetch the session from `source`, giving up after `limit`.
pub async fn fetch_with_timeout<S: IdentitySource>(source: &S, limit: Duration) -> BootstrapOutcome {
    match first_wins(source.fetch_session(), limit).await {
        Race::Completed(Ok(Some(session))) => BootstrapOutcome::Session(session),
        Race::Completed(Ok(None)) => BootstrapOutcome::NoSession,
        Race::Completed(Err(err)) => {
            tracing::warn!(error = %err, "session fetch failed, continuing anonymously");
            BootstrapOutcome::Failed(err)
        }
        Race::TimedOut => {
            tracing::warn!(
                timeout_ms = limit.as_millis() as u64,
                "session fetch timed out, continuing anonymously"
            );
            BootstrapOutcome::TimedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn faster_future_wins() {
        let race = first_wins(async { 7 }, Duration::from_millis(10)).await;
        assert_eq!(race, Race::Completed(7));
    }

    #[tokio::test(start_paused = true)]
    async fn slower_future_loses_and_is_dropped() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        };
        let race = first_wins(slow, Duration::from_millis(3_500)).await;
        assert_eq!(race, Race::TimedOut);
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(BootstrapOutcome::TimedOut.label(), "timed-out");
        assert_eq!(BootstrapOutcome::NoSession.session(), None);
        let session = Session::new("u-1");
        assert_eq!(
            BootstrapOutcome::Session(session.clone()).session(),
            Some(&session)
        );
    }
}
