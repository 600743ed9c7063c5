//! Hub runtime.
//!
//! [`Hub`] is the process context: it owns the navigation controller, the
//! identity source, the change subscription and the activity sink, and turns
//! the asynchronous parts (bootstrap race, change stream, sign-out) into
//! synchronous controller operations.

use std::time::Duration;

use hub_model::{AuthChange, AuthEvent, Metadata, ScreenId, Session};
use serde::Serialize;
use tokio::time::Instant;

use crate::activity::{ActivityAction, ActivityRecord, ActivitySink, TracingActivitySink};
use crate::bootstrap::{LoadPhase, fetch_with_timeout};
use crate::config::HubConfig;
use crate::controller::{Effect, NavSnapshot, NavigationController};
use crate::identity::{AuthSubscription, IdentitySource};
use crate::message::{Command, NavMessage};
use crate::role::resolve_role;

/// Summary of a completed bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapReport {
    /// `session`, `no-session`, `timed-out` or `failed`.
    pub outcome: &'static str,
    pub phase: LoadPhase,
    pub current: ScreenId,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
    /// Changes that arrived during the fetch and were applied afterwards.
    pub buffered_changes: usize,
}

fn as_millis<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Navigation controller bound to an identity source.
pub struct Hub<S: IdentitySource> {
    controller: NavigationController,
    source: S,
    subscription: Option<AuthSubscription>,
    activity: Box<dyn ActivitySink>,
    config: HubConfig,
    session: Option<Session>,
}

impl<S: IdentitySource> Hub<S> {
    pub fn new(source: S, config: HubConfig) -> Self {
        Self {
            controller: NavigationController::new(),
            source,
            subscription: None,
            activity: Box::new(TracingActivitySink),
            config,
            session: None,
        }
    }

    /// Replace the default tracing sink.
    #[must_use]
    pub fn with_activity_sink(mut self, sink: impl ActivitySink + 'static) -> Self {
        self.activity = Box::new(sink);
        self
    }

    /// Start on a screen other than the landing page.
    #[must_use]
    pub fn starting_at(mut self, screen: ScreenId) -> Self {
        self.controller = NavigationController::starting_at(screen);
        self
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn snapshot(&self) -> NavSnapshot {
        self.controller.snapshot()
    }

    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.controller.take_effects()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Run the bootstrap sequence.
    ///
    /// Subscribes first so no change is missed, then races the session fetch
    /// against the configured timeout. Changes that arrive during the fetch
    /// are applied only after the hub is `Ready`.
    pub async fn start(&mut self) -> BootstrapReport {
        let started = Instant::now();
        if self.subscription.is_none() {
            self.subscription = Some(self.source.subscribe());
        }

        let outcome = fetch_with_timeout(&self.source, self.config.session_timeout()).await;
        if self.controller.complete_bootstrap(&outcome) {
            self.session = outcome.session().cloned();
        }

        let buffered_changes = self.drain_identity_changes();
        let report = BootstrapReport {
            outcome: outcome.label(),
            phase: self.controller.phase(),
            current: self.controller.current(),
            elapsed: started.elapsed(),
            buffered_changes,
        };
        tracing::info!(
            outcome = report.outcome,
            current = %report.current,
            elapsed_ms = report.elapsed.as_millis() as u64,
            buffered = buffered_changes,
            "hub ready"
        );
        report
    }

    /// Apply a host callback.
    pub async fn dispatch(&mut self, message: NavMessage) {
        match self.controller.update(message) {
            Command::None => {}
            Command::SignOut => self.logout().await,
        }
    }

    /// Sign out at the source, then reset locally whatever it answered.
    pub async fn logout(&mut self) {
        self.record(ActivityAction::LoginEvent, "logout");
        if let Err(err) = self.source.sign_out().await {
            tracing::warn!(error = %err, "sign-out failed at identity source, resetting locally");
        }
        self.session = None;
        self.controller.reset_on_sign_out();
    }

    /// Wait for one identity change and apply it.
    ///
    /// Returns `None` when not subscribed or when the source closed the stream.
    pub async fn next_identity_change(&mut self) -> Option<AuthChange> {
        let change = self.subscription.as_mut()?.recv().await?;
        self.apply_identity_change(&change);
        Some(change)
    }

    /// Apply every change already delivered, without waiting.
    pub fn drain_identity_changes(&mut self) -> usize {
        let mut applied = 0;
        while let Some(change) = self.subscription.as_mut().and_then(AuthSubscription::try_recv) {
            self.apply_identity_change(&change);
            applied += 1;
        }
        applied
    }

    fn apply_identity_change(&mut self, change: &AuthChange) {
        if !self.controller.is_ready() {
            tracing::debug!(event = %change.event, "identity change before bootstrap, ignored");
            return;
        }
        self.session.clone_from(&change.session);
        self.controller.apply_auth_change(change);
        match change.event {
            AuthEvent::SignedIn => {
                let role = change.session.as_ref().map(resolve_role).unwrap_or_default();
                let mut metadata = Metadata::new();
                metadata.insert("role".to_string(), role.as_str().into());
                self.record_with(ActivityAction::LoginEvent, "signed in", metadata);
            }
            AuthEvent::SignedOut => self.record(ActivityAction::LoginEvent, "signed out"),
            _ => {}
        }
    }

    /// Tear down the identity subscription. Also happens on drop.
    pub fn shutdown(&mut self) {
        if self.subscription.take().is_some() {
            tracing::debug!("identity subscription closed");
        }
    }

    fn record(&self, action: ActivityAction, details: &str) {
        self.record_with(action, details, Metadata::new());
    }

    fn record_with(&self, action: ActivityAction, details: &str, metadata: Metadata) {
        if !self.config.record_activity {
            return;
        }
        self.activity
            .record(ActivityRecord::new(self.session.as_ref(), action, details, metadata));
    }
}
