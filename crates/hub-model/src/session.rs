//! Identity-provider session types.
//!
//! These mirror what an auth backend hands to the client: a user id, optional
//! email, and two free-form metadata bags. The role lives in one of the bags.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Free-form metadata bag attached to a user.
pub type Metadata = Map<String, Value>;

/// Signed-in session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Metadata the user controls (set at sign-up).
    #[serde(default)]
    pub user_metadata: Metadata,
    /// Metadata the backend controls.
    #[serde(default)]
    pub app_metadata: Metadata,
}

impl Session {
    /// Session with empty metadata.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set a user-level metadata field.
    #[must_use]
    pub fn with_user_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.user_metadata.insert(key.into(), value.into());
        self
    }

    /// Set an application-level metadata field.
    #[must_use]
    pub fn with_app_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.app_metadata.insert(key.into(), value.into());
        self
    }
}

/// Kind of session change reported by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthEvent {
    /// First report after the subscription opens.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthEvent {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InitialSession => "initial-session",
            Self::SignedIn => "signed-in",
            Self::SignedOut => "signed-out",
            Self::TokenRefreshed => "token-refreshed",
            Self::UserUpdated => "user-updated",
        }
    }

    /// Events that run the sign-in relocation rule.
    pub const fn is_sign_in(&self) -> bool {
        matches!(self, Self::InitialSession | Self::SignedIn)
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the identity change stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthChange {
    pub event: AuthEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

impl AuthChange {
    pub fn signed_in(session: Session) -> Self {
        Self {
            event: AuthEvent::SignedIn,
            session: Some(session),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            event: AuthEvent::SignedOut,
            session: None,
        }
    }

    pub fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }
}
