//! Replay script format.
//!
//! ```toml
//! [identity]
//! role = "teacher"
//! fetch = "resolve"
//!
//! [[steps]]
//! action = "navigate"
//! to = "teacher-grading"
//!
//! [[steps]]
//! action = "back"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use hub_model::{Role, ScreenId, Session};
use hub_nav::{AssignmentKind, FetchBehavior, MemoryIdentitySource};
use serde::Deserialize;

/// A scripted session against an in-memory identity source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    #[serde(default)]
    pub identity: IdentitySetup,
    /// Screen the hub starts on.
    #[serde(default)]
    pub start: ScreenId,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl ReplayScript {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read replay script {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parse replay script {}", path.display()))
    }
}

/// How the session fetch answers during bootstrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    #[default]
    Resolve,
    Delay,
    Hang,
    Fail,
}

/// Initial state of the in-memory identity source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentitySetup {
    /// Role of the existing session; no session when absent.
    pub role: Option<Role>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub fetch: FetchMode,
    /// Delay for `fetch = "delay"`.
    pub delay_ms: u64,
    /// Make sign-out fail with this message.
    pub fail_sign_out: Option<String>,
}

impl IdentitySetup {
    /// Build the identity source this setup describes.
    pub fn build(&self) -> MemoryIdentitySource {
        let source = match self.role {
            Some(role) => MemoryIdentitySource::with_session(session_for(
                role,
                self.user_id.as_deref(),
                self.email.as_deref(),
            )),
            None => MemoryIdentitySource::new(),
        };
        let behavior = match self.fetch {
            FetchMode::Resolve => FetchBehavior::Resolve,
            FetchMode::Delay => FetchBehavior::Delay(Duration::from_millis(self.delay_ms)),
            FetchMode::Hang => FetchBehavior::Hang,
            FetchMode::Fail => FetchBehavior::Fail("scripted fetch failure".to_string()),
        };
        source.set_fetch_behavior(behavior);
        if let Some(message) = &self.fail_sign_out {
            source.fail_sign_out(message.clone());
        }
        source
    }
}

/// Session carrying `role` in its user metadata.
pub fn session_for(role: Role, user_id: Option<&str>, email: Option<&str>) -> Session {
    let user_id = user_id.map_or_else(|| format!("{role}-1"), str::to_string);
    let session = Session::new(user_id).with_user_field("role", role.as_str());
    match email {
        Some(email) => session.with_email(email),
        None => session,
    }
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Step {
    Navigate {
        to: ScreenId,
        resource: Option<String>,
    },
    Back,
    /// Identity source reports a sign-in.
    SignIn {
        role: Role,
        user_id: Option<String>,
    },
    /// Identity source reports a sign-out (session expired elsewhere).
    SignOut,
    /// The host's logout button.
    Logout,
    OpenAssignment {
        id: String,
        #[serde(default)]
        kind: AssignmentKind,
    },
    OpenRoleSelection,
    ChooseRole {
        role: Role,
    },
    OpenNotifications,
    CloseNotifications,
    /// Identity source refreshes the token of the current session.
    Refresh,
}

impl Step {
    /// Action name as written in the script.
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Back => "back",
            Self::SignIn { .. } => "sign-in",
            Self::SignOut => "sign-out",
            Self::Logout => "logout",
            Self::OpenAssignment { .. } => "open-assignment",
            Self::OpenRoleSelection => "open-role-selection",
            Self::ChooseRole { .. } => "choose-role",
            Self::OpenNotifications => "open-notifications",
            Self::CloseNotifications => "close-notifications",
            Self::Refresh => "refresh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_shape() {
        let script = ReplayScript::from_toml(
            r#"
            start = "teacher-login"

            [identity]
            fetch = "hang"

            [[steps]]
            action = "navigate"
            to = "student-materials"

            [[steps]]
            action = "open-assignment"
            id = "D4"
            kind = "discussion"

            [[steps]]
            action = "sign-in"
            role = "teacher"

            [[steps]]
            action = "logout"
            "#,
        )
        .expect("parse script");

        assert_eq!(script.start, ScreenId::TeacherLogin);
        assert_eq!(script.identity.fetch, FetchMode::Hang);
        assert_eq!(
            script.steps,
            vec![
                Step::Navigate {
                    to: ScreenId::StudentMaterials,
                    resource: None
                },
                Step::OpenAssignment {
                    id: "D4".to_string(),
                    kind: AssignmentKind::Discussion
                },
                Step::SignIn {
                    role: Role::Teacher,
                    user_id: None
                },
                Step::Logout,
            ]
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = ReplayScript::from_toml("[[steps]]\naction = \"teleport\"\n")
            .expect_err("unknown action");
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn identity_with_role_has_session() {
        let setup = IdentitySetup {
            role: Some(Role::Student),
            ..IdentitySetup::default()
        };
        let session = setup.build().session().expect("session present");
        assert_eq!(session.user_id, "student-1");
    }
}
