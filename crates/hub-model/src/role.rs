//! Roles and the resolved principal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::screen::{Namespace, ScreenId};

/// Role of the signed-in user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    /// Anonymous, or signed in without a recognised role.
    #[default]
    None,
}

impl Role {
    /// Landing screen after sign-in.
    pub const fn dashboard(&self) -> Option<ScreenId> {
        match self {
            Self::Teacher => Some(ScreenId::TeacherDashboard),
            Self::Student => Some(ScreenId::StudentDashboard),
            Self::None => None,
        }
    }

    /// Dashboard for signed-in roles, the landing page otherwise.
    pub const fn home_screen(&self) -> ScreenId {
        match self.dashboard() {
            Some(screen) => screen,
            None => ScreenId::Home,
        }
    }

    /// Login screen for this role.
    pub const fn login_screen(&self) -> Option<ScreenId> {
        match self {
            Self::Teacher => Some(ScreenId::TeacherLogin),
            Self::Student => Some(ScreenId::StudentLogin),
            Self::None => None,
        }
    }

    /// Namespace owned by this role.
    pub const fn namespace(&self) -> Option<Namespace> {
        match self {
            Self::Teacher => Some(Namespace::Teacher),
            Self::Student => Some(Namespace::Student),
            Self::None => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::None => "none",
        }
    }

    /// Check if this is a recognised (non-anonymous) role.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "none" => Ok(Self::None),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

/// Resolved identity of the current user.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity provider user id; `None` for anonymous visitors.
    pub identity_id: Option<String>,
    pub role: Role,
}

impl Principal {
    /// Principal for a visitor who is not signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Principal for a signed-in user.
    pub fn signed_in(identity_id: impl Into<String>, role: Role) -> Self {
        Self {
            identity_id: Some(identity_id.into()),
            role,
        }
    }

    /// Check if an identity is attached.
    pub fn is_signed_in(&self) -> bool {
        self.identity_id.is_some()
    }
}
