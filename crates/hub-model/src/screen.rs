//! Screen identifiers.
//!
//! This module contains the closed set of screens the hub can show:
//! - `ScreenId`: every reachable screen
//! - `Namespace`: which audience owns a screen (public, teacher, student, shared)
//!
//! Ownership is a static per-variant table. Nothing in the hub decides access
//! by looking at the path string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

// =============================================================================
// NAMESPACE
// =============================================================================

/// Audience that owns a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Reachable without signing in (landing page, login screens, not-found).
    Public,
    /// Teacher workspace.
    Teacher,
    /// Student workspace.
    Student,
    /// Reachable by any signed-in role.
    Shared,
}

impl Namespace {
    /// Lowercase label, as used in logs and the CLI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Shared => "shared",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SCREEN ID
// =============================================================================

/// Every screen the hub can mount.
///
/// Serialized as its kebab-case path (`teacher-dashboard`, `student-lab`, ...).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    /// Landing page.
    #[default]
    Home,
    TeacherLogin,
    StudentLogin,
    /// Fallback for paths that do not resolve.
    #[serde(alias = "404")]
    NotFound,

    TeacherDashboard,
    TeacherUpload,
    TeacherAssignments,
    TeacherAnalytics,
    TeacherPersona,
    TeacherDiscussions,
    TeacherGrading,
    TeacherPredictor,

    StudentDashboard,
    /// Assignment workspace; reads the selected resource id.
    StudentAssignment,
    StudentMaterials,
    /// Discussion thread; reads the selected resource id.
    StudentDiscussion,
    StudentProgress,
    StudentLab,
    StudentPeerReview,

    /// Account settings, available to any signed-in role.
    Settings,
}

impl ScreenId {
    /// All screens in declaration order.
    pub const ALL: [ScreenId; 20] = [
        Self::Home,
        Self::TeacherLogin,
        Self::StudentLogin,
        Self::NotFound,
        Self::TeacherDashboard,
        Self::TeacherUpload,
        Self::TeacherAssignments,
        Self::TeacherAnalytics,
        Self::TeacherPersona,
        Self::TeacherDiscussions,
        Self::TeacherGrading,
        Self::TeacherPredictor,
        Self::StudentDashboard,
        Self::StudentAssignment,
        Self::StudentMaterials,
        Self::StudentDiscussion,
        Self::StudentProgress,
        Self::StudentLab,
        Self::StudentPeerReview,
        Self::Settings,
    ];

    /// Owning namespace of this screen.
    pub const fn namespace(&self) -> Namespace {
        match self {
            Self::Home | Self::TeacherLogin | Self::StudentLogin | Self::NotFound => {
                Namespace::Public
            }
            Self::TeacherDashboard
            | Self::TeacherUpload
            | Self::TeacherAssignments
            | Self::TeacherAnalytics
            | Self::TeacherPersona
            | Self::TeacherDiscussions
            | Self::TeacherGrading
            | Self::TeacherPredictor => Namespace::Teacher,
            Self::StudentDashboard
            | Self::StudentAssignment
            | Self::StudentMaterials
            | Self::StudentDiscussion
            | Self::StudentProgress
            | Self::StudentLab
            | Self::StudentPeerReview => Namespace::Student,
            Self::Settings => Namespace::Shared,
        }
    }

    /// Path segment for this screen.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::TeacherLogin => "teacher-login",
            Self::StudentLogin => "student-login",
            Self::NotFound => "not-found",
            Self::TeacherDashboard => "teacher-dashboard",
            Self::TeacherUpload => "teacher-upload",
            Self::TeacherAssignments => "teacher-assignments",
            Self::TeacherAnalytics => "teacher-analytics",
            Self::TeacherPersona => "teacher-persona",
            Self::TeacherDiscussions => "teacher-discussions",
            Self::TeacherGrading => "teacher-grading",
            Self::TeacherPredictor => "teacher-predictor",
            Self::StudentDashboard => "student-dashboard",
            Self::StudentAssignment => "student-assignment",
            Self::StudentMaterials => "student-materials",
            Self::StudentDiscussion => "student-discussion",
            Self::StudentProgress => "student-progress",
            Self::StudentLab => "student-lab",
            Self::StudentPeerReview => "student-peer-review",
            Self::Settings => "settings",
        }
    }

    /// Human-readable title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::TeacherLogin => "Teacher Sign-In",
            Self::StudentLogin => "Student Sign-In",
            Self::NotFound => "Not Found",
            Self::TeacherDashboard => "Teacher Dashboard",
            Self::TeacherUpload => "Asset Hub",
            Self::TeacherAssignments => "Assignment Architect",
            Self::TeacherAnalytics => "Student Analytics",
            Self::TeacherPersona => "AI Persona",
            Self::TeacherDiscussions => "Discussions",
            Self::TeacherGrading => "Grading Hub",
            Self::TeacherPredictor => "Grade Predictor",
            Self::StudentDashboard => "Student Dashboard",
            Self::StudentAssignment => "Assignment",
            Self::StudentMaterials => "Course Materials",
            Self::StudentDiscussion => "Discussion",
            Self::StudentProgress => "Progress",
            Self::StudentLab => "Data Lab",
            Self::StudentPeerReview => "Peer Review",
            Self::Settings => "Settings",
        }
    }

    /// Check if this is one of the login screens.
    pub const fn is_login(&self) -> bool {
        matches!(self, Self::TeacherLogin | Self::StudentLogin)
    }

    /// Check if this is the landing page.
    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Check if this screen is reachable without signing in.
    pub const fn is_public(&self) -> bool {
        matches!(self.namespace(), Namespace::Public)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenId {
    type Err = ModelError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let path = s.trim().trim_start_matches('/');
        if path == "404" {
            return Ok(Self::NotFound);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|screen| screen.as_str() == path)
            .ok_or_else(|| ModelError::UnknownScreen(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_parses_from_its_path() {
        for screen in ScreenId::ALL {
            assert_eq!(screen.as_str().parse::<ScreenId>(), Ok(screen));
        }
    }

    #[test]
    fn not_found_accepts_legacy_alias() {
        assert_eq!("404".parse::<ScreenId>(), Ok(ScreenId::NotFound));
        assert_eq!("/student-lab".parse::<ScreenId>(), Ok(ScreenId::StudentLab));
    }

    #[test]
    fn unknown_path_is_rejected() {
        assert_eq!(
            "teacher-secret".parse::<ScreenId>(),
            Err(ModelError::UnknownScreen("teacher-secret".to_string()))
        );
    }

    #[test]
    fn namespace_table_matches_path_audience() {
        // The table is the source of truth; this only guards against a variant
        // landing in the wrong arm.
        for screen in ScreenId::ALL {
            let path = screen.as_str();
            let expected = match screen.namespace() {
                Namespace::Teacher => path.starts_with("teacher-") && !screen.is_login(),
                Namespace::Student => path.starts_with("student-") && !screen.is_login(),
                Namespace::Public | Namespace::Shared => true,
            };
            assert!(expected, "{path} has namespace {}", screen.namespace());
        }
    }

    #[test]
    fn login_screens_are_public() {
        assert_eq!(ScreenId::TeacherLogin.namespace(), Namespace::Public);
        assert_eq!(ScreenId::StudentLogin.namespace(), Namespace::Public);
        assert_eq!(ScreenId::Settings.namespace(), Namespace::Shared);
    }
}
