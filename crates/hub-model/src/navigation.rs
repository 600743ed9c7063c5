//! Navigation state types.
//!
//! - `NavContext`: payload carried into the next screen
//! - `NavigationState`: current screen, back history and context
//! - `OverlayState`: transient surfaces drawn over the current screen
//!
//! These are plain data. The controller in `hub-nav` is the only writer.

use serde::{Deserialize, Serialize};

use crate::screen::ScreenId;

/// Per-navigation payload.
///
/// A value set here survives later transitions that do not supply one, so a
/// screen that was not the direct target of a resource-carrying transition
/// must treat it as possibly stale.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavContext {
    /// Assignment or discussion selected on the previous screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_resource_id: Option<String>,
}

impl NavContext {
    /// Context that selects a resource.
    pub fn resource(id: impl Into<String>) -> Self {
        Self {
            selected_resource_id: Some(id.into()),
        }
    }
}

/// Current screen plus back history.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current: ScreenId,
    /// Back stack; the last entry is the screen `go_back` returns to.
    pub history: Vec<ScreenId>,
    pub context: NavContext,
}

impl NavigationState {
    /// Start on a given screen with empty history.
    pub fn starting_at(screen: ScreenId) -> Self {
        Self {
            current: screen,
            ..Self::default()
        }
    }

    /// Screen `go_back` would return to, if any.
    pub fn previous(&self) -> Option<ScreenId> {
        self.history.last().copied()
    }

    /// Number of screens `go_back` can return through.
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

/// Independent flags for transient surfaces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayState {
    /// "Teacher or student?" prompt on the landing page.
    pub role_selection: bool,
    /// Global notifications panel.
    pub notifications: bool,
}
