//! Messages sent by the screen host.
//!
//! Every callback a mounted screen can fire is one variant here. The
//! controller consumes them in `NavigationController::update`.

use hub_model::{NavContext, Role, ScreenId};
use serde::{Deserialize, Serialize};

/// What a student-dashboard item opens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    #[default]
    Assignment,
    Discussion,
}

impl AssignmentKind {
    /// Screen that shows this kind of item.
    pub const fn screen(&self) -> ScreenId {
        match self {
            Self::Assignment => ScreenId::StudentAssignment,
            Self::Discussion => ScreenId::StudentDiscussion,
        }
    }
}

/// Host callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavMessage {
    /// `onNavigateTo(target, context?)`.
    NavigateTo {
        target: ScreenId,
        context: Option<NavContext>,
    },
    /// `onBack()`.
    Back,
    /// `onLogout()`. Needs the identity source, see [`Command::SignOut`].
    Logout,
    /// Dashboard item selected; carries the item id into the next screen.
    OpenAssignment { id: String, kind: AssignmentKind },
    /// A login form finished successfully.
    LoginSucceeded(Role),
    /// The single action on the not-found screen.
    NotFoundBack,

    // Overlays
    OpenRoleSelection,
    CloseRoleSelection,
    /// Role picked in the role-selection prompt.
    ChooseRole(Role),
    OpenNotifications,
    CloseNotifications,
}

impl NavMessage {
    pub fn navigate(target: ScreenId) -> Self {
        Self::NavigateTo {
            target,
            context: None,
        }
    }

    pub fn navigate_with(target: ScreenId, context: NavContext) -> Self {
        Self::NavigateTo {
            target,
            context: Some(context),
        }
    }

    pub fn open_assignment(id: impl Into<String>, kind: AssignmentKind) -> Self {
        Self::OpenAssignment {
            id: id.into(),
            kind,
        }
    }
}

/// Follow-up work the controller cannot do synchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Command {
    None,
    /// Sign out at the identity source, then call
    /// `NavigationController::reset_on_sign_out` whatever the outcome.
    SignOut,
}
