//! Screen resolution.
//!
//! Maps the current screen and principal to what the host should mount, and
//! to the chrome drawn around it.

use hub_model::{Principal, Role, ScreenId};
use serde::Serialize;

/// What the host mounts for the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mount", rename_all = "kebab-case")]
pub enum Mount {
    /// The landing page.
    Landing,
    /// The screen's own view.
    Screen { screen: ScreenId },
    /// Render nothing. Only reachable for a momentary role/namespace mismatch
    /// that the access guard is about to correct.
    Nothing,
    /// Not-found view; its single action leads to `back`.
    NotFound { back: ScreenId },
}

impl Mount {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Screen { .. } => "screen",
            Self::Nothing => "nothing",
            Self::NotFound { .. } => "not-found",
        }
    }
}

/// Decorations around the mounted screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chrome {
    pub navbar: bool,
    pub footer: bool,
    pub custom_cursor: bool,
    pub scroll_to_top: bool,
}

impl Chrome {
    pub const fn for_screen(screen: ScreenId) -> Self {
        let home = screen.is_home();
        let login = screen.is_login();
        Self {
            navbar: home,
            footer: home,
            custom_cursor: !login,
            scroll_to_top: !login,
        }
    }
}

/// Decide what to mount for `screen`.
pub fn resolve_mount(screen: ScreenId, principal: &Principal) -> Mount {
    let role = principal.role;
    match screen {
        ScreenId::Home => Mount::Landing,
        ScreenId::TeacherLogin | ScreenId::StudentLogin => Mount::Screen { screen },
        ScreenId::NotFound => not_found(role),
        _ if !principal.is_signed_in() => Mount::Landing,
        ScreenId::Settings if role.is_known() => Mount::Screen { screen },
        ScreenId::Settings => Mount::Nothing,
        _ if role.namespace() == Some(screen.namespace()) => Mount::Screen { screen },
        _ => Mount::Nothing,
    }
}

/// Decide what to mount for a raw path. Unknown paths resolve to not-found.
pub fn resolve_path(path: &str, principal: &Principal) -> Mount {
    match path.parse::<ScreenId>() {
        Ok(screen) => resolve_mount(screen, principal),
        Err(err) => {
            tracing::debug!(error = %err, "unresolved path");
            not_found(principal.role)
        }
    }
}

fn not_found(role: Role) -> Mount {
    Mount::NotFound {
        back: role.home_screen(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> Principal {
        Principal::signed_in("t-1", Role::Teacher)
    }

    fn student() -> Principal {
        Principal::signed_in("s-1", Role::Student)
    }

    #[test]
    fn public_screens_mount_for_everyone() {
        for principal in [Principal::anonymous(), teacher(), student()] {
            assert_eq!(resolve_mount(ScreenId::Home, &principal), Mount::Landing);
            assert_eq!(
                resolve_mount(ScreenId::TeacherLogin, &principal),
                Mount::Screen {
                    screen: ScreenId::TeacherLogin
                }
            );
        }
    }

    #[test]
    fn anonymous_visitor_sees_landing_on_protected_screens() {
        let anonymous = Principal::anonymous();
        assert_eq!(resolve_mount(ScreenId::TeacherGrading, &anonymous), Mount::Landing);
        assert_eq!(resolve_mount(ScreenId::Settings, &anonymous), Mount::Landing);
    }

    #[test]
    fn namespace_mismatch_renders_nothing() {
        assert_eq!(
            resolve_mount(ScreenId::StudentMaterials, &teacher()),
            Mount::Nothing
        );
        assert_eq!(
            resolve_mount(ScreenId::StudentMaterials, &student()),
            Mount::Screen {
                screen: ScreenId::StudentMaterials
            }
        );
    }

    #[test]
    fn settings_requires_a_role() {
        assert_eq!(
            resolve_mount(ScreenId::Settings, &student()),
            Mount::Screen {
                screen: ScreenId::Settings
            }
        );
        let roleless = Principal::signed_in("x-1", Role::None);
        assert_eq!(resolve_mount(ScreenId::Settings, &roleless), Mount::Nothing);
    }

    #[test]
    fn unknown_path_resolves_to_not_found() {
        assert_eq!(
            resolve_path("/gradebook", &teacher()),
            Mount::NotFound {
                back: ScreenId::TeacherDashboard
            }
        );
        assert_eq!(
            resolve_path("404", &Principal::anonymous()),
            Mount::NotFound {
                back: ScreenId::Home
            }
        );
    }

    #[test]
    fn chrome_depends_on_screen_kind() {
        let home = Chrome::for_screen(ScreenId::Home);
        assert!(home.navbar && home.footer && home.custom_cursor);

        let login = Chrome::for_screen(ScreenId::StudentLogin);
        assert!(!login.navbar && !login.custom_cursor && !login.scroll_to_top);

        let dashboard = Chrome::for_screen(ScreenId::TeacherDashboard);
        assert!(!dashboard.navbar && dashboard.scroll_to_top);
    }
}
