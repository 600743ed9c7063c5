//! Sidebar menu entries per role.

use hub_model::{Role, ScreenId};
use serde::Serialize;

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub label: &'static str,
    pub target: ScreenId,
}

const fn item(label: &'static str, target: ScreenId) -> SidebarItem {
    SidebarItem { label, target }
}

const TEACHER_ITEMS: &[SidebarItem] = &[
    item("Dashboard", ScreenId::TeacherDashboard),
    item("Grading Hub", ScreenId::TeacherGrading),
    item("Asset Hub", ScreenId::TeacherUpload),
    item("Architect", ScreenId::TeacherAssignments),
    item("Discussions", ScreenId::TeacherDiscussions),
    item("Students", ScreenId::TeacherAnalytics),
    item("Predictor", ScreenId::TeacherPredictor),
    item("AI Persona", ScreenId::TeacherPersona),
    item("Settings", ScreenId::Settings),
];

const STUDENT_ITEMS: &[SidebarItem] = &[
    item("Dashboard", ScreenId::StudentDashboard),
    item("Materials", ScreenId::StudentMaterials),
    item("Data Lab", ScreenId::StudentLab),
    item("Peer Review", ScreenId::StudentPeerReview),
    item("Progress", ScreenId::StudentProgress),
    item("Settings", ScreenId::Settings),
];

/// Sidebar entries for a role. Anonymous visitors get no sidebar.
pub const fn sidebar_items(role: Role) -> &'static [SidebarItem] {
    match role {
        Role::Teacher => TEACHER_ITEMS,
        Role::Student => STUDENT_ITEMS,
        Role::None => &[],
    }
}

/// Whether the entry pointing at `target` is highlighted on `current`.
///
/// Assignment and discussion screens are opened from the student dashboard,
/// so they keep its entry highlighted.
pub fn is_item_active(target: ScreenId, current: ScreenId) -> bool {
    target == current
        || (target == ScreenId::StudentDashboard
            && matches!(
                current,
                ScreenId::StudentAssignment | ScreenId::StudentDiscussion
            ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{self, GuardDecision};

    #[test]
    fn every_item_is_reachable_by_its_role() {
        for role in [Role::Teacher, Role::Student] {
            for entry in sidebar_items(role) {
                assert_eq!(
                    guard::evaluate(entry.target, role),
                    GuardDecision::Allow,
                    "{} for {role}",
                    entry.label
                );
            }
        }
    }

    #[test]
    fn anonymous_has_no_sidebar() {
        assert!(sidebar_items(Role::None).is_empty());
    }

    #[test]
    fn dashboard_stays_active_inside_assignments() {
        assert!(is_item_active(ScreenId::StudentDashboard, ScreenId::StudentAssignment));
        assert!(is_item_active(ScreenId::StudentDashboard, ScreenId::StudentDiscussion));
        assert!(!is_item_active(ScreenId::StudentMaterials, ScreenId::StudentAssignment));
        assert!(!is_item_active(ScreenId::TeacherDashboard, ScreenId::StudentAssignment));
        assert!(is_item_active(ScreenId::Settings, ScreenId::Settings));
    }
}
