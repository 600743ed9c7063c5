//! Access guard.
//!
//! Decides whether the current screen may stay mounted for a role. The rule
//! only ever relocates into the role's own namespace, so applying it to its
//! own result is always `Allow`.

use hub_model::{Namespace, Role, ScreenId};

/// Outcome of evaluating the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Screen and role are consistent.
    Allow,
    /// Move to this screen without touching history.
    Relocate(ScreenId),
}

/// Evaluate the guard for a screen/role pair.
///
/// - teacher on a student screen goes to the teacher dashboard
/// - student on a teacher screen goes to the student dashboard
/// - everything else is allowed (including anonymous visitors, who are
///   handled by screen resolution instead)
pub fn evaluate(screen: ScreenId, role: Role) -> GuardDecision {
    match (role, screen.namespace()) {
        (Role::Teacher, Namespace::Student) => GuardDecision::Relocate(ScreenId::TeacherDashboard),
        (Role::Student, Namespace::Teacher) => GuardDecision::Relocate(ScreenId::StudentDashboard),
        _ => GuardDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_is_moved_off_student_screens() {
        assert_eq!(
            evaluate(ScreenId::StudentMaterials, Role::Teacher),
            GuardDecision::Relocate(ScreenId::TeacherDashboard)
        );
    }

    #[test]
    fn student_is_moved_off_teacher_screens() {
        assert_eq!(
            evaluate(ScreenId::TeacherGrading, Role::Student),
            GuardDecision::Relocate(ScreenId::StudentDashboard)
        );
    }

    #[test]
    fn shared_and_public_screens_are_allowed() {
        for role in [Role::Teacher, Role::Student, Role::None] {
            assert_eq!(evaluate(ScreenId::Settings, role), GuardDecision::Allow);
            assert_eq!(evaluate(ScreenId::Home, role), GuardDecision::Allow);
            assert_eq!(evaluate(ScreenId::StudentLogin, role), GuardDecision::Allow);
        }
    }

    #[test]
    fn anonymous_is_never_relocated() {
        for screen in ScreenId::ALL {
            assert_eq!(evaluate(screen, Role::None), GuardDecision::Allow);
        }
    }

    #[test]
    fn relocation_target_is_stable() {
        for role in [Role::Teacher, Role::Student, Role::None] {
            for screen in ScreenId::ALL {
                if let GuardDecision::Relocate(target) = evaluate(screen, role) {
                    assert_eq!(evaluate(target, role), GuardDecision::Allow);
                }
            }
        }
    }
}
