//! History and access-guard behaviour of the navigation controller.

use hub_model::{NavContext, Role, ScreenId, Session};
use hub_nav::{
    AssignmentKind, BootstrapOutcome, Effect, GuardDecision, NavMessage, NavigationController,
    RelocationReason, guard,
};
use proptest::prelude::*;

fn ready_as(role: Role) -> NavigationController {
    let mut controller = NavigationController::new();
    let outcome = match role {
        Role::None => BootstrapOutcome::NoSession,
        role => BootstrapOutcome::Session(Session::new("u-1").with_user_field("role", role.as_str())),
    };
    controller.complete_bootstrap(&outcome);
    controller.take_effects();
    controller
}

fn any_screen() -> impl Strategy<Value = ScreenId> {
    prop::sample::select(ScreenId::ALL.to_vec())
}

fn any_role() -> impl Strategy<Value = Role> {
    prop::sample::select(vec![Role::Teacher, Role::Student, Role::None])
}

proptest! {
    #[test]
    fn back_undoes_navigate(path in prop::collection::vec(any_screen(), 1..24)) {
        let mut controller = ready_as(Role::None);
        for target in path {
            if target == controller.current() {
                continue;
            }
            let before = controller.current();
            let depth = controller.history().len();

            controller.navigate_to(target);
            prop_assert_eq!(controller.history().len(), depth + 1);

            controller.go_back();
            prop_assert_eq!(controller.current(), before);
            prop_assert_eq!(controller.history().len(), depth);

            controller.navigate_to(target);
        }
    }

    #[test]
    fn sign_out_always_clears_history(
        role in any_role(),
        path in prop::collection::vec(any_screen(), 0..16),
    ) {
        let mut controller = ready_as(role);
        for target in path {
            controller.navigate_to(target);
        }
        controller.reset_on_sign_out();
        prop_assert!(controller.history().is_empty());
        prop_assert_eq!(controller.current(), ScreenId::Home);
        prop_assert_eq!(controller.role(), Role::None);
    }

    #[test]
    fn guard_target_is_always_allowed(screen in any_screen(), role in any_role()) {
        if let GuardDecision::Relocate(target) = guard::evaluate(screen, role) {
            prop_assert_eq!(guard::evaluate(target, role), GuardDecision::Allow);
        }
    }

    #[test]
    fn role_never_rests_on_foreign_namespace(
        role in prop::sample::select(vec![Role::Teacher, Role::Student]),
        path in prop::collection::vec(any_screen(), 0..16),
    ) {
        let mut controller = ready_as(role);
        for target in path {
            controller.navigate_to(target);
            prop_assert_eq!(guard::evaluate(controller.current(), role), GuardDecision::Allow);
        }
    }
}

#[test]
fn back_with_empty_history_goes_to_teacher_dashboard() {
    let mut controller = ready_as(Role::Teacher);
    assert!(controller.history().is_empty());
    controller.go_back();
    assert_eq!(controller.current(), ScreenId::TeacherDashboard);
    assert!(controller.history().is_empty());
}

#[test]
fn reselecting_current_screen_leaves_history_unchanged() {
    let mut controller = ready_as(Role::None);
    controller.navigate_to(ScreenId::Settings);
    assert_eq!(controller.history(), &[ScreenId::Home]);

    controller.navigate_to(ScreenId::Settings);
    assert_eq!(controller.current(), ScreenId::Settings);
    assert_eq!(controller.history(), &[ScreenId::Home]);

    controller.go_back();
    assert_eq!(controller.current(), ScreenId::Home);
    assert!(controller.history().is_empty());
}

#[test]
fn teacher_on_student_screen_is_relocated_without_push() {
    let mut controller = ready_as(Role::Teacher);
    controller.navigate_to(ScreenId::Settings);
    controller.take_effects();

    controller.navigate_to(ScreenId::StudentMaterials);
    assert_eq!(controller.current(), ScreenId::TeacherDashboard);
    assert_eq!(
        controller.history(),
        &[ScreenId::TeacherDashboard, ScreenId::Settings]
    );
    assert_eq!(
        controller.take_effects(),
        vec![
            Effect::ResetScroll,
            Effect::Relocated {
                from: ScreenId::StudentMaterials,
                to: ScreenId::TeacherDashboard,
                reason: RelocationReason::AccessGuard,
            },
        ]
    );

    controller.go_back();
    assert_eq!(controller.current(), ScreenId::Settings);
}

#[test]
fn selected_resource_survives_until_overwritten() {
    let mut controller = ready_as(Role::Student);
    controller.update(NavMessage::open_assignment("A1", AssignmentKind::Assignment));
    controller.navigate_to(ScreenId::StudentMaterials);
    assert_eq!(
        controller.context().selected_resource_id.as_deref(),
        Some("A1")
    );

    controller.navigate_with(ScreenId::StudentDiscussion, NavContext::resource("D1"));
    assert_eq!(controller.props().selected_resource_id.as_deref(), Some("D1"));
}

#[test]
fn guard_rerun_on_consistent_state_is_noop() {
    let mut controller = ready_as(Role::Student);
    controller.navigate_to(ScreenId::StudentProgress);
    let before = controller.snapshot();
    controller.take_effects();

    assert_eq!(controller.enforce_access(), None);
    assert_eq!(controller.snapshot(), before);
    assert!(controller.take_effects().is_empty());
}

#[test]
fn snapshot_serializes_for_hosts() {
    let controller = ready_as(Role::Student);
    let value = serde_json::to_value(controller.snapshot()).expect("serialize snapshot");
    assert_eq!(value["navigation"]["current"], "student-dashboard");
    assert_eq!(value["phase"], "ready");
    assert_eq!(value["principal"]["role"], "student");
}
