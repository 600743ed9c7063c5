//! Replay scripts end to end.

use std::time::Duration;

use hub_cli::replay::{render_lines, run_script};
use hub_cli::script::ReplayScript;
use hub_model::{Role, ScreenId};
use hub_nav::HubConfig;

const TEACHER_THEN_STUDENT: &str = r#"
[identity]
role = "teacher"

[[steps]]
action = "navigate"
to = "teacher-grading"

[[steps]]
action = "navigate"
to = "student-materials"

[[steps]]
action = "back"

[[steps]]
action = "logout"

[[steps]]
action = "sign-in"
role = "student"

[[steps]]
action = "open-assignment"
id = "A1"

[[steps]]
action = "navigate"
to = "student-materials"
"#;

#[tokio::test(start_paused = true)]
async fn teacher_session_then_student_sign_in() {
    let script = ReplayScript::from_toml(TEACHER_THEN_STUDENT).expect("parse script");
    let outcome = run_script(&script, HubConfig::default()).await;

    assert_eq!(outcome.bootstrap.outcome, "session");
    assert_eq!(outcome.bootstrap.current, ScreenId::TeacherDashboard);
    insta::assert_snapshot!(render_lines(&outcome.steps).join("\n"), @r"
    01 navigate            teacher-grading      depth=1 resource=- role=teacher effects=scroll-top
    02 navigate            teacher-dashboard    depth=2 resource=- role=teacher effects=scroll-top,relocated:teacher-dashboard
    03 back                teacher-grading      depth=1 resource=- role=teacher effects=scroll-top
    04 logout              home                 depth=0 resource=- role=none effects=-
    05 sign-in             student-dashboard    depth=0 resource=- role=student effects=relocated:student-dashboard
    06 open-assignment     student-assignment   depth=1 resource=A1 role=student effects=scroll-top
    07 navigate            student-materials    depth=2 resource=A1 role=student effects=scroll-top
    ");
}

#[tokio::test(start_paused = true)]
async fn hanging_identity_times_out_to_anonymous() {
    let script = ReplayScript::from_toml(
        r#"
        start = "teacher-grading"

        [identity]
        role = "teacher"
        fetch = "hang"

        [[steps]]
        action = "open-role-selection"

        [[steps]]
        action = "choose-role"
        role = "student"
        "#,
    )
    .expect("parse script");
    let config = HubConfig::default().with_session_timeout(Duration::from_millis(1_200));
    let outcome = run_script(&script, config).await;

    assert_eq!(outcome.bootstrap.outcome, "timed-out");
    assert!(outcome.bootstrap.elapsed >= Duration::from_millis(1_200));
    assert!(outcome.bootstrap.elapsed < Duration::from_millis(1_300));
    assert_eq!(outcome.bootstrap.current, ScreenId::TeacherGrading);
    insta::assert_snapshot!(render_lines(&outcome.steps).join("\n"), @r"
    01 open-role-selection teacher-grading      depth=0 resource=- role=none effects=-
    02 choose-role         student-login        depth=1 resource=- role=none effects=scroll-top
    ");
}

#[tokio::test(start_paused = true)]
async fn failed_logout_still_resets() {
    let script = ReplayScript::from_toml(
        r#"
        [identity]
        role = "student"
        fail_sign_out = "backend unavailable"

        [[steps]]
        action = "navigate"
        to = "student-lab"

        [[steps]]
        action = "logout"

        [[steps]]
        action = "refresh"
        "#,
    )
    .expect("parse script");
    let outcome = run_script(&script, HubConfig::default()).await;

    let logout = &outcome.steps[1];
    assert_eq!(logout.current, ScreenId::Home);
    assert_eq!(logout.depth, 0);
    assert_eq!(logout.role, Role::None);

    // The source still holds the session, so a refresh restores the role in place.
    let refresh = &outcome.steps[2];
    assert_eq!(refresh.current, ScreenId::Home);
    assert_eq!(refresh.role, Role::Student);
}

#[tokio::test(start_paused = true)]
async fn replay_serializes_to_json() {
    let script = ReplayScript::from_toml(
        "[[steps]]\naction = \"navigate\"\nto = \"teacher-login\"\n",
    )
    .expect("parse script");
    let outcome = run_script(&script, HubConfig::default()).await;
    let value = serde_json::to_value(&outcome).expect("serialize outcome");

    assert_eq!(value["bootstrap"]["outcome"], "no-session");
    assert_eq!(value["bootstrap"]["phase"], "ready");
    assert_eq!(value["steps"][0]["current"], "teacher-login");
    assert_eq!(value["steps"][0]["effects"][0], "scroll-top");
}
