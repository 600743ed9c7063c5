//! Role resolution from identity metadata.

use hub_model::{Metadata, Role, Session};
use serde_json::Value;

/// Metadata key holding the role.
pub const ROLE_KEY: &str = "role";

/// Resolve the role of a session.
///
/// The user-level bag wins when it carries a role at all; the application-level
/// bag is consulted only when the user-level value is absent. A present but
/// unrecognised value yields `Role::None` without falling back.
pub fn resolve_role(session: &Session) -> Role {
    resolve_role_from(&session.user_metadata, &session.app_metadata)
}

/// Resolve a role from the two metadata bags.
pub fn resolve_role_from(user: &Metadata, app: &Metadata) -> Role {
    let value = user
        .get(ROLE_KEY)
        .filter(|value| is_present(value))
        .or_else(|| app.get(ROLE_KEY));
    match value.and_then(Value::as_str) {
        Some("teacher") => Role::Teacher,
        Some("student") => Role::Student,
        _ => Role::None,
    }
}

/// Null, `false`, `0` and `""` count as "not set".
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => Metadata::new(),
        }
    }

    #[test]
    fn user_metadata_wins() {
        let user = bag(json!({ "role": "student" }));
        let app = bag(json!({ "role": "teacher" }));
        assert_eq!(resolve_role_from(&user, &app), Role::Student);
    }

    #[test]
    fn falls_back_to_app_metadata() {
        let app = bag(json!({ "role": "teacher" }));
        assert_eq!(resolve_role_from(&Metadata::new(), &app), Role::Teacher);
    }

    #[test]
    fn empty_or_null_user_role_falls_back() {
        let app = bag(json!({ "role": "teacher" }));
        for user in [json!({ "role": "" }), json!({ "role": null }), json!({ "role": false })] {
            assert_eq!(resolve_role_from(&bag(user), &app), Role::Teacher);
        }
    }

    #[test]
    fn zero_user_role_falls_back() {
        let app = bag(json!({ "role": "teacher" }));
        for user in [json!({ "role": 0 }), json!({ "role": 0.0 })] {
            assert_eq!(resolve_role_from(&bag(user), &app), Role::Teacher);
        }
    }

    #[test]
    fn non_zero_number_does_not_fall_back() {
        let user = bag(json!({ "role": 2 }));
        let app = bag(json!({ "role": "teacher" }));
        assert_eq!(resolve_role_from(&user, &app), Role::None);
    }

    #[test]
    fn unknown_user_role_does_not_fall_back() {
        let user = bag(json!({ "role": "admin" }));
        let app = bag(json!({ "role": "teacher" }));
        assert_eq!(resolve_role_from(&user, &app), Role::None);
    }

    #[test]
    fn only_exact_literals_are_recognised() {
        for raw in [json!("Teacher"), json!(" student"), json!(1), json!(["teacher"])] {
            let user = bag(json!({ "role": raw }));
            assert_eq!(resolve_role_from(&user, &Metadata::new()), Role::None);
        }
    }

    #[test]
    fn missing_everywhere_is_none() {
        assert_eq!(resolve_role(&Session::new("u-1")), Role::None);
    }
}
