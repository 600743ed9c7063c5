//! Drive a hub through a replay script.

use hub_model::{AuthChange, AuthEvent, NavContext, Role, ScreenId};
use hub_nav::{BootstrapReport, Effect, Hub, HubConfig, MemoryIdentitySource, NavMessage};
use serde::Serialize;

use crate::script::{ReplayScript, Step, session_for};

/// State of the hub after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRow {
    pub step: usize,
    pub action: &'static str,
    pub current: ScreenId,
    pub depth: usize,
    pub resource: Option<String>,
    pub role: Role,
    pub effects: Vec<String>,
}

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub bootstrap: BootstrapReport,
    pub steps: Vec<StepRow>,
}

/// Run `script` to completion.
pub async fn run_script(script: &ReplayScript, config: HubConfig) -> ReplayOutcome {
    let source = script.identity.build();
    let driver = source.clone();
    let mut hub = Hub::new(source, config).starting_at(script.start);

    let bootstrap = hub.start().await;
    hub.take_effects();

    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = index + 1, action = step.action(), "replay step");
        apply_step(&mut hub, &driver, step).await;
        hub.drain_identity_changes();
        steps.push(row(index + 1, step.action(), &mut hub));
    }
    hub.shutdown();

    ReplayOutcome { bootstrap, steps }
}

async fn apply_step(hub: &mut Hub<MemoryIdentitySource>, driver: &MemoryIdentitySource, step: &Step) {
    match step {
        Step::Navigate { to, resource } => {
            let message = match resource {
                Some(id) => NavMessage::navigate_with(*to, NavContext::resource(id.clone())),
                None => NavMessage::navigate(*to),
            };
            hub.dispatch(message).await;
        }
        Step::Back => hub.dispatch(NavMessage::Back).await,
        Step::SignIn { role, user_id } => {
            driver.sign_in(session_for(*role, user_id.as_deref(), None));
        }
        Step::SignOut => driver.emit(AuthChange::signed_out()),
        Step::Logout => hub.dispatch(NavMessage::Logout).await,
        Step::OpenAssignment { id, kind } => {
            hub.dispatch(NavMessage::open_assignment(id.clone(), *kind))
                .await;
        }
        Step::OpenRoleSelection => hub.dispatch(NavMessage::OpenRoleSelection).await,
        Step::ChooseRole { role } => hub.dispatch(NavMessage::ChooseRole(*role)).await,
        Step::OpenNotifications => hub.dispatch(NavMessage::OpenNotifications).await,
        Step::CloseNotifications => hub.dispatch(NavMessage::CloseNotifications).await,
        Step::Refresh => match driver.session() {
            Some(session) => driver.emit(AuthChange::new(AuthEvent::TokenRefreshed, Some(session))),
            None => tracing::warn!("refresh without a session, skipped"),
        },
    }
}

fn row(step: usize, action: &'static str, hub: &mut Hub<MemoryIdentitySource>) -> StepRow {
    let effects = hub.take_effects().iter().map(describe_effect).collect();
    let controller = hub.controller();
    StepRow {
        step,
        action,
        current: controller.current(),
        depth: controller.navigation().depth(),
        resource: controller.context().selected_resource_id.clone(),
        role: controller.role(),
        effects,
    }
}

/// Short text for an effect, as shown in replay output.
pub fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::ResetScroll => "scroll-top".to_string(),
        Effect::Relocated { to, .. } => format!("relocated:{to}"),
    }
}

/// One plain-text line per step.
pub fn render_lines(steps: &[StepRow]) -> Vec<String> {
    steps
        .iter()
        .map(|row| {
            let effects = if row.effects.is_empty() {
                "-".to_string()
            } else {
                row.effects.join(",")
            };
            format!(
                "{:02} {:<19} {:<20} depth={} resource={} role={} effects={}",
                row.step,
                row.action,
                row.current.as_str(),
                row.depth,
                row.resource.as_deref().unwrap_or("-"),
                row.role,
                effects
            )
        })
        .collect()
}
