//! Navigation controller.
//!
//! `NavigationController` owns the navigation state, the principal and the
//! overlay flags. Hosts never mutate these directly: they call an operation
//! (or send a [`NavMessage`]) and read back a [`NavSnapshot`].
//!
//! # Transitions
//!
//! - **navigate**: push the current screen, move to the target, overwrite the
//!   selected resource when one is supplied, close the role-selection prompt.
//! - **back**: pop the history, or fall back to the role's home screen without
//!   pushing anything.
//! - **relocate**: move without touching history. Used by the access guard and
//!   by the sign-in rule.
//!
//! Every operation that can change the current screen or the principal ends
//! by running the access guard, which is skipped while bootstrap is still
//! `Checking`.

use hub_model::{
    AuthChange, AuthEvent, NavContext, NavigationState, OverlayState, Principal, Role, ScreenId,
};
use serde::Serialize;

use crate::bootstrap::{BootstrapOutcome, LoadPhase};
use crate::guard::{self, GuardDecision};
use crate::message::{Command, NavMessage};
use crate::role::resolve_role;

// =============================================================================
// EFFECTS
// =============================================================================

/// Why the current screen changed without a history push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelocationReason {
    /// Signed in while on the landing page or a login screen.
    SignIn,
    /// Role and screen namespace disagreed.
    AccessGuard,
}

/// Observable side effect for the screen host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "kebab-case")]
pub enum Effect {
    /// Scroll the page back to the top.
    ResetScroll,
    /// Current screen changed without a history push.
    Relocated {
        from: ScreenId,
        to: ScreenId,
        reason: RelocationReason,
    },
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Read-only copy of the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSnapshot {
    pub navigation: NavigationState,
    /// `None` while bootstrap is pending.
    pub principal: Option<Principal>,
    pub overlays: OverlayState,
    pub phase: LoadPhase,
}

impl NavSnapshot {
    /// Role of the principal, `Role::None` while pending.
    pub fn role(&self) -> Role {
        self.principal
            .as_ref()
            .map(|principal| principal.role)
            .unwrap_or_default()
    }
}

/// Props handed to the mounted screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenProps {
    pub current_path: ScreenId,
    pub selected_resource_id: Option<String>,
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Process-wide owner of navigation, principal and overlay state.
#[derive(Debug, Default)]
pub struct NavigationController {
    nav: NavigationState,
    principal: Option<Principal>,
    overlays: OverlayState,
    phase: LoadPhase,
    effects: Vec<Effect>,
}

impl NavigationController {
    /// Controller on the landing page, waiting for bootstrap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller on a given screen, waiting for bootstrap.
    pub fn starting_at(screen: ScreenId) -> Self {
        Self {
            nav: NavigationState::starting_at(screen),
            ..Self::default()
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current(&self) -> ScreenId {
        self.nav.current
    }

    pub fn history(&self) -> &[ScreenId] {
        &self.nav.history
    }

    pub fn context(&self) -> &NavContext {
        &self.nav.context
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Role of the principal, `Role::None` while pending or anonymous.
    pub fn role(&self) -> Role {
        self.principal
            .as_ref()
            .map(|principal| principal.role)
            .unwrap_or_default()
    }

    pub fn overlays(&self) -> OverlayState {
        self.overlays
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            navigation: self.nav.clone(),
            principal: self.principal.clone(),
            overlays: self.overlays,
            phase: self.phase,
        }
    }

    pub fn props(&self) -> ScreenProps {
        ScreenProps {
            current_path: self.nav.current,
            selected_resource_id: self.nav.context.selected_resource_id.clone(),
        }
    }

    /// Drain effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// User-initiated navigation without context.
    pub fn navigate_to(&mut self, target: ScreenId) {
        self.transition(target, None);
    }

    /// User-initiated navigation carrying context into the target.
    pub fn navigate_with(&mut self, target: ScreenId, context: NavContext) {
        self.transition(target, Some(context));
    }

    fn transition(&mut self, target: ScreenId, context: Option<NavContext>) {
        let from = self.nav.current;
        // Re-selecting the current screen must not leave it on top of its own history.
        if target != from {
            self.nav.history.push(from);
        }
        self.nav.current = target;
        if let Some(id) = context.and_then(|context| context.selected_resource_id) {
            self.nav.context.selected_resource_id = Some(id);
        }
        self.overlays.role_selection = false;
        self.effects.push(Effect::ResetScroll);
        tracing::debug!(from = %from, to = %target, depth = self.nav.history.len(), "navigate");
        self.enforce_access();
    }

    /// Return to the previous screen, or to the role's home screen when there
    /// is nothing to return to.
    pub fn go_back(&mut self) {
        let from = self.nav.current;
        match self.nav.history.pop() {
            Some(previous) => self.nav.current = previous,
            None => self.nav.current = self.role().home_screen(),
        }
        self.effects.push(Effect::ResetScroll);
        tracing::debug!(from = %from, to = %self.nav.current, depth = self.nav.history.len(), "back");
        self.enforce_access();
    }

    /// Local sign-out: empty history, landing page, anonymous principal.
    pub fn reset_on_sign_out(&mut self) {
        self.nav.history.clear();
        self.nav.current = ScreenId::Home;
        self.principal = Some(Principal::anonymous());
        tracing::info!("signed out, navigation reset");
        self.enforce_access();
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Adopt a freshly signed-in principal.
    ///
    /// Someone who signs in while on the landing page or a login screen is
    /// taken to their dashboard. Anywhere else the screen is left alone and
    /// only the guard applies.
    pub fn sign_in(&mut self, principal: Principal) {
        tracing::info!(role = %principal.role, "signed in");
        self.principal = Some(principal);
        self.relocate_after_sign_in();
        self.enforce_access();
    }

    /// Replace the principal without the sign-in relocation rule.
    pub fn replace_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
        self.enforce_access();
    }

    /// Apply the bootstrap result and move to `Ready`.
    ///
    /// Returns `false` (and changes nothing) when bootstrap already completed.
    pub fn complete_bootstrap(&mut self, outcome: &BootstrapOutcome) -> bool {
        if self.is_ready() {
            tracing::debug!(outcome = outcome.label(), "discarding late bootstrap result");
            return false;
        }
        match outcome.session() {
            Some(session) => {
                let role = resolve_role(session);
                tracing::info!(role = %role, "session restored");
                self.principal = Some(Principal::signed_in(session.user_id.clone(), role));
                self.relocate_after_sign_in();
            }
            None => {
                tracing::info!(outcome = outcome.label(), "no session, browsing anonymously");
                self.principal = Some(Principal::anonymous());
            }
        }
        self.phase = LoadPhase::Ready;
        self.enforce_access();
        true
    }

    /// Apply one entry of the identity change stream.
    pub fn apply_auth_change(&mut self, change: &AuthChange) {
        tracing::debug!(event = %change.event, "identity change");
        match &change.session {
            Some(session) => {
                let principal = Principal::signed_in(session.user_id.clone(), resolve_role(session));
                if change.event.is_sign_in() {
                    self.sign_in(principal);
                } else {
                    self.replace_principal(principal);
                }
            }
            None if change.event == AuthEvent::SignedOut => self.reset_on_sign_out(),
            None => self.replace_principal(Principal::anonymous()),
        }
    }

    // ========================================================================
    // Overlays
    // ========================================================================

    pub fn open_role_selection(&mut self) {
        self.overlays.role_selection = true;
    }

    pub fn close_role_selection(&mut self) {
        self.overlays.role_selection = false;
    }

    /// Role picked in the role-selection prompt: go to that role's login.
    pub fn choose_role(&mut self, role: Role) {
        match role.login_screen() {
            Some(login) => self.navigate_to(login),
            None => self.close_role_selection(),
        }
    }

    pub fn open_notifications(&mut self) {
        self.overlays.notifications = true;
    }

    pub fn close_notifications(&mut self) {
        self.overlays.notifications = false;
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Apply a host callback.
    ///
    /// Everything except logout completes here. Logout returns
    /// [`Command::SignOut`] so the owner can reach the identity source first.
    pub fn update(&mut self, message: NavMessage) -> Command {
        match message {
            NavMessage::NavigateTo { target, context } => self.transition(target, context),
            NavMessage::Back => self.go_back(),
            NavMessage::Logout => return Command::SignOut,
            NavMessage::OpenAssignment { id, kind } => {
                self.navigate_with(kind.screen(), NavContext::resource(id));
            }
            NavMessage::LoginSucceeded(role) => self.navigate_to(role.home_screen()),
            NavMessage::NotFoundBack => self.navigate_to(self.role().home_screen()),
            NavMessage::OpenRoleSelection => self.open_role_selection(),
            NavMessage::CloseRoleSelection => self.close_role_selection(),
            NavMessage::ChooseRole(role) => self.choose_role(role),
            NavMessage::OpenNotifications => self.open_notifications(),
            NavMessage::CloseNotifications => self.close_notifications(),
        }
        Command::None
    }

    // ========================================================================
    // Guard
    // ========================================================================

    /// Run the access guard against the current state.
    ///
    /// Returns the screen relocated to, if any. Does nothing while bootstrap
    /// is `Checking`.
    pub fn enforce_access(&mut self) -> Option<ScreenId> {
        if !self.is_ready() {
            return None;
        }
        match guard::evaluate(self.nav.current, self.role()) {
            GuardDecision::Allow => None,
            GuardDecision::Relocate(target) => {
                self.relocate(target, RelocationReason::AccessGuard);
                Some(target)
            }
        }
    }

    fn relocate_after_sign_in(&mut self) {
        let current = self.nav.current;
        if !(current.is_home() || current.is_login()) {
            return;
        }
        if let Some(dashboard) = self.role().dashboard() {
            self.relocate(dashboard, RelocationReason::SignIn);
        }
    }

    fn relocate(&mut self, to: ScreenId, reason: RelocationReason) {
        let from = self.nav.current;
        if from == to {
            return;
        }
        self.nav.current = to;
        self.effects.push(Effect::Relocated { from, to, reason });
        tracing::debug!(from = %from, to = %to, ?reason, "relocate");
    }
}
