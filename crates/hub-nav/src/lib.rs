//! Course hub navigation core.
//!
//! Owns the single navigation state of the hub: which screen is mounted, how
//! to go back, who is signed in, and which screens that role may see.
//!
//! - [`controller`]: state owner and every navigation operation
//! - [`guard`]: role/namespace access rule
//! - [`bootstrap`]: session fetch raced against a timeout
//! - [`hub`]: controller bound to an [`IdentitySource`]

pub mod activity;
pub mod bootstrap;
pub mod config;
pub mod controller;
pub mod error;
pub mod guard;
pub mod hub;
pub mod identity;
pub mod menu;
pub mod message;
pub mod role;
pub mod screen;

pub use activity::{
    ActivityAction, ActivityRecord, ActivitySink, MemoryActivitySink, TracingActivitySink,
    sanitize_metadata,
};
pub use bootstrap::{BootstrapOutcome, LoadPhase, Race, fetch_with_timeout, first_wins};
pub use config::{DEFAULT_SESSION_TIMEOUT_MS, HubConfig};
pub use controller::{Effect, NavSnapshot, NavigationController, RelocationReason, ScreenProps};
pub use error::{ConfigError, IdentityError};
pub use guard::GuardDecision;
pub use hub::{BootstrapReport, Hub};
pub use identity::{AuthSubscription, FetchBehavior, IdentitySource, MemoryIdentitySource};
pub use menu::{SidebarItem, is_item_active, sidebar_items};
pub use message::{AssignmentKind, Command, NavMessage};
pub use role::{resolve_role, resolve_role_from};
pub use screen::{Chrome, Mount, resolve_mount, resolve_path};
