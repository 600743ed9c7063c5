//! Course hub navigation data model.
//!
//! Closed screen set, roles, navigation state and identity-session types shared
//! by the navigation core and its hosts.

pub mod error;
pub mod navigation;
pub mod role;
pub mod screen;
pub mod session;

pub use error::{ModelError, Result};
pub use navigation::{NavContext, NavigationState, OverlayState};
pub use role::{Principal, Role};
pub use screen::{Namespace, ScreenId};
pub use session::{AuthChange, AuthEvent, Metadata, Session};
