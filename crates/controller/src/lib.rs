//! Game list controller.
//!
//! [`ListController`] is the single owner of the list page's mutable state
//! and the only place that sequences fetcher calls, rendering and
//! notifications. It is constructed once with its collaborators injected,
//! which keeps every transition testable with fakes.
//!
//! # Flows
//!
//! - **Refresh / search** — fetch, resolve images, re-render the whole list
//! - **Add** — validate, create, refresh
//! - **Delete** — request → confirm (optionally with a code) or cancel
//! - **Edit** — request save → confirm → saving → done or editable failure

pub mod config;
pub mod controller;
pub mod edit;
pub mod error;
pub mod messages;
pub mod sync;

// Re-export primary types for convenience.
pub use config::ControllerConfig;
pub use controller::{DeleteOutcome, ListController, RenderOutcome};
pub use edit::EditState;
pub use error::ControllerError;
pub use sync::{Ticket, ViewSync};
