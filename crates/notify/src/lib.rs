//! Banner notifications and confirmation prompts.
//!
//! The controller reports every outcome through [`NotificationChannel`].
//! [`BannerBoard`] is the tokio-backed implementation: one banner at a time,
//! auto-hidden after its duration, with the newest banner always winning.

pub mod banner;
pub mod board;

pub use banner::{Banner, BannerKind, DEFAULT_BANNER_DURATION};
pub use board::{BannerBoard, BoardState};

use std::time::Duration;

use gameshelf_api::GameId;

/// Sink for user-facing notifications.
pub trait NotificationChannel: Send + Sync {
    /// Shows a transient banner, replacing any banner currently shown.
    fn notify(&self, message: &str, kind: BannerKind, duration: Duration);

    /// Shows the yes/no confirmation for deleting `id`.
    fn confirm_destructive(&self, id: &GameId);

    /// Hides the confirmation affordance.
    fn dismiss_confirm(&self);
}
