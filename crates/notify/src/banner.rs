use std::time::Duration;

/// Default banner display duration.
pub const DEFAULT_BANNER_DURATION: Duration = Duration::from_millis(3000);

/// The visual category of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
        }
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    /// Monotonic id; a hide timer only clears the banner it was armed for.
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
    pub duration: Duration,
}

impl Banner {
    /// One-line rendering: icon followed by the message.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.kind.icon(), self.message)
    }
}
