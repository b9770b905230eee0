use std::time::Duration;

use gameshelf_notify::DEFAULT_BANNER_DURATION;

/// Behavior switches for [`ListController`](crate::ListController).
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// How long each banner stays up.
    pub banner_duration: Duration,
    /// Refuse to send a delete without a non-blank deletion code.
    pub require_deletion_code: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            banner_duration: DEFAULT_BANNER_DURATION,
            require_deletion_code: false,
        }
    }
}
