//! Tokio-backed banner board.
//!
//! Holds at most one banner. Showing a banner aborts the previous banner's
//! hide timer; each timer also checks the banner id before clearing, so a
//! late timer can never hide a newer banner. State changes are published on
//! a `watch` channel for front-ends to render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gameshelf_api::GameId;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::NotificationChannel;
use crate::banner::{Banner, BannerKind};

/// Snapshot of everything the notification area shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub banner: Option<Banner>,
    /// Game awaiting yes/no confirmation, when the prompt is open.
    pub confirm: Option<GameId>,
}

/// Last-write-wins banner display with auto-hide.
///
/// Must be used from within a tokio runtime (hide timers are spawned tasks).
#[derive(Debug)]
pub struct BannerBoard {
    state: Arc<watch::Sender<BoardState>>,
    next_id: AtomicU64,
    hide_task: Mutex<Option<JoinHandle<()>>>,
}

impl BannerBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(BoardState::default());
        Self {
            state: Arc::new(tx),
            next_id: AtomicU64::new(0),
            hide_task: Mutex::new(None),
        }
    }

    /// Receiver observing every banner and prompt change.
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    /// The banner currently shown, if any.
    pub fn current(&self) -> Option<Banner> {
        self.state.borrow().banner.clone()
    }

    /// The game id the confirmation prompt is open for, if any.
    pub fn pending_confirm(&self) -> Option<GameId> {
        self.state.borrow().confirm.clone()
    }

    /// Shows a banner and arms its hide timer. Returns the banner id.
    pub fn show(&self, message: impl Into<String>, kind: BannerKind, duration: Duration) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let banner = Banner {
            id,
            kind,
            message: message.into(),
            duration,
        };
        debug!(id, ?kind, message = %banner.message, "showing banner");
        self.state.send_modify(|s| s.banner = Some(banner));

        let state = Arc::clone(&self.state);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            state.send_if_modified(|s| clear_if_current(s, id));
        });

        let mut slot = self.hide_task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(timer) {
            previous.abort();
        }

        id
    }

    /// Hides the current banner immediately.
    pub fn hide(&self) {
        if let Some(task) = self
            .hide_task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            task.abort();
        }
        self.state.send_if_modified(|s| s.banner.take().is_some());
    }
}

impl Default for BannerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel for BannerBoard {
    fn notify(&self, message: &str, kind: BannerKind, duration: Duration) {
        self.show(message, kind, duration);
    }

    fn confirm_destructive(&self, id: &GameId) {
        self.state.send_modify(|s| s.confirm = Some(id.clone()));
    }

    fn dismiss_confirm(&self) {
        self.state.send_if_modified(|s| s.confirm.take().is_some());
    }
}

/// Clears the banner only if it is still the one with `id`.
fn clear_if_current(state: &mut BoardState, id: u64) -> bool {
    match &state.banner {
        Some(b) if b.id == id => {
            state.banner = None;
            true
        }
        _ => false,
    }
}
