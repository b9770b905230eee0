//! List controller: orchestration of fetch, render and notify.
//!
//! State lives in private fields behind `std::sync::Mutex`; no guard is
//! held across an `.await`, so the controller can be shared as
//! `Arc<ListController>` and driven from several event handlers at once.

use std::sync::{Arc, Mutex, MutexGuard};

use gameshelf_api::{CollectionApi, FormFields, GameId, GameRecord, NewGame, SearchFilter};
use gameshelf_notify::{BannerKind, NotificationChannel};
use gameshelf_view::{GameRow, ImageResolver, ListSink, ListView, RowAction, RowTarget, build_list_view};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::edit::{EditState, normalize_fields};
use crate::error::ControllerError;
use crate::messages;
use crate::sync::ViewSync;

/// Result of a list fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// The view was rendered.
    Rendered(ListView),
    /// A newer fetch started before this one finished; nothing was drawn.
    Superseded,
}

/// Result of confirming a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(GameId),
    /// No deletion was awaiting confirmation.
    NothingPending,
}

/// Coordinates the game list page.
pub struct ListController {
    api: Arc<dyn CollectionApi>,
    images: ImageResolver,
    notifier: Arc<dyn NotificationChannel>,
    sink: Arc<dyn ListSink>,
    config: ControllerConfig,
    sync: ViewSync,
    pending_delete: Mutex<Option<GameId>>,
    edit: Mutex<EditState>,
    last_view: Mutex<Option<ListView>>,
}

impl ListController {
    pub fn new(
        api: Arc<dyn CollectionApi>,
        images: ImageResolver,
        notifier: Arc<dyn NotificationChannel>,
        sink: Arc<dyn ListSink>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            api,
            images,
            notifier,
            sink,
            config,
            sync: ViewSync::new(),
            pending_delete: Mutex::new(None),
            edit: Mutex::new(EditState::Idle),
            last_view: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Id awaiting delete confirmation, if any.
    pub fn pending_deletion(&self) -> Option<GameId> {
        lock(&self.pending_delete).clone()
    }

    pub fn edit_state(&self) -> EditState {
        lock(&self.edit).clone()
    }

    /// The most recently rendered view.
    pub fn current_view(&self) -> Option<ListView> {
        lock(&self.last_view).clone()
    }

    // -----------------------------------------------------------------------
    // Fetch and render
    // -----------------------------------------------------------------------

    /// Fetches the full collection and re-renders.
    pub async fn refresh(&self) -> Result<RenderOutcome, ControllerError> {
        self.fetch_and_render(None).await
    }

    /// Fetches games matching `query` and `platform` and re-renders.
    ///
    /// With both inputs blank this is exactly [`refresh`](Self::refresh).
    pub async fn search(
        &self,
        query: &str,
        platform: &str,
    ) -> Result<RenderOutcome, ControllerError> {
        let filter = SearchFilter::new(query, platform);
        if filter.is_empty() {
            return self.refresh().await;
        }
        self.fetch_and_render(Some(&filter)).await
    }

    async fn fetch_and_render(
        &self,
        filter: Option<&SearchFilter>,
    ) -> Result<RenderOutcome, ControllerError> {
        let ticket = self.sync.begin();

        let fetched = match filter {
            None => self.api.list().await,
            Some(f) => self.api.search(f).await,
        };

        let records = match fetched {
            Ok(records) => records,
            Err(e) if !self.sync.is_current(ticket) => {
                debug!(seq = ticket.seq(), error = %e, "superseded list fetch failed");
                return Err(e.into());
            }
            Err(e) => {
                warn!(error = %e, "failed to load games");
                self.error(&e.banner_text(messages::LOAD_FAILED));
                return Err(e.into());
            }
        };

        let sources = self.images.resolve_all(&records).await;
        debug!(
            games = records.len(),
            cached_images = self.images.cached_len(),
            "list fetched"
        );

        // The freshness check and the render share the view lock, so an older
        // fetch cannot draw over a newer one that finished in between.
        let mut last = lock(&self.last_view);
        if !self.sync.is_current(ticket) {
            debug!(seq = ticket.seq(), "dropping superseded list response");
            return Ok(RenderOutcome::Superseded);
        }

        let view = self.build_view(&records, sources);
        self.sink.render(&view);
        *last = Some(view.clone());
        Ok(RenderOutcome::Rendered(view))
    }

    fn build_view(&self, records: &[GameRecord], sources: Vec<String>) -> ListView {
        let mut sources = sources.into_iter();
        build_list_view(records, |_| {
            sources
                .next()
                .unwrap_or_else(|| self.images.placeholder().to_string())
        })
    }

    /// Swaps a row's image to the placeholder after it failed to load.
    pub fn handle_image_error(&self, id: &GameId) {
        let mut last = lock(&self.last_view);
        let Some(ListView::Rows { rows }) = last.as_mut() else {
            return;
        };

        let placeholder = self.images.placeholder();
        let swapped = rows
            .iter_mut()
            .find(|r| &r.id == id)
            .is_some_and(|r| r.on_image_error(placeholder));

        if swapped {
            debug!(%id, "image failed to load, showing placeholder");
            if let Some(view) = last.as_ref() {
                self.sink.render(view);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    /// Adds a game, then re-renders the full collection.
    ///
    /// `Ok` means the server accepted the game and the form may be cleared.
    pub async fn add(
        &self,
        name: &str,
        platform: &str,
        image_url: Option<&str>,
    ) -> Result<(), ControllerError> {
        let (name, platform) = (name.trim(), platform.trim());
        if name.is_empty() || platform.is_empty() {
            self.error(messages::NAME_AND_PLATFORM_REQUIRED);
            return Err(ControllerError::Validation(
                messages::NAME_AND_PLATFORM_REQUIRED.into(),
            ));
        }

        let game = NewGame::new(name, platform).with_image_url(image_url.map(str::to_string));
        match self.api.create(&game).await {
            Ok(_) => {
                info!(name, platform, "game added");
                self.success(messages::GAME_ADDED);
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!(name, platform, error = %e, "add failed");
                self.error(&e.banner_text(messages::ADD_FAILED));
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Opens the delete confirmation for `id`.
    ///
    /// A second request while one is pending replaces it.
    pub fn request_delete(&self, id: GameId) {
        if let Some(previous) = lock(&self.pending_delete).replace(id.clone()) {
            warn!(%previous, %id, "replacing pending deletion");
        }
        self.notifier.confirm_destructive(&id);
    }

    /// Closes the confirmation without deleting anything.
    pub fn cancel_delete(&self) {
        if let Some(id) = lock(&self.pending_delete).take() {
            debug!(%id, "deletion cancelled");
        }
        self.notifier.dismiss_confirm();
    }

    /// Deletes the pending game, then re-renders the full collection.
    ///
    /// When a deletion code is required and `code` is blank, nothing is sent
    /// and the confirmation stays open.
    pub async fn confirm_delete(
        &self,
        code: Option<&str>,
    ) -> Result<DeleteOutcome, ControllerError> {
        let Some(id) = self.pending_deletion() else {
            return Ok(DeleteOutcome::NothingPending);
        };

        let code = code.map(str::trim).filter(|c| !c.is_empty());
        if self.config.require_deletion_code && code.is_none() {
            self.error(messages::DELETION_CODE_REQUIRED);
            return Err(ControllerError::Validation(
                messages::DELETION_CODE_REQUIRED.into(),
            ));
        }

        let result = self.api.delete(&id, code).await;
        self.clear_pending(&id);

        match result {
            Ok(()) => {
                info!(%id, "game deleted");
                self.success(messages::GAME_DELETED);
                let _ = self.refresh().await;
                Ok(DeleteOutcome::Deleted(id))
            }
            Err(e) => {
                warn!(%id, error = %e, "delete failed");
                self.error(&e.banner_text(messages::DELETE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Clears the pending deletion if it is still `id`.
    fn clear_pending(&self, id: &GameId) {
        let mut pending = lock(&self.pending_delete);
        if pending.as_ref() == Some(id) {
            *pending = None;
            drop(pending);
            self.notifier.dismiss_confirm();
        }
    }

    /// Routes a click on a rendered row. Returns the navigation target for
    /// body clicks; delete clicks open the confirmation instead.
    pub fn handle_row_click(&self, row: &GameRow, target: RowTarget) -> Option<String> {
        match row.on_click(target) {
            RowAction::OpenDetail(href) => Some(href),
            RowAction::RequestDelete(id) => {
                self.request_delete(id);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Edit / save
    // -----------------------------------------------------------------------

    /// Validates an edit form and asks for confirmation before saving.
    ///
    /// Allowed from `Idle`, `Confirming` (replaces) and `Failed` (retry).
    pub fn request_save(&self, action: &str, fields: FormFields) -> Result<(), ControllerError> {
        if matches!(*lock(&self.edit), EditState::Saving) {
            return Err(ControllerError::SaveInProgress);
        }

        let action = action.trim();
        if action.is_empty() {
            self.error(messages::MISSING_FORM_ACTION);
            return Err(ControllerError::Validation(
                messages::MISSING_FORM_ACTION.into(),
            ));
        }

        let fields = match normalize_fields(fields) {
            Ok(fields) => fields,
            Err(field) => {
                debug!(field, "required form field is blank");
                self.error(messages::NAME_AND_PLATFORM_REQUIRED);
                return Err(ControllerError::Validation(
                    messages::NAME_AND_PLATFORM_REQUIRED.into(),
                ));
            }
        };

        *lock(&self.edit) = EditState::Confirming {
            action: action.to_string(),
            fields,
        };
        Ok(())
    }

    /// Abandons a pending or failed save.
    pub fn cancel_save(&self) {
        let mut edit = lock(&self.edit);
        if !matches!(*edit, EditState::Saving) {
            *edit = EditState::Idle;
        }
    }

    /// Sends the confirmed form, then re-renders the full collection.
    pub async fn confirm_save(&self) -> Result<(), ControllerError> {
        let (action, fields) = {
            let mut edit = lock(&self.edit);
            match std::mem::replace(&mut *edit, EditState::Saving) {
                EditState::Confirming { action, fields } => (action, fields),
                other => {
                    *edit = other;
                    return Err(ControllerError::NotConfirming);
                }
            }
        };

        match self.api.save_form(&action, &fields).await {
            Ok(_) => {
                info!(%action, "changes saved");
                *lock(&self.edit) = EditState::Idle;
                self.success(messages::CHANGES_SAVED);
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                warn!(%action, error = %e, "save failed");
                let message = e.banner_text(messages::SAVE_FAILED);
                *lock(&self.edit) = EditState::Failed {
                    action,
                    fields,
                    message: message.clone(),
                };
                self.error(&message);
                Err(e.into())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    fn success(&self, message: &str) {
        self.notifier
            .notify(message, BannerKind::Success, self.config.banner_duration);
    }

    fn error(&self, message: &str) {
        self.notifier
            .notify(message, BannerKind::Error, self.config.banner_duration);
    }
}

/// Locks a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
