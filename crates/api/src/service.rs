//! Trait seams between the controller and the network.
//!
//! The app wires [`HttpClient`](crate::HttpClient) (and optionally
//! [`RawgClient`](crate::RawgClient)) in; tests provide recording fakes.

use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;
use crate::types::{Ack, FormFields, GameId, GameRecord, NewGame, SearchFilter};

/// Boxed future returned by the API traits.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Abstract access to the game collection server.
pub trait CollectionApi: Send + Sync {
    /// Returns every game in the collection.
    fn list(&self) -> ApiFuture<'_, Vec<GameRecord>>;

    /// Returns games matching `filter`.
    fn search<'a>(&'a self, filter: &'a SearchFilter) -> ApiFuture<'a, Vec<GameRecord>>;

    /// Adds a game.
    fn create<'a>(&'a self, game: &'a NewGame) -> ApiFuture<'a, Ack>;

    /// Deletes a game, sending `deletion_code` in the body when given.
    fn delete<'a>(&'a self, id: &'a GameId, deletion_code: Option<&'a str>)
    -> ApiFuture<'a, ()>;

    /// Submits an edit form to its declared action.
    fn save_form<'a>(&'a self, action: &'a str, fields: &'a FormFields) -> ApiFuture<'a, Ack>;
}

/// Resolves a display image for a game name.
pub trait ImageLookup: Send + Sync {
    /// `Ok(None)` means the source answered and has no image.
    fn find_image<'a>(&'a self, name: &'a str) -> ApiFuture<'a, Option<String>>;
}
