//! Game collection REST client.
//!
//! This crate is the **fetcher** layer of gameshelf. It knows the server's
//! endpoints and response shapes and nothing about presentation: the
//! controller talks to it through the [`CollectionApi`] and [`ImageLookup`]
//! traits so tests can swap in fakes.
//!
//! # Endpoints
//!
//! - **List** — `GET /games`
//! - **Search** — `GET /search?query=&platform=`
//! - **Create** — `POST /add`
//! - **Delete** — `DELETE /delete/:id` (optional deletion code body)
//! - **Save** — `POST` to an edit form's action
//! - **Image** — `GET /game-image?name=`, or the RAWG search API

pub mod client;
pub mod error;
pub mod rawg;
pub mod service;
pub mod types;

// Re-export primary types for convenience.
pub use client::HttpClient;
pub use error::ApiError;
pub use rawg::RawgClient;
pub use service::{ApiFuture, CollectionApi, ImageLookup};
pub use types::{Ack, FormFields, GameId, GameRecord, NewGame, SearchFilter};
