//! Game list rendering.
//!
//! Rendering is split in two steps: a pure mapping from server records to
//! view models ([`build_list_view`]), testable without any display, and the
//! imperative [`ListSink`] that a front-end implements to draw them. Images
//! are chosen by [`ImageResolver`] before mapping.

pub mod images;
pub mod model;

pub use images::{DEFAULT_PLACEHOLDER, ImageResolver};
pub use model::{
    GameRow, ImageView, ListView, NO_GAMES_MESSAGE, RowAction, RowTarget, build_list_view,
    detail_href, render_lines,
};

/// Imperative rendering step.
///
/// Every call replaces the whole list: implementations clear what they drew
/// before and rebuild from `view`.
pub trait ListSink: Send + Sync {
    fn render(&self, view: &ListView);
}
