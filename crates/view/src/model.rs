//! View models for the game list.

use gameshelf_api::{GameId, GameRecord};
use serde::Serialize;

/// Text shown instead of an empty list.
pub const NO_GAMES_MESSAGE: &str = "No games found.";

/// Image element of a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

/// One rendered game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRow {
    pub id: GameId,
    /// `"name [platform]"`.
    pub label: String,
    pub image: ImageView,
    /// Detail page route, `/game/:id`.
    pub detail_href: String,
}

/// Part of a row that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Body,
    DeleteButton,
}

/// What a click on a row asks the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    OpenDetail(String),
    RequestDelete(GameId),
}

/// The whole list as it should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListView {
    Empty { message: String },
    Rows { rows: Vec<GameRow> },
}

impl ListView {
    pub fn rows(&self) -> &[GameRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows { rows } => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    /// Labels of all rows, in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows().iter().map(|r| r.label.as_str()).collect()
    }
}

impl GameRow {
    pub fn from_record(record: &GameRecord, image_src: impl Into<String>) -> Self {
        Self {
            id: record.id.clone(),
            label: format!("{} [{}]", record.name, record.platform),
            image: ImageView {
                src: image_src.into(),
                alt: format!("{} cover", record.name),
            },
            detail_href: detail_href(&record.id),
        }
    }

    /// Maps a click to its action. A click on the delete control never
    /// reaches the row body.
    pub fn on_click(&self, target: RowTarget) -> RowAction {
        match target {
            RowTarget::Body => RowAction::OpenDetail(self.detail_href.clone()),
            RowTarget::DeleteButton => RowAction::RequestDelete(self.id.clone()),
        }
    }

    /// Swaps the image to the placeholder after a load failure.
    ///
    /// Returns `false` if the row already showed the placeholder.
    pub fn on_image_error(&mut self, placeholder: &str) -> bool {
        if self.image.src == placeholder {
            return false;
        }
        self.image.src = placeholder.to_string();
        true
    }
}

/// Detail route for a game.
pub fn detail_href(id: &GameId) -> String {
    format!("/game/{id}")
}

/// Maps records to a list view, preserving server order.
pub fn build_list_view<F>(records: &[GameRecord], mut image_for: F) -> ListView
where
    F: FnMut(&GameRecord) -> String,
{
    if records.is_empty() {
        return ListView::Empty {
            message: NO_GAMES_MESSAGE.to_string(),
        };
    }

    ListView::Rows {
        rows: records
            .iter()
            .map(|r| GameRow::from_record(r, image_for(r)))
            .collect(),
    }
}

/// Plain-text lines for terminal output.
pub fn render_lines(view: &ListView) -> Vec<String> {
    match view {
        ListView::Empty { message } => vec![message.clone()],
        ListView::Rows { rows } => rows
            .iter()
            .map(|r| format!("{:<40} {:<26} {}", r.label, r.id, r.image.src))
            .collect(),
    }
}
