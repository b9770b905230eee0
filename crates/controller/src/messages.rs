//! User-facing banner texts.

pub const GAME_ADDED: &str = "Game added successfully!";
pub const ADD_FAILED: &str = "Error adding game.";
pub const NAME_AND_PLATFORM_REQUIRED: &str = "Please enter both a game name and platform.";

pub const GAME_DELETED: &str = "Game deleted.";
pub const DELETE_FAILED: &str = "Failed to delete game.";
pub const DELETION_CODE_REQUIRED: &str = "Please enter the deletion code.";

pub const CHANGES_SAVED: &str = "Changes saved successfully!";
pub const SAVE_FAILED: &str = "Error saving changes.";
pub const MISSING_FORM_ACTION: &str = "This form has no save action.";

pub const LOAD_FAILED: &str = "Failed to load games.";
