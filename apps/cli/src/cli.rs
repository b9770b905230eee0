//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "gameshelf", version, about = "Manage a personal video game collection")]
pub struct Cli {
    /// Server base URL, overriding the configuration file.
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Configuration file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List every game in the collection.
    List,

    /// Search by name and/or platform.
    Search {
        #[arg(long, short, default_value = "")]
        query: String,
        #[arg(long, short, default_value = "")]
        platform: String,
    },

    /// Add a game.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        platform: String,
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Delete a game after confirmation.
    Delete {
        id: String,
        /// Deletion code, when the server requires one.
        #[arg(long)]
        code: Option<String>,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Submit an edit form.
    Edit {
        /// Form action path, e.g. `/edit/<id>`.
        #[arg(long)]
        action: String,
        /// Form field as `key=value`; repeatable.
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },

    /// Print the detail page URL of a game.
    Show { id: String },
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
