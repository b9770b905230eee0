//! Wires the collaborators together and runs one command.

use std::sync::Arc;

use gameshelf_api::{FormFields, GameId, HttpClient, RawgClient};
use gameshelf_controller::ListController;
use gameshelf_view::{ImageResolver, RowTarget};
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::{Config, ImageSource};
use crate::terminal::{TerminalNotifier, TerminalSink, ask, is_yes};

/// Runs `command`. Returns `false` when the operation failed (the user has
/// already been shown why).
pub async fn run(config: Config, command: Command) -> anyhow::Result<bool> {
    let client = Arc::new(HttpClient::new(&config.server_url)?);
    info!(server = %client.base_url(), "using collection server");

    let placeholder = config.placeholder_image.clone();
    let images = match config.image_source {
        ImageSource::Server => ImageResolver::new(client.clone(), placeholder),
        ImageSource::Rawg => {
            ImageResolver::new(Arc::new(RawgClient::new(&config.rawg_api_key)?), placeholder)
        }
        ImageSource::None => ImageResolver::offline(placeholder),
    };

    let notifier = Arc::new(TerminalNotifier::new());
    let ctl = ListController::new(
        client.clone(),
        images,
        notifier.clone(),
        Arc::new(TerminalSink),
        config.controller(),
    );

    let ok = match command {
        Command::List => ctl.refresh().await.is_ok(),
        Command::Search { query, platform } => ctl.search(&query, &platform).await.is_ok(),
        Command::Add {
            name,
            platform,
            image_url,
        } => ctl.add(&name, &platform, image_url.as_deref()).await.is_ok(),
        Command::Delete { id, code, yes } => {
            delete(&ctl, &notifier, GameId::new(id), code, yes).await?
        }
        Command::Edit {
            action,
            fields,
            yes,
        } => edit(&ctl, &action, fields.into_iter().collect(), yes).await?,
        Command::Show { id } => show(&ctl, client.base_url(), &GameId::new(id)).await,
    };

    // No hide timer outlives the command.
    notifier.board().hide();
    Ok(ok)
}

async fn delete(
    ctl: &ListController,
    notifier: &TerminalNotifier,
    id: GameId,
    mut code: Option<String>,
    yes: bool,
) -> anyhow::Result<bool> {
    ctl.request_delete(id);
    let Some(pending) = notifier.board().pending_confirm() else {
        return Ok(false);
    };

    let confirmed = yes || is_yes(&ask(&format!("Delete game {pending}? [y/N] ")).await?);
    if !confirmed {
        ctl.cancel_delete();
        debug!(%pending, "delete not confirmed");
        return Ok(true);
    }

    if ctl.config().require_deletion_code && code.is_none() && !yes {
        code = Some(ask("Deletion code: ").await?);
    }

    Ok(ctl.confirm_delete(code.as_deref()).await.is_ok())
}

async fn edit(
    ctl: &ListController,
    action: &str,
    fields: FormFields,
    yes: bool,
) -> anyhow::Result<bool> {
    if ctl.request_save(action, fields).is_err() {
        return Ok(false);
    }

    let confirmed = yes || is_yes(&ask("Save changes? [y/N] ").await?);
    if !confirmed {
        ctl.cancel_save();
        return Ok(true);
    }

    if ctl.confirm_save().await.is_ok() {
        return Ok(true);
    }

    if let Some(fields) = ctl.edit_state().retained_fields() {
        eprintln!("Unsaved changes:");
        for (key, value) in fields {
            eprintln!("  {key}={value}");
        }
    }
    Ok(false)
}

async fn show(ctl: &ListController, base_url: &str, id: &GameId) -> bool {
    if ctl.refresh().await.is_err() {
        return false;
    }

    let row = ctl
        .current_view()
        .and_then(|view| view.rows().iter().find(|r| &r.id == id).cloned());

    match row.and_then(|r| ctl.handle_row_click(&r, RowTarget::Body)) {
        Some(href) => {
            println!("{base_url}{href}");
            true
        }
        None => {
            eprintln!("no game with id {id}");
            false
        }
    }
}
