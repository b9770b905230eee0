//! Terminal rendering of the list, banners and prompts.

use std::io::Write;
use std::time::Duration;

use gameshelf_api::GameId;
use gameshelf_notify::{BannerBoard, BannerKind, NotificationChannel};
use gameshelf_view::{ListSink, ListView, render_lines};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Prints every rendered list to stdout.
pub struct TerminalSink;

impl ListSink for TerminalSink {
    fn render(&self, view: &ListView) {
        let mut out = std::io::stdout().lock();
        for line in render_lines(view) {
            let _ = writeln!(out, "{line}");
        }
    }
}

/// Keeps banner state on a [`BannerBoard`] and echoes it to stderr.
#[derive(Default)]
pub struct TerminalNotifier {
    board: BannerBoard,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self {
            board: BannerBoard::new(),
        }
    }

    pub fn board(&self) -> &BannerBoard {
        &self.board
    }
}

impl NotificationChannel for TerminalNotifier {
    fn notify(&self, message: &str, kind: BannerKind, duration: Duration) {
        let id = self.board.show(message, kind, duration);
        if let Some(banner) = self.board.current().filter(|b| b.id == id) {
            eprintln!("{}", banner.display_line());
        }
    }

    fn confirm_destructive(&self, id: &GameId) {
        self.board.confirm_destructive(id);
    }

    fn dismiss_confirm(&self) {
        self.board.dismiss_confirm();
    }
}

/// Prints `prompt` to stderr and reads one line from stdin.
pub async fn ask(prompt: &str) -> std::io::Result<String> {
    eprint!("{prompt}");
    std::io::stderr().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(line.trim().to_string())
}

/// Whether a prompt answer means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
