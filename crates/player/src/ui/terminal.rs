//! Plain-text renderer for the terminal binary.

use std::io::Write;
use std::sync::{Arc, Mutex};

use codenames_domain::{CardColor, CardView, Team};

use crate::ports::outbound::{ConnectionStatus, GameInfo, GameView, Notification, NotificationLevel};

const COLUMNS: usize = 5;
const CELL_WIDTH: usize = 14;

/// Writes the board and status lines to an output sink (stdout by default).
#[derive(Clone)]
pub struct TerminalView {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
    max_attempts: u32,
}

impl TerminalView {
    pub fn stdout(max_attempts: u32) -> Self {
        Self::with_writer(Box::new(std::io::stdout()), max_attempts)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, max_attempts: u32) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            max_attempts,
        }
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(out, "{text}").and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "Terminal write failed");
        }
    }
}

fn marker(color: Option<CardColor>) -> char {
    match color {
        Some(CardColor::Red) => 'R',
        Some(CardColor::Blue) => 'B',
        Some(CardColor::Black) => 'X',
        Some(CardColor::Neutral) => 'N',
        None => ' ',
    }
}

/// `[ 3 word    R*]`: index, word, ownership marker, `*` once opened.
pub fn format_card(card: &CardView) -> String {
    let mut word: String = card.word.chars().take(CELL_WIDTH - 7).collect();
    if card.revealed {
        word = word.to_uppercase();
    }
    format!(
        "[{:>2} {:<w$}{}{}]",
        card.index,
        word,
        marker(card.shown_color),
        if card.revealed { '*' } else { ' ' },
        w = CELL_WIDTH - 7
    )
}

pub fn format_board(cards: &[CardView]) -> String {
    cards
        .chunks(COLUMNS)
        .map(|row| row.iter().map(format_card).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_info(info: &GameInfo) -> String {
    format!(
        "Room {} | turn {} ({}) | red left {} | blue left {} | opened {} | players {}",
        info.room_id.as_deref().unwrap_or("-"),
        info.current_turn,
        info.current_team.display_name(),
        info.remaining.red,
        info.remaining.blue,
        info.stats.revealed,
        info.players_count
    )
}

impl GameView for TerminalView {
    fn render_board(&self, cards: Vec<CardView>, info: GameInfo) {
        self.write(&format!("{}\n{}", format_info(&info), format_board(&cards)));
    }

    fn update_card(&self, card: CardView) {
        self.write(&format!("Opened {}", format_card(&card)));
    }

    fn update_game_info(&self, info: GameInfo) {
        self.write(&format_info(&info));
    }

    fn show_turn(&self, team: Team, changed: bool) {
        if changed {
            self.write(&format!(">> {} team to play", team.display_name()));
        }
    }

    fn show_game_over(&self, winner: Team) {
        self.write(&format!(
            "*** Game over: {} won! Type `share` to copy the results ***",
            winner.display_name()
        ));
    }

    fn show_hold_hint(&self, index: usize) {
        self.write(&format!("Hold card {index} longer to select it"));
    }

    fn notify(&self, notification: Notification) {
        let tag = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "warn",
            NotificationLevel::Error => "error",
        };
        self.write(&format!("[{tag}] {}", notification.text));
    }

    fn set_connection_status(&self, status: ConnectionStatus) {
        let line = match status {
            ConnectionStatus::State(state) => format!("Connection: {state}"),
            ConnectionStatus::Reconnecting { attempt, delay_ms } => format!(
                "Connection: reconnecting ({attempt}/{}) in {:.1}s",
                self.max_attempts,
                delay_ms as f64 / 1000.0
            ),
            ConnectionStatus::ReloadRequired => {
                "Connection: could not connect, restart the client".to_string()
            }
        };
        self.write(&line);
    }

    fn show_fatal_error(&self, message: String) {
        self.write(&format!("Error: {message}"));
    }
}
