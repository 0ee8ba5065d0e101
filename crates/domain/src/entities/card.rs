//! Word card on the board

use crate::value_objects::{CardColor, Role};

/// A single word card.
///
/// `color` may be known before the reveal (captain view, or a server that
/// sends ownership to everyone); whether it is shown is decided by
/// [`Card::visible_color`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    word: String,
    revealed: bool,
    color: Option<CardColor>,
}

impl Card {
    pub fn new(word: impl Into<String>, revealed: bool, color: Option<CardColor>) -> Self {
        Self {
            word: word.into(),
            revealed,
            color,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Ownership as received, regardless of who is looking.
    pub fn known_color(&self) -> Option<CardColor> {
        self.color
    }

    /// Ownership as it may be displayed to a viewer with `role`.
    pub fn visible_color(&self, role: Role) -> Option<CardColor> {
        if self.revealed || role.sees_hidden_colors() {
            self.color
        } else {
            None
        }
    }

    /// Open the card. Returns false if it was already open; a reveal is
    /// never undone and the first color wins.
    pub(crate) fn reveal(&mut self, color: CardColor) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        self.color = Some(color);
        true
    }
}

/// Render-ready view of one card for a specific viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub index: usize,
    pub word: String,
    pub revealed: bool,
    /// Color to paint, already filtered by the viewer's role
    pub shown_color: Option<CardColor>,
    /// Whether a hold on this card may send a selection
    pub selectable: bool,
}
