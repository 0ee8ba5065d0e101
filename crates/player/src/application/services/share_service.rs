//! Clipboard sharing: invite link, game results and the bot key command.

use std::sync::Arc;

use codenames_domain::Team;
use url::Url;

use crate::ports::outbound::{ClipboardError, ClipboardProvider, GameView, Notification};

/// `Codenames - Red won!` followed by the room and invite link.
pub fn results_text(winner: Team, room: &str, link: &Url) -> String {
    format!(
        "Codenames - {} won!\nRoom: {}\nLink: {}",
        winner.display_name(),
        room,
        link
    )
}

/// Command the chat bot expects when a player asks for the captain key.
pub fn key_command(room: &str) -> String {
    format!("/key {room}")
}

#[derive(Clone)]
pub struct ShareService {
    clipboard: Arc<dyn ClipboardProvider>,
    view: Arc<dyn GameView>,
}

impl ShareService {
    pub fn new(clipboard: Arc<dyn ClipboardProvider>, view: Arc<dyn GameView>) -> Self {
        Self { clipboard, view }
    }

    pub fn copy_link(&self, link: &Url) -> Result<(), ClipboardError> {
        self.copy(link.as_str(), "Link copied!")
    }

    pub fn share_results(&self, winner: Team, room: &str, link: &Url) -> Result<(), ClipboardError> {
        self.copy(&results_text(winner, room, link), "Results copied!")
    }

    pub fn request_key(&self, room: &str) -> Result<(), ClipboardError> {
        self.copy(&key_command(room), "Command copied! Send it to the bot")
    }

    /// Failures only ever surface as a notification.
    fn copy(&self, text: &str, success: &str) -> Result<(), ClipboardError> {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.view.notify(Notification::success(success));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard write failed");
                self.view.notify(Notification::error("Copy failed"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{MockClipboardProvider, MockGameView, NotificationLevel};

    fn link() -> Url {
        Url::parse("https://play.test/?room=ABCD&user_id=42").expect("url")
    }

    #[test]
    fn results_text_names_winner_room_and_link() {
        assert_eq!(
            results_text(Team::Blue, "ABCD", &link()),
            "Codenames - Blue won!\nRoom: ABCD\nLink: https://play.test/?room=ABCD&user_id=42"
        );
        assert_eq!(key_command("ABCD"), "/key ABCD");
    }

    #[test]
    fn copied_link_is_confirmed() {
        let mut clipboard = MockClipboardProvider::new();
        clipboard
            .expect_write_text()
            .withf(|text| text == "https://play.test/?room=ABCD&user_id=42")
            .times(1)
            .returning(|_| Ok(()));
        let mut view = MockGameView::new();
        view.expect_notify()
            .withf(|n| n.level == NotificationLevel::Success)
            .times(1)
            .return_const(());

        let share = ShareService::new(Arc::new(clipboard), Arc::new(view));
        assert!(share.copy_link(&link()).is_ok());
    }

    #[test]
    fn clipboard_failure_is_only_a_notification() {
        let mut clipboard = MockClipboardProvider::new();
        clipboard
            .expect_write_text()
            .returning(|_| Err(ClipboardError::Unavailable));
        let mut view = MockGameView::new();
        view.expect_notify()
            .withf(|n| n.level == NotificationLevel::Error)
            .times(1)
            .return_const(());

        let share = ShareService::new(Arc::new(clipboard), Arc::new(view));
        assert_eq!(share.request_key("ABCD"), Err(ClipboardError::Unavailable));
    }
}
