//! Hold-to-confirm card selection
//!
//! Every card index gets its own [`HoldGesture`] and timer. A hold that
//! survives `hold_duration` sends exactly one `click_card`; anything that
//! ends it earlier sends nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use codenames_domain::{HoldEvent, HoldGesture, HoldTransition};
use tokio::task::JoinHandle;

use super::game_service::{lock_board, SharedBoard};
use crate::infrastructure::websocket::{ClientMessageBuilder, ConnectionManager};
use crate::ports::outbound::GameView;

struct PendingHold {
    gesture: HoldGesture,
    generation: u64,
    timer: JoinHandle<()>,
}

struct SelectionInner {
    board: SharedBoard,
    connection: ConnectionManager,
    view: Arc<dyn GameView>,
    hold_duration: Duration,
    holds: Mutex<HashMap<usize, PendingHold>>,
    generation: AtomicU64,
}

#[derive(Clone)]
pub struct CardSelectionService {
    inner: Arc<SelectionInner>,
}

impl CardSelectionService {
    pub fn new(board: SharedBoard, connection: ConnectionManager, view: Arc<dyn GameView>) -> Self {
        let hold_duration = connection.config().hold_duration;
        Self {
            inner: Arc::new(SelectionInner {
                board,
                connection,
                view,
                hold_duration,
                holds: Mutex::new(HashMap::new()),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Start holding `index`. Must be called inside a tokio runtime.
    ///
    /// Ignored for opened cards, captains, a finished game, while
    /// disconnected, or when the card is already being held.
    pub fn press(&self, index: usize) -> HoldTransition {
        let inner = &self.inner;
        if !inner.connection.is_connected() {
            tracing::debug!(index, "Press ignored: not connected");
            return HoldTransition::Ignored;
        }
        if !lock_board(&inner.board).can_select(index) {
            tracing::debug!(index, "Press ignored: card not selectable");
            return HoldTransition::Ignored;
        }

        let mut holds = inner.lock_holds();
        if holds.get(&index).is_some_and(|h| h.gesture.state().is_holding()) {
            return HoldTransition::Ignored;
        }

        let mut gesture = HoldGesture::new();
        let transition = gesture.handle(HoldEvent::PointerDown);
        let generation = inner.generation.fetch_add(1, Ordering::Relaxed);
        let duration = inner.hold_duration;
        let task_inner = Arc::clone(inner);
        // Spawned under the lock so expiry cannot run before the insert
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            task_inner.expire(index, generation);
        });
        holds.insert(
            index,
            PendingHold {
                gesture,
                generation,
                timer,
            },
        );
        tracing::debug!(index, hold_ms = duration.as_millis() as u64, "Hold started");
        transition
    }

    /// Pointer released. Early release nudges the user with a hint.
    pub fn release(&self, index: usize) -> HoldTransition {
        let transition = self.inner.end_hold(index, HoldEvent::PointerUp);
        if let HoldTransition::Canceled(reason) = transition {
            tracing::debug!(index, ?reason, "Hold released early");
            self.inner.view.show_hold_hint(index);
        }
        transition
    }

    /// Pointer left, finger slid off, or the platform cancelled the touch.
    pub fn cancel(&self, index: usize, event: HoldEvent) -> HoldTransition {
        match event {
            HoldEvent::PointerLeave | HoldEvent::TouchMoveOut | HoldEvent::TouchCancel => {
                self.inner.end_hold(index, event)
            }
            HoldEvent::PointerDown | HoldEvent::PointerUp | HoldEvent::Expired => {
                HoldTransition::Ignored
            }
        }
    }

    /// Drop every pending hold; used when the board is replaced or the
    /// connection goes away.
    pub fn clear_all(&self) {
        let mut holds = self.inner.lock_holds();
        if holds.is_empty() {
            return;
        }
        tracing::debug!(count = holds.len(), "Clearing pending holds");
        for (_, mut hold) in holds.drain() {
            hold.timer.abort();
            hold.gesture.reset();
        }
    }

    pub fn pending(&self) -> usize {
        self.inner.lock_holds().len()
    }

    pub fn is_holding(&self, index: usize) -> bool {
        self.inner.lock_holds().contains_key(&index)
    }
}

impl SelectionInner {
    fn lock_holds(&self) -> MutexGuard<'_, HashMap<usize, PendingHold>> {
        self.holds.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn end_hold(&self, index: usize, event: HoldEvent) -> HoldTransition {
        let Some(mut hold) = self.lock_holds().remove(&index) else {
            return HoldTransition::Ignored;
        };
        hold.timer.abort();
        hold.gesture.handle(event)
    }

    fn expire(&self, index: usize, generation: u64) {
        let confirmed = {
            let mut holds = self.lock_holds();
            if holds.get(&index).map(|h| h.generation) != Some(generation) {
                return;
            }
            match holds.remove(&index) {
                Some(mut hold) => hold.gesture.handle(HoldEvent::Expired) == HoldTransition::Confirmed,
                None => false,
            }
        };
        if !confirmed {
            return;
        }

        // State may have moved on while the finger was down
        if !self.connection.is_connected() {
            tracing::debug!(index, "Hold confirmed while disconnected, nothing sent");
            return;
        }
        if !lock_board(&self.board).can_select(index) {
            tracing::debug!(index, "Hold confirmed but card no longer selectable");
            return;
        }

        match self.connection.send(ClientMessageBuilder::click_card(index)) {
            Ok(()) => tracing::info!(index, "Card selected"),
            Err(e) => tracing::warn!(index, error = %e, "Failed to send card selection"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codenames_domain::{BoardEvent, CancelReason, Role, Team};
    use tokio::time::{sleep, Instant};

    use crate::infrastructure::testing::{connected_manager, fixtures, FakeServer};
    use crate::ports::outbound::MockGameView;

    const CLICK_3: &str = r#"{"action":"click_card","index":3}"#;

    async fn service(
        role: Role,
        view: MockGameView,
    ) -> (CardSelectionService, SharedBoard, FakeServer) {
        let (manager, _connector, server) = connected_manager().await;
        let board = Arc::new(Mutex::new(fixtures::board(role)));
        let service = CardSelectionService::new(Arc::clone(&board), manager, Arc::new(view));
        (service, board, server)
    }

    #[tokio::test(start_paused = true)]
    async fn sustained_hold_sends_exactly_one_selection() {
        let (service, _board, mut server) = service(Role::Agent, MockGameView::new()).await;
        let started = Instant::now();

        assert_eq!(service.press(3), HoldTransition::Started);
        sleep(Duration::from_millis(1100)).await;
        assert!(server.drain().is_empty());

        assert_eq!(server.recv().await.as_deref(), Some(CLICK_3));
        assert!(started.elapsed() >= Duration::from_millis(1200));
        assert_eq!(service.pending(), 0);

        sleep(Duration::from_secs(5)).await;
        assert!(server.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn early_release_sends_nothing_and_hints() {
        let mut view = MockGameView::new();
        view.expect_show_hold_hint()
            .withf(|index| *index == 3)
            .times(1)
            .return_const(());
        let (service, _board, mut server) = service(Role::Agent, view).await;

        service.press(3);
        sleep(Duration::from_millis(500)).await;
        assert_eq!(
            service.release(3),
            HoldTransition::Canceled(CancelReason::ReleasedEarly)
        );

        sleep(Duration::from_secs(3)).await;
        assert!(server.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn each_card_has_its_own_timer() {
        let mut view = MockGameView::new();
        view.expect_show_hold_hint()
            .withf(|index| *index == 5)
            .times(1)
            .return_const(());
        let (service, _board, mut server) = service(Role::Agent, view).await;

        service.press(3);
        sleep(Duration::from_millis(600)).await;
        service.press(5);
        assert_eq!(service.pending(), 2);

        sleep(Duration::from_millis(700)).await;
        assert_eq!(server.drain(), vec![CLICK_3.to_string()]);
        assert!(service.is_holding(5));

        service.release(5);
        sleep(Duration::from_secs(3)).await;
        assert!(server.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_card_cancels_without_hint() {
        let (service, _board, mut server) = service(Role::Agent, MockGameView::new()).await;

        service.press(3);
        assert_eq!(
            service.cancel(3, HoldEvent::TouchMoveOut),
            HoldTransition::Canceled(CancelReason::Left)
        );
        assert_eq!(service.cancel(3, HoldEvent::TouchCancel), HoldTransition::Ignored);

        sleep(Duration::from_secs(3)).await;
        assert!(server.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn presses_that_cannot_select_are_ignored() {
        let (captain, _board, _server) = service(Role::Captain, MockGameView::new()).await;
        assert_eq!(captain.press(3), HoldTransition::Ignored);

        let (agent, board, _server) = service(Role::Agent, MockGameView::new()).await;
        lock_board(&board)
            .apply(BoardEvent::CardRevealed {
                index: 3,
                color: codenames_domain::CardColor::Red,
            })
            .expect("reveal");
        assert_eq!(agent.press(3), HoldTransition::Ignored);
        assert_eq!(agent.press(99), HoldTransition::Ignored);

        assert_eq!(agent.press(4), HoldTransition::Started);
        assert_eq!(agent.press(4), HoldTransition::Ignored);
        assert_eq!(agent.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn press_while_disconnected_is_ignored() {
        let (manager, _connector, _server) = connected_manager().await;
        manager.disconnect();
        tokio::task::yield_now().await;
        while manager.is_connected() {
            tokio::task::yield_now().await;
        }

        let board = Arc::new(Mutex::new(fixtures::board(Role::Agent)));
        let service = CardSelectionService::new(board, manager, Arc::new(MockGameView::new()));
        assert_eq!(service.press(3), HoldTransition::Ignored);
        assert_eq!(service.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_rechecks_the_board() {
        let (service, board, mut server) = service(Role::Agent, MockGameView::new()).await;

        service.press(3);
        sleep(Duration::from_millis(400)).await;
        lock_board(&board)
            .apply(BoardEvent::GameOver { winner: Team::Blue })
            .expect("game over");

        sleep(Duration::from_secs(2)).await;
        assert!(server.drain().is_empty());
        assert_eq!(service.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_drops_pending_holds() {
        let (service, _board, mut server) = service(Role::Agent, MockGameView::new()).await;

        service.press(3);
        service.press(7);
        service.clear_all();
        assert_eq!(service.pending(), 0);

        sleep(Duration::from_secs(3)).await;
        assert!(server.drain().is_empty());
    }
}
