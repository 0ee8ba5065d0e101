//! Board aggregate - the client's reducer over server state
//!
//! # Invariants
//!
//! - Incremental events require a snapshot first
//! - A reveal is one-way; repeating it changes nothing
//! - The current team only moves on explicit instruction from the server
//! - Game over is terminal until a fresh, unfinished snapshot arrives

use crate::entities::{CardView, GameSnapshot, TeamCounts};
use crate::error::DomainError;
use crate::events::{BoardChange, BoardEvent};
use crate::value_objects::{GameStatus, Team};

/// Derived numbers for a stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub revealed: usize,
    pub remaining: TeamCounts,
    pub found_red: u32,
    pub found_blue: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GameBoard {
    snapshot: Option<GameSnapshot>,
    /// Winner announced through a game-over event
    over: Option<Team>,
}

impl GameBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// True once the game ended, either by event or by a finished snapshot.
    pub fn is_over(&self) -> bool {
        self.over.is_some()
            || self
                .snapshot
                .as_ref()
                .is_some_and(|s| s.status().is_finished())
    }

    pub fn winner(&self) -> Option<Team> {
        self.over
            .or_else(|| self.snapshot.as_ref().and_then(|s| s.winner()))
    }

    /// Apply one event and report what the renderer must update.
    ///
    /// An empty vec means the event was a repeat and nothing changed.
    pub fn apply(&mut self, event: BoardEvent) -> Result<Vec<BoardChange>, DomainError> {
        if let BoardEvent::Snapshot(snapshot) = event {
            if snapshot.status() != GameStatus::Finished {
                self.over = None;
            }
            self.snapshot = Some(snapshot);
            return Ok(vec![BoardChange::FullRender]);
        }

        let name = event.name();
        let Some(snapshot) = self.snapshot.as_mut() else {
            return Err(DomainError::invalid_transition(format!(
                "{name} received before any game state"
            )));
        };

        match event {
            BoardEvent::Snapshot(_) => Ok(Vec::new()),
            BoardEvent::CardRevealed { index, color } => {
                if !snapshot.reveal(index, color)? {
                    return Ok(Vec::new());
                }
                let mut changes = vec![BoardChange::CardRevealed { index, color }];
                if color.team().is_some() {
                    changes.push(BoardChange::ScoreChanged {
                        remaining: snapshot.remaining(),
                    });
                }
                Ok(changes)
            }
            BoardEvent::TurnSwitched { team, turn } => {
                let changed = snapshot.current_team() != team;
                snapshot.set_turn(team, turn);
                Ok(vec![BoardChange::TurnChanged {
                    team,
                    turn: snapshot.current_turn(),
                    changed,
                }])
            }
            BoardEvent::PlayersChanged { count } => {
                snapshot.set_players_count(count);
                Ok(vec![BoardChange::PlayersChanged { count }])
            }
            BoardEvent::GameOver { winner } => {
                if self.over.is_some() {
                    return Ok(Vec::new());
                }
                snapshot.finish(winner);
                self.over = Some(winner);
                Ok(vec![BoardChange::GameOver { winner }])
            }
        }
    }

    /// Whether a hold on `index` may send a selection.
    pub fn can_select(&self, index: usize) -> bool {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return false;
        };
        if self.is_over() || !snapshot.viewer().role.can_select_cards() {
            return false;
        }
        snapshot.card(index).is_some_and(|c| !c.is_revealed())
    }

    pub fn card_view(&self, index: usize) -> Option<CardView> {
        let snapshot = self.snapshot.as_ref()?;
        let card = snapshot.card(index)?;
        Some(CardView {
            index,
            word: card.word().to_string(),
            revealed: card.is_revealed(),
            shown_color: card.visible_color(snapshot.viewer().role),
            selectable: self.can_select(index),
        })
    }

    pub fn card_views(&self) -> Vec<CardView> {
        let len = self.snapshot.as_ref().map_or(0, |s| s.cards().len());
        (0..len).filter_map(|i| self.card_view(i)).collect()
    }

    pub fn stats(&self) -> Option<BoardStats> {
        let snapshot = self.snapshot.as_ref()?;
        Some(BoardStats {
            revealed: snapshot.revealed_count(),
            remaining: snapshot.remaining(),
            found_red: snapshot.found(Team::Red),
            found_blue: snapshot.found(Team::Blue),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::fixtures;
    use crate::value_objects::{CardColor, Role};

    fn agent_board() -> GameBoard {
        let mut board = GameBoard::new();
        board
            .apply(BoardEvent::Snapshot(fixtures::snapshot(Role::Agent)))
            .expect("snapshot");
        board
    }

    #[test]
    fn incremental_events_need_a_snapshot() {
        let mut board = GameBoard::new();
        let result = board.apply(BoardEvent::TurnSwitched {
            team: Team::Blue,
            turn: None,
        });
        assert!(matches!(
            result,
            Err(DomainError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn snapshot_requests_full_render() {
        let mut board = GameBoard::new();
        let changes = board
            .apply(BoardEvent::Snapshot(fixtures::snapshot(Role::Captain)))
            .expect("snapshot");
        assert_eq!(changes, vec![BoardChange::FullRender]);
        assert!(board.has_snapshot());
    }

    #[test]
    fn repeated_reveal_is_idempotent() {
        let mut board = agent_board();
        let event = BoardEvent::CardRevealed {
            index: 3,
            color: CardColor::Blue,
        };

        let first = board.apply(event.clone()).expect("reveal");
        assert_eq!(
            first,
            vec![
                BoardChange::CardRevealed {
                    index: 3,
                    color: CardColor::Blue
                },
                BoardChange::ScoreChanged {
                    remaining: TeamCounts::new(9, 7)
                },
            ]
        );
        let after_once = board.snapshot().cloned();

        let second = board.apply(event).expect("reveal again");
        assert!(second.is_empty());
        assert_eq!(board.snapshot().cloned(), after_once);
    }

    #[test]
    fn neutral_reveal_leaves_score_alone() {
        let mut board = agent_board();
        let changes = board
            .apply(BoardEvent::CardRevealed {
                index: 20,
                color: CardColor::Neutral,
            })
            .expect("reveal");
        assert_eq!(changes.len(), 1);
        assert_eq!(
            board.stats().map(|s| s.remaining),
            Some(TeamCounts::new(9, 8))
        );
    }

    #[test]
    fn reveal_out_of_range_is_rejected() {
        let mut board = agent_board();
        let result = board.apply(BoardEvent::CardRevealed {
            index: 99,
            color: CardColor::Red,
        });
        assert_eq!(
            result,
            Err(DomainError::CardOutOfRange { index: 99, len: 25 })
        );
    }

    #[test]
    fn turn_switch_then_reconfirm() {
        let mut board = agent_board();
        let switch = BoardEvent::TurnSwitched {
            team: Team::Blue,
            turn: Some(2),
        };

        let first = board.apply(switch.clone()).expect("switch");
        assert_eq!(
            first,
            vec![BoardChange::TurnChanged {
                team: Team::Blue,
                turn: 2,
                changed: true
            }]
        );

        let again = board.apply(switch).expect("reconfirm");
        assert_eq!(
            again,
            vec![BoardChange::TurnChanged {
                team: Team::Blue,
                turn: 2,
                changed: false
            }]
        );
        assert_eq!(
            board.snapshot().map(|s| s.current_team()),
            Some(Team::Blue)
        );
    }

    #[test]
    fn turn_without_number_keeps_counter() {
        let mut board = agent_board();
        board
            .apply(BoardEvent::TurnSwitched {
                team: Team::Blue,
                turn: None,
            })
            .expect("switch");
        assert_eq!(board.snapshot().map(|s| s.current_turn()), Some(1));
    }

    #[test]
    fn game_over_is_terminal() {
        let mut board = agent_board();
        let over = BoardEvent::GameOver { winner: Team::Blue };

        assert_eq!(
            board.apply(over.clone()).expect("over"),
            vec![BoardChange::GameOver { winner: Team::Blue }]
        );
        assert!(board.is_over());
        assert_eq!(board.winner(), Some(Team::Blue));
        assert!(board.apply(over).expect("over again").is_empty());
        assert!(!board.can_select(0));
    }

    #[test]
    fn game_over_after_finished_snapshot_still_announces() {
        let mut board = GameBoard::new();
        let mut parts = fixtures::parts(Role::Agent, false);
        parts.status = GameStatus::Finished;
        parts.winner = Some(Team::Red);
        let snapshot = GameSnapshot::from_parts(parts).expect("valid");

        board.apply(BoardEvent::Snapshot(snapshot)).expect("snapshot");
        let changes = board
            .apply(BoardEvent::GameOver { winner: Team::Red })
            .expect("over");
        assert_eq!(changes, vec![BoardChange::GameOver { winner: Team::Red }]);
    }

    #[test]
    fn fresh_snapshot_clears_game_over() {
        let mut board = agent_board();
        board
            .apply(BoardEvent::GameOver { winner: Team::Red })
            .expect("over");
        board
            .apply(BoardEvent::Snapshot(fixtures::snapshot(Role::Agent)))
            .expect("new game");
        assert!(!board.is_over());
        assert!(board.can_select(0));
    }

    #[test]
    fn selection_rules() {
        let mut board = agent_board();
        assert!(board.can_select(0));
        assert!(!board.can_select(25));

        board
            .apply(BoardEvent::CardRevealed {
                index: 0,
                color: CardColor::Red,
            })
            .expect("reveal");
        assert!(!board.can_select(0));

        let mut captain = GameBoard::new();
        captain
            .apply(BoardEvent::Snapshot(fixtures::snapshot(Role::Captain)))
            .expect("snapshot");
        assert!(!captain.can_select(1));
        assert!(!GameBoard::new().can_select(0));
    }

    #[test]
    fn card_views_filter_colors_by_role() {
        // Colors sent to an agent are kept but not shown until revealed
        let mut board = GameBoard::new();
        let snapshot =
            GameSnapshot::from_parts(fixtures::parts(Role::Agent, true)).expect("valid");
        board.apply(BoardEvent::Snapshot(snapshot)).expect("snapshot");

        let views = board.card_views();
        assert_eq!(views.len(), 25);
        assert!(views.iter().all(|v| v.shown_color.is_none()));
        assert!(views.iter().all(|v| v.selectable));

        let mut captain = GameBoard::new();
        captain
            .apply(BoardEvent::Snapshot(fixtures::snapshot(Role::Captain)))
            .expect("snapshot");
        let view = captain.card_view(17).expect("in range");
        assert_eq!(view.shown_color, Some(CardColor::Black));
        assert!(!view.selectable);
    }

    #[test]
    fn stats_count_found_cards() {
        let mut board = agent_board();
        for (index, color) in [(0, CardColor::Red), (1, CardColor::Red), (9, CardColor::Blue)] {
            board
                .apply(BoardEvent::CardRevealed { index, color })
                .expect("reveal");
        }
        let stats = board.stats().expect("snapshot present");
        assert_eq!(stats.revealed, 3);
        assert_eq!(stats.found_red, 2);
        assert_eq!(stats.found_blue, 1);
        assert_eq!(stats.remaining, TeamCounts::new(7, 7));
    }
}
