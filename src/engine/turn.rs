//! The turn engine.
//!
//! Drives one full turn per call, as a five-phase state machine:
//!
//! `AwaitingRoll → Moving → ResolvingAction → CheckingWin → AdvancingTurn`
//!
//! A turn is atomic: no phase suspends, and nothing outside the engine
//! observes mid-turn state. The engine exclusively owns the board and the
//! player list for the session's lifetime.

use tracing::{debug, warn};

use crate::board::Board;
use crate::core::{emit, DiceSource, EventSink, GameEvent, Player, PlayerId, TileId};
use crate::engine::{resolve, ResolveOutcome};
use crate::error::{ActionError, BoardError, EngineError};

/// Phases of one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingRoll,
    Moving,
    ResolvingAction,
    CheckingWin,
    AdvancingTurn,
}

/// How the game ends.
pub enum WinRule {
    /// Landing exactly on, or being carried past, the terminal tile wins.
    /// The rule for linear boards.
    ReachEnd,
    /// Caller-supplied predicate, checked after every turn. Circular
    /// boards (Monopoly) need one, since they have no terminal tile.
    Custom(Box<dyn Fn(&Board, &[Player]) -> Option<PlayerId>>),
}

impl WinRule {
    /// The canonical Monopoly rule: the last player with money wins.
    #[must_use]
    pub fn last_solvent() -> Self {
        Self::Custom(Box::new(|_, players| {
            let mut solvent = PlayerId::all(players.len())
                .filter(|id| players[id.index()].money().map_or(false, |m| m > 0));
            match (solvent.next(), solvent.next()) {
                (Some(winner), None) => Some(winner),
                _ => None,
            }
        }))
    }
}

/// Summary of one completed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Whose turn it was.
    pub player: PlayerId,
    /// Whether the turn was forfeited by a consumed skip flag.
    pub skipped: bool,
    /// Dice total, when a roll happened.
    pub rolled: Option<u32>,
    /// Tile landed on by the roll, when movement completed on-board.
    pub landed: Option<TileId>,
    /// Winner decided during this turn, if any.
    pub winner: Option<PlayerId>,
}

/// Orchestrates a board, its players, and a dice source.
pub struct TurnEngine {
    board: Board,
    players: Vec<Player>,
    dice: Box<dyn DiceSource>,
    win_rule: WinRule,
    current: usize,
    winner: Option<PlayerId>,
    sink: Option<EventSink>,
}

impl TurnEngine {
    /// Bind a board, players, and dice into a playable session.
    pub fn new(
        board: Board,
        players: Vec<Player>,
        dice: Box<dyn DiceSource>,
        win_rule: WinRule,
    ) -> Result<Self, EngineError> {
        if players.is_empty() {
            return Err(EngineError::NoPlayers);
        }
        Ok(Self {
            board,
            players,
            dice,
            win_rule,
            current: 0,
            winner: None,
            sink: None,
        })
    }

    /// Attach the event callback for UI observers.
    #[must_use]
    pub fn with_sink(mut self, sink: EventSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The board this session plays on.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All players, in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Index of the player whose turn is next.
    #[must_use]
    pub fn current_player(&self) -> usize {
        self.current
    }

    /// Number of dice rolled per turn.
    #[must_use]
    pub fn dice_count(&self) -> usize {
        self.dice.die_count()
    }

    /// Winner, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Reposition the turn cursor; used when restoring a saved game.
    pub fn set_current_player(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.players.len() {
            return Err(EngineError::BadCursor {
                index,
                count: self.players.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Play one full turn for the current player.
    ///
    /// Fails only on engine misuse (`GameOver`) or an internally
    /// inconsistent board; in-game action failures are events, never
    /// errors, and the turn always advances.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, EngineError> {
        if let Some(winner) = self.winner {
            return Err(EngineError::GameOver {
                winner: self.players[winner.index()].name().to_string(),
            });
        }

        let player_id = PlayerId::new(self.current as u8);
        let mut outcome = TurnOutcome {
            player: player_id,
            skipped: false,
            rolled: None,
            landed: None,
            winner: None,
        };

        let mut phase = TurnPhase::AwaitingRoll;
        loop {
            phase = match phase {
                TurnPhase::AwaitingRoll => {
                    if self.players[self.current].skip_next_turn {
                        self.players[self.current].skip_next_turn = false;
                        outcome.skipped = true;
                        emit(&mut self.sink, GameEvent::TurnSkipped { player: player_id });
                        debug!(%player_id, "turn forfeited");
                        TurnPhase::AdvancingTurn
                    } else {
                        TurnPhase::Moving
                    }
                }

                TurnPhase::Moving => {
                    let values = self.dice.roll_all().to_vec();
                    let total = self.dice.sum_of_rolled();
                    outcome.rolled = Some(total);
                    emit(
                        &mut self.sink,
                        GameEvent::DiceRolled {
                            player: player_id,
                            values,
                            total,
                        },
                    );

                    let from = self.players[self.current].position;
                    match self.board.step(from, total as usize) {
                        Ok(to) => {
                            self.players[self.current].position = to;
                            outcome.landed = Some(to);
                            emit(
                                &mut self.sink,
                                GameEvent::Moved {
                                    player: player_id,
                                    from,
                                    to,
                                },
                            );
                            TurnPhase::ResolvingAction
                        }
                        // Overrunning the chain is not an error here: it is
                        // the win condition of a linear board, and the
                        // landed action never resolves.
                        Err(BoardError::PastEnd { .. }) => {
                            outcome.winner = Some(player_id);
                            TurnPhase::CheckingWin
                        }
                        Err(other) => return Err(other.into()),
                    }
                }

                TurnPhase::ResolvingAction => {
                    if let Some(landed) = outcome.landed {
                        match resolve(
                            &mut self.board,
                            &mut self.players,
                            self.current,
                            landed,
                            &mut self.sink,
                        ) {
                            Ok(ResolveOutcome::Resolved | ResolveOutcome::NoAction) => {}
                            Ok(ResolveOutcome::Degraded(reason)) => {
                                debug!(%player_id, %reason, "action degraded");
                            }
                            // A hop off the end of the chain wins like any
                            // other boundary overrun.
                            Err(ActionError::Board(BoardError::PastEnd { .. })) => {
                                outcome.winner = Some(player_id);
                            }
                            Err(err) => {
                                warn!(%player_id, %err, "action failed; turn continues");
                                emit(
                                    &mut self.sink,
                                    GameEvent::ActionFailed {
                                        player: player_id,
                                        tile: landed,
                                        reason: err.to_string(),
                                    },
                                );
                            }
                        }
                    }
                    TurnPhase::CheckingWin
                }

                TurnPhase::CheckingWin => {
                    if outcome.winner.is_none() {
                        outcome.winner = match &self.win_rule {
                            WinRule::ReachEnd => {
                                let at_end = self.board.ending_tile().is_some_and(|end| {
                                    self.players[self.current].position == end
                                });
                                at_end.then_some(player_id)
                            }
                            WinRule::Custom(predicate) => predicate(&self.board, &self.players),
                        };
                    }
                    if let Some(winner) = outcome.winner {
                        self.winner = Some(winner);
                        emit(&mut self.sink, GameEvent::GameWon { player: winner });
                    }
                    TurnPhase::AdvancingTurn
                }

                TurnPhase::AdvancingTurn => {
                    if self.winner.is_none() {
                        self.current = (self.current + 1) % self.players.len();
                    }
                    return Ok(outcome);
                }
            };
        }
    }
}
