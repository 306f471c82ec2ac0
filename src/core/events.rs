//! Game events for UI observers.
//!
//! The engine reports every noteworthy phase transition through an
//! [`EventSink`] handed to it at construction. There is no observer
//! registry: one callback, fire-and-forget, no return value. Front-ends
//! that want fan-out put a channel or their own dispatcher behind the
//! closure.
//!
//! Non-fatal in-game failures (low funds, unreachable ladder target) are
//! events too, not just log lines, so a UI can tell the player what
//! happened.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TileId};

/// Something a UI might want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player's skip flag was consumed; the whole turn was forfeited.
    TurnSkipped { player: PlayerId },

    /// Dice were rolled at the start of a turn.
    DiceRolled {
        player: PlayerId,
        values: Vec<u8>,
        total: u32,
    },

    /// A player moved along the chain (by roll or by action).
    Moved {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },

    /// The landed tile's action resolved.
    ActionResolved {
        player: PlayerId,
        tile: TileId,
        label: String,
    },

    /// The landed tile's action could not take effect and degraded to a
    /// no-op (malformed target, unreachable teleport).
    ActionFailed {
        player: PlayerId,
        tile: TileId,
        reason: String,
    },

    /// A payment was refused for lack of funds.
    LowFunds {
        player: PlayerId,
        balance: i64,
        required: i64,
    },

    /// An unowned property was bought.
    PropertyBought {
        player: PlayerId,
        tile: TileId,
        price: i64,
    },

    /// Rent changed hands.
    RentPaid {
        player: PlayerId,
        owner: PlayerId,
        tile: TileId,
        rent: i64,
    },

    /// Money was credited by a collect tile.
    MoneyCollected { player: PlayerId, amount: i64 },

    /// A player was jailed.
    SentToJail { player: PlayerId, jail: TileId },

    /// Two players swapped positions.
    PositionsSwapped { player: PlayerId, other: PlayerId },

    /// The game ended.
    GameWon { player: PlayerId },
}

/// Callback invoked by the engine after each reportable step.
///
/// Must not block: the engine calls it inline, mid-turn.
pub type EventSink = Box<dyn FnMut(&GameEvent)>;

/// Emit an event into an optional sink.
pub(crate) fn emit(sink: &mut Option<EventSink>, event: GameEvent) {
    if let Some(sink) = sink {
        sink(&event);
    }
}
