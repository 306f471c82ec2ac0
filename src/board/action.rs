//! Tile actions.
//!
//! Effects are a closed tagged-variant enum rather than an open trait
//! hierarchy: the persistence codec has to enumerate every variant anyway,
//! so a new effect is a new variant plus a dispatch arm in the resolver
//! and a tag in the codec.
//!
//! Variants only *describe* an effect; execution lives in
//! `engine::resolver`, which has the board and player context the effect
//! needs.
//!
//! ## Variants
//!
//! Movement: `GoTo`, `Ladder`, `Snake`, `HopForward`
//! Turn flow: `LoseTurn`, `SwitchWithPlayerAhead`, `SafeSpot`
//! Economy: `CollectMoney`, `PayOrBuyProperty`, `SendToJail`

use serde::{Deserialize, Serialize};

use crate::core::TileId;
use crate::error::BoardError;

/// Effect triggered when a player lands on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TileAction {
    /// No effect.
    Plain,

    /// Teleport forward along the chain to an exact tile id.
    /// Forward-only: a target behind the tile is unreachable.
    GoTo { target: TileId },

    /// Nothing happens here; games may treat it as immune ground.
    SafeSpot,

    /// Forfeit the next turn entirely.
    LoseTurn,

    /// Swap positions with the nearest player ahead.
    SwitchWithPlayerAhead,

    /// Advance by a fixed number of steps.
    HopForward { steps: u32 },

    /// Climb to the ladder's top tile.
    Ladder { top: TileId },

    /// Slide down to the snake's tail tile.
    Snake { tail: TileId },

    /// Credit an economic player's balance.
    CollectMoney { amount: i64 },

    /// Buy the landed property if unowned, pay rent if owned by another.
    PayOrBuyProperty,

    /// Jail an economic player and relocate them to the jail tile.
    SendToJail { jail: TileId },
}

impl TileAction {
    /// Create a teleport action. The target id must be positive: tile 0
    /// is the start and can never be ahead of anything.
    pub fn go_to(target: TileId) -> Result<Self, BoardError> {
        Self::positive(target, "goto target")?;
        Ok(Self::GoTo { target })
    }

    /// Create a ladder to `top`.
    pub fn ladder(top: TileId) -> Result<Self, BoardError> {
        Self::positive(top, "ladder top")?;
        Ok(Self::Ladder { top })
    }

    /// Create a snake down to `tail`.
    pub fn snake(tail: TileId) -> Result<Self, BoardError> {
        Self::positive(tail, "snake tail")?;
        Ok(Self::Snake { tail })
    }

    /// Create a jail action pointing at the jail tile.
    pub fn send_to_jail(jail: TileId) -> Result<Self, BoardError> {
        Self::positive(jail, "jail tile")?;
        Ok(Self::SendToJail { jail })
    }

    fn positive(id: TileId, what: &str) -> Result<(), BoardError> {
        if id.raw() == 0 {
            return Err(BoardError::InvalidArgument(format!(
                "{what} id must be positive, got 0"
            )));
        }
        Ok(())
    }

    /// Human-readable label for logs and UI.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Plain => "plain tile".to_string(),
            Self::GoTo { target } => format!("go to tile {target}"),
            Self::SafeSpot => "safe spot".to_string(),
            Self::LoseTurn => "lose a turn".to_string(),
            Self::SwitchWithPlayerAhead => "switch with the player ahead".to_string(),
            Self::HopForward { steps } => format!("hop {steps} forward"),
            Self::Ladder { top } => format!("ladder up to tile {top}"),
            Self::Snake { tail } => format!("snake down to tile {tail}"),
            Self::CollectMoney { amount } => format!("collect {amount}"),
            Self::PayOrBuyProperty => "pay rent or buy".to_string(),
            Self::SendToJail { jail } => format!("go to jail at tile {jail}"),
        }
    }
}
