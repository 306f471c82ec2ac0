//! Player entities.
//!
//! A [`Player`] is a position pointer onto the board plus per-turn flags.
//! It never owns its tile — `position` is a `TileId` resolved against the
//! board arena when it matters.
//!
//! Economic variants (Monopoly-style games) additionally carry a
//! [`Wallet`]: a money balance, the set of owned property tile ids, and a
//! jail flag. Plain players (`wallet == None`) treat every economic action
//! as a no-op.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::TileId;
use crate::error::BoardError;

/// Money a fresh economic player starts with.
pub const STARTING_MONEY: i64 = 1500;

/// A participant in one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,

    /// Optional image/sprite handle for UI front-ends. Opaque to the engine.
    pub token_image: Option<String>,

    /// Current tile, by id.
    pub position: TileId,

    /// Set by the `LoseTurn` action; consumed and cleared by the turn
    /// engine at the start of this player's next turn.
    pub skip_next_turn: bool,

    /// Economic state, present only for Monopoly-style players.
    pub wallet: Option<Wallet>,
}

impl Player {
    /// Create a plain (non-economic) player at the given tile.
    ///
    /// Fails if the name is empty or whitespace-only.
    pub fn new(name: impl Into<String>, position: TileId) -> Result<Self, BoardError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BoardError::InvalidArgument(
                "player name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            token_image: None,
            position,
            skip_next_turn: false,
            wallet: None,
        })
    }

    /// Create an economic player with the standard starting balance.
    pub fn economic(name: impl Into<String>, position: TileId) -> Result<Self, BoardError> {
        let mut player = Self::new(name, position)?;
        player.wallet = Some(Wallet::new(STARTING_MONEY));
        Ok(player)
    }

    /// Attach a token image handle.
    #[must_use]
    pub fn with_token_image(mut self, image: impl Into<String>) -> Self {
        self.token_image = Some(image.into());
        self
    }

    /// The player's name. Unique within a game by convention; the
    /// snapshot codec keys property ownership on it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this player carries economic state.
    #[must_use]
    pub fn is_economic(&self) -> bool {
        self.wallet.is_some()
    }

    /// Current balance, or None for plain players.
    #[must_use]
    pub fn money(&self) -> Option<i64> {
        self.wallet.as_ref().map(|w| w.money)
    }
}

/// Economic state of a Monopoly-style player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Current balance. May not go negative: payments that would overdraw
    /// are refused by the resolver instead.
    pub money: i64,

    /// Ids of the property tiles this player owns.
    pub owned: FxHashSet<TileId>,

    /// Set by `SendToJail`; cleared by game-specific rules outside the core.
    pub in_jail: bool,
}

impl Wallet {
    /// Create a wallet with the given balance.
    #[must_use]
    pub fn new(money: i64) -> Self {
        Self {
            money,
            owned: FxHashSet::default(),
            in_jail: false,
        }
    }

    /// Whether the balance covers `amount`.
    #[must_use]
    pub fn can_afford(&self, amount: i64) -> bool {
        self.money >= amount
    }
}
