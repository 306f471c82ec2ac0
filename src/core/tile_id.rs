//! Identifier types for tiles and players.
//!
//! ## TileId
//!
//! Every tile on a board has a unique non-negative id. All links between
//! tiles (`next`, teleport targets, jail locations) are expressed as
//! `TileId` lookups against the board's arena rather than as owning
//! references — the id *is* the tile's identity, which is also what the
//! persistence codec relies on when it resolves references in its second
//! pass.
//!
//! ## PlayerId
//!
//! Seating-order index into the engine's player list. Property ownership
//! is stored as a `PlayerId` on the tile side.
//!
//! ```
//! use boardkit::core::TileId;
//!
//! let start = TileId::new(0);
//! assert!(start.is_first());
//! assert_eq!(start.raw(), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a tile within one board.
///
/// Two tiles with the same id are the same logical tile; equality and
/// hashing go through the id only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a tile id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether this is the starting tile's id.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player identifier: 0-based seating order, up to 255 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seating index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player ids for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
