//! Crate error taxonomy.
//!
//! One enum per failure domain:
//! - [`BoardError`]: construction and chain-walk failures
//! - [`ActionError`]: failures at the action-resolution boundary
//! - [`EngineError`]: turn-engine misuse
//! - [`SaveError`]: persistence failures (I/O, JSON, bad references)
//!
//! Silent degradations (ladder target miss, low funds) are deliberately
//! *not* errors — they are logged no-ops surfaced as events. See the
//! resolver for that policy.

use std::path::PathBuf;

use crate::core::TileId;

/// Errors from board construction and tile-chain walks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A constructor argument violated an invariant.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A walk ran off the end of the chain before completing.
    #[error("walked past the end of the board: {steps} steps from tile {from}")]
    PastEnd { from: TileId, steps: usize },

    /// A forward walk exhausted the chain without finding the target.
    #[error("tile {target} is unreachable from tile {from}")]
    UnreachableTile { from: TileId, target: TileId },

    /// Lookup of a tile id that is not on the board.
    #[error("no tile with id {0}")]
    NoSuchTile(TileId),
}

/// Errors surfaced at the action-resolution boundary.
///
/// The turn engine catches these and converts them into non-fatal
/// `ActionFailed` events; they never abort a turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// An explicit teleport target was not reachable by a forward walk.
    #[error("teleport target {target} unreachable from tile {from}")]
    UnreachableTile { from: TileId, target: TileId },

    /// The board walk underlying the action failed.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Turn-engine misuse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// `play_turn` was called after a winner was decided.
    #[error("game is over; {winner} already won")]
    GameOver { winner: String },

    /// Engine construction with no players.
    #[error("a game needs at least one player")]
    NoPlayers,

    /// Cursor restore outside the player list.
    #[error("current-player index {index} out of range for {count} players")]
    BadCursor { index: usize, count: usize },

    /// The board was internally inconsistent mid-turn.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tile record {id}: {reason}")]
    BadRecord { id: u32, reason: String },

    #[error("save references tile {tile} which is not on the rebuilt board")]
    BadReference { tile: TileId },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
