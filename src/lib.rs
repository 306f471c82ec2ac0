//! # boardkit
//!
//! A tile-chain board game engine: snakes-and-ladders, Monopoly-style
//! property trading, and anything else expressible as a directed chain of
//! tiles with effects triggered on arrival.
//!
//! ## Design Principles
//!
//! 1. **Id-based arena**: tiles live in the [`board::Board`] arena and
//!    every cross-reference — forward links, teleport targets, property
//!    owners — is an id resolved against it. The live graph is cyclic;
//!    the arena keeps ownership simple and is exactly the shape the
//!    persistence codec needs.
//!
//! 2. **Closed action set**: tile effects are one tagged enum
//!    ([`board::TileAction`]) with one dispatch point, not an open class
//!    hierarchy. The codec enumerates every variant anyway; a new effect
//!    is a variant, a resolver arm, and a wire tag.
//!
//! 3. **Non-fatal by default**: a malformed tile or an empty wallet
//!    degrades to a logged no-op and an event on the sink. One bad tile
//!    never aborts a session.
//!
//! ## Modules
//!
//! - `core`: ids, players, dice, game events
//! - `board`: tiles, actions, the board arena, variant factories
//! - `engine`: action resolution and the per-turn state machine
//! - `codec`: tagged board envelope and flattened game snapshots
//! - `io`: game-state JSON files and the player roster file
//! - `error`: the crate error taxonomy

pub mod board;
pub mod codec;
pub mod core;
pub mod engine;
pub mod error;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    Dice, DiceSource, EventSink, GameEvent, Player, PlayerId, TileId, Wallet, STARTING_MONEY,
};

pub use crate::board::{
    classic_snakes_and_ladders, monopoly, snakes_and_ladders, Board, Property, Tile, TileAction,
    TileFeature,
};

pub use crate::engine::{resolve, ResolveOutcome, TurnEngine, TurnOutcome, TurnPhase, WinRule};

pub use crate::codec::{
    decode_board, encode_board, restore, snapshot, BoardRecord, GameSnapshot, GameType,
    PlayerRecord, TileRecord,
};

pub use crate::io::{load_game, read_roster, save_game, write_roster};

pub use crate::error::{ActionError, BoardError, EngineError, SaveError};
