//! Core types: ids, players, dice, events.

mod dice;
mod events;
mod player;
mod tile_id;

pub use dice::{Dice, DiceSource};
pub use events::{GameEvent, EventSink};
pub(crate) use events::emit;
pub use player::{Player, Wallet, STARTING_MONEY};
pub use tile_id::{PlayerId, TileId};
