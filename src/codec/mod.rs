//! Persistence codec: the tagged tile envelope and the full-game snapshot.

mod board_codec;
pub mod record;
mod snapshot;

pub use board_codec::{decode_board, encode_board};
pub use record::{BoardRecord, TileRecord};
pub use snapshot::{restore, snapshot, GameSnapshot, GameType, PlayerRecord};
