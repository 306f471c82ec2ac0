//! Tiles, actions, the board arena, and the variant factories.

mod action;
#[allow(clippy::module_inception)]
mod board;
pub mod factory;
mod tile;

pub use action::TileAction;
pub use board::Board;
pub use factory::{
    classic_snakes_and_ladders, monopoly, snakes_and_ladders, TileFeature, MONOPOLY_FREE_PARKING,
    MONOPOLY_GO, MONOPOLY_GO_SALARY, MONOPOLY_GO_TO_JAIL, MONOPOLY_JAIL, MONOPOLY_TILES,
};
pub use tile::{Property, Tile};
