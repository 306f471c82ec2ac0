//! Board factories.
//!
//! Factories are pure functions from a declarative ruleset (position →
//! feature) to a fully linked board: allocate `capacity` tiles
//! `0..capacity`, attach the action each rule asks for, link every tile
//! to its successor, and close the loop for the circular variants.

use crate::board::{Board, Property, Tile, TileAction};
use crate::core::TileId;
use crate::error::BoardError;

/// Declarative description of what sits on one board position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileFeature {
    /// A ladder whose top is the given tile id.
    Ladder(u32),
    /// A snake whose tail is the given tile id.
    Snake(u32),
    /// Nothing happens here.
    SafeSpot,
    /// Landing here forfeits the next turn.
    LoseTurn,
    /// Landing here advances the player by the given step count.
    HopForward(u32),
    /// Landing here swaps positions with the nearest player ahead.
    Switch,
    /// Landing here teleports forward to the given tile id.
    GoTo(u32),
}

impl TileFeature {
    fn into_action(self) -> Result<TileAction, BoardError> {
        match self {
            Self::Ladder(top) => TileAction::ladder(TileId::new(top)),
            Self::Snake(tail) => TileAction::snake(TileId::new(tail)),
            Self::SafeSpot => Ok(TileAction::SafeSpot),
            Self::LoseTurn => Ok(TileAction::LoseTurn),
            Self::HopForward(steps) => Ok(TileAction::HopForward { steps }),
            Self::Switch => Ok(TileAction::SwitchWithPlayerAhead),
            Self::GoTo(target) => TileAction::go_to(TileId::new(target)),
        }
    }
}

/// Build a linear snakes-and-ladders style board.
///
/// Every position in `rules` must be below `capacity`; rule targets are
/// validated by the action constructors.
pub fn snakes_and_ladders(
    capacity: usize,
    rules: &[(u32, TileFeature)],
) -> Result<Board, BoardError> {
    let mut board = Board::new(capacity)?;

    for i in 0..capacity as u32 {
        board.add_tile(Tile::new(TileId::new(i)));
    }
    for i in 0..capacity.saturating_sub(1) as u32 {
        board.connect(TileId::new(i), TileId::new(i + 1))?;
    }

    for &(position, feature) in rules {
        if position as usize >= capacity {
            return Err(BoardError::InvalidArgument(format!(
                "rule position {position} is outside a {capacity}-tile board"
            )));
        }
        let action = feature.into_action()?;
        // Positions exist: allocated above.
        if let Some(tile) = board.get_mut(TileId::new(position)) {
            tile.action = Some(action);
        }
    }

    Ok(board)
}

/// The traditional 100-tile layout (0-indexed positions).
pub fn classic_snakes_and_ladders() -> Result<Board, BoardError> {
    const RULES: &[(u32, TileFeature)] = &[
        // Ladders
        (0, TileFeature::Ladder(37)),
        (3, TileFeature::Ladder(13)),
        (8, TileFeature::Ladder(30)),
        (20, TileFeature::Ladder(41)),
        (27, TileFeature::Ladder(83)),
        (35, TileFeature::Ladder(43)),
        (50, TileFeature::Ladder(66)),
        (70, TileFeature::Ladder(90)),
        (79, TileFeature::Ladder(99)),
        // Snakes
        (15, TileFeature::Snake(5)),
        (46, TileFeature::Snake(25)),
        (48, TileFeature::Snake(10)),
        (55, TileFeature::Snake(52)),
        (61, TileFeature::Snake(18)),
        (63, TileFeature::Snake(59)),
        (86, TileFeature::Snake(23)),
        (92, TileFeature::Snake(72)),
        (94, TileFeature::Snake(74)),
        (97, TileFeature::Snake(77)),
    ];
    snakes_and_ladders(100, RULES)
}

/// Standard Monopoly-style board size.
pub const MONOPOLY_TILES: usize = 40;
/// Fixed special-tile offsets.
pub const MONOPOLY_GO: u32 = 0;
pub const MONOPOLY_JAIL: u32 = 10;
pub const MONOPOLY_FREE_PARKING: u32 = 20;
pub const MONOPOLY_GO_TO_JAIL: u32 = 30;
/// Salary collected when landing on Go.
pub const MONOPOLY_GO_SALARY: i64 = 200;

/// Build the fixed 40-tile circular Monopoly-style board.
///
/// Go, Jail, Free Parking and Go-To-Jail sit at their standard offsets;
/// every other tile is a property in a contiguous colour group of five,
/// priced by group.
pub fn monopoly() -> Result<Board, BoardError> {
    let mut board = Board::new(MONOPOLY_TILES)?;

    for i in 0..MONOPOLY_TILES as u32 {
        let id = TileId::new(i);
        let tile = match i {
            MONOPOLY_GO => Tile::with_action(
                id,
                TileAction::CollectMoney {
                    amount: MONOPOLY_GO_SALARY,
                },
            ),
            MONOPOLY_JAIL | MONOPOLY_FREE_PARKING => Tile::with_action(id, TileAction::SafeSpot),
            MONOPOLY_GO_TO_JAIL => {
                Tile::with_action(id, TileAction::send_to_jail(TileId::new(MONOPOLY_JAIL))?)
            }
            _ => {
                let group = i / 5;
                let price = 60 + i64::from(group) * 40;
                let mut tile = Tile::with_action(id, TileAction::PayOrBuyProperty);
                tile.property = Some(Property::new(price, price / 10, group));
                tile
            }
        };
        board.add_tile(tile);
    }

    for i in 0..(MONOPOLY_TILES - 1) as u32 {
        board.connect(TileId::new(i), TileId::new(i + 1))?;
    }
    board.close_loop()?;

    Ok(board)
}
