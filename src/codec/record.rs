//! The persisted tile envelope.
//!
//! Every tile serializes to one [`TileRecord`]: a `type` tag naming the
//! action variant, the fields that variant needs, property data when the
//! tile is purchasable, and id-based references (`next_tile_id`, `owner`
//! by player name) in place of the live graph's cross-links. A whole
//! board is a [`BoardRecord`]: the tile records in a map keyed by
//! stringified id, plus capacity and the circular flag.
//!
//! Tags are stable wire identifiers, decoupled from the Rust variant
//! names. An unrecognized tag decodes as a plain tile (keeping a generic
//! nested `action` when one is present) so newer saves degrade instead of
//! failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::TileAction;
use crate::core::TileId;

/// Wire tags, one per action variant.
pub mod tag {
    pub const PLAIN: &str = "plain";
    pub const GOTO: &str = "goto";
    pub const SAFE_SPOT: &str = "safe_spot";
    pub const LOSE_TURN: &str = "lose_turn";
    pub const SWITCH_AHEAD: &str = "switch_ahead";
    pub const HOP_FORWARD: &str = "hop_forward";
    pub const LADDER: &str = "ladder";
    pub const SNAKE: &str = "snake";
    pub const COLLECT_MONEY: &str = "collect_money";
    pub const PROPERTY: &str = "property";
    pub const GO_TO_JAIL: &str = "go_to_jail";
}

/// One tile, flattened for persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub id: u32,

    #[serde(rename = "type")]
    pub tag: String,

    /// Forward link, absent on the last tile of a linear board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_tile_id: Option<u32>,

    /// Target id for `goto`, `ladder`, `snake`, `go_to_jail`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,

    /// Step count for `hop_forward`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,

    /// Amount for `collect_money`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,

    // Property fields; present alongside whatever tag the tile's action
    // implies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u32>,
    /// Owner by player name; resolved against the roster on decode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Nested action, for the cases the tag alone cannot express: an
    /// explicit `Plain` action (distinct from no action at all) and the
    /// carried-through action of an unrecognized tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<TileAction>,
}

impl TileRecord {
    /// A bare record with the given id and tag, all fields empty.
    #[must_use]
    pub fn bare(id: TileId, tag: impl Into<String>) -> Self {
        Self {
            id: id.raw(),
            tag: tag.into(),
            next_tile_id: None,
            target: None,
            steps: None,
            amount: None,
            price: None,
            rent: None,
            group: None,
            owner: None,
            action: None,
        }
    }
}

/// A whole board, flattened for persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub capacity: usize,
    #[serde(default)]
    pub circular: bool,
    /// Tiles keyed by stringified id.
    pub tiles: BTreeMap<String, TileRecord>,
}

/// The wire tag implied by an action variant, with its variant field.
pub(crate) fn tag_for_action(action: &TileAction) -> &'static str {
    match action {
        TileAction::Plain => tag::PLAIN,
        TileAction::GoTo { .. } => tag::GOTO,
        TileAction::SafeSpot => tag::SAFE_SPOT,
        TileAction::LoseTurn => tag::LOSE_TURN,
        TileAction::SwitchWithPlayerAhead => tag::SWITCH_AHEAD,
        TileAction::HopForward { .. } => tag::HOP_FORWARD,
        TileAction::Ladder { .. } => tag::LADDER,
        TileAction::Snake { .. } => tag::SNAKE,
        TileAction::CollectMoney { .. } => tag::COLLECT_MONEY,
        TileAction::PayOrBuyProperty => tag::PROPERTY,
        TileAction::SendToJail { .. } => tag::GO_TO_JAIL,
    }
}
