//! Tiles: nodes of the board chain.
//!
//! A tile owns nothing but its own data. Its forward link and any
//! property owner are `TileId`/`PlayerId` values resolved against the
//! board arena and the player list — the live graph is cyclic
//! (tile↔tile, property↔owner) and id indirection is what keeps both the
//! ownership model and the persistence codec simple.

use serde::{Deserialize, Serialize};

use crate::board::TileAction;
use crate::core::{PlayerId, TileId};

/// One node in the board's position chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,

    /// Effect triggered when a player lands here.
    pub action: Option<TileAction>,

    /// Forward link, or None for the last tile of a linear board.
    pub next: Option<TileId>,

    /// Property data for Monopoly-style tiles.
    pub property: Option<Property>,
}

impl Tile {
    /// Create a tile with no action, no link, no property.
    #[must_use]
    pub fn new(id: TileId) -> Self {
        Self {
            id,
            action: None,
            next: None,
            property: None,
        }
    }

    /// Create a tile carrying an action.
    #[must_use]
    pub fn with_action(id: TileId, action: TileAction) -> Self {
        Self {
            id,
            action: Some(action),
            next: None,
            property: None,
        }
    }

    /// The tile's immutable id.
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Whether this is the starting tile (id 0).
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.id.is_first()
    }

    /// Whether this tile ends a linear chain.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Tiles are equal iff their ids are equal. The arena guarantees one
/// tile per id, and the codec resolves references on that basis.
impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tile {}

impl std::hash::Hash for Tile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Purchasable-tile data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub price: i64,
    pub rent: i64,

    /// Colour-group index; contiguous ranges on the standard board.
    pub group: u32,

    /// Owning player, if any. `is_owned()` is exactly this being Some.
    pub owner: Option<PlayerId>,
}

impl Property {
    /// Create an unowned property.
    #[must_use]
    pub fn new(price: i64, rent: i64, group: u32) -> Self {
        Self {
            price,
            rent,
            group,
            owner: None,
        }
    }

    /// Whether any player owns this property.
    #[must_use]
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }
}
