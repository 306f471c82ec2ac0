//! The board: an arena of tiles indexed by id.
//!
//! Connectivity is id-based: `next` links and action targets are resolved
//! against this arena on every walk. The set of tiles forms a simple path,
//! or a single cycle when the closing edge of a circular board is in
//! place.

use rustc_hash::FxHashMap;

use crate::board::Tile;
use crate::core::TileId;
use crate::error::BoardError;

/// An ordered collection of connected tiles for one game session.
#[derive(Clone, Debug)]
pub struct Board {
    capacity: usize,
    tiles: FxHashMap<TileId, Tile>,
    circular: bool,
}

impl Board {
    /// Create an empty board. Capacity must be positive.
    pub fn new(capacity: usize) -> Result<Self, BoardError> {
        if capacity == 0 {
            return Err(BoardError::InvalidArgument(
                "board capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            tiles: FxHashMap::default(),
            circular: false,
        })
    }

    /// Declared capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tiles currently on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the closing edge is in place.
    #[must_use]
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Add a tile.
    ///
    /// Returns `false` without touching the board if the id is already
    /// taken or the board is at capacity; an existing tile is never
    /// overwritten.
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if self.tiles.len() >= self.capacity || self.tiles.contains_key(&tile.id()) {
            return false;
        }
        self.tiles.insert(tile.id(), tile);
        true
    }

    /// Set the forward link `from -> to`. Both tiles must exist.
    pub fn connect(&mut self, from: TileId, to: TileId) -> Result<(), BoardError> {
        if !self.tiles.contains_key(&to) {
            return Err(BoardError::NoSuchTile(to));
        }
        let tile = self
            .tiles
            .get_mut(&from)
            .ok_or(BoardError::NoSuchTile(from))?;
        tile.next = Some(to);
        Ok(())
    }

    /// Close the chain into a cycle: the tile with no successor gets
    /// linked back to the starting tile.
    pub fn close_loop(&mut self) -> Result<(), BoardError> {
        let start = self
            .starting_tile()
            .ok_or_else(|| BoardError::InvalidArgument("empty board".to_string()))?;
        let last = self
            .tiles
            .values()
            .find(|t| t.next.is_none())
            .map(Tile::id)
            .ok_or_else(|| {
                BoardError::InvalidArgument("board has no open end to close".to_string())
            })?;
        self.connect(last, start)?;
        self.circular = true;
        Ok(())
    }

    /// Mark the board circular without re-deriving the closing edge; the
    /// codec uses this when every link, closing edge included, comes from
    /// a decoded record.
    pub(crate) fn set_circular(&mut self, circular: bool) {
        self.circular = circular;
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Look up a tile mutably.
    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    /// The tile with the minimum id, or None on an empty board.
    #[must_use]
    pub fn starting_tile(&self) -> Option<TileId> {
        self.tiles.keys().min().copied()
    }

    /// The terminal tile: the one with no successor on a linear board, or
    /// the one whose `next` closes the loop on a circular board.
    #[must_use]
    pub fn ending_tile(&self) -> Option<TileId> {
        if self.circular {
            let start = self.starting_tile()?;
            self.tiles
                .values()
                .find(|t| t.next == Some(start))
                .map(Tile::id)
        } else {
            self.tiles.values().find(|t| t.next.is_none()).map(Tile::id)
        }
    }

    /// Iterate over all tile ids, unordered.
    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.keys().copied()
    }

    /// Walk `steps` forward links from `from`.
    ///
    /// Fails with [`BoardError::PastEnd`] if the chain ends first; the
    /// caller decides whether that boundary is a win or an error. Circular
    /// boards wrap through the closing edge and never hit the boundary.
    pub fn step(&self, from: TileId, steps: usize) -> Result<TileId, BoardError> {
        let mut current = self.get(from).ok_or(BoardError::NoSuchTile(from))?;
        for _ in 0..steps {
            let next = current.next.ok_or(BoardError::PastEnd { from, steps })?;
            current = self.get(next).ok_or(BoardError::NoSuchTile(next))?;
        }
        Ok(current.id())
    }

    /// Walk forward links from `from` until a tile with id `target`.
    ///
    /// Forward-only: the walk is capped at `len()` hops, so a target that
    /// is behind `from` on a circular board is found by wrapping, while a
    /// target that is not on the chain at all fails with
    /// [`BoardError::UnreachableTile`].
    pub fn find_forward(&self, from: TileId, target: TileId) -> Result<TileId, BoardError> {
        let mut current = self.get(from).ok_or(BoardError::NoSuchTile(from))?;
        for _ in 0..=self.tiles.len() {
            if current.id() == target {
                return Ok(target);
            }
            match current.next {
                Some(next) => {
                    current = self.get(next).ok_or(BoardError::NoSuchTile(next))?;
                }
                None => break,
            }
        }
        Err(BoardError::UnreachableTile { from, target })
    }
}
