//! Full-game snapshots.
//!
//! A snapshot is a flattened, reference-free projection of a session:
//! player state by value, every cross-reference (position, owned
//! properties) by tile id. The live graph is cyclic — tile↔tile and
//! property↔owner — so a tree-shaped serialization needs exactly this
//! id indirection.
//!
//! Restoring does **not** read board topology from the file: the board is
//! rebuilt by the factory named in `game_type` and only player/economic
//! state is re-attached onto it, so a tampered save cannot smuggle in a
//! malformed board.

use serde::{Deserialize, Serialize};

use crate::board::{classic_snakes_and_ladders, monopoly, Board};
use crate::core::{Dice, EventSink, Player, PlayerId, TileId, Wallet};
use crate::engine::{TurnEngine, WinRule};
use crate::error::SaveError;

/// Which factory rebuilds the board on restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    SnakesAndLadders,
    Monopoly,
}

impl GameType {
    fn build_board(self) -> Result<Board, SaveError> {
        let board = match self {
            Self::SnakesAndLadders => classic_snakes_and_ladders()?,
            Self::Monopoly => monopoly()?,
        };
        Ok(board)
    }

    fn win_rule(self) -> WinRule {
        match self {
            Self::SnakesAndLadders => WinRule::ReachEnd,
            Self::Monopoly => WinRule::last_solvent(),
        }
    }
}

/// One player, flattened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_image: Option<String>,
    /// Position by tile id.
    pub position: u32,
    #[serde(default)]
    pub skip_next_turn: bool,
    /// Present only for economic players.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<i64>,
    #[serde(default)]
    pub in_jail: bool,
    /// Owned property tile ids, sorted for stable output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owned_property_ids: Vec<u32>,
}

impl PlayerRecord {
    fn from_player(player: &Player) -> Self {
        let mut owned: Vec<u32> = player
            .wallet
            .as_ref()
            .map(|w| w.owned.iter().map(|id| id.raw()).collect())
            .unwrap_or_default();
        owned.sort_unstable();

        Self {
            name: player.name().to_string(),
            token_image: player.token_image.clone(),
            position: player.position.raw(),
            skip_next_turn: player.skip_next_turn,
            money: player.money(),
            in_jail: player
                .wallet
                .as_ref()
                .map(|w| w.in_jail)
                .unwrap_or(false),
            owned_property_ids: owned,
        }
    }
}

/// A saved game: metadata plus the flattened player list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_type: GameType,
    pub board_size: usize,
    pub dice_count: usize,
    pub current_player: usize,
    pub players: Vec<PlayerRecord>,
}

/// Flatten a running session.
#[must_use]
pub fn snapshot(engine: &TurnEngine, game_type: GameType) -> GameSnapshot {
    GameSnapshot {
        game_type,
        board_size: engine.board().len(),
        dice_count: engine.dice_count(),
        current_player: engine.current_player(),
        players: engine.players().iter().map(PlayerRecord::from_player).collect(),
    }
}

/// Rebuild a session from a snapshot.
///
/// The board comes from the factory for `snapshot.game_type`; player
/// positions and owned-property ids are then re-attached by lookup, and
/// any id that misses the rebuilt board fails with
/// [`SaveError::BadReference`]. Dice are re-seeded from `seed`.
pub fn restore(
    snapshot: &GameSnapshot,
    seed: u64,
    sink: Option<EventSink>,
) -> Result<TurnEngine, SaveError> {
    let mut board = snapshot.game_type.build_board()?;

    let mut players = Vec::with_capacity(snapshot.players.len());
    for (index, record) in snapshot.players.iter().enumerate() {
        let position = TileId::new(record.position);
        if board.get(position).is_none() {
            return Err(SaveError::BadReference { tile: position });
        }

        let mut player = Player::new(record.name.clone(), position)?;
        player.token_image = record.token_image.clone();
        player.skip_next_turn = record.skip_next_turn;

        if let Some(money) = record.money {
            let mut wallet = Wallet::new(money);
            wallet.in_jail = record.in_jail;
            for &raw in &record.owned_property_ids {
                let id = TileId::new(raw);
                let property = board
                    .get_mut(id)
                    .and_then(|t| t.property.as_mut())
                    .ok_or(SaveError::BadReference { tile: id })?;
                property.owner = Some(PlayerId::new(index as u8));
                wallet.owned.insert(id);
            }
            player.wallet = Some(wallet);
        }
        players.push(player);
    }

    let dice = Dice::new(snapshot.dice_count, seed)?;
    let mut engine = TurnEngine::new(
        board,
        players,
        Box::new(dice),
        snapshot.game_type.win_rule(),
    )?;
    if let Some(sink) = sink {
        engine = engine.with_sink(sink);
    }
    engine.set_current_player(snapshot.current_player)?;
    Ok(engine)
}
