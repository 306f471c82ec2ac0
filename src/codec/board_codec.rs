//! Board encode/decode.
//!
//! Encoding is a single pass over the arena. Decoding is two passes:
//! the first materializes every tile from its tag, the second resolves
//! references (`next` links, property owners) once all tiles exist —
//! forward references are the norm in these files, so a one-pass decode
//! cannot work.

use std::collections::BTreeMap;

use tracing::warn;

use crate::board::{Board, Property, Tile, TileAction};
use crate::codec::record::{tag, tag_for_action, BoardRecord, TileRecord};
use crate::core::{Player, PlayerId, TileId};
use crate::error::SaveError;

/// Flatten a board into its persisted envelope.
///
/// The tag mirrors the tile's action; property data (price, rent, group,
/// owner by name) rides alongside whatever tag that is. `players` is
/// consulted only to turn property-owner ids into names; an owner id with
/// no matching player is dropped with a warning.
#[must_use]
pub fn encode_board(board: &Board, players: &[Player]) -> BoardRecord {
    let mut tiles = BTreeMap::new();
    for id in board.tile_ids() {
        if let Some(tile) = board.get(id) {
            tiles.insert(id.raw().to_string(), encode_tile(tile, players));
        }
    }
    BoardRecord {
        capacity: board.capacity(),
        circular: board.is_circular(),
        tiles,
    }
}

fn encode_tile(tile: &Tile, players: &[Player]) -> TileRecord {
    let action = tile.action.as_ref();
    let mut record = TileRecord::bare(tile.id(), action.map_or(tag::PLAIN, tag_for_action));
    match action {
        Some(TileAction::GoTo { target }) => record.target = Some(target.raw()),
        Some(TileAction::Ladder { top }) => record.target = Some(top.raw()),
        Some(TileAction::Snake { tail }) => record.target = Some(tail.raw()),
        Some(TileAction::SendToJail { jail }) => record.target = Some(jail.raw()),
        Some(TileAction::HopForward { steps }) => record.steps = Some(*steps),
        Some(TileAction::CollectMoney { amount }) => record.amount = Some(*amount),
        // The plain tag alone means "no action"; an explicit Plain rides
        // in the nested field so the two stay distinguishable.
        Some(TileAction::Plain) => record.action = Some(TileAction::Plain),
        _ => {}
    }
    if let Some(property) = &tile.property {
        record.price = Some(property.price);
        record.rent = Some(property.rent);
        record.group = Some(property.group);
        record.owner = property.owner.and_then(|owner| {
            let name = players.get(owner.index()).map(|p| p.name().to_string());
            if name.is_none() {
                warn!(tile = %tile.id(), %owner, "owner id has no player; dropped from record");
            }
            name
        });
    }
    record.next_tile_id = tile.next.map(TileId::raw);
    record
}

/// Rebuild a board from its envelope.
///
/// `roster` maps owner names back to player ids; an owner naming an
/// absent player decodes as unowned, with a warning.
pub fn decode_board(record: &BoardRecord, roster: &[Player]) -> Result<Board, SaveError> {
    let mut board = Board::new(record.capacity)?;

    // Pass one: materialize tiles.
    for tile_record in record.tiles.values() {
        let tile = decode_tile(tile_record)?;
        if !board.add_tile(tile) {
            return Err(SaveError::BadRecord {
                id: tile_record.id,
                reason: "duplicate tile id or board over capacity".to_string(),
            });
        }
    }

    // Pass two: resolve references.
    for tile_record in record.tiles.values() {
        let id = TileId::new(tile_record.id);
        if let Some(next) = tile_record.next_tile_id {
            board.connect(id, TileId::new(next))?;
        }
        if let Some(owner_name) = &tile_record.owner {
            let owner = roster
                .iter()
                .position(|p| p.name() == owner_name)
                .map(|i| PlayerId::new(i as u8));
            if owner.is_none() {
                warn!(tile = %id, owner = %owner_name, "unknown owner name; decoded unowned");
            }
            if let Some(property) = board.get_mut(id).and_then(|t| t.property.as_mut()) {
                property.owner = owner;
            }
        }
    }

    board.set_circular(record.circular);
    Ok(board)
}

fn decode_tile(record: &TileRecord) -> Result<Tile, SaveError> {
    let id = TileId::new(record.id);

    let checked = |result: Result<TileAction, _>| -> Result<TileAction, SaveError> {
        result.map_err(|e: crate::error::BoardError| SaveError::BadRecord {
            id: record.id,
            reason: e.to_string(),
        })
    };

    let mut tile = Tile::new(id);
    if record.tag == tag::PROPERTY || record.price.is_some() || record.rent.is_some() {
        tile.property = Some(Property::new(
            require(record, record.price, "price")?,
            require(record, record.rent, "rent")?,
            record.group.unwrap_or(0),
        ));
    }
    tile.action = match record.tag.as_str() {
        tag::PLAIN => record.action.clone(),
        tag::SAFE_SPOT => Some(TileAction::SafeSpot),
        tag::LOSE_TURN => Some(TileAction::LoseTurn),
        tag::SWITCH_AHEAD => Some(TileAction::SwitchWithPlayerAhead),
        tag::GOTO => Some(checked(TileAction::go_to(require_target(record)?))?),
        tag::LADDER => Some(checked(TileAction::ladder(require_target(record)?))?),
        tag::SNAKE => Some(checked(TileAction::snake(require_target(record)?))?),
        tag::GO_TO_JAIL => Some(checked(TileAction::send_to_jail(require_target(record)?))?),
        tag::HOP_FORWARD => Some(TileAction::HopForward {
            steps: require(record, record.steps, "steps")?,
        }),
        tag::COLLECT_MONEY => Some(TileAction::CollectMoney {
            amount: require(record, record.amount, "amount")?,
        }),
        tag::PROPERTY => Some(TileAction::PayOrBuyProperty),
        unknown => {
            // Forward compatibility: an unrecognized tag falls back to a
            // plain tile, keeping any generic action it carried.
            warn!(tile = %id, tag = %unknown, "unknown tile tag; decoded as plain");
            record.action.clone()
        }
    };
    Ok(tile)
}

fn require_target(record: &TileRecord) -> Result<TileId, SaveError> {
    require(record, record.target, "target").map(TileId::new)
}

fn require<T>(record: &TileRecord, field: Option<T>, name: &str) -> Result<T, SaveError> {
    field.ok_or_else(|| SaveError::BadRecord {
        id: record.id,
        reason: format!("tag {:?} requires field {name:?}", record.tag),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{classic_snakes_and_ladders, monopoly, snakes_and_ladders, TileFeature};

    #[test]
    fn test_round_trip_preserves_size_and_variants() {
        let original = snakes_and_ladders(
            10,
            &[
                (3, TileFeature::Ladder(7)),
                (8, TileFeature::Snake(2)),
                (5, TileFeature::GoTo(9)),
                (2, TileFeature::LoseTurn),
            ],
        )
        .unwrap();

        let record = encode_board(&original, &[]);
        let decoded = decode_board(&record, &[]).unwrap();

        assert_eq!(decoded.len(), original.len());
        for id in original.tile_ids() {
            let a = original.get(id).unwrap();
            let b = decoded.get(id).unwrap();
            assert_eq!(a.action, b.action, "action mismatch at tile {id}");
            assert_eq!(a.next, b.next, "link mismatch at tile {id}");
        }
    }

    #[test]
    fn test_round_trip_preserves_target_ids_exactly() {
        let original =
            snakes_and_ladders(100, &[(4, TileFeature::Ladder(97)), (96, TileFeature::Snake(1))])
                .unwrap();
        let decoded = decode_board(&encode_board(&original, &[]), &[]).unwrap();

        assert_eq!(
            decoded.get(TileId::new(4)).unwrap().action,
            Some(TileAction::Ladder {
                top: TileId::new(97)
            })
        );
        assert_eq!(
            decoded.get(TileId::new(96)).unwrap().action,
            Some(TileAction::Snake {
                tail: TileId::new(1)
            })
        );
    }

    #[test]
    fn test_round_trip_monopoly_with_owner() {
        let mut original = monopoly().unwrap();
        let players = vec![
            Player::economic("Ada", TileId::new(0)).unwrap(),
            Player::economic("Bert", TileId::new(0)).unwrap(),
        ];
        original
            .get_mut(TileId::new(6))
            .unwrap()
            .property
            .as_mut()
            .unwrap()
            .owner = Some(PlayerId::new(1));

        let record = encode_board(&original, &players);
        assert_eq!(
            record.tiles.get("6").unwrap().owner.as_deref(),
            Some("Bert")
        );

        let decoded = decode_board(&record, &players).unwrap();
        assert!(decoded.is_circular());
        assert_eq!(
            decoded
                .get(TileId::new(6))
                .unwrap()
                .property
                .as_ref()
                .unwrap()
                .owner,
            Some(PlayerId::new(1))
        );
        // The closing edge survives.
        assert_eq!(decoded.step(TileId::new(39), 1), Ok(TileId::new(0)));
    }

    #[test]
    fn test_unknown_owner_decodes_unowned() {
        let mut original = monopoly().unwrap();
        original
            .get_mut(TileId::new(6))
            .unwrap()
            .property
            .as_mut()
            .unwrap()
            .owner = Some(PlayerId::new(0));
        let players = vec![Player::economic("Ada", TileId::new(0)).unwrap()];

        let record = encode_board(&original, &players);
        let decoded = decode_board(&record, &[]).unwrap();
        assert!(!decoded
            .get(TileId::new(6))
            .unwrap()
            .property
            .as_ref()
            .unwrap()
            .is_owned());
    }

    #[test]
    fn test_unknown_tag_falls_back_to_plain() {
        let mut record = encode_board(&snakes_and_ladders(3, &[]).unwrap(), &[]);
        let entry = record.tiles.get_mut("1").unwrap();
        entry.tag = "wormhole".to_string();
        entry.action = Some(TileAction::LoseTurn);

        let decoded = decode_board(&record, &[]).unwrap();
        // The generic nested action is carried through.
        assert_eq!(
            decoded.get(TileId::new(1)).unwrap().action,
            Some(TileAction::LoseTurn)
        );
    }

    #[test]
    fn test_missing_required_field_is_bad_record() {
        let mut record = encode_board(
            &snakes_and_ladders(5, &[(2, TileFeature::Ladder(4))]).unwrap(),
            &[],
        );
        record.tiles.get_mut("2").unwrap().target = None;

        let err = decode_board(&record, &[]).unwrap_err();
        assert!(matches!(err, SaveError::BadRecord { id: 2, .. }));
    }

    #[test]
    fn test_explicit_plain_action_survives_round_trip() {
        let mut original = snakes_and_ladders(4, &[]).unwrap();
        original.get_mut(TileId::new(1)).unwrap().action = Some(TileAction::Plain);

        let decoded = decode_board(&encode_board(&original, &[]), &[]).unwrap();

        assert_eq!(
            decoded.get(TileId::new(1)).unwrap().action,
            Some(TileAction::Plain)
        );
        // An actionless tile stays actionless.
        assert_eq!(decoded.get(TileId::new(2)).unwrap().action, None);
    }

    #[test]
    fn test_property_tile_with_foreign_action_round_trips() {
        let mut original = snakes_and_ladders(6, &[(2, TileFeature::Ladder(4))]).unwrap();
        original.get_mut(TileId::new(2)).unwrap().property = Some(Property::new(80, 8, 0));

        let record = encode_board(&original, &[]);
        assert_eq!(record.tiles.get("2").unwrap().tag, "ladder");

        let decoded = decode_board(&record, &[]).unwrap();
        let tile = decoded.get(TileId::new(2)).unwrap();
        assert_eq!(
            tile.action,
            Some(TileAction::Ladder {
                top: TileId::new(4)
            })
        );
        assert_eq!(tile.property, Some(Property::new(80, 8, 0)));
    }

    #[test]
    fn test_property_tile_without_action_round_trips() {
        let mut original = snakes_and_ladders(3, &[]).unwrap();
        original.get_mut(TileId::new(1)).unwrap().property = Some(Property::new(50, 5, 2));

        let decoded = decode_board(&encode_board(&original, &[]), &[]).unwrap();
        let tile = decoded.get(TileId::new(1)).unwrap();
        assert_eq!(tile.action, None);
        assert_eq!(tile.property, Some(Property::new(50, 5, 2)));
    }

    #[test]
    fn test_classic_board_stringified_keys() {
        let record = encode_board(&classic_snakes_and_ladders().unwrap(), &[]);
        assert_eq!(record.tiles.len(), 100);
        assert!(record.tiles.contains_key("0"));
        assert!(record.tiles.contains_key("99"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tiles"]["15"]["type"], "snake");
        assert_eq!(json["tiles"]["15"]["target"], 5);
    }
}
