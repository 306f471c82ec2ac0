//! Action resolution: executing the landed tile's effect.
//!
//! One dispatch point, one match arm per [`TileAction`] variant. The
//! resolver mutates players and the board through the arena and reports
//! what happened on the event sink.
//!
//! ## Failure policy
//!
//! Three tiers, mirroring the error taxonomy:
//!
//! - malformed-board misses (ladder/snake/jail target not found) and low
//!   funds degrade to a logged no-op: the outcome is
//!   [`ResolveOutcome::Degraded`], a `tracing::warn!`, and an
//!   `ActionFailed`/`LowFunds` event — the turn proceeds;
//! - an unreachable explicit `GoTo` target is a genuine
//!   [`ActionError::UnreachableTile`];
//! - a `HopForward` off the end of a linear chain surfaces the underlying
//!   boundary error; the engine reinterprets that one as a win.

use tracing::{debug, warn};

use crate::board::{Board, TileAction};
use crate::core::{emit, EventSink, GameEvent, Player, PlayerId, TileId};
use crate::error::ActionError;

/// What became of a landed tile's action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The action took full effect.
    Resolved,
    /// The tile had no action.
    NoAction,
    /// The action could not take effect and became a no-op.
    Degraded(String),
}

/// Execute the action of the tile `landed` against `players[current]`.
pub fn resolve(
    board: &mut Board,
    players: &mut [Player],
    current: usize,
    landed: TileId,
    sink: &mut Option<EventSink>,
) -> Result<ResolveOutcome, ActionError> {
    let action = match board.get(landed).and_then(|t| t.action.clone()) {
        Some(action) => action,
        None => return Ok(ResolveOutcome::NoAction),
    };
    let player_id = PlayerId::new(current as u8);
    let label = action.label();

    let outcome = match action {
        TileAction::Plain | TileAction::SafeSpot => ResolveOutcome::Resolved,

        TileAction::GoTo { target } => {
            let to = board
                .find_forward(landed, target)
                .map_err(|_| ActionError::UnreachableTile {
                    from: landed,
                    target,
                })?;
            move_player(players, current, to, sink);
            ResolveOutcome::Resolved
        }

        TileAction::Ladder { top } => match forward_exact(board, landed, top) {
            Some(to) => {
                move_player(players, current, to, sink);
                ResolveOutcome::Resolved
            }
            None => degrade(
                sink,
                player_id,
                landed,
                format!("ladder top {top} not on the chain ahead"),
            ),
        },

        TileAction::Snake { tail } => {
            // The chain is singly linked; a backward walk is a direct id
            // lookup constrained to tiles strictly behind the landing spot.
            if tail < landed && board.get(tail).is_some() {
                move_player(players, current, tail, sink);
                ResolveOutcome::Resolved
            } else {
                degrade(
                    sink,
                    player_id,
                    landed,
                    format!("snake tail {tail} not behind tile {landed}"),
                )
            }
        }

        TileAction::HopForward { steps } => {
            let to = board.step(landed, steps as usize)?;
            move_player(players, current, to, sink);
            ResolveOutcome::Resolved
        }

        TileAction::LoseTurn => {
            players[current].skip_next_turn = true;
            ResolveOutcome::Resolved
        }

        TileAction::SwitchWithPlayerAhead => {
            match nearest_ahead(players, current) {
                Some(other) => {
                    let mine = players[current].position;
                    players[current].position = players[other].position;
                    players[other].position = mine;
                    emit(
                        sink,
                        GameEvent::PositionsSwapped {
                            player: player_id,
                            other: PlayerId::new(other as u8),
                        },
                    );
                }
                None => debug!(%player_id, "nobody ahead to switch with"),
            }
            ResolveOutcome::Resolved
        }

        TileAction::CollectMoney { amount } => {
            if let Some(wallet) = players[current].wallet.as_mut() {
                wallet.money += amount;
                emit(
                    sink,
                    GameEvent::MoneyCollected {
                        player: player_id,
                        amount,
                    },
                );
            }
            ResolveOutcome::Resolved
        }

        TileAction::PayOrBuyProperty => resolve_property(board, players, current, landed, sink),

        TileAction::SendToJail { jail } => {
            if let Some(wallet) = players[current].wallet.as_mut() {
                wallet.in_jail = true;
            }
            match board.find_forward(landed, jail) {
                Ok(to) => {
                    move_player(players, current, to, sink);
                    emit(
                        sink,
                        GameEvent::SentToJail {
                            player: player_id,
                            jail,
                        },
                    );
                    ResolveOutcome::Resolved
                }
                Err(_) => degrade(
                    sink,
                    player_id,
                    landed,
                    format!("jail tile {jail} unreachable; flag set, no relocation"),
                ),
            }
        }
    };

    if outcome == ResolveOutcome::Resolved {
        emit(
            sink,
            GameEvent::ActionResolved {
                player: player_id,
                tile: landed,
                label,
            },
        );
    }
    Ok(outcome)
}

/// Buy-or-rent dispatch for a property tile.
fn resolve_property(
    board: &mut Board,
    players: &mut [Player],
    current: usize,
    landed: TileId,
    sink: &mut Option<EventSink>,
) -> ResolveOutcome {
    let player_id = PlayerId::new(current as u8);

    let Some(property) = board.get(landed).and_then(|t| t.property.clone()) else {
        return degrade(
            sink,
            player_id,
            landed,
            "pay-or-buy on a tile without property data".to_string(),
        );
    };
    match property.owner {
        None => {
            // Non-economic players pass over properties untouched.
            let Some(wallet) = players[current].wallet.as_mut() else {
                return ResolveOutcome::Resolved;
            };
            if !wallet.can_afford(property.price) {
                return low_funds(sink, player_id, wallet.money, property.price);
            }
            wallet.money -= property.price;
            wallet.owned.insert(landed);
            if let Some(tile) = board.get_mut(landed) {
                if let Some(p) = tile.property.as_mut() {
                    p.owner = Some(player_id);
                }
            }
            emit(
                sink,
                GameEvent::PropertyBought {
                    player: player_id,
                    tile: landed,
                    price: property.price,
                },
            );
            ResolveOutcome::Resolved
        }

        Some(owner) if owner == player_id => ResolveOutcome::Resolved,

        Some(owner) => {
            let Some(balance) = players[current].money() else {
                return ResolveOutcome::Resolved;
            };
            if balance < property.rent {
                return low_funds(sink, player_id, balance, property.rent);
            }
            if let Some(wallet) = players[current].wallet.as_mut() {
                wallet.money -= property.rent;
            }
            if let Some(wallet) = players[owner.index()].wallet.as_mut() {
                wallet.money += property.rent;
            }
            emit(
                sink,
                GameEvent::RentPaid {
                    player: player_id,
                    owner,
                    tile: landed,
                    rent: property.rent,
                },
            );
            ResolveOutcome::Resolved
        }
    }
}

/// Walk forward links from `from` looking for an exact id match.
///
/// Stops at the chain end, after a full lap, or once the walk passes the
/// target id — the exact-match-or-nothing rule for ladders.
fn forward_exact(board: &Board, from: TileId, target: TileId) -> Option<TileId> {
    let mut current = board.get(from)?;
    for _ in 0..board.len() {
        let next = board.get(current.next?)?;
        if next.id() == target {
            return Some(target);
        }
        if next.id() > target {
            return None;
        }
        current = next;
    }
    None
}

/// Index of the player nearest ahead of `current`, by position delta.
fn nearest_ahead(players: &[Player], current: usize) -> Option<usize> {
    let here = players[current].position.raw();
    players
        .iter()
        .enumerate()
        .filter(|&(i, p)| i != current && p.position.raw() > here)
        .min_by_key(|(_, p)| p.position.raw() - here)
        .map(|(i, _)| i)
}

fn move_player(players: &mut [Player], current: usize, to: TileId, sink: &mut Option<EventSink>) {
    let from = players[current].position;
    players[current].position = to;
    emit(
        sink,
        GameEvent::Moved {
            player: PlayerId::new(current as u8),
            from,
            to,
        },
    );
}

fn degrade(
    sink: &mut Option<EventSink>,
    player: PlayerId,
    tile: TileId,
    reason: String,
) -> ResolveOutcome {
    warn!(%player, %tile, %reason, "tile action degraded to a no-op");
    emit(
        sink,
        GameEvent::ActionFailed {
            player,
            tile,
            reason: reason.clone(),
        },
    );
    ResolveOutcome::Degraded(reason)
}

fn low_funds(
    sink: &mut Option<EventSink>,
    player: PlayerId,
    balance: i64,
    required: i64,
) -> ResolveOutcome {
    warn!(%player, balance, required, "payment refused: low funds");
    emit(
        sink,
        GameEvent::LowFunds {
            player,
            balance,
            required,
        },
    );
    ResolveOutcome::Degraded(format!("low funds: {balance} < {required}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{snakes_and_ladders, Property, TileFeature};
    use crate::error::BoardError;

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .map(|n| Player::new(*n, TileId::new(0)).unwrap())
            .collect()
    }

    #[test]
    fn test_no_action_tile() {
        let mut board = snakes_and_ladders(5, &[]).unwrap();
        let mut ps = players(&["Ada"]);
        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        assert_eq!(outcome, ResolveOutcome::NoAction);
    }

    #[test]
    fn test_ladder_moves_player() {
        let mut board = snakes_and_ladders(10, &[(3, TileFeature::Ladder(7))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(3);

        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(3), &mut None).unwrap();
        assert_eq!(outcome, ResolveOutcome::Resolved);
        assert_eq!(ps[0].position, TileId::new(7));
    }

    #[test]
    fn test_ladder_with_absent_top_is_silent_noop() {
        let mut board = snakes_and_ladders(10, &[(3, TileFeature::Ladder(500))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(3);

        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(3), &mut None).unwrap();
        assert!(matches!(outcome, ResolveOutcome::Degraded(_)));
        assert_eq!(ps[0].position, TileId::new(3));
    }

    #[test]
    fn test_snake_slides_back() {
        let mut board = snakes_and_ladders(10, &[(8, TileFeature::Snake(2))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(8);

        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(8), &mut None).unwrap();
        assert_eq!(outcome, ResolveOutcome::Resolved);
        assert_eq!(ps[0].position, TileId::new(2));
    }

    #[test]
    fn test_snake_tail_ahead_is_noop() {
        // Tail "behind" means strictly lower id; a tail ahead degrades.
        let mut board = snakes_and_ladders(10, &[(2, TileFeature::Snake(8))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(2);

        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        assert!(matches!(outcome, ResolveOutcome::Degraded(_)));
        assert_eq!(ps[0].position, TileId::new(2));
    }

    #[test]
    fn test_goto_unreachable_is_error() {
        let mut board = snakes_and_ladders(10, &[(5, TileFeature::GoTo(3))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(5);

        let err = resolve(&mut board, &mut ps, 0, TileId::new(5), &mut None).unwrap_err();
        assert_eq!(
            err,
            ActionError::UnreachableTile {
                from: TileId::new(5),
                target: TileId::new(3)
            }
        );
        assert_eq!(ps[0].position, TileId::new(5));
    }

    #[test]
    fn test_goto_forward() {
        let mut board = snakes_and_ladders(10, &[(2, TileFeature::GoTo(6))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(2);

        resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        assert_eq!(ps[0].position, TileId::new(6));
    }

    #[test]
    fn test_hop_forward_past_end_surfaces_boundary() {
        let mut board = snakes_and_ladders(5, &[(3, TileFeature::HopForward(4))]).unwrap();
        let mut ps = players(&["Ada"]);
        ps[0].position = TileId::new(3);

        let err = resolve(&mut board, &mut ps, 0, TileId::new(3), &mut None).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Board(BoardError::PastEnd { .. })
        ));
    }

    #[test]
    fn test_lose_turn_sets_flag() {
        let mut board = snakes_and_ladders(5, &[(2, TileFeature::LoseTurn)]).unwrap();
        let mut ps = players(&["Ada"]);

        resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        assert!(ps[0].skip_next_turn);
    }

    #[test]
    fn test_switch_with_nearest_ahead() {
        let mut board = snakes_and_ladders(10, &[(1, TileFeature::Switch)]).unwrap();
        let mut ps = players(&["Ada", "Bert", "Cleo"]);
        ps[0].position = TileId::new(1);
        ps[1].position = TileId::new(7);
        ps[2].position = TileId::new(4); // nearest ahead of Ada

        resolve(&mut board, &mut ps, 0, TileId::new(1), &mut None).unwrap();
        assert_eq!(ps[0].position, TileId::new(4));
        assert_eq!(ps[2].position, TileId::new(1));
        assert_eq!(ps[1].position, TileId::new(7));
    }

    #[test]
    fn test_switch_with_nobody_ahead_is_noop() {
        let mut board = snakes_and_ladders(10, &[(8, TileFeature::Switch)]).unwrap();
        let mut ps = players(&["Ada", "Bert"]);
        ps[0].position = TileId::new(8);
        ps[1].position = TileId::new(2);

        resolve(&mut board, &mut ps, 0, TileId::new(8), &mut None).unwrap();
        assert_eq!(ps[0].position, TileId::new(8));
        assert_eq!(ps[1].position, TileId::new(2));
    }

    #[test]
    fn test_collect_money_skips_plain_players() {
        let mut board = snakes_and_ladders(5, &[]).unwrap();
        board.get_mut(TileId::new(1)).unwrap().action =
            Some(TileAction::CollectMoney { amount: 200 });

        let mut ps = players(&["Ada"]);
        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(1), &mut None).unwrap();
        assert_eq!(outcome, ResolveOutcome::Resolved);
        assert_eq!(ps[0].money(), None);
    }

    #[test]
    fn test_collect_money_credits_wallet() {
        let mut board = snakes_and_ladders(5, &[]).unwrap();
        board.get_mut(TileId::new(1)).unwrap().action =
            Some(TileAction::CollectMoney { amount: 200 });

        let mut ps = vec![Player::economic("Ada", TileId::new(0)).unwrap()];
        resolve(&mut board, &mut ps, 0, TileId::new(1), &mut None).unwrap();
        assert_eq!(ps[0].money(), Some(1700));
    }

    fn property_board() -> Board {
        let mut board = snakes_and_ladders(5, &[]).unwrap();
        let tile = board.get_mut(TileId::new(2)).unwrap();
        tile.action = Some(TileAction::PayOrBuyProperty);
        tile.property = Some(Property::new(200, 20, 0));
        board
    }

    #[test]
    fn test_buy_unowned_property() {
        let mut board = property_board();
        let mut ps = vec![Player::economic("Ada", TileId::new(2)).unwrap()];

        resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();

        assert_eq!(ps[0].money(), Some(1300));
        assert!(ps[0].wallet.as_ref().unwrap().owned.contains(&TileId::new(2)));
        assert_eq!(
            board
                .get(TileId::new(2))
                .unwrap()
                .property
                .as_ref()
                .unwrap()
                .owner,
            Some(PlayerId::new(0))
        );
    }

    #[test]
    fn test_buy_with_low_funds_is_refused() {
        let mut board = property_board();
        let mut ps = vec![Player::economic("Ada", TileId::new(2)).unwrap()];
        ps[0].wallet.as_mut().unwrap().money = 50;

        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        assert!(matches!(outcome, ResolveOutcome::Degraded(_)));
        assert_eq!(ps[0].money(), Some(50));
        assert!(!board
            .get(TileId::new(2))
            .unwrap()
            .property
            .as_ref()
            .unwrap()
            .is_owned());
    }

    #[test]
    fn test_rent_conserves_money() {
        let mut board = property_board();
        let mut ps = vec![
            Player::economic("Ada", TileId::new(2)).unwrap(),
            Player::economic("Bert", TileId::new(2)).unwrap(),
        ];

        resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        resolve(&mut board, &mut ps, 1, TileId::new(2), &mut None).unwrap();

        assert_eq!(ps[0].money(), Some(1320)); // 1500 - 200 + 20
        assert_eq!(ps[1].money(), Some(1480)); // 1500 - 20
        assert_eq!(
            ps[0].money().unwrap() + ps[1].money().unwrap(),
            2 * 1500 - 200
        );
    }

    #[test]
    fn test_landing_on_own_property_is_noop() {
        let mut board = property_board();
        let mut ps = vec![Player::economic("Ada", TileId::new(2)).unwrap()];

        resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        let before = ps[0].money();
        resolve(&mut board, &mut ps, 0, TileId::new(2), &mut None).unwrap();
        assert_eq!(ps[0].money(), before);
    }

    #[test]
    fn test_send_to_jail_sets_flag_and_relocates() {
        let mut board = snakes_and_ladders(10, &[]).unwrap();
        board.close_loop().unwrap();
        board.get_mut(TileId::new(7)).unwrap().action =
            Some(TileAction::send_to_jail(TileId::new(3)).unwrap());

        let mut ps = vec![Player::economic("Ada", TileId::new(7)).unwrap()];
        resolve(&mut board, &mut ps, 0, TileId::new(7), &mut None).unwrap();

        assert!(ps[0].wallet.as_ref().unwrap().in_jail);
        assert_eq!(ps[0].position, TileId::new(3));
    }

    #[test]
    fn test_send_to_jail_unreachable_still_sets_flag() {
        // Linear board: tile 3 is behind tile 7, so the forward walk fails.
        let mut board = snakes_and_ladders(10, &[]).unwrap();
        board.get_mut(TileId::new(7)).unwrap().action =
            Some(TileAction::send_to_jail(TileId::new(3)).unwrap());

        let mut ps = vec![Player::economic("Ada", TileId::new(7)).unwrap()];
        let outcome = resolve(&mut board, &mut ps, 0, TileId::new(7), &mut None).unwrap();

        assert!(matches!(outcome, ResolveOutcome::Degraded(_)));
        assert!(ps[0].wallet.as_ref().unwrap().in_jail);
        assert_eq!(ps[0].position, TileId::new(7));
    }
}
