//! Turn orchestration: action resolution and the per-turn state machine.

mod resolver;
mod turn;

pub use resolver::{resolve, ResolveOutcome};
pub use turn::{TurnEngine, TurnOutcome, TurnPhase, WinRule};
