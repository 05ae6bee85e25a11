//! Values exchanged with front ends: the intents they dispatch and the
//! notifications the engine queues for them.

use serde::{Deserialize, Serialize};

use crate::types::{CastleWing, Piece, Side, Square};

/// Fire-and-forget notifications. Sound, animation and similar feedback
/// subscribe to these instead of being called by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    GameStarted,
    Selected { square: Square, piece: Piece },
    Moved { from: Square, to: Square, piece: Piece },
    Captured { square: Square, piece: Piece },
    Checked { side: Side },
    Castled { side: Side, wing: CastleWing },
    Checkmate { loser: Side },
}

/// Everything a front end may ask of the game. Squares are world-space
/// pairs translated by the configured offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "square", rename_all = "snake_case")]
pub enum Intent {
    Select([i32; 2]),
    Move([i32; 2]),
    Unselect,
    Reset,
}
