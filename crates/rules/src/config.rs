use serde::{Deserialize, Serialize};

/// Settings a front end picks once per game. Survives `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Added to both world coordinates before they index the board.
    pub board_offset: i32,
    /// Log generation and check-filter detail, not just the moves.
    pub advanced_logging: bool,
}

impl GameConfig {
    pub fn with_offset(mut self, board_offset: i32) -> Self {
        self.board_offset = board_offset;
        self
    }

    pub fn with_advanced_logging(mut self, enabled: bool) -> Self {
        self.advanced_logging = enabled;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_offset: 0,
            advanced_logging: false,
        }
    }
}
