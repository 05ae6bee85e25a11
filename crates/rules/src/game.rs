//! The authoritative game record and the intents that mutate it.
//!
//! `GameState` is either idle (no selection) or holding a selection with
//! its cached destinations (`paths`). Every intent degrades to a no-op or
//! back to idle on bad input; nothing here returns an error.

use serde::{Deserialize, Serialize};

use crate::board::{Board, MoveKind, MoveOutcome};
use crate::config::GameConfig;
use crate::error::Error;
use crate::events::{GameEvent, Intent};
use crate::logger::GameLogger;
use crate::types::*;

/// Read-only view handed to renderers each frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub selected: Option<Square>,
    pub paths: Vec<Square>,
    pub turn: Side,
    pub check: CheckStatus,
    pub castle_rights: CastleRights,
    pub captured_by_white: Vec<Piece>,
    pub captured_by_black: Vec<Piece>,
    pub status: GameStatus,
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turn: Side,
    selected: Option<Square>,
    paths: Vec<Square>,
    castle_rights: CastleRights,
    check: CheckStatus,
    captured: [Vec<Piece>; 2],
    status: GameStatus,
    config: GameConfig,
    logger: GameLogger,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut logger = GameLogger::new();
        if config.advanced_logging {
            logger.enable_advanced_logging();
        }

        let mut state = Self {
            board: Board::new(),
            turn: Side::White,
            selected: None,
            paths: Vec::new(),
            castle_rights: CastleRights::all(),
            check: CheckStatus::default(),
            captured: [Vec::new(), Vec::new()],
            status: GameStatus::InProgress,
            config,
            logger,
            events: Vec::new(),
        };
        state.start();
        state
    }

    /// Start from an arbitrary layout with full castling rights. `reset`
    /// still returns to the standard opening position.
    pub fn from_layout(layout: &str, turn: Side, config: GameConfig) -> Result<Self, Error> {
        let board = Board::from_layout(layout)?;
        let mut state = Self::with_config(config);
        state.board = board;
        state.turn = turn;
        state.check.set(Side::White, state.board.is_in_check(Side::White));
        state.check.set(Side::Black, state.board.is_in_check(Side::Black));
        state.status = state.status_for(turn);
        state.logger.log(&format!("📋 Custom position: {}", layout));
        Ok(state)
    }

    fn start(&mut self) {
        self.logger.log_game_start();
        self.events.push(GameEvent::GameStarted);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn paths(&self) -> &[Square] {
        &self.paths
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    pub fn check_status(&self) -> CheckStatus {
        self.check
    }

    /// Pieces captured by `side`, oldest first.
    pub fn captured_by(&self, side: Side) -> &[Piece] {
        &self.captured[side.index()]
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut GameLogger {
        &mut self.logger
    }

    pub fn flags(&self) -> PositionFlags {
        PositionFlags::new(self.check, self.castle_rights)
    }

    /// Take the notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            selected: self.selected,
            paths: self.paths.clone(),
            turn: self.turn,
            check: self.check,
            castle_rights: self.castle_rights,
            captured_by_white: self.captured[Side::White.index()].clone(),
            captured_by_black: self.captured[Side::Black.index()].clone(),
            status: self.status,
        }
    }

    /// Single entry point for front ends that queue intents.
    pub fn dispatch(&mut self, intent: Intent) {
        match intent {
            Intent::Select(world) => self.select(world),
            Intent::Move(world) => {
                self.move_to(world);
            }
            Intent::Unselect => self.unselect(),
            Intent::Reset => self.reset(),
        }
    }

    pub fn set_offset(&mut self, board_offset: i32) {
        self.config.board_offset = board_offset;
    }

    pub fn select(&mut self, world: [i32; 2]) {
        if self.status.is_over() {
            self.logger.log_ignored("select after checkmate");
            return;
        }
        let Some(square) = Square::from_world(world, self.config.board_offset) else {
            self.logger.log_ignored("select outside the board");
            return;
        };

        match self.board.get_piece(square) {
            Some(piece) if piece.side == self.turn => {
                let flags = self.flags();
                let paths = self.board.get_legal_moves(square, piece, self.turn, &flags);

                if self.logger.should_log_advanced() && flags.check.get(self.turn) {
                    let before = self
                        .board
                        .get_pseudo_legal_moves(square, piece, self.turn, &flags)
                        .len();
                    self.logger.log_check_filter(self.turn, before, paths.len());
                }
                self.logger.log_selection(square, piece, &paths);

                self.selected = Some(square);
                self.paths = paths;
                self.events.push(GameEvent::Selected { square, piece });
            }
            // An opponent piece does not replace an existing selection
            Some(_) if self.selected.is_some() => {
                self.logger.log_ignored("opponent piece while selected");
            }
            _ => self.unselect(),
        }
    }

    /// Move the selected piece. Returns whether a move was committed.
    pub fn move_to(&mut self, world: [i32; 2]) -> bool {
        if self.status.is_over() {
            self.logger.log_ignored("move after checkmate");
            return false;
        }
        let Some(from) = self.selected else {
            self.logger.log_ignored("move without selection");
            return false;
        };
        let Some(to) = Square::from_world(world, self.config.board_offset) else {
            self.logger.log_ignored("move outside the board");
            return false;
        };

        let flags = self.flags();
        if !self.board.is_valid_move(from, to, self.turn, &flags) {
            self.logger.log_rejected_move(from, to);
            self.unselect();
            return false;
        }

        let outcome = self.board.apply_move(from, to, &flags);
        self.unselect();

        match outcome.kind {
            MoveKind::Relocation | MoveKind::Castle(_) => {
                self.commit(from, to, outcome);
                true
            }
            MoveKind::CastleSkipped(reason) => {
                if let Some(wing) = outcome
                    .moved
                    .and_then(|piece| self.board.castle_wing(from, to, piece))
                {
                    self.logger.log_castle_skipped(self.turn, wing, reason);
                }
                false
            }
            MoveKind::Nothing => false,
        }
    }

    pub fn unselect(&mut self) {
        self.selected = None;
        self.paths.clear();
    }

    /// Back to the opening position. Configuration and the log carry over.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Side::White;
        self.unselect();
        self.castle_rights = CastleRights::all();
        self.check = CheckStatus::default();
        self.captured = [Vec::new(), Vec::new()];
        self.status = GameStatus::InProgress;
        self.start();
    }

    fn commit(&mut self, from: Square, to: Square, outcome: MoveOutcome) {
        let mover = self.turn;
        let opponent = mover.opposite();
        let Some(piece) = outcome.moved else {
            return;
        };

        self.board = outcome.board;

        match outcome.kind {
            MoveKind::Castle(wing) => {
                self.logger.log_castle(mover, wing);
                self.events.push(GameEvent::Moved { from, to, piece });
                self.events.push(GameEvent::Castled { side: mover, wing });
                // Castling never recomputes check
                self.check.set(mover, false);
                self.check.set(opponent, false);
            }
            _ => {
                self.logger.log_move(from, to, piece, outcome.captured);
                self.events.push(GameEvent::Moved { from, to, piece });
                if let Some(victim) = outcome.captured {
                    self.captured[mover.index()].push(victim);
                    self.events.push(GameEvent::Captured { square: to, piece: victim });
                }
                self.check.set(mover, self.board.is_in_check(mover));
                self.check.set(opponent, outcome.opponent_in_check);
            }
        }

        if outcome.revokes_castle {
            self.castle_rights.revoke(mover);
        }

        self.turn = opponent;
        self.status = self.status_for(opponent);

        match self.status {
            GameStatus::Checkmate(loser) => {
                self.logger.log_checkmate(loser);
                self.events.push(GameEvent::Checked { side: loser });
                self.events.push(GameEvent::Checkmate { loser });
            }
            GameStatus::Check(side) => {
                self.logger.log_check(side);
                self.events.push(GameEvent::Checked { side });
            }
            GameStatus::InProgress => {}
        }
    }

    fn status_for(&self, side: Side) -> GameStatus {
        if !self.check.get(side) {
            GameStatus::InProgress
        } else if self.board.is_checkmate(side, self.castle_rights) {
            GameStatus::Checkmate(side)
        } else {
            GameStatus::Check(side)
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
