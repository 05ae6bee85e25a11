use serde::{Deserialize, Serialize};

use super::Board;
use crate::types::*;

/// Why a requested castle was not carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleBlock {
    RookMissing,
    PathBlocked,
    PassesThroughCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Nothing stood on the origin square
    Nothing,
    Relocation,
    Castle(CastleWing),
    CastleSkipped(CastleBlock),
}

impl MoveKind {
    pub fn is_committed(&self) -> bool {
        matches!(self, MoveKind::Relocation | MoveKind::Castle(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub moved: Option<Piece>,
    pub captured: Option<Piece>,
    /// Check status of the side that moves next.
    pub opponent_in_check: bool,
    pub kind: MoveKind,
    /// A king or rook moved, so its side loses castling.
    pub revokes_castle: bool,
}

impl MoveOutcome {
    fn unchanged(board: &Board, moved: Option<Piece>, kind: MoveKind) -> Self {
        Self {
            board: board.clone(),
            moved,
            captured: None,
            opponent_in_check: false,
            kind,
            revokes_castle: false,
        }
    }
}

impl Board {
    /// Gate used before committing: the origin must hold a piece of `side`
    /// and `to` must be one of its generated destinations.
    pub fn is_valid_move(&self, from: Square, to: Square, side: Side, flags: &PositionFlags) -> bool {
        let piece = match self.get_piece(from) {
            Some(piece) => piece,
            None => return false, // No piece to move
        };

        if piece.side != side {
            return false; // Not your piece
        }

        self.get_legal_moves(from, piece, side, flags).contains(&to)
    }

    /// Play `from -> to` on a copy of the board. `self` is never modified.
    pub fn apply_move(&self, from: Square, to: Square, flags: &PositionFlags) -> MoveOutcome {
        let moving_piece = match self.get_piece(from) {
            Some(piece) => piece,
            None => return MoveOutcome::unchanged(self, None, MoveKind::Nothing),
        };
        let side = moving_piece.side;
        let revokes_castle = matches!(moving_piece.kind, PieceKind::King | PieceKind::Rook);

        if let Some(wing) = self.castle_wing(from, to, moving_piece) {
            if flags.castle.get(side) && !flags.check.get(side) {
                if let Some(block) = self.castle_block(side, wing) {
                    return MoveOutcome::unchanged(
                        self,
                        Some(moving_piece),
                        MoveKind::CastleSkipped(block),
                    );
                }

                let mut board = self.clone();
                board.execute_castling(side, wing);
                // Castling is taken as safe once validated; no recomputation.
                return MoveOutcome {
                    board,
                    moved: Some(moving_piece),
                    captured: None,
                    opponent_in_check: false,
                    kind: MoveKind::Castle(wing),
                    revokes_castle: true,
                };
            }
        }

        let mut board = self.clone();
        let captured = board.relocate(from, to);
        let opponent_in_check = board.is_in_check(side.opposite());

        MoveOutcome {
            board,
            moved: Some(moving_piece),
            captured,
            opponent_in_check,
            kind: MoveKind::Relocation,
            revokes_castle,
        }
    }

    /// Clear `from`, place its piece on `to` and return whatever was there.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.get_piece(from);
        let captured = self.get_piece(to);
        self.set_piece(from, None);
        self.set_piece(to, piece);
        captured
    }

    /// The wing a king move castles toward, if `from -> to` is the two-file
    /// shift from the king's home square.
    pub fn castle_wing(&self, from: Square, to: Square, piece: Piece) -> Option<CastleWing> {
        if piece.kind != PieceKind::King {
            return None;
        }
        let home = Square::new(KING_HOME_FILE, piece.side.home_rank());
        if from != home || to.rank() != home.rank() {
            return None;
        }
        CastleWing::BOTH
            .into_iter()
            .find(|wing| to.file() == wing.king_target_file())
    }

    /// Commit-time castle validation. `None` means the castle may proceed.
    pub fn castle_block(&self, side: Side, wing: CastleWing) -> Option<CastleBlock> {
        let rank = side.home_rank();
        let rook_square = Square::new(wing.rook_file(), rank);
        let rook_present = matches!(
            self.get_piece(rook_square),
            Some(piece) if piece.is(side, PieceKind::Rook)
        );
        if !rook_present {
            return Some(CastleBlock::RookMissing);
        }

        if !self.castle_path_clear(side, wing) {
            return Some(CastleBlock::PathBlocked);
        }

        // Walk the king one file at a time; every stop must be safe.
        let mut scratch = self.clone();
        let mut king = Square::new(KING_HOME_FILE, rank);
        for _ in 0..2 {
            let Some(next) = king.offset(wing.direction(), 0) else {
                return Some(CastleBlock::PathBlocked);
            };
            scratch.relocate(king, next);
            if scratch.is_in_check(side) {
                return Some(CastleBlock::PassesThroughCheck);
            }
            king = next;
        }

        None
    }

    fn execute_castling(&mut self, side: Side, wing: CastleWing) {
        let rank = side.home_rank();
        let king_from = Square::new(KING_HOME_FILE, rank);
        let king_to = Square::new(wing.king_target_file(), rank);
        let rook_from = Square::new(wing.rook_file(), rank);
        let rook_to = Square::new(wing.rook_target_file(), rank);

        self.relocate(king_from, king_to);
        self.relocate(rook_from, rook_to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn piece(code: &str) -> Option<Piece> {
        Some(code.parse().unwrap())
    }

    #[test]
    fn empty_origin_is_a_no_op() {
        let board = Board::new();
        let outcome = board.apply_move(sq("d4"), sq("d5"), &PositionFlags::default());
        assert_eq!(outcome.kind, MoveKind::Nothing);
        assert_eq!(outcome.board, board);
        assert_eq!(outcome.captured, None);
        assert!(!outcome.opponent_in_check);
    }

    #[test]
    fn relocation_captures_and_leaves_source_board_untouched() {
        let board = Board::from_layout("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let outcome = board.apply_move(sq("e4"), sq("d5"), &PositionFlags::default());
        assert_eq!(outcome.kind, MoveKind::Relocation);
        assert_eq!(outcome.captured, piece("bP"));
        assert_eq!(outcome.board.get_piece(sq("d5")), piece("wP"));
        assert_eq!(outcome.board.get_piece(sq("e4")), None);
        assert_eq!(board.get_piece(sq("e4")), piece("wP"));
        assert!(!outcome.revokes_castle);
    }

    #[test]
    fn move_reports_check_on_opponent() {
        let board = Board::from_layout("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let outcome = board.apply_move(sq("a1"), sq("a8"), &PositionFlags::default());
        assert!(outcome.opponent_in_check);
        assert!(outcome.revokes_castle);
    }

    #[test]
    fn apply_move_is_deterministic() {
        let board = Board::new();
        let flags = PositionFlags::default();
        assert_eq!(
            board.apply_move(sq("g1"), sq("f3"), &flags),
            board.apply_move(sq("g1"), sq("f3"), &flags)
        );
    }

    #[test]
    fn kingside_castle_moves_both_pieces() {
        let board = Board::from_layout("4k3/8/8/8/8/8/8/4K2R").unwrap();
        let outcome = board.apply_move(sq("e1"), sq("g1"), &PositionFlags::default());
        assert_eq!(outcome.kind, MoveKind::Castle(CastleWing::Kingside));
        assert_eq!(outcome.board.get_piece(sq("g1")), piece("wK"));
        assert_eq!(outcome.board.get_piece(sq("f1")), piece("wR"));
        assert_eq!(outcome.board.get_piece(sq("e1")), None);
        assert_eq!(outcome.board.get_piece(sq("h1")), None);
        assert_eq!(outcome.captured, None);
        assert!(outcome.revokes_castle);
    }

    #[test]
    fn black_queenside_castle() {
        let board = Board::from_layout("r3k3/8/8/8/8/8/8/4K3").unwrap();
        let outcome = board.apply_move(sq("e8"), sq("c8"), &PositionFlags::default());
        assert_eq!(outcome.kind, MoveKind::Castle(CastleWing::Queenside));
        assert_eq!(outcome.board.get_piece(sq("c8")), piece("bK"));
        assert_eq!(outcome.board.get_piece(sq("d8")), piece("bR"));
        assert_eq!(outcome.board.get_piece(sq("a8")), None);
    }

    #[test]
    fn castle_without_rook_is_skipped() {
        let board = Board::from_layout("4k3/8/8/8/8/8/8/4K3").unwrap();
        let outcome = board.apply_move(sq("e1"), sq("g1"), &PositionFlags::default());
        assert_eq!(outcome.kind, MoveKind::CastleSkipped(CastleBlock::RookMissing));
        assert_eq!(outcome.board, board);
    }

    #[test]
    fn castle_through_attacked_square_is_skipped() {
        // Black rook on f8 covers f1
        let board = Board::from_layout("4kr2/8/8/8/8/8/8/4K2R").unwrap();
        let outcome = board.apply_move(sq("e1"), sq("g1"), &PositionFlags::default());
        assert_eq!(
            outcome.kind,
            MoveKind::CastleSkipped(CastleBlock::PassesThroughCheck)
        );
    }

    #[test]
    fn king_two_step_without_rights_is_a_plain_move() {
        let board = Board::from_layout("4k3/8/8/8/8/8/8/4K2R").unwrap();
        let flags = PositionFlags::new(CheckStatus::default(), CastleRights::none());
        let outcome = board.apply_move(sq("e1"), sq("g1"), &flags);
        assert_eq!(outcome.kind, MoveKind::Relocation);
        assert_eq!(outcome.board.get_piece(sq("h1")), piece("wR"));
    }

    #[test]
    fn validity_gate() {
        let board = Board::new();
        let flags = PositionFlags::default();
        assert!(board.is_valid_move(sq("e2"), sq("e4"), Side::White, &flags));
        assert!(!board.is_valid_move(sq("e2"), sq("e5"), Side::White, &flags));
        assert!(!board.is_valid_move(sq("e7"), sq("e5"), Side::White, &flags));
        assert!(!board.is_valid_move(sq("e4"), sq("e5"), Side::White, &flags));
        assert!(!board.is_valid_move(sq("a1"), sq("a2"), Side::White, &flags));
    }
}
