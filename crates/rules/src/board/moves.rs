use super::Board;
use crate::types::*;

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

impl Board {
    /// Destinations for `piece` standing on `square`, moving for `side`.
    ///
    /// Candidates are filtered for king safety only while `flags` marks
    /// `side` as in check. Outside of check, moves that expose the king
    /// (pinned pieces) are kept.
    pub fn get_legal_moves(
        &self,
        square: Square,
        piece: Piece,
        side: Side,
        flags: &PositionFlags,
    ) -> Vec<Square> {
        let pseudo_moves = self.get_pseudo_legal_moves(square, piece, side, flags);

        if !flags.check.get(side) {
            return pseudo_moves;
        }

        pseudo_moves
            .into_iter()
            .filter(|&to| !self.leaves_king_in_check(square, to, side))
            .collect()
    }

    /// Raw candidates before any king-safety filtering.
    pub fn get_pseudo_legal_moves(
        &self,
        square: Square,
        piece: Piece,
        side: Side,
        flags: &PositionFlags,
    ) -> Vec<Square> {
        match piece.kind {
            PieceKind::Pawn => self.get_pawn_moves(square, side),
            PieceKind::Knight => self.get_step_moves(square, side, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.get_sliding_moves(square, side, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.get_sliding_moves(square, side, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.get_queen_moves(square, side),
            PieceKind::King => self.get_king_moves(square, side, flags),
        }
    }

    /// Squares `piece` attacks. Never consults check or castle flags, so
    /// the check detector can call it without recursing.
    pub fn get_attack_squares(&self, square: Square, piece: Piece, side: Side) -> Vec<Square> {
        self.get_pseudo_legal_moves(square, piece, side, &PositionFlags::unfiltered())
    }

    /// Plays `from -> to` as a plain relocation on a scratch copy and
    /// reports whether `side`'s king is attacked afterwards.
    pub(crate) fn leaves_king_in_check(&self, from: Square, to: Square, side: Side) -> bool {
        let mut scratch = self.clone();
        scratch.relocate(from, to);
        scratch.is_in_check(side)
    }

    pub fn get_pawn_moves(&self, square: Square, side: Side) -> Vec<Square> {
        let mut moves = Vec::new();
        let direction = side.forward();

        if let Some(one_step) = square.offset(0, direction) {
            if self.is_empty(one_step) {
                moves.push(one_step);

                if square.rank() == side.pawn_rank() {
                    if let Some(two_step) = square.offset(0, 2 * direction) {
                        if self.is_empty(two_step) {
                            moves.push(two_step);
                        }
                    }
                }
            }
        }

        // Diagonal captures only onto the other side
        for df in [-1, 1] {
            if let Some(target) = square.offset(df, direction) {
                if self.is_occupied_by(target, side.opposite()) {
                    moves.push(target);
                }
            }
        }

        moves
    }

    /// Fixed-offset movers (knight and the king's neighbour squares).
    fn get_step_moves(&self, square: Square, side: Side, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(df, dr)| square.offset(df, dr))
            .filter(|&target| !self.is_occupied_by(target, side))
            .collect()
    }

    fn get_queen_moves(&self, square: Square, side: Side) -> Vec<Square> {
        let mut moves = self.get_sliding_moves(square, side, &ROOK_DIRECTIONS);
        moves.extend(self.get_sliding_moves(square, side, &BISHOP_DIRECTIONS));
        moves
    }

    fn get_king_moves(&self, square: Square, side: Side, flags: &PositionFlags) -> Vec<Square> {
        let mut moves = self.get_step_moves(square, side, &KING_OFFSETS);

        if flags.castle.get(side) && !flags.check.get(side) {
            for wing in CastleWing::BOTH {
                if let Some(target) = self.castle_candidate(square, side, wing) {
                    moves.push(target);
                }
            }
        }

        moves
    }

    /// Two-file king destination toward `wing`, offered when the king is on
    /// its home square and every square up to the corner is empty. Whether
    /// the rook is really there and the transit is safe is decided when the
    /// move is committed.
    fn castle_candidate(&self, king: Square, side: Side, wing: CastleWing) -> Option<Square> {
        if king != Square::new(KING_HOME_FILE, side.home_rank()) {
            return None;
        }
        if !self.castle_path_clear(side, wing) {
            return None;
        }
        Some(Square::new(wing.king_target_file(), side.home_rank()))
    }

    /// Every square strictly between the king's home square and the corner
    /// is empty.
    pub fn castle_path_clear(&self, side: Side, wing: CastleWing) -> bool {
        let rank = side.home_rank();
        let (lo, hi) = match wing {
            CastleWing::Kingside => (KING_HOME_FILE + 1, wing.rook_file()),
            CastleWing::Queenside => (wing.rook_file() + 1, KING_HOME_FILE),
        };
        (lo..hi).all(|file| self.is_empty(Square::new(file, rank)))
    }

    fn get_sliding_moves(&self, square: Square, side: Side, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();

        for &(df, dr) in directions {
            let mut current = square;
            while let Some(target) = current.offset(df, dr) {
                match self.get_piece(target) {
                    None => moves.push(target),
                    Some(piece) => {
                        if piece.side != side {
                            moves.push(target); // Capture ends the ray
                        }
                        break;
                    }
                }
                current = target;
            }
        }

        moves
    }
}
