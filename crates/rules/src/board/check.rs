use super::Board;
use crate::types::*;

impl Board {
    /// Whether `side`'s king is attacked by any opposing piece.
    ///
    /// A board without a king for `side` reports `true`. Attack sets are
    /// generated in unfiltered mode, which keeps this from recursing into
    /// the in-check filter of move generation.
    pub fn is_in_check(&self, side: Side) -> bool {
        let king_square = match self.find_king(side) {
            Some(square) => square,
            None => return true,
        };

        self.pieces_of(side.opposite()).any(|(square, piece)| {
            self.get_attack_squares(square, piece, piece.side)
                .contains(&king_square)
        })
    }

    /// Squares of the opposing pieces currently attacking `side`'s king.
    pub fn checking_pieces(&self, side: Side) -> Vec<Square> {
        let Some(king_square) = self.find_king(side) else {
            return Vec::new();
        };

        self.pieces_of(side.opposite())
            .filter(|&(square, piece)| {
                self.get_attack_squares(square, piece, piece.side)
                    .contains(&king_square)
            })
            .map(|(square, _)| square)
            .collect()
    }

    /// Whether any piece of `side` has at least one destination under
    /// `flags`.
    pub fn has_any_legal_move(&self, side: Side, flags: &PositionFlags) -> bool {
        self.pieces_of(side)
            .any(|(square, piece)| !self.get_legal_moves(square, piece, side, flags).is_empty())
    }

    /// `side` is in check and every one of its moves leaves the king
    /// attacked.
    pub fn is_checkmate(&self, side: Side, castle: CastleRights) -> bool {
        if !self.is_in_check(side) {
            return false;
        }
        let flags = PositionFlags::new(CheckStatus::default().with(side, true), castle);
        !self.has_any_legal_move(side, &flags)
    }
}
