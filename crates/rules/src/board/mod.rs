use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::*;

pub mod check;
pub mod execute;
pub mod moves;

pub use execute::{CastleBlock, MoveKind, MoveOutcome};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8x8 grid indexed `[rank][file]`, rank 0 being White's back rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    pub fn empty() -> Self {
        Self { squares: [[None; 8]; 8] }
    }

    fn setup_starting_position(&mut self) {
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            self.set_piece(Square::new(file, 0), Some(Piece::new(Side::White, *kind)));
            self.set_piece(Square::new(file, 7), Some(Piece::new(Side::Black, *kind)));
            self.set_piece(Square::new(file, 1), Some(Piece::new(Side::White, PieceKind::Pawn)));
            self.set_piece(Square::new(file, 6), Some(Piece::new(Side::Black, PieceKind::Pawn)));
        }
    }

    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank() as usize][square.file() as usize] = piece;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    /// True when `square` holds a piece of `side`.
    pub fn is_occupied_by(&self, square: Square, side: Side) -> bool {
        matches!(self.get_piece(square), Some(piece) if piece.side == side)
    }

    /// Occupied squares in scan order: rank 0 first, file 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8).flat_map(move |rank| {
            (0..8u8).filter_map(move |file| {
                let square = Square::new(file, rank);
                self.get_piece(square).map(|piece| (square, piece))
            })
        })
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.side == side)
    }

    /// First king of `side` in scan order.
    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(side, PieceKind::King))
            .map(|(square, _)| square)
    }

    /// Build a board from the placement field of a FEN string, e.g.
    /// `"4k3/8/8/8/8/8/8/4K3"`. The first row is rank 8.
    pub fn from_layout(layout: &str) -> Result<Self, Error> {
        let placement = layout.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(Error::InvalidLayout(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }

        let mut board = Self::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // Layout starts from rank 8
            let mut file: u8 = 0;

            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as u8;
                } else {
                    let piece = Piece::from_layout_char(ch).ok_or_else(|| {
                        Error::InvalidLayout(format!("unknown piece letter {ch:?}"))
                    })?;
                    if file >= 8 {
                        return Err(Error::InvalidLayout(format!(
                            "rank {} overflows",
                            rank + 1
                        )));
                    }
                    board.set_piece(Square::new(file, rank), Some(piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(Error::InvalidLayout(format!("rank {} overflows", rank + 1)));
                }
            }

            if file != 8 {
                return Err(Error::InvalidLayout(format!(
                    "rank {} covers {} files",
                    rank + 1,
                    file
                )));
            }
        }

        Ok(board)
    }

    pub fn to_layout(&self) -> String {
        let mut out = String::new();
        for rank in (0..8u8).rev() {
            let mut gap = 0;
            for file in 0..8u8 {
                match self.get_piece(Square::new(file, rank)) {
                    Some(piece) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(piece.layout_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let ch = self
                    .get_piece(Square::new(file, rank))
                    .map(|piece| piece.layout_char())
                    .unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
