use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    /// Bounds-checked constructor for signed coordinates.
    pub fn try_new(file: i32, rank: i32) -> Option<Self> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// Step by `(df, dr)`. Off-board results are discarded, never wrapped.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        Self::try_new(self.file() as i32 + df as i32, self.rank() as i32 + dr as i32)
    }

    /// Translate a world-space pair into board indices.
    pub fn from_world(world: [i32; 2], offset: i32) -> Option<Self> {
        let file = world[0].checked_add(offset)?;
        let rank = world[1].checked_add(offset)?;
        Self::try_new(file, rank)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Ok(Self::new(file, rank))
        } else {
            Err(Error::InvalidSquare(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl Side {
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn code(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    /// Rank holding this side's king and rooks at the start.
    pub const fn home_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Rank pawns start on and may double-step from.
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A side plus a kind. Pieces are plain values located only by the square
/// they sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    pub fn is(&self, side: Side, kind: PieceKind) -> bool {
        self.side == side && self.kind == kind
    }

    /// Letter used in board layouts: uppercase for White, lowercase for Black.
    pub fn layout_char(&self) -> char {
        match self.side {
            Side::White => self.kind.code(),
            Side::Black => self.kind.code().to_ascii_lowercase(),
        }
    }

    pub fn from_layout_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_code(ch.to_ascii_uppercase())?;
        let side = if ch.is_ascii_uppercase() { Side::White } else { Side::Black };
        Some(Self::new(side, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.code(), self.kind.code())
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let side = match chars.next() {
            Some('w') => Side::White,
            Some('b') => Side::Black,
            _ => return Err(Error::InvalidPiece(s.to_string())),
        };
        let kind = chars
            .next()
            .and_then(PieceKind::from_code)
            .ok_or_else(|| Error::InvalidPiece(s.to_string()))?;
        if chars.next().is_some() {
            return Err(Error::InvalidPiece(s.to_string()));
        }
        Ok(Self::new(side, kind))
    }
}

impl From<Piece> for String {
    fn from(piece: Piece) -> Self {
        piece.to_string()
    }
}

impl TryFrom<String> for Piece {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastleRights([bool; 2]);

impl CastleRights {
    pub const fn all() -> Self {
        Self([true; 2])
    }

    pub const fn none() -> Self {
        Self([false; 2])
    }

    pub fn get(&self, side: Side) -> bool {
        self.0[side.index()]
    }

    /// Rights are never restored once revoked.
    pub fn revoke(&mut self, side: Side) {
        self.0[side.index()] = false;
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckStatus([bool; 2]);

impl CheckStatus {
    pub fn get(&self, side: Side) -> bool {
        self.0[side.index()]
    }

    pub fn set(&mut self, side: Side, in_check: bool) {
        self.0[side.index()] = in_check;
    }

    pub fn with(mut self, side: Side, in_check: bool) -> Self {
        self.set(side, in_check);
        self
    }
}

/// Flags consulted by move generation. `unfiltered()` is the mode used
/// when computing attack sets so that check detection never recurses back
/// into check filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionFlags {
    pub check: CheckStatus,
    pub castle: CastleRights,
}

impl PositionFlags {
    pub fn new(check: CheckStatus, castle: CastleRights) -> Self {
        Self { check, castle }
    }

    pub const fn unfiltered() -> Self {
        Self {
            check: CheckStatus([false; 2]),
            castle: CastleRights::none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Check(Side),     // Side to move is in check
    Checkmate(Side), // Side that was mated
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleWing {
    Kingside,
    Queenside,
}

impl CastleWing {
    pub const BOTH: [CastleWing; 2] = [CastleWing::Kingside, CastleWing::Queenside];

    pub const fn rook_file(self) -> u8 {
        match self {
            CastleWing::Kingside => 7,
            CastleWing::Queenside => 0,
        }
    }

    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleWing::Kingside => 6,
            CastleWing::Queenside => 2,
        }
    }

    /// The rook lands next to the king, on the side facing the centre.
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleWing::Kingside => 5,
            CastleWing::Queenside => 3,
        }
    }

    pub const fn direction(self) -> i8 {
        match self {
            CastleWing::Kingside => 1,
            CastleWing::Queenside => -1,
        }
    }
}

pub const KING_HOME_FILE: u8 = 4;
