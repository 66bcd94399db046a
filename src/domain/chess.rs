//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use schemars::JsonSchema;
use serde::Deserialize;
use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl From<SColor> for PieceColor {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => PieceColor::White,
            SColor::Black => PieceColor::Black,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { kind, color }
    }
}

/// Board coordinate as (row, col); row 0 is rank 8 and col 0 is the a-file
pub type Coord = (usize, usize);

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert a shakmaty Square back to row/col
pub fn from_square(square: Square) -> Coord {
    let col = square.file() as usize;
    let row = 7 - square.rank() as usize;
    (row, col)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: piece.color.into(),
    }
}

/// Piece kinds a pawn may promote to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PromotionKind {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionKind {
    pub const ALL: [PromotionKind; 4] = [
        PromotionKind::Queen,
        PromotionKind::Rook,
        PromotionKind::Bishop,
        PromotionKind::Knight,
    ];

    pub fn role(self) -> Role {
        match self {
            PromotionKind::Queen => Role::Queen,
            PromotionKind::Rook => Role::Rook,
            PromotionKind::Bishop => Role::Bishop,
            PromotionKind::Knight => Role::Knight,
        }
    }

    pub fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::Queen => Some(PromotionKind::Queen),
            Role::Rook => Some(PromotionKind::Rook),
            Role::Bishop => Some(PromotionKind::Bishop),
            Role::Knight => Some(PromotionKind::Knight),
            Role::Pawn | Role::King => None,
        }
    }

    pub fn piece_kind(self) -> PieceKind {
        match self {
            PromotionKind::Queen => PieceKind::Queen,
            PromotionKind::Rook => PieceKind::Rook,
            PromotionKind::Bishop => PieceKind::Bishop,
            PromotionKind::Knight => PieceKind::Knight,
        }
    }
}

/// A move identified by its endpoints, as picked on the board or named by an engine.
///
/// Castling is expressed as the king's two-square step (e1g1, e8c8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MoveRequest {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PromotionKind>,
}

impl MoveRequest {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(self, kind: PromotionKind) -> Self {
        Self {
            promotion: Some(kind),
            ..self
        }
    }

    /// Long algebraic notation as spoken by UCI engines, e.g. `e2e4` or `a7a8q`
    pub fn to_uci(&self) -> String {
        let mut uci = format!(
            "{}{}",
            to_square(self.from.0, self.from.1),
            to_square(self.to.0, self.to.1)
        );
        if let Some(kind) = self.promotion {
            uci.push(kind.role().char());
        }
        uci
    }

    /// Parse UCI long algebraic notation. Returns None for malformed input.
    pub fn parse_uci(text: &str) -> Option<Self> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return None;
        }
        let from: Square = text[0..2].parse().ok()?;
        let to: Square = text[2..4].parse().ok()?;
        let promotion = match text[4..].chars().next() {
            Some(c) => Some(PromotionKind::from_role(Role::from_char(c)?)?),
            None => None,
        };
        Some(Self {
            from: from_square(from),
            to: from_square(to),
            promotion,
        })
    }
}
