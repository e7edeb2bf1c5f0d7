/*
  Skewer, a bitboard chess move generator.
  Copyright (C) 2024 The Skewer Authors (see AUTHORS.md file)

  Skewer is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Skewer is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Definitions of moves, which can describe any legal playable move.

use super::{Bitboard, Color, Piece, Square};

use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// One of the two castles a player may have the right to.
pub enum CastleSide {
    /// The queenside castle, toward the a-file rook.
    Long,
    /// The kingside castle, toward the h-file rook.
    Short,
}

impl CastleSide {
    #[inline(always)]
    #[must_use]
    /// The square the king castles from.
    pub const fn king_from(self, color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    #[inline(always)]
    #[must_use]
    /// The square the king lands on after this castle.
    pub const fn king_to(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Long, Color::White) => Square::C1,
            (CastleSide::Long, Color::Black) => Square::C8,
            (CastleSide::Short, Color::White) => Square::G1,
            (CastleSide::Short, Color::Black) => Square::G8,
        }
    }

    #[inline(always)]
    #[must_use]
    /// The corner square of the rook taking part in this castle.
    pub const fn rook_from(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Long, Color::White) => Square::A1,
            (CastleSide::Long, Color::Black) => Square::A8,
            (CastleSide::Short, Color::White) => Square::H1,
            (CastleSide::Short, Color::Black) => Square::H8,
        }
    }

    #[inline(always)]
    #[must_use]
    /// The square the rook lands on after this castle.
    pub const fn rook_to(self, color: Color) -> Square {
        match (self, color) {
            (CastleSide::Long, Color::White) => Square::D1,
            (CastleSide::Long, Color::Black) => Square::D8,
            (CastleSide::Short, Color::White) => Square::F1,
            (CastleSide::Short, Color::Black) => Square::F8,
        }
    }

    /// The squares between the king and the castling rook, all of which must
    /// be empty for the castle to be playable.
    pub(crate) const fn between_mask(self, color: Color) -> Bitboard {
        match (self, color) {
            // b1, c1, d1
            (CastleSide::Long, Color::White) => Bitboard::new(0x0E00_0000_0000_0000),
            // b8, c8, d8
            (CastleSide::Long, Color::Black) => Bitboard::new(0x0000_0000_0000_000E),
            // f1, g1
            (CastleSide::Short, Color::White) => Bitboard::new(0x6000_0000_0000_0000),
            // f8, g8
            (CastleSide::Short, Color::Black) => Bitboard::new(0x0000_0000_0000_0060),
        }
    }

    /// The squares the king occupies or passes through during this castle:
    /// its origin, the transit square, and its destination. None of them may
    /// be attacked by the opponent.
    pub(crate) const fn king_path(self, color: Color) -> [Square; 3] {
        match (self, color) {
            (CastleSide::Long, Color::White) => [Square::E1, Square::D1, Square::C1],
            (CastleSide::Long, Color::Black) => [Square::E8, Square::D8, Square::C8],
            (CastleSide::Short, Color::White) => [Square::E1, Square::F1, Square::G1],
            (CastleSide::Short, Color::Black) => [Square::E8, Square::F8, Square::G8],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// What a move does beyond relocating its piece.
pub enum MoveKind {
    /// An ordinary relocation or capture.
    Normal,
    /// A two-square pawn advance, which exposes the mover to en passant on
    /// the next ply.
    DoublePush,
    /// A pawn move landing on the last rank, replacing the pawn with the
    /// carried piece.
    Promotion(Piece),
    /// A castle; the side and the mover's color identify which of the four.
    Castle(CastleSide),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// The information of one move: the moving piece, its color, its from- and
/// to-squares, and a kind tag for the special cases.
///
/// For castles, `from` and `to` are the king's origin and destination; the
/// rook relocation is implied by the `CastleSide`.
pub struct Move {
    color: Color,
    piece: Piece,
    from: Square,
    to: Square,
    kind: MoveKind,
}

impl Move {
    #[inline(always)]
    #[must_use]
    /// Make a new `Move`. Assumes that all the inputs are valid.
    pub const fn new(color: Color, piece: Piece, from: Square, to: Square, kind: MoveKind) -> Move {
        Move {
            color,
            piece,
            from,
            to,
            kind,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Create a `Move` which is not tagged as anything special. Captures,
    /// including en passant captures, are normal moves.
    pub const fn normal(color: Color, piece: Piece, from: Square, to: Square) -> Move {
        Move::new(color, piece, from, to, MoveKind::Normal)
    }

    #[inline(always)]
    #[must_use]
    /// Create a `Move` for a two-square pawn advance.
    pub const fn double_push(color: Color, from: Square, to: Square) -> Move {
        Move::new(color, Piece::Pawn, from, to, MoveKind::DoublePush)
    }

    #[inline(always)]
    #[must_use]
    /// Create a `Move` promoting a pawn to `promote_type`. The promote type
    /// must not be a pawn or a king.
    pub const fn promoting(color: Color, from: Square, to: Square, promote_type: Piece) -> Move {
        Move::new(
            color,
            Piece::Pawn,
            from,
            to,
            MoveKind::Promotion(promote_type),
        )
    }

    #[inline(always)]
    #[must_use]
    /// Create a `Move` which castles on the given side. The from- and
    /// to-squares are the king's.
    pub const fn castling(color: Color, side: CastleSide) -> Move {
        Move::new(
            color,
            Piece::King,
            side.king_from(color),
            side.king_to(color),
            MoveKind::Castle(side),
        )
    }

    #[inline(always)]
    #[must_use]
    /// Get the color of the player making this move.
    pub const fn color(self) -> Color {
        self.color
    }

    #[inline(always)]
    #[must_use]
    /// Get the type of the piece that moves.
    pub const fn piece(self) -> Piece {
        self.piece
    }

    #[inline(always)]
    #[must_use]
    /// Get the square that a piece moves from to execute this move.
    pub const fn from_square(self) -> Square {
        self.from
    }

    #[inline(always)]
    #[must_use]
    /// Get the target square of this move.
    pub const fn to_square(self) -> Square {
        self.to
    }

    #[inline(always)]
    #[must_use]
    /// Get the kind tag of this move.
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    #[inline(always)]
    #[must_use]
    /// Get the promotion type of this move, or `None` for non-promotions.
    /// The piece placed on the target square is
    /// `promote_type().unwrap_or(piece())`.
    pub const fn promote_type(self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion(p) => Some(p),
            _ => None,
        }
    }

    #[inline(always)]
    #[must_use]
    /// Determine whether this move is a castle.
    pub const fn is_castle(self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.promote_type() {
            None => write!(f, "{} -> {}", self.from, self.to)?,
            Some(p) => write!(f, "{} -> {} ={}", self.from, self.to, p)?,
        };
        if self.is_castle() {
            write!(f, " [castle]")?;
        }
        Ok(())
    }
}
