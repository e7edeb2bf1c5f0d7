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

//! Pieces, which contain no information about their color or current square.

use std::fmt::{Display, Formatter, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
/// The type of a piece. This contains no information about the location of a
/// piece, or of its color.
///
/// The discriminants are the piece-array order of a `Board`: a piece of
/// color `c` lives in piece bitboard `piece as usize + 6 * c as usize`.
/// Since the generator enumerates bitboards in array order, this is also the
/// order in which moves are produced.
pub enum Piece {
    Pawn = 0,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl Piece {
    /// Total number of piece types.
    pub const NUM_TYPES: usize = 6;

    /// Array containing all piece types, in bitboard-array order.
    pub const ALL: [Piece; Piece::NUM_TYPES] = [
        Piece::Pawn,
        Piece::Rook,
        Piece::Knight,
        Piece::Bishop,
        Piece::Queen,
        Piece::King,
    ];

    /// The types a pawn can promote to, in the order the generator emits
    /// them.
    pub const PROMOTING: [Piece; 4] = [Piece::Rook, Piece::Knight, Piece::Bishop, Piece::Queen];

    /// Get the FEN code of this piece as an uppercase string.
    pub const fn code(self) -> &'static str {
        match self {
            Piece::Pawn => "P",
            Piece::Rook => "R",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Queen => "Q",
            Piece::King => "K",
        }
    }

    /// Given a FEN character, convert it to a piece type. Must be uppercase.
    pub const fn from_code(c: char) -> Option<Piece> {
        match c {
            'P' => Some(Piece::Pawn),
            'R' => Some(Piece::Rook),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            _ => None,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.code())
    }
}
