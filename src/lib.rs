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

//! Skewer is the move-generation core of a bitboard chess engine: given a
//! position, it enumerates every legal move for the side to move.
//!
//! Positions are `Board` values holding twelve piece bitboards plus
//! en-passant and castling state. Sliding-piece attacks are answered by
//! magic bitboard tables which are materialized once, on first use; leaper
//! attacks come from plain lookup tables. The generator itself is
//! pseudo-legal: candidate moves are applied to a copy of the board and the
//! resulting states are kept only if the mover's king is not attacked.
//!
//! This crate's board orientation puts square 0 at a8 and square 63 at h1,
//! so Black's army starts on the low indices and White's on the high ones.

// Many module elements are re-exported to make names more ergonomic to access.

mod bitboard;
pub use crate::bitboard::Bitboard;

mod board;
pub use board::Board;

mod castling;
pub use castling::CastleRights;

mod color;
pub use color::Color;

mod direction;
use direction::Direction;

mod magic;
pub mod movegen;

mod moves;
pub use moves::{CastleSide, Move, MoveKind};

pub mod perft;

mod piece;
pub use piece::Piece;

mod square;
pub use square::Square;
