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

//! Generation of legal moves in a position.
//!
//! The generator is pseudo-legal first: `get_moves` enumerates every move
//! that respects piece movement rules, and `generate_legal` applies each
//! candidate and keeps the successor states in which the mover's king is
//! not attacked. Enumeration order is deterministic: piece kinds in
//! bitboard-array order, squares from the lowest bit upward, castles last.


use crate::magic::MAGIC;

use super::{Bitboard, Board, CastleSide, Color, Direction, Move, Piece, Square};

use once_cell::sync::Lazy;

/// A bitboard of all the squares a knight can move to if its position is
/// the index of the list.
static KNIGHT_MOVES: Lazy<[Bitboard; 64]> =
    Lazy::new(|| create_step_attacks(&Direction::KNIGHT_STEPS, 2));

/// A bitboard of all the squares a king can move to if his position is the
/// index in the list.
static KING_MOVES: Lazy<[Bitboard; 64]> =
    Lazy::new(|| create_step_attacks(&Direction::KING_STEPS, 1));

/// A bitboard of all the squares which a pawn on the given square can
/// attack. The first index is for White's pawn attacks, the second is for
/// Black's.
static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        create_step_attacks(&[Direction::NORTHEAST, Direction::NORTHWEST], 1),
        create_step_attacks(&[Direction::SOUTHEAST, Direction::SOUTHWEST], 1),
    ]
});

/// Per color and square, the squares a pawn may advance to when nothing
/// blocks it: the single push, plus the double push from the start rank.
static PAWN_PUSHES: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        create_pawn_pushes(Color::White, true),
        create_pawn_pushes(Color::Black, true),
    ]
});

/// Per color and square, the single push only. Used when a pawn on its
/// start rank has its double-push square occupied.
static PAWN_SINGLE_PUSHES: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        create_pawn_pushes(Color::White, false),
        create_pawn_pushes(Color::Black, false),
    ]
});

/// Get the step attacks that could be made by moving in `dirs` from each
/// point on the board. Exclude the steps that travel more than `max_dist`
/// (this prevents wrapping around the edges of the board).
fn create_step_attacks(dirs: &[Direction], max_dist: u8) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    for (i, entry) in attacks.iter_mut().enumerate() {
        let sq = Square::try_from(i as u8).unwrap();
        for &dir in dirs {
            let target_disc = sq as i8 + dir.0;
            if !(0..64).contains(&target_disc) {
                // square is off the board
                continue;
            }
            let target = Square::try_from(target_disc as u8).unwrap();
            if sq.chebyshev_to(target) <= max_dist {
                entry.insert(target);
            }
        }
    }

    attacks
}

/// Build the push table for pawns of one color. When `include_double` is
/// set, squares on the color's start rank also get the two-square advance.
/// Entries exist for every square index, even ones a pawn cannot occupy.
fn create_pawn_pushes(color: Color, include_double: bool) -> [Bitboard; 64] {
    let mut pushes = [Bitboard::EMPTY; 64];
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    for (i, entry) in pushes.iter_mut().enumerate() {
        let sq = Square::try_from(i as u8).unwrap();
        let step = color.pawn_direction().0 as i16;
        let single = i as i16 + step;
        if !(0..64).contains(&single) {
            continue;
        }
        entry.insert(Square::try_from(single as u8).unwrap());
        if include_double && color.pawn_start_rank().contains(sq) {
            // from the start rank, the double push never leaves the board
            entry.insert(Square::try_from((single + step) as u8).unwrap());
        }
    }

    pushes
}

/// Eagerly materialize every lookup table: the leaper tables above and the
/// magic slider tables. Idempotent; without it, each table is built lazily
/// the first time a query touches it.
pub fn init_tables() {
    Lazy::force(&MAGIC);
    Lazy::force(&KNIGHT_MOVES);
    Lazy::force(&KING_MOVES);
    Lazy::force(&PAWN_ATTACKS);
    Lazy::force(&PAWN_PUSHES);
    Lazy::force(&PAWN_SINGLE_PUSHES);
}

#[must_use]
/// Get the attackers of color `by` on a square, as a `Bitboard` of the
/// attackers' squares.
///
/// Works by symmetry: for each piece kind, the squares from which such a
/// piece could attack `sq` are looked up from `sq` itself and intersected
/// with the pieces actually there. Pawn attacks are asymmetric, so their
/// lookup is indexed by the color *defending* `sq`; getting this backwards
/// is a classic bug.
pub fn square_attackers(board: &Board, sq: Square, by: Color) -> Bitboard {
    let occupancy = board.occupancy();
    let mut attackers = Bitboard::EMPTY;

    attackers |= PAWN_ATTACKS[!by as usize][sq as usize] & board[(by, Piece::Pawn)];
    attackers |= KNIGHT_MOVES[sq as usize] & board[(by, Piece::Knight)];

    let queens = board[(by, Piece::Queen)];
    let rook_vision = MAGIC.rook_attacks(occupancy, sq);
    attackers |= rook_vision & (board[(by, Piece::Rook)] | queens);
    let bishop_vision = MAGIC.bishop_attacks(occupancy, sq);
    attackers |= bishop_vision & (board[(by, Piece::Bishop)] | queens);

    attackers |= KING_MOVES[sq as usize] & board[(by, Piece::King)];

    attackers
}

#[inline(always)]
#[must_use]
/// Is `sq` attacked by the pieces of `defender`'s opponent?
pub fn is_square_attacked(board: &Board, sq: Square, defender: Color) -> bool {
    !square_attackers(board, sq, !defender).is_empty()
}

#[inline(always)]
#[must_use]
/// Is the king of the given color attacked in this position?
pub fn in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color)
}

#[must_use]
/// Enumerate the pseudo-legal moves of `color` in the given position: every
/// move that respects piece movement rules, castle rights and castle-path
/// safety, but which may still leave the mover's own king attacked.
pub fn get_moves(board: &Board, color: Color) -> Vec<Move> {
    // in the overwhelming majority of cases, there are fewer than 50 moves
    let mut moves = Vec::with_capacity(50);
    let occupancy = board.occupancy();
    let not_allies = !board.color_occupancy(color);
    let enemies = board.color_occupancy(!color);

    // pawns; the en-passant target counts as a capturable square because
    // its bit is set only while the capture is available
    let capture_targets = enemies | board.en_passant(!color);
    let seventh_rank = color.pawn_seventh_rank();
    for from in board[(color, Piece::Pawn)] {
        let targets = (PAWN_ATTACKS[color as usize][from as usize] & capture_targets)
            | pawn_pushes(from, color, occupancy);
        let promoting = seventh_rank.contains(from);
        for to in targets {
            if promoting {
                // every target from the seventh rank is a promotion square
                for promote_type in Piece::PROMOTING {
                    moves.push(Move::promoting(color, from, to, promote_type));
                }
            } else if from.row().abs_diff(to.row()) == 2 {
                moves.push(Move::double_push(color, from, to));
            } else {
                moves.push(Move::normal(color, Piece::Pawn, from, to));
            }
        }
    }

    // rooks
    for from in board[(color, Piece::Rook)] {
        for to in MAGIC.rook_attacks(occupancy, from) & not_allies {
            moves.push(Move::normal(color, Piece::Rook, from, to));
        }
    }

    // knights
    for from in board[(color, Piece::Knight)] {
        for to in KNIGHT_MOVES[from as usize] & not_allies {
            moves.push(Move::normal(color, Piece::Knight, from, to));
        }
    }

    // bishops
    for from in board[(color, Piece::Bishop)] {
        for to in MAGIC.bishop_attacks(occupancy, from) & not_allies {
            moves.push(Move::normal(color, Piece::Bishop, from, to));
        }
    }

    // queens
    for from in board[(color, Piece::Queen)] {
        let attacks = MAGIC.rook_attacks(occupancy, from) | MAGIC.bishop_attacks(occupancy, from);
        for to in attacks & not_allies {
            moves.push(Move::normal(color, Piece::Queen, from, to));
        }
    }

    // king
    for from in board[(color, Piece::King)] {
        for to in KING_MOVES[from as usize] & not_allies {
            moves.push(Move::normal(color, Piece::King, from, to));
        }
    }

    castles(board, color, &mut moves);

    moves
}

/// Select the push targets of a pawn at runtime: nothing when the square
/// ahead is occupied; the single push alone when the double-push square of
/// a start-rank pawn is occupied; the full table entry otherwise.
fn pawn_pushes(from: Square, color: Color, occupancy: Bitboard) -> Bitboard {
    let ahead = from + color.pawn_direction();
    if occupancy.contains(ahead) {
        return Bitboard::EMPTY;
    }
    if color.pawn_start_rank().contains(from) && occupancy.contains(ahead + color.pawn_direction())
    {
        PAWN_SINGLE_PUSHES[color as usize][from as usize]
    } else {
        PAWN_PUSHES[color as usize][from as usize]
    }
}

/// Append the castles `color` may play: the right must still be held, the
/// squares between king and rook empty, and no square of the king's path
/// (origin, transit, destination) attacked. The destination is verified
/// again by the legality filter, which makes the origin/transit checks here
/// what actually forbids castling out of or through check.
fn castles(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let occupancy = board.occupancy();
    for side in [CastleSide::Long, CastleSide::Short] {
        if !board.castle_rights.allows(color, side) {
            continue;
        }
        if !(occupancy & side.between_mask(color)).is_empty() {
            continue;
        }
        if side
            .king_path(color)
            .iter()
            .any(|&sq| is_square_attacked(board, sq, color))
        {
            continue;
        }
        moves.push(Move::castling(color, side));
    }
}

#[must_use]
/// Enumerate the successor states of every legal move of `color` in the
/// given position.
///
/// An empty result means the side to move is stalemated or checkmated;
/// callers disambiguate with `in_check`. Consumers that need the moves as
/// well must pair them with `get_moves` themselves.
pub fn generate_legal(board: &Board, color: Color) -> Vec<Board> {
    get_moves(board, color)
        .into_iter()
        .map(|m| board.apply_move(m))
        .filter(|next| !in_check(next, color))
        .collect()
}
