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

//! Magic bitboards, used for generating bishop, rook, and queen attacks.
//!
//! A slider's attack set depends only on the occupancy of its relevant mask
//! (the blocker squares along its rays, edges excluded). Multiplying the
//! masked occupancy by a per-square magic number and shifting compresses
//! those sparse bits into a dense index into a precomputed attack table.
//! The magics themselves are found by a bounded random search when the
//! table is first built; the search RNG is seeded from the square index so
//! every build produces the same tables.

use super::{Bitboard, Direction, Square};

use once_cell::sync::Lazy;

use std::{array, convert::TryFrom};

/// A master copy of the main magic table. Used for generating bishop,
/// rook, and queen attacks.
pub(crate) static MAGIC: Lazy<AttacksTable> = Lazy::new(AttacksTable::make);

/// The number of times to try generating magics for one square before
/// concluding that something is broken.
const NUM_MAGIC_TRIES: u64 = 10_000_000;

/// Base seed for the per-square search RNGs. Rook and bishop searches for
/// the same square draw from different streams.
const MAGIC_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Debug)]
/// A complete magic table which can generate attacks for rooks and bishops.
pub(crate) struct AttacksTable {
    rook_table: [SquareAttacks; 64],
    bishop_table: [SquareAttacks; 64],
}

impl AttacksTable {
    /// Create an empty `AttacksTable`.
    fn new() -> AttacksTable {
        AttacksTable {
            rook_table: array::from_fn(|_| SquareAttacks::new()),
            bishop_table: array::from_fn(|_| SquareAttacks::new()),
        }
    }

    /// Create an `AttacksTable` from scratch, searching for the magics and
    /// materializing the indexed attack tables.
    pub(crate) fn make() -> AttacksTable {
        let mut table = AttacksTable::new();
        make_magic_helper(&mut table.rook_table, true);
        make_magic_helper(&mut table.bishop_table, false);

        table
    }

    #[inline(always)]
    /// Get the attacks that a rook on `sq` could make with the given board
    /// occupancy. The result includes squares occupied by friendly pieces;
    /// the caller masks those out.
    pub(crate) fn rook_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        get_attacks(occupancy, sq, &self.rook_table)
    }

    #[inline(always)]
    /// Get the attacks that a bishop on `sq` could make with the given board
    /// occupancy.
    pub(crate) fn bishop_attacks(&self, occupancy: Bitboard, sq: Square) -> Bitboard {
        get_attacks(occupancy, sq, &self.bishop_table)
    }
}

/// A structure containing all the information needed to generate attacks for
/// a rook or bishop from one square.
#[derive(Clone, Debug)]
struct SquareAttacks {
    /// A mask which, when &ed with the occupancy bitboard, will give only the
    /// bits that matter when computing attacks.
    mask: Bitboard,
    /// The magic number to multiply to hash the masked occupancy.
    magic: Bitboard,
    /// A lookup vector of squares attacked.
    attacks: Vec<Bitboard>,
    /// The shift to extract the index, equal to 64 minus the mask's
    /// popcount.
    shift: u8,
}

impl SquareAttacks {
    /// Create an empty `SquareAttacks`.
    fn new() -> SquareAttacks {
        SquareAttacks {
            mask: Bitboard::EMPTY,
            magic: Bitboard::EMPTY,
            attacks: Vec::new(),
            shift: 0,
        }
    }
}

/// Get the attacks a square has, given a magic lookup table and the current
/// occupancy.
fn get_attacks(occupancy: Bitboard, sq: Square, table: &[SquareAttacks; 64]) -> Bitboard {
    // SAFETY: `sq` is a valid square, so accessing it by array lookup is OK.
    let magic_data = unsafe { table.get_unchecked(sq as usize) };
    let masked_occupancy = occupancy & magic_data.mask;
    let key = compute_magic_key(masked_occupancy, magic_data.magic, magic_data.shift);

    // SAFETY: the key was shifted down to fewer bits than the table's length.
    unsafe { *magic_data.attacks.get_unchecked(key) }
}

#[inline(always)]
/// Use magic hashing to get the index to look up attacks in a bitboard.
fn compute_magic_key(occupancy: Bitboard, magic: Bitboard, shift: u8) -> usize {
    usize::from((occupancy * magic) >> shift)
}

/// Populate a magic table, searching for a magic number for each square and
/// then materializing its indexed attack vector. If `is_rook` is true, it
/// will make magics for rook attacks; otherwise it will make magics for
/// bishops.
///
/// # Panics
///
/// Will panic if a magic value for some square cannot be found within
/// `NUM_MAGIC_TRIES` attempts.
fn make_magic_helper(table: &mut [SquareAttacks; 64], is_rook: bool) {
    #[allow(clippy::cast_possible_truncation)]
    for i in 0..64 {
        // square of the piece making attacks
        let sq = Square::try_from(i as u8).unwrap();
        let entry = &mut table[i];
        if is_rook {
            entry.mask = get_rook_mask(sq);
        } else {
            entry.mask = get_bishop_mask(sq);
        }
        // number of squares where occupancy matters
        let num_points = entry.mask.len();
        entry.shift = 64 - num_points;
        let num_subsets = 1usize << num_points;

        // compute every masked blocker arrangement and its true attack set
        let mut occupancies = vec![Bitboard::EMPTY; num_subsets];
        let mut attacks = vec![Bitboard::EMPTY; num_subsets];
        let dirs = if is_rook {
            &Direction::ROOK_DIRECTIONS
        } else {
            &Direction::BISHOP_DIRECTIONS
        };
        for j in 0..num_subsets {
            occupancies[j] = index_to_occupancy(j, entry.mask);
            attacks[j] = directional_attacks(sq, dirs, occupancies[j]);
        }

        // try random magics until one works; the stream is seeded per square
        // so that every build finds the same magics
        let rng = fastrand::Rng::with_seed(MAGIC_SEED ^ (i as u64 + if is_rook { 0 } else { 64 }));
        let mut used = vec![Bitboard::EMPTY; num_subsets];
        let mut found_magic = false;
        for _ in 0..NUM_MAGIC_TRIES {
            let magic = random_sparse_bitboard(&rng);

            used.fill(Bitboard::EMPTY);
            found_magic = true;
            for j in 0..num_subsets {
                let key = compute_magic_key(occupancies[j], magic, entry.shift);
                // an attack set is never empty, so empty means a fresh slot
                if used[key].is_empty() {
                    used[key] = attacks[j];
                } else if used[key] != attacks[j] {
                    found_magic = false;
                    break;
                }
            }

            if found_magic {
                entry.magic = magic;
                break;
            }
        }
        if !found_magic {
            panic!(
                "failed to find {} magic for square {sq}",
                if is_rook { "rook" } else { "bishop" }
            );
        }

        // found a magic, populate the attack vector
        entry.attacks = vec![Bitboard::EMPTY; num_subsets];
        for j in 0..num_subsets {
            let key = compute_magic_key(occupancies[j], entry.magic, entry.shift);
            entry.attacks[key] = attacks[j];
        }
    }
}

/// Create the mask for the relevant bits in magic of a rook. `sq` is the
/// square that a rook would occupy to receive this mask.
fn get_rook_mask(sq: Square) -> Bitboard {
    let index = sq as i8;
    // sequence of 1s down the same row as the piece to move, except on the
    // ends
    let row_mask = Bitboard::new(0x7E << (8 * (index / 8)));
    // sequence of 1s down the same file as the piece to move, except on the
    // ends
    let col_mask = Bitboard::new(0x0001_0101_0101_0100 << (index % 8));
    // note: pieces at the end of the travel don't matter, which is why the
    // masks aren't uniform

    // in the col mask or row mask, but not the piece to move
    // xor operation will remove the square the piece is on
    (row_mask ^ col_mask) & !Bitboard::from(sq)
}

/// Create the mask for the relevant bits in magic of a bishop. `sq` is the
/// square that a bishop would be on to receive this mask.
fn get_bishop_mask(sq: Square) -> Bitboard {
    /// A Bitboard made of 1's around the ring of the board, and 0's in the
    /// middle.
    const RING_MASK: Bitboard = Bitboard::new(0xFF81_8181_8181_81FF);

    (Bitboard::diagonal(sq) ^ Bitboard::anti_diagonal(sq)) & !RING_MASK
}

/// Given some mask, create the occupancy bitboard according to this index.
///
/// `index` must be less than or equal to 2 ^ (number of ones in `mask`).
/// Each bit of `index` decides whether the corresponding set bit of `mask`,
/// counted from the lowest upward, appears in the result.
fn index_to_occupancy(index: usize, mask: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    let num_points = mask.len();
    let mut editable_mask = mask;
    // go from right to left in the bits of num_points,
    // and add an occupancy if something is there
    for i in 0..num_points {
        let shift_size = editable_mask.trailing_zeros();
        // make a bitboard which only occupies the rightmost square
        let occupier = Bitboard::new(1 << shift_size);
        // remove the occupier from the mask
        editable_mask &= !occupier;
        if (index & (1 << i)) != 0 {
            // the bit corresponding to the occupier is nonzero
            result |= occupier;
        }
    }

    result
}

/// Construct the squares attacked by a piece at `sq` if it could move along
/// the directions in `dirs`, when the board is occupied by the pieces in
/// `occupancy`. Each ray includes its first blocker and stops there.
///
/// This is slow and should only be used for generating magic bitboards
/// (instead of for move generation).
fn directional_attacks(sq: Square, dirs: &[Direction], occupancy: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for dir in dirs.iter() {
        let mut current_square = sq;
        for _ in 0..7 {
            if !is_valid_step(current_square, *dir) {
                break;
            }
            current_square += *dir;
            result.insert(current_square);
            if occupancy.contains(current_square) {
                break;
            }
        }
    }

    result
}

/// Return whether stepping from `sq` along `dir` stays on the board without
/// wrapping around an edge.
fn is_valid_step(sq: Square, dir: Direction) -> bool {
    sq.chebyshev_to(sq + dir) <= 1
}

#[inline(always)]
/// Generate a random, mostly-empty bitboard.
fn random_sparse_bitboard(rng: &fastrand::Rng) -> Bitboard {
    let mut result = Bitboard::new(rng.u64(..));
    for _ in 0..2 {
        result &= Bitboard::new(rng.u64(..));
    }

    result
}
