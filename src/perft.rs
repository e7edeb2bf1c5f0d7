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

//! Performance testing, or "perft". Perft counts the leaf nodes of the
//! legal-move tree to a fixed depth; matching the published counts for
//! well-known positions is the standard correctness benchmark for a move
//! generator.

use std::time::Instant;

use super::{
    movegen::{generate_legal, init_tables},
    Board, Color,
};

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Count the leaf nodes of the legal-move tree of depth `depth` rooted at
/// the position given by `fen`, and print a timing summary. The node count
/// covers only the walk itself; table setup happens before the clock
/// starts.
///
/// # Panics
///
/// This function will panic if `fen` is not a legal board.
pub fn perft(fen: &str, depth: u8) -> u64 {
    let (board, player) = Board::from_fen(fen).unwrap();
    init_tables();
    let tic = Instant::now();
    let num_nodes = perft_search(&board, player, depth);
    let toc = Instant::now();
    let time = toc - tic;
    let speed = (num_nodes as f64) / time.as_secs_f64();
    println!(
        "time {:.2} secs, num nodes {num_nodes}: {speed:.0} nodes/sec",
        time.as_secs_f64()
    );

    num_nodes
}

/// The core search algorithm for perft. Since the legality filter returns
/// successor states, the walk needs no notion of a move at all.
fn perft_search(board: &Board, player: Color, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let successors = generate_legal(board, player);
    if depth == 1 {
        return successors.len() as u64;
    }

    successors
        .iter()
        .map(|next| perft_search(next, !player, depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perft_assistant(fen: &str, node_counts: &[u64]) {
        for (i, num) in node_counts.iter().enumerate() {
            assert_eq!(*num, perft(fen, i as u8));
        }
    }

    #[test]
    /// Test the perft values for the board starting position.
    fn perft_start_position() {
        perft_assistant(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &[1, 20, 400, 8_902, 197_281],
        );
    }

    #[test]
    /// Test the perft values for the
    /// [Kiwipete](https://www.chessprogramming.org/Perft_Results#Position_2)
    /// position.
    fn perft_kiwipete() {
        perft_assistant(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ",
            &[1, 48, 2_039, 97_862],
        );
    }

    #[test]
    /// Test the perft values for a rook endgame whose deeper plies are full
    /// of en-passant edge cases.
    /// Uses results from [the CPW wiki](https://www.chessprogramming.org/Perft_Results#Position_3).
    fn perft_endgame() {
        perft_assistant(
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - ",
            &[1, 14, 191, 2_812, 43_238],
        );
    }

    #[test]
    /// Test the perft values for an unbalanced position with an immediate
    /// en-passant capture available. Uses results from
    /// [the CPW wiki](https://www.chessprogramming.org/Perft_Results#Position_4).
    fn perft_unbalanced() {
        perft_assistant(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            &[1, 6, 264, 9_467],
        );
    }

    #[test]
    /// Test the perft values for a position stuffed with promotions and
    /// underpromotions.
    fn perft_promotions() {
        perft_assistant(
            "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N w - - 0 1",
            &[1, 24, 496, 9_483],
        );
    }
}
