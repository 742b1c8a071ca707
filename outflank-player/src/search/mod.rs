//! Depth-bounded negamax search for the minimax players.
//!
//! Two interchangeable backends implement the same algorithm: evaluate the
//! material difference from the perspective of the side to move, negate
//! scores as they back up the tree, and keep the first move (in row-major
//! order) that achieves the best score. Given the same board and depth, both
//! backends choose the same move.

mod bitwise;
mod negamax;

use outflank_othello::{Board, Position};

/// Which search implementation drives a minimax player.
///
/// [`SearchBackend::Bitwise`] skips board clones and rule re-checks by
/// working on raw bitboard pairs; it is a drop-in performance substitute
/// for [`SearchBackend::Reference`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchBackend {
    Reference,
    Bitwise,
}

impl Default for SearchBackend {
    fn default() -> Self {
        SearchBackend::Bitwise
    }
}

/// Find the strongest move for the side to move, looking `depth` plies
/// ahead. Returns `None` when the side to move has no legal move.
///
/// `depth` is expected to be at least 1; at depth 0 there is no lookahead
/// and the choice is meaningless.
pub fn best_move(board: &Board, depth: u8, backend: SearchBackend) -> Option<Position> {
    match backend {
        SearchBackend::Reference => negamax::find_best_move(board, depth).1,
        SearchBackend::Bitwise => bitwise::find_best_move(board, depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outflank_othello::{bitboard, Board, Color, Position};
    use rand::rngs::SmallRng;
    use rand::seq::IteratorRandom;
    use rand::SeedableRng;

    const BACKENDS: [SearchBackend; 2] = [SearchBackend::Reference, SearchBackend::Bitwise];

    #[test]
    fn first_row_major_move_wins_ties() {
        // Every opening move captures exactly one piece, so the tie-break
        // must pick D3, the first in decode order.
        let board = Board::new();
        for &backend in &BACKENDS {
            assert_eq!(
                best_move(&board, 1, backend),
                Some(Position::new(2, 3)),
                "{:?}",
                backend
            );
        }
    }

    #[test]
    fn depth_one_maximizes_captures() {
        // Black can cap the single white piece at (1, 2) by playing (1, 1),
        // or the two-piece run at (3, 3)..(3, 4) by playing (3, 2). The
        // bigger capture comes later in row-major order, so picking it
        // proves maximization rather than tie-breaking.
        let white = bitboard::pos_mask(1, 2) | bitboard::pos_mask(3, 3) | bitboard::pos_mask(3, 4);
        let black = bitboard::pos_mask(1, 3) | bitboard::pos_mask(3, 5);
        let board = Board::with_bitboards(white, black, Color::Black);
        for &backend in &BACKENDS {
            assert_eq!(
                best_move(&board, 1, backend),
                Some(Position::new(3, 2)),
                "{:?}",
                backend
            );
        }
    }

    #[test]
    fn no_moves_yields_none() {
        let board = Board::with_bitboards(
            bitboard::pos_mask(0, 0),
            bitboard::pos_mask(7, 7),
            Color::Black,
        );
        for &backend in &BACKENDS {
            assert_eq!(best_move(&board, 3, backend), None, "{:?}", backend);
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let board = Board::new();
        for &backend in &BACKENDS {
            let first = best_move(&board, 3, backend);
            for _ in 0..3 {
                assert_eq!(best_move(&board, 3, backend), first, "{:?}", backend);
            }
        }
    }

    #[test]
    fn backends_agree_along_random_games() {
        let mut rng = SmallRng::seed_from_u64(0x0DD5);

        for _ in 0..4 {
            let mut board = Board::new();
            let mut passed = false;

            loop {
                let moves = board.valid_moves();
                if moves.is_empty() {
                    if passed {
                        break;
                    }
                    passed = true;
                    board.swap_turn_players();
                    continue;
                }
                passed = false;

                for depth in 1..=2 {
                    assert_eq!(
                        best_move(&board, depth, SearchBackend::Reference),
                        best_move(&board, depth, SearchBackend::Bitwise),
                        "backends disagree at depth {} on\n{}",
                        depth,
                        board
                    );
                }

                let mv = moves.choose(&mut rng).unwrap();
                let color = board.turn_player_color();
                board.place(color, mv).unwrap();
                board.swap_turn_players();
            }
        }
    }
}
