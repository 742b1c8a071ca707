//! The accelerated negamax implementation, working on raw bitboard pairs.
//!
//! Instead of cloning a [`Board`] and re-running the capture scan per
//! branch, this backend keeps only the (active, opponent) piece masks and
//! flips runs with the unchecked smear operations in
//! [`outflank_othello::bitboard`]. Move choice is observably identical to
//! the reference backend: same evaluation, same row-major tie-break.

use arrayvec::ArrayVec;
use outflank_othello::bitboard::{self, Bitboard};
use outflank_othello::{Board, Color, Position, NUM_SPACES};

pub(crate) fn find_best_move(board: &Board, depth: u8) -> Option<Position> {
    let (active, opponent) = match board.turn_player_color() {
        Color::Black => (board.black(), board.white()),
        Color::White => (board.white(), board.black()),
    };

    let (_, best) = search(active, opponent, depth);
    best.map(Position::from_mask)
}

/// Negamax over raw piece masks; `active` always belongs to the side to
/// move at this node. Returns the best score and the one-hot move mask.
fn search(active: Bitboard, opponent: Bitboard, depth: u8) -> (i32, Option<Bitboard>) {
    let moves = bitboard::move_mask(active, opponent);
    if moves.is_empty() || depth == 0 {
        return (
            i32::from(bitboard::score_absolute_difference(active, opponent)),
            None,
        );
    }

    // Child states, precomputed in row-major move order.
    let children: ArrayVec<[(Bitboard, (Bitboard, Bitboard)); NUM_SPACES]> = moves
        .masks()
        .map(|mv| (mv, bitboard::apply_move(active, opponent, mv)))
        .collect();

    let mut best_score = i32::MIN;
    let mut best_mv = None;

    for (mv, (next_active, next_opponent)) in children {
        // The opponent moves next, so the roles swap going down.
        let (opponent_score, _) = search(next_opponent, next_active, depth - 1);
        let score = -opponent_score;

        if score > best_score {
            best_score = score;
            best_mv = Some(mv);
        }
    }

    (best_score, best_mv)
}
