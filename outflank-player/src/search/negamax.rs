//! The reference negamax implementation, exploring board clones.
//!
//! Kept deliberately close to the rules engine: every branch goes through
//! [`Board::place`], so this backend doubles as an oracle for the bitwise
//! one in tests.

use outflank_othello::{bitboard, Board, Position};

/// Material difference from the perspective of the side to move.
fn evaluate(board: &Board) -> i32 {
    let color = board.turn_player_color();
    i32::from(bitboard::score_absolute_difference(
        board.pieces(color),
        board.pieces(!color),
    ))
}

/// Search `depth` plies ahead and return the best score for the side to
/// move along with the move achieving it. At depth 0, or when no move is
/// legal, the score is the static evaluation and there is no move.
pub(crate) fn find_best_move(board: &Board, depth: u8) -> (i32, Option<Position>) {
    let moves = board.valid_moves();
    if moves.is_empty() || depth == 0 {
        return (evaluate(board), None);
    }

    let color = board.turn_player_color();
    let mut best_score = i32::MIN;
    let mut best_move = None;

    for mv in moves {
        let mut branch = board.clone();
        branch
            .place(color, mv)
            .expect("moves from valid_moves are placeable");
        branch.set_turn_player_color(!color);

        let (opponent_score, _) = find_best_move(&branch, depth - 1);
        let score = -opponent_score;

        // Strictly greater: on ties the earliest move in decode order sticks.
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    (best_score, best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outflank_othello::Color;

    #[test]
    fn leaf_nodes_return_static_evaluation() {
        let board = Board::new();
        let (score, mv) = find_best_move(&board, 0);
        assert_eq!(score, 0);
        assert_eq!(mv, None);
    }

    #[test]
    fn evaluation_follows_the_turn_player() {
        let mut board = Board::new();
        board.place(Color::Black, Position::new(2, 3)).unwrap();
        // Black is up 4-1 after the first capture.
        board.set_turn_player_color(Color::Black);
        assert_eq!(evaluate(&board), 3);
        board.set_turn_player_color(Color::White);
        assert_eq!(evaluate(&board), -3);
    }

    #[test]
    fn scores_negate_up_the_tree() {
        // After black's best opening, white's best reply recovers the
        // material: classic Othello sees-saws around zero at even depths.
        let board = Board::new();
        let (score_d1, _) = find_best_move(&board, 1);
        assert_eq!(score_d1, 3);
        let (score_d2, _) = find_best_move(&board, 2);
        assert_eq!(score_d2, 0);
    }
}
