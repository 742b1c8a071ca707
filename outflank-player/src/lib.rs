//! `outflank-player` turns the rules engine in `outflank-othello` into
//! something that plays: move-producing players, minimax search, and a
//! threaded game session that alternates turns between two players.
//!
//!  - [`search`] finds the best move for the side to move with a
//!    depth-bounded negamax, in a reference form over board clones and an
//!    accelerated form over raw bitboards.
//!  - [`player`] is the move-source abstraction: an interactive player fed
//!    from another thread, a random player, and minimax players over either
//!    search backend.
//!  - [`session`] owns the board, runs the turn loop on a worker thread, and
//!    publishes board snapshots over a channel.

pub mod player;
pub mod search;
pub mod session;
