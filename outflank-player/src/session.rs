//! Threaded game orchestration.
//!
//! A [`GameSession`] owns the board and both players for one game. The turn
//! loop runs on its own worker thread so a front end blocking on input never
//! stalls anything else; observers get immutable board snapshots over a
//! channel instead of shared mutable state. The only data crossing threads
//! besides the channel is the cancellation token.

use crate::player::{CancelToken, MoveSignal, Player};
use derive_more::{Display, Error};
use log::{info, warn};
use outflank_othello::{Board, Color, Position};
use std::mem;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Notifications published by a running game.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A placement went through; carries the board after the move.
    BoardChanged(Board),
    /// The named color had no legal move, or its strategy passed.
    Passed(Color),
    /// The named color supplied a move that does not capture; its turn will
    /// be retried.
    IllegalMove(Color, Position),
    /// The game reached a terminal position; `None` means a draw.
    GameOver(Option<Color>, Board),
}

#[derive(Debug, PartialEq, Eq, Error, Display)]
pub enum SessionError {
    #[display(fmt = "the session was already started")]
    AlreadyStarted,
    #[display(fmt = "the session is not running")]
    NotRunning,
}

enum Phase {
    NotStarted {
        board: Board,
        black: Player,
        white: Player,
        events: Sender<SessionEvent>,
    },
    Running(JoinHandle<()>),
    Stopped,
}

/// One game between two players: a state machine going
/// `NotStarted -> Running -> Stopped`, with the turn loop on a worker
/// thread while running.
pub struct GameSession {
    phase: Phase,
    cancel: CancelToken,
}

impl GameSession {
    /// Create a session over the standard starting board.
    /// Panics unless the players are one black and one white.
    pub fn new(black: Player, white: Player) -> (Self, Receiver<SessionEvent>) {
        Self::with_board(Board::new(), black, white)
    }

    /// Create a session over an explicit starting board.
    pub fn with_board(
        board: Board,
        black: Player,
        white: Player,
    ) -> (Self, Receiver<SessionEvent>) {
        assert_eq!(black.color(), Color::Black);
        assert_eq!(white.color(), Color::White);

        let (events, receiver) = channel();
        let session = Self {
            phase: Phase::NotStarted {
                board,
                black,
                white,
                events,
            },
            cancel: CancelToken::new(),
        };
        (session, receiver)
    }

    /// The token that interrupts this game; [`GameSession::shutdown`] fires
    /// it, and front ends may share it with other machinery.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Spawn the turn loop on its worker thread.
    pub fn start(&mut self) -> Result<(), SessionError> {
        match mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::NotStarted {
                board,
                black,
                white,
                events,
            } => {
                let cancel = self.cancel.clone();
                let handle = thread::Builder::new()
                    .name("game-session".into())
                    .spawn(move || run(board, black, white, events, cancel))
                    .expect("spawning the session thread failed");
                self.phase = Phase::Running(handle);
                Ok(())
            }
            other => {
                self.phase = other;
                Err(SessionError::AlreadyStarted)
            }
        }
    }

    /// Cooperatively stop the turn loop and join the worker. Safe to call
    /// while a game is still in progress; fails on a second call.
    pub fn shutdown(&mut self) -> Result<(), SessionError> {
        match mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Running(handle) => {
                self.cancel.cancel();
                if handle.join().is_err() {
                    warn!("session thread panicked before shutdown");
                }
                Ok(())
            }
            other => {
                self.phase = other;
                Err(SessionError::NotRunning)
            }
        }
    }
}

/// The turn loop. Runs until the game is over or the token is cancelled.
fn run(
    mut board: Board,
    mut black: Player,
    mut white: Player,
    events: Sender<SessionEvent>,
    cancel: CancelToken,
) {
    info!("new game started");
    let _ = events.send(SessionEvent::BoardChanged(board.clone()));

    let mut consecutive_passes = 0u8;

    while !cancel.is_cancelled() {
        if board.is_full()
            || board.count(Color::Black) == 0
            || board.count(Color::White) == 0
            || consecutive_passes >= 2
        {
            let winner = board.winner();
            match winner {
                Some(color) => info!(
                    "game over: {} wins {}-{}",
                    color,
                    board.count(color),
                    board.count(!color)
                ),
                None => info!("game over: draw"),
            }
            let _ = events.send(SessionEvent::GameOver(winner, board.clone()));
            return;
        }

        let color = board.turn_player_color();
        let moves = board.valid_moves();

        // A forced pass never consults the strategy.
        if moves.is_empty() {
            info!("{} has no legal moves and passes", color);
            consecutive_passes += 1;
            board.swap_turn_players();
            let _ = events.send(SessionEvent::Passed(color));
            continue;
        }

        info!("waiting for {} to make a move", color);
        let player = match color {
            Color::Black => &mut black,
            Color::White => &mut white,
        };

        match player.get_move(&board, &cancel) {
            Ok(pos) if !moves.contains(pos) => {
                warn!("{} played an invalid move {}", color, pos);
                let _ = events.send(SessionEvent::IllegalMove(color, pos));
            }
            Ok(pos) => match board.place(color, pos) {
                Ok(()) => {
                    info!("{} played {}", color, pos);
                    consecutive_passes = 0;
                    board.swap_turn_players();
                    let _ = events.send(SessionEvent::BoardChanged(board.clone()));
                }
                Err(err) => {
                    warn!("{} played {}: {}", color, pos, err);
                    let _ = events.send(SessionEvent::IllegalMove(color, pos));
                }
            },
            Err(MoveSignal::Pass) => {
                info!("{} passed their move", color);
                consecutive_passes += 1;
                board.swap_turn_players();
                let _ = events.send(SessionEvent::Passed(color));
            }
            // Loop back around; the cancellation check decides what's next.
            Err(MoveSignal::Interrupted) => {}
        }
    }

    info!("game interrupted");
}
