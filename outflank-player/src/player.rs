//! Players: objects that produce moves for one side of a game.
//!
//! A [`Player`] is a color plus a [`Strategy`]. Strategies never mutate the
//! board they are shown; they hand back a candidate [`Position`] which the
//! session validates and applies, or raise a [`MoveSignal`] instead.

use crate::search::{self, SearchBackend};
use derive_more::Display;
use log::debug;
use outflank_othello::{Board, Color, Position};
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Control signals a player raises instead of returning a move.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum MoveSignal {
    /// The player has no legal move this turn.
    #[display(fmt = "pass")]
    Pass,
    /// The cancellation signal fired while waiting for a move.
    #[display(fmt = "interrupted")]
    Interrupted,
}

/// Cooperative cancellation flag shared between a session, its players, and
/// whoever needs to stop them.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the signal. Every waiting player returns
    /// [`MoveSignal::Interrupted`] within its polling latency.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How long a blocked local player waits between cancellation checks.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Default)]
struct MoveSlot {
    pending: Mutex<Option<Position>>,
    arrived: Condvar,
}

/// Feeds moves to a waiting [`LocalMover`] from another thread.
#[derive(Clone)]
pub struct MoveHandle(Arc<MoveSlot>);

impl MoveHandle {
    /// Hand the waiting player a move. A move offered before the player
    /// asks for one is held; offering again replaces it.
    pub fn offer(&self, pos: Position) {
        let mut pending = self.0.pending.lock().unwrap();
        *pending = Some(pos);
        self.0.arrived.notify_one();
    }
}

/// An interactive player: blocks until a move arrives through its
/// [`MoveHandle`], re-checking the cancellation signal as it waits.
pub struct LocalMover {
    slot: Arc<MoveSlot>,
}

impl LocalMover {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(MoveSlot::default()),
        }
    }

    pub fn handle(&self) -> MoveHandle {
        MoveHandle(self.slot.clone())
    }

    fn get_move(&self, cancel: &CancelToken) -> Result<Position, MoveSignal> {
        let mut pending = self.slot.pending.lock().unwrap();
        loop {
            if let Some(pos) = pending.take() {
                return Ok(pos);
            }
            if cancel.is_cancelled() {
                return Err(MoveSignal::Interrupted);
            }
            let (guard, _) = self
                .slot
                .arrived
                .wait_timeout(pending, POLL_INTERVAL)
                .unwrap();
            pending = guard;
        }
    }
}

impl Default for LocalMover {
    fn default() -> Self {
        Self::new()
    }
}

/// Chooses uniformly among the legal moves.
pub struct RandomAi {
    rng: SmallRng,
}

impl RandomAi {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// A deterministic variant for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn get_move(&mut self, board: &Board) -> Result<Position, MoveSignal> {
        board
            .valid_moves()
            .choose(&mut self.rng)
            .ok_or(MoveSignal::Pass)
    }
}

impl Default for RandomAi {
    fn default() -> Self {
        Self::new()
    }
}

/// Searches the game tree for the strongest move.
pub struct MinimaxAi {
    depth: u8,
    backend: SearchBackend,
}

impl MinimaxAi {
    /// Panics if `depth` is zero: a zero-ply search cannot pick a move.
    pub fn new(depth: u8, backend: SearchBackend) -> Self {
        assert!(depth >= 1);
        Self { depth, backend }
    }

    fn get_move(&self, board: &Board) -> Result<Position, MoveSignal> {
        search::best_move(board, self.depth, self.backend).ok_or(MoveSignal::Pass)
    }
}

/// The ways a player can come up with moves.
pub enum Strategy {
    Local(LocalMover),
    Random(RandomAi),
    Minimax(MinimaxAi),
}

/// A move source for one side of a game.
pub struct Player {
    color: Color,
    strategy: Strategy,
}

impl Player {
    pub fn new(color: Color, strategy: Strategy) -> Self {
        Self { color, strategy }
    }

    /// An interactive player together with the handle that feeds it.
    pub fn local(color: Color) -> (Self, MoveHandle) {
        let mover = LocalMover::new();
        let handle = mover.handle();
        (Self::new(color, Strategy::Local(mover)), handle)
    }

    pub fn random(color: Color) -> Self {
        Self::new(color, Strategy::Random(RandomAi::new()))
    }

    pub fn random_seeded(color: Color, seed: u64) -> Self {
        Self::new(color, Strategy::Random(RandomAi::with_seed(seed)))
    }

    pub fn minimax(color: Color, depth: u8, backend: SearchBackend) -> Self {
        Self::new(color, Strategy::Minimax(MinimaxAi::new(depth, backend)))
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Produce this player's next move for the given board snapshot.
    ///
    /// Blocks only for [`Strategy::Local`], and then only until the
    /// cancellation signal fires. The board is never mutated.
    pub fn get_move(
        &mut self,
        board: &Board,
        cancel: &CancelToken,
    ) -> Result<Position, MoveSignal> {
        let result = match &mut self.strategy {
            Strategy::Local(mover) => mover.get_move(cancel),
            Strategy::Random(ai) => ai.get_move(board),
            Strategy::Minimax(ai) => ai.get_move(board),
        };
        debug!("{} move source returned {:?}", self.color, result);
        result
    }
}
