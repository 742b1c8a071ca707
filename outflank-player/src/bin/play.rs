//! Play Othello in the terminal.
//!
//! A thin text front end over [`GameSession`]: your moves are read from
//! stdin in "D3" notation and fed to the local player, while the session
//! thread drives the opponent and publishes board snapshots to print.

use clap::{Parser, ValueEnum};
use itertools::Itertools;
use outflank_othello::{Board, Color};
use outflank_player::player::Player;
use outflank_player::search::SearchBackend;
use outflank_player::session::{GameSession, SessionEvent};
use std::io::BufRead;
use std::thread;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Reference,
    Bitwise,
}

impl From<BackendArg> for SearchBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Reference => SearchBackend::Reference,
            BackendArg::Bitwise => SearchBackend::Bitwise,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorArg {
    Black,
    White,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Black => Color::Black,
            ColorArg::White => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OpponentArg {
    Random,
    Minimax,
}

/// Play Othello against the engine in your terminal.
#[derive(Parser)]
#[command(name = "play")]
struct Args {
    /// Plies the minimax players look ahead
    #[arg(long, default_value_t = 5)]
    depth: u8,

    /// Search implementation backing the minimax players
    #[arg(long, value_enum, default_value_t = BackendArg::Bitwise)]
    backend: BackendArg,

    /// The color you play
    #[arg(long, value_enum, default_value_t = ColorArg::Black)]
    color: ColorArg,

    /// What you play against
    #[arg(long, value_enum, default_value_t = OpponentArg::Minimax)]
    opponent: OpponentArg,

    /// Let a minimax player take your seat and watch
    #[arg(long)]
    watch: bool,
}

fn opponent_player(kind: OpponentArg, color: Color, depth: u8, backend: SearchBackend) -> Player {
    match kind {
        OpponentArg::Random => Player::random(color),
        OpponentArg::Minimax => Player::minimax(color, depth, backend),
    }
}

fn render(board: &Board) -> String {
    let rows = board
        .to_string()
        .lines()
        .enumerate()
        .map(|(i, row)| format!("{} {}", i + 1, row))
        .join("\n");
    format!("  ABCDEFGH\n{}", rows)
}

fn prompt(board: &Board) {
    println!(
        "Your move, {}. Legal moves: {}",
        board.turn_player_color(),
        board.valid_moves().map(|mv| mv.to_string()).join(", ")
    );
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let my_color = Color::from(args.color);
    let backend = SearchBackend::from(args.backend);

    let (mine, handle) = if args.watch {
        (Player::minimax(my_color, args.depth, backend), None)
    } else {
        let (player, handle) = Player::local(my_color);
        (player, Some(handle))
    };
    let other = opponent_player(args.opponent, !my_color, args.depth, backend);

    let (black, white) = match my_color {
        Color::Black => (mine, other),
        Color::White => (other, mine),
    };

    let (mut session, events) = GameSession::new(black, white);
    let cancel = session.cancel_token();
    session
        .start()
        .expect("a freshly created session can start");

    if let Some(handle) = handle {
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input.eq_ignore_ascii_case("quit") {
                    cancel.cancel();
                    break;
                }
                match input.parse() {
                    Ok(pos) => handle.offer(pos),
                    Err(_) => println!("Cannot parse that. Enter coordinates like D3, or quit."),
                }
            }
        });
    }

    let interactive = !args.watch;
    let mut last_board = Board::new();

    for event in events {
        match event {
            SessionEvent::BoardChanged(board) => {
                println!("\n{}", render(&board));
                if interactive && board.turn_player_color() == my_color {
                    prompt(&board);
                }
                last_board = board;
            }
            SessionEvent::Passed(color) => {
                if interactive && color == my_color {
                    println!("You have no legal moves; you pass.");
                } else {
                    println!("{} passes.", color);
                    if interactive {
                        let mut snapshot = last_board.clone();
                        snapshot.set_turn_player_color(my_color);
                        if !snapshot.valid_moves().is_empty() {
                            prompt(&snapshot);
                        }
                    }
                }
            }
            SessionEvent::IllegalMove(color, pos) => {
                if interactive && color == my_color {
                    println!("{} does not capture anything. Try again.", pos);
                } else {
                    println!("{} tried an illegal move at {}.", color, pos);
                }
            }
            SessionEvent::GameOver(winner, board) => {
                println!("\n{}", render(&board));
                println!(
                    "Final score: Black {} - White {}.",
                    board.count(Color::Black),
                    board.count(Color::White)
                );
                match winner {
                    Some(color) => println!("Winner: {}.", color),
                    None => println!("Draw."),
                }
                break;
            }
        }
    }

    let _ = session.shutdown();
}
