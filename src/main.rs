//! `tridchess` command line
//!
//! Every command loads the save file, performs one action and writes the
//! game back. `new` starts over.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use tridchess::core::logging::init_logging;
use tridchess::core::persistence::{load_game, save_game};
use tridchess::core::settings::settings_path;
use tridchess::core::Settings;
use tridchess::game::{Game, MoveRequest};
use tri_engine::{
    ArrivalChoice, AttackBoardId, BoardMoveRequest, CastleSide, Color, MainBoard, PieceKind,
    PinId, ResolvedLevel, Square,
};

#[derive(Parser, Debug)]
#[command(name = "tridchess", version, about = "Tri-dimensional chess with attack boards")]
struct Cli {
    /// Save file (defaults to the one in the settings)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game
    New,
    /// Print the position, status and history
    Show,
    /// List legal targets of a piece (`a2W`) or a board (`WQL`), or castles
    Moves { target: Option<String> },
    /// Move a piece: `move b2W b4W [--promote queen]`
    Move {
        from: String,
        to: String,
        #[arg(long)]
        promote: Option<String>,
    },
    /// Move or rotate an attack board: `board WQL QL2 [--rotate] [--arrival rot180]`
    Board {
        board: String,
        pin: String,
        #[arg(long)]
        rotate: bool,
        #[arg(long, value_enum)]
        arrival: Option<Arrival>,
    },
    /// Castle: `castle kingside-kl`, `castle kingside-ql` or `castle queenside`
    Castle { side: String },
    /// Take a deferred promotion: `promote a8B queen`
    Promote { square: String, piece: String },
    /// Take back the last action
    Undo,
    /// Write the current settings to the settings file and print its path
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Arrival {
    Identity,
    Rot180,
}

impl From<Arrival> for ArrivalChoice {
    fn from(arrival: Arrival) -> Self {
        match arrival {
            Arrival::Identity => ArrivalChoice::Identity,
            Arrival::Rot180 => ArrivalChoice::Rot180,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load();
    init_logging(&settings.log_filter);

    let path = cli.file.clone().unwrap_or_else(|| settings.save_file.clone());
    debug!(path = %path.display(), command = ?cli.command, "running command");

    let mut game = match cli.command {
        Command::New | Command::Config => Game::new(),
        _ => load_game(&path)
            .with_context(|| format!("cannot load game from {}", path.display()))?,
    };

    match cli.command {
        Command::New => {
            save_game(&path, &game, settings.pretty_snapshots)?;
            print_position(&game);
            return Ok(());
        }
        Command::Show => {
            print_position(&game);
            print_history(&game);
            return Ok(());
        }
        Command::Moves { target } => {
            print_moves(&game, target.as_deref())?;
            return Ok(());
        }
        Command::Move { from, to, promote } => {
            let mut request =
                MoveRequest::new(game.parse_square(&from)?, game.parse_square(&to)?);
            if let Some(kind) = promote {
                request = request.promoting_to(kind.parse::<PieceKind>()?);
            }
            let record = game.move_piece(request)?;
            println!("{record}");
        }
        Command::Board {
            board,
            pin,
            rotate,
            arrival,
        } => {
            let request = BoardMoveRequest {
                board: board.parse::<AttackBoardId>()?,
                to: pin.parse::<PinId>()?,
                rotate,
                arrival: arrival.map(ArrivalChoice::from),
            };
            let record = game.move_board(request)?;
            println!("{record}");
        }
        Command::Castle { side } => {
            let record = game.castle(side.parse::<CastleSide>()?)?;
            println!("{record}");
        }
        Command::Promote { square, piece } => {
            let square = game.parse_square(&square)?;
            let Some(id) = game.piece_at(square).map(|p| p.id) else {
                bail!("no piece on {square}");
            };
            let record = game.promote(id, piece.parse::<PieceKind>()?)?;
            println!("{record}");
        }
        Command::Undo => {
            let records = game.history().records();
            let Some((_, earlier)) = records.split_last() else {
                bail!("nothing to undo");
            };
            game = Game::replay(earlier).context("cannot replay history")?;
            println!("undone");
        }
        Command::Config => {
            settings.save()?;
            println!("{}", settings_path().display());
            return Ok(());
        }
    }

    save_game(&path, &game, settings.pretty_snapshots)?;
    print_status(&game);
    Ok(())
}

fn print_moves(game: &Game, target: Option<&str>) -> anyhow::Result<()> {
    match target {
        None => {
            let sides: Vec<String> = game
                .castling_options()
                .iter()
                .map(|s| s.to_string())
                .collect();
            if sides.is_empty() {
                println!("castling: none");
            } else {
                println!("castling: {}", sides.join(", "));
            }
            for id in game.pending_promotions() {
                println!("promotion pending on {}", game.square_of(id)?);
            }
        }
        Some(text) => {
            if let Ok(board) = text.parse::<AttackBoardId>() {
                let pins: Vec<String> = game
                    .legal_pins_for_board(board)
                    .iter()
                    .map(|p| p.to_string())
                    .collect();
                println!("{board}: {}", pins.join(" "));
            } else {
                let square = game.parse_square(text)?;
                let Some(piece) = game.piece_at(square) else {
                    bail!("no piece on {square}");
                };
                let moves: Vec<String> = game
                    .legal_destinations(piece.id)?
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                println!("{} {square}: {}", piece.kind, moves.join(" "));
            }
        }
    }
    Ok(())
}

fn print_status(game: &Game) {
    println!("{}", game.status().message(game.current_turn()));
}

fn print_history(game: &Game) {
    for (ply, record) in game.history().iter().enumerate() {
        println!("{:>3}. {record}", ply + 1);
    }
}

fn piece_letter(game: &Game, square: Square) -> char {
    match game.piece_at(square) {
        None => '.',
        Some(piece) => {
            let letter = match piece.kind {
                PieceKind::Pawn => 'p',
                PieceKind::Rook => 'r',
                PieceKind::Knight => 'n',
                PieceKind::Bishop => 'b',
                PieceKind::Queen => 'q',
                PieceKind::King => 'k',
            };
            match piece.color {
                Color::White => letter.to_ascii_uppercase(),
                Color::Black => letter,
            }
        }
    }
}

/// Text diagram of each main board and each active attack board
fn print_position(game: &Game) {
    let mut levels: Vec<(String, ResolvedLevel)> = MainBoard::ALL
        .iter()
        .map(|&b| (b.as_str().to_string(), ResolvedLevel::Main(b)))
        .collect();
    for (id, placement) in game.boards().iter() {
        levels.push((
            format!("{id} @ {}", placement.instance_id()),
            ResolvedLevel::Pin(placement.pin),
        ));
    }

    for (label, level) in levels {
        let mut squares: Vec<Square> = game
            .world()
            .squares()
            .iter()
            .copied()
            .filter(|s| s.level == level)
            .collect();
        squares.sort_by_key(|s| (std::cmp::Reverse(s.rank), s.file));

        println!("{label}");
        let mut rank = None;
        for square in squares {
            if rank != Some(square.rank) {
                if rank.is_some() {
                    println!();
                }
                print!("  {} ", square.rank);
                rank = Some(square.rank);
            }
            print!("{}", piece_letter(game, square));
        }
        println!();
    }
    print_status(game);
}
