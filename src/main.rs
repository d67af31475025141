//! Two-player chess console

use anyhow::Context;
use chess_rules::{Color, Console, Game, GameConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess_rules", version, about = "Two-player chess rules engine console")]
struct Args {
    /// Start from this FEN (placement plus optional side to move)
    #[arg(long, conflicts_with = "config")]
    fen: Option<String>,

    /// JSON game configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Give black the first move
    #[arg(long)]
    black_first: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match (&args.config, &args.fen) {
        (Some(path), _) => GameConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        (None, Some(fen)) => GameConfig::from_fen(fen).context("parsing --fen")?,
        (None, None) => GameConfig::default(),
    };
    if args.black_first {
        config.first_to_move = Color::Black;
    }

    let game = Game::new(&config).context("setting up the board")?;

    println!("chess_rules v{} - two-player console", env!("CARGO_PKG_VERSION"));
    println!("Type 'd' to display the board, 'play e2e4' to move, 'quit' to exit");

    let mut console = Console::new(game);
    console.run()?;
    Ok(())
}
