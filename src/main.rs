//! Plays a chess game between two players sharing the terminal. Commands are
//! read from stdin one per line, type `help` for the list.

use std::io;
use std::path::PathBuf;

use chesslink::chess::core::Color;
use chesslink::chess::game::Game;
use chesslink::Session;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Continue a game saved with the `save` command.
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Always show the board from this side instead of the side to move.
    #[arg(long, value_parser = parse_color)]
    perspective: Option<Color>,

    /// Don't print the version banner on startup.
    #[arg(short, long)]
    quiet: bool,
}

fn parse_color(input: &str) -> Result<Color, String> {
    Color::try_from(input).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr: stdout belongs to the players.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    if !args.quiet {
        chesslink::print_banner();
    }

    let game = match &args.load {
        Some(path) => chesslink::session::load(path)?,
        None => Game::new(),
    };
    log::debug!("starting the session with {} to move", game.turn());

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    Session::new(game, &mut input, &mut output)
        .with_perspective(args.perspective)
        .run()
}
