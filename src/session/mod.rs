//! A local game between two players sharing one terminal.
//!
//! [`Session::run`] is the main loop: it reads commands from the input stream
//! one line at a time, enforces turns through [`Game`] and reports the outcome
//! of every move. Malformed commands and rejected moves are reported with an
//! `error:` line and the loop carries on.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use log::debug;

use crate::chess::core::{Color, Move, Position};
use crate::chess::game::{Game, GameStatus};
use crate::session::command::Command;
use crate::session::render::BoardView;

mod command;
mod render;

const HELP: &str = "\
commands:
  board                         show the board
  moves <square>                show legal moves of the piece on the square
  move <from><to>[promotion]    make a move, e.g. `move e2e4` or `move e7e8q`
  move <from> <to> [promotion]  same as above, e.g. `move e7 e8 q`
  status                        show whose turn it is and the game state
  resign [white|black]          resign the game (side to move by default)
  new                           start a new game
  save <file>                   write the game to a JSON file
  json                          print the game as JSON
  help                          show this message
  quit                          end the session";

/// Reads a game previously written by `save` (or any JSON produced by
/// serializing [`Game`]).
///
/// # Errors
///
/// If the file can't be read or doesn't contain a valid game.
pub fn load(path: &Path) -> anyhow::Result<Game> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} does not contain a valid game", path.display()))
}

/// Writes the game to `path` as JSON.
///
/// # Errors
///
/// If the game can't be written to the file.
pub fn save(game: &Game, path: &Path) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(game)?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// The session holds the game and handles the commands sent by the players,
/// including I/O.
pub struct Session<'a, R: BufRead, W: Write> {
    game: Game,
    perspective: Option<Color>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session for the given game with provided I/O. The board is
    /// shown from the side to move.
    #[must_use]
    pub fn new(game: Game, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game,
            perspective: None,
            input,
            output,
        }
    }

    /// Fixes the orientation of the board. `None` shows the board from the
    /// side to move.
    #[must_use]
    pub fn with_perspective(mut self, perspective: Option<Color>) -> Self {
        self.perspective = perspective;
        self
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Continuously reads the input stream and executes commands until `quit`
    /// is sent or the input ends.
    ///
    /// # Errors
    ///
    /// If reading the input or writing the output fails. Errors of individual
    /// commands are reported to the output and don't stop the loop.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "error: {e:#}")?;
                    continue;
                },
            };
            debug!("received {command:?}");
            match command {
                Command::Board => self.handle_board(&[])?,
                Command::Moves(position) => self.handle_moves(position)?,
                Command::Move(next_move) => self.handle_move(&next_move)?,
                Command::Status => self.handle_status()?,
                Command::Resign(color) => self.handle_resign(color)?,
                Command::NewGame => {
                    self.game = Game::new();
                    writeln!(self.output, "Started a new game")?;
                    self.handle_board(&[])?;
                },
                Command::Save(path) => match save(&self.game, &path) {
                    Ok(()) => writeln!(self.output, "Saved the game to {}", path.display())?,
                    Err(e) => writeln!(self.output, "error: {e:#}")?,
                },
                Command::Json => {
                    writeln!(self.output, "{}", serde_json::to_string(&self.game)?)?;
                },
                Command::Help => writeln!(self.output, "{HELP}")?,
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "error: unknown command: {command}")?;
                },
            }
        }
        Ok(())
    }

    fn perspective(&self) -> Color {
        self.perspective.unwrap_or_else(|| self.game.turn())
    }

    fn handle_board(&mut self, highlights: &[Move]) -> anyhow::Result<()> {
        let view = BoardView::new(self.game.board(), self.perspective(), highlights);
        write!(self.output, "{view}")?;
        writeln!(self.output, "{} to move", self.game.turn())?;
        Ok(())
    }

    fn handle_moves(&mut self, position: Position) -> anyhow::Result<()> {
        let Some(moves) = self.game.legal_moves(position) else {
            writeln!(self.output, "error: there is no piece on {position}")?;
            return Ok(());
        };
        self.handle_board(&moves)?;
        if moves.is_empty() {
            writeln!(self.output, "No legal moves from {position}")?;
        } else {
            writeln!(
                self.output,
                "Legal moves: {}",
                moves.iter().map(Move::to_string).sorted().join(" ")
            )?;
        }
        Ok(())
    }

    /// Applies the move and reports the state of the game for the opponent.
    fn handle_move(&mut self, next_move: &Move) -> anyhow::Result<()> {
        let mover = self.game.turn();
        if let Err(e) = self.game.make_move(next_move) {
            writeln!(self.output, "error: {}", e.reason)?;
            return Ok(());
        }
        writeln!(
            self.output,
            "{mover} moved {} to {}",
            next_move.source(),
            next_move.destination()
        )?;
        match self.game.adjudicate() {
            status @ (GameStatus::Check(_) | GameStatus::Checkmate(_) | GameStatus::Stalemate(_)) => {
                writeln!(self.output, "{status}")?;
            },
            GameStatus::Ongoing | GameStatus::Over => {},
        }
        self.handle_board(&[])
    }

    fn handle_status(&mut self) -> anyhow::Result<()> {
        let status = self.game.status();
        match status {
            GameStatus::Ongoing => writeln!(self.output, "{} to move", self.game.turn())?,
            GameStatus::Check(_) => {
                writeln!(self.output, "{} to move", self.game.turn())?;
                writeln!(self.output, "{status}")?;
            },
            GameStatus::Checkmate(_) | GameStatus::Stalemate(_) => {
                writeln!(self.output, "{status}")?;
            },
            GameStatus::Over => writeln!(self.output, "The game is over")?,
        }
        Ok(())
    }

    fn handle_resign(&mut self, color: Option<Color>) -> anyhow::Result<()> {
        let color = color.unwrap_or_else(|| self.game.turn());
        match self.game.resign(color) {
            Ok(()) => writeln!(
                self.output,
                "{color} resigned. {} wins!",
                color.opponent()
            )?,
            Err(e) => writeln!(self.output, "error: {e:#}")?,
        }
        Ok(())
    }
}
