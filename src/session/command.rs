//! Commands accepted by the [`super::Session`] loop, one per line.

use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::chess::core::{Color, Move, Position, Promotion};

#[derive(Debug, PartialEq)]
pub(super) enum Command {
    Board,
    Moves(Position),
    Move(Move),
    Status,
    Resign(Option<Color>),
    NewGame,
    Save(PathBuf),
    Json,
    Help,
    Quit,
    Unknown(String),
}

/// Accepts both UCI notation (`e7e8q`) and separate squares followed by an
/// optional promotion piece (`e7 e8 q`).
fn parse_move(arguments: &[&str]) -> anyhow::Result<Command> {
    let next_move = match arguments {
        [uci] => Move::from_uci(uci)?,
        [from, to] => Move::new(Position::try_from(*from)?, Position::try_from(*to)?, None),
        [from, to, promotion] => {
            let mut symbols = promotion.chars();
            let promotion = match (symbols.next(), symbols.next()) {
                (Some(symbol), None) => Promotion::try_from(symbol)?,
                _ => bail!("promotion should be a single piece symbol, got '{promotion}'"),
            };
            Move::new(
                Position::try_from(*from)?,
                Position::try_from(*to)?,
                Some(promotion),
            )
        },
        _ => bail!("expected `move <from><to>[promotion]` or `move <from> <to> [promotion]`"),
    };
    Ok(Command::Move(next_move))
}

fn parse_square(arguments: &[&str]) -> anyhow::Result<Command> {
    match arguments {
        [square] => Ok(Command::Moves(
            Position::try_from(*square).with_context(|| format!("invalid square '{square}'"))?,
        )),
        _ => bail!("expected `moves <square>`"),
    }
}

fn parse_resign(arguments: &[&str]) -> anyhow::Result<Command> {
    match arguments {
        [] => Ok(Command::Resign(None)),
        [color] => Ok(Command::Resign(Some(Color::try_from(*color)?))),
        _ => bail!("expected `resign [white|black]`"),
    }
}

impl Command {
    /// Parses a line of input. Unknown commands are returned as
    /// [`Command::Unknown`], malformed arguments of known commands are
    /// errors.
    pub(super) fn parse(input: &str) -> anyhow::Result<Self> {
        let parts: Vec<&str> = input.split_whitespace().collect();

        let Some((command, arguments)) = parts.split_first() else {
            return Ok(Self::Unknown(input.to_string()));
        };

        match *command {
            "board" | "d" => Ok(Self::Board),
            "moves" => parse_square(arguments),
            "move" => parse_move(arguments),
            "status" => Ok(Self::Status),
            "resign" => parse_resign(arguments),
            "new" => Ok(Self::NewGame),
            "save" => match arguments {
                [path] => Ok(Self::Save(PathBuf::from(path))),
                _ => bail!("expected `save <file>`"),
            },
            "json" => Ok(Self::Json),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Ok(Self::Unknown(input.trim().to_string())),
        }
    }
}
