//! Text rendering of the board for the terminal.

use std::fmt;

use crate::chess::board::Board;
use crate::chess::core::{Color, Move, Position, BOARD_WIDTH};

/// Board diagram with coordinates seen from one side. Destinations of the
/// highlighted moves are marked with `*` (quiet move) or `x` (capture).
pub(super) struct BoardView<'a> {
    board: &'a Board,
    perspective: Color,
    highlights: &'a [Move],
}

impl<'a> BoardView<'a> {
    pub(super) const fn new(board: &'a Board, perspective: Color, highlights: &'a [Move]) -> Self {
        Self {
            board,
            perspective,
            highlights,
        }
    }

    fn is_highlighted(&self, position: Position) -> bool {
        self.highlights
            .iter()
            .any(|highlight| highlight.destination() == position)
    }

    fn ranks(&self) -> Vec<u8> {
        match self.perspective {
            Color::White => (1..=BOARD_WIDTH).rev().collect(),
            Color::Black => (1..=BOARD_WIDTH).collect(),
        }
    }

    fn files(&self) -> Vec<u8> {
        match self.perspective {
            Color::White => (1..=BOARD_WIDTH).collect(),
            Color::Black => (1..=BOARD_WIDTH).rev().collect(),
        }
    }

    fn write_file_labels(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for file in self.files() {
            write!(f, " {}", char::from(b'a' + file - 1))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_file_labels(f)?;
        for rank in self.ranks() {
            write!(f, "{rank}")?;
            for file in self.files() {
                let Ok(position) = Position::new(rank, file) else {
                    continue;
                };
                match (self.board.get(position), self.is_highlighted(position)) {
                    (Some(_), true) => write!(f, " x")?,
                    (None, true) => write!(f, " *")?,
                    (Some(piece), false) => write!(f, " {piece}")?,
                    (None, false) => write!(f, " .")?,
                }
            }
            writeln!(f, " {rank}")?;
        }
        self.write_file_labels(f)
    }
}
