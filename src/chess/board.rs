//! Square-centric board representation: an array of 64 optional pieces.
//!
//! This is the simplest possible "mailbox" board. It is slower than bitboards
//! for attack calculation but makes copying, querying a square and reasoning
//! about correctness trivial, which is what the legality checker relies on:
//! every candidate move is tried on a throwaway copy of the board.

use std::fmt::{self, Write};

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::chess::core::{Color, Piece, PieceKind, Position, BOARD_SIZE, BOARD_WIDTH};

/// Mapping from every square to an optional piece. There can be at most one
/// piece per square: placing a piece on an occupied square replaces it.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Placement>", try_from = "Vec<Placement>")]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Creates a board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Creates a board with the standard starting arrangement of 32 pieces.
    ///
    /// ```
    /// use chesslink::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        board.initialize_standard();
        board
    }

    /// Clears the board and puts every piece on its starting square.
    pub fn initialize_standard(&mut self) {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        *self = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in (1..=BOARD_WIDTH).zip(BACKRANK) {
                self.put(color.backrank(), file, Piece::new(color, kind));
                self.put(
                    color.pawns_starting_rank(),
                    file,
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
    }

    // Coordinates here come from compile-time constants and are always valid.
    fn put(&mut self, rank: u8, file: u8, piece: Piece) {
        if let Ok(position) = Position::new(rank, file) {
            self.set(position, Some(piece));
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.index()]
    }

    /// Puts the piece on given square, replacing whatever was there. `None`
    /// clears the square.
    pub fn set(&mut self, position: Position, piece: Option<Piece>) {
        self.squares[position.index()] = piece;
    }

    /// Returns an independent snapshot of the board: changes to the copy are
    /// not visible in the original and vice versa.
    #[must_use]
    pub const fn copy(&self) -> Self {
        *self
    }

    /// Iterates over occupied squares, from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|position| self.get(position).map(|piece| (position, piece)))
    }

    /// Iterates over the squares occupied by pieces of given color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of given color. Boards that come from real games have
    /// exactly one; if there is none, `None` is returned and if there are
    /// several, the first one from a1 is.
    #[must_use]
    pub fn king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
            .map(|(position, _)| position)
    }

    /// Parses the piece placement part of [Forsyth-Edwards Notation], e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`. Ranks are listed from
    /// the 8th to the 1st.
    ///
    /// # Errors
    ///
    /// If there are not exactly 8 ranks of exactly 8 squares each or an
    /// unknown piece symbol is used.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let mut rank_id = BOARD_WIDTH + 1;
        for rank_fen in placement.split('/') {
            if rank_id == 1 {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            }
            rank_id -= 1;
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} is longer than {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                file += 1;
                result.set(Position::new(rank_id, file)?, Some(Piece::try_from(symbol)?));
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of \
                     length {file}"
                );
            }
        }
        if rank_id != 1 {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        Ok(result)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=BOARD_WIDTH).rev() {
            let mut empty_squares = 0i32;
            for file in 1..=BOARD_WIDTH {
                let piece = Position::new(rank, file)
                    .ok()
                    .and_then(|position| self.get(position));
                if let Some(piece) = piece {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != 1 {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=BOARD_WIDTH).rev() {
            for file in 1..=BOARD_WIDTH {
                match Position::new(rank, file).ok().and_then(|p| self.get(p)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != BOARD_WIDTH {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != 1 {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

/// Serialized form of a single occupied square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[allow(missing_docs)]
    pub position: Position,
    #[allow(missing_docs)]
    pub piece: Piece,
}

impl From<Board> for Vec<Placement> {
    fn from(board: Board) -> Self {
        board
            .pieces()
            .map(|(position, piece)| Placement { position, piece })
            .collect()
    }
}

impl TryFrom<Vec<Placement>> for Board {
    type Error = anyhow::Error;

    fn try_from(placements: Vec<Placement>) -> anyhow::Result<Self> {
        let mut board = Self::empty();
        for Placement { position, piece } in placements {
            if let Some(existing) = board.get(position) {
                bail!("square {position} is listed twice: {existing} and {piece}");
            }
            board.set(position, Some(piece));
        }
        Ok(board)
    }
}
