//! The state of a single match: the board, the side to move and whether the
//! game has ended. [`Game`] filters pseudo-legal moves down to legal ones,
//! applies moves and detects check, checkmate and stalemate.
//!
//! Legality is established by simulation: each candidate move is applied to a
//! copy of the board and rejected if it leaves the mover's king attacked. The
//! authoritative board is never touched by a query.

use std::fmt;

use anyhow::bail;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::chess::board::Board;
use crate::chess::core::{Color, Move, Piece, Position};

/// Reason for rejecting a move in [`Game::make_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[allow(missing_docs)]
    #[error("the game is already over")]
    GameOver,
    #[allow(missing_docs)]
    #[error("there is no piece on {0}")]
    EmptySquare(Position),
    /// The piece belongs to the player who is not allowed to move now.
    #[error("it is {turn}'s turn")]
    OutOfTurn {
        #[allow(missing_docs)]
        turn: Color,
    },
    /// The move breaks movement rules or leaves the king in check.
    #[error("the move is not legal in this position")]
    NotLegal,
}

/// An attempt to make a move that the rules do not allow. The game is left
/// exactly as it was before the attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("illegal move {attempted}: {reason}")]
pub struct IllegalMove {
    #[allow(missing_docs)]
    pub attempted: Move,
    #[allow(missing_docs)]
    pub reason: Rejection,
}

/// State of the game from the point of view of the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has legal moves and is not in check.
    Ongoing,
    /// The king of this color is attacked but can escape.
    Check(Color),
    /// The king of this color is attacked and there are no legal moves.
    Checkmate(Color),
    /// This color is not in check but has no legal moves: draw.
    Stalemate(Color),
    /// The game was ended without a decision on the board (e.g. resignation).
    Over,
}

impl GameStatus {
    /// Returns true if no more moves can be made.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Checkmate(_) | Self::Stalemate(_) | Self::Over)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Check(color) => write!(f, "{color} is now in check!"),
            Self::Checkmate(color) => write!(f, "{color} is in checkmate!"),
            Self::Stalemate(_) => write!(f, "The game is now in stalemate. It's a tie!"),
            Self::Over => write!(f, "the game is over"),
        }
    }
}

/// A chess match between two players.
///
/// ```
/// use chesslink::chess::core::{Color, Move};
/// use chesslink::chess::game::Game;
///
/// let mut game = Game::new();
/// game.make_move(&Move::from_uci("e2e4").unwrap()).unwrap();
/// assert_eq!(game.turn(), Color::Black);
/// // White can't move twice in a row.
/// assert!(game.make_move(&Move::from_uci("d2d4").unwrap()).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    over: bool,
}

impl Game {
    /// Starts a game from the standard position with White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_board(Board::starting(), Color::White)
    }

    /// Creates an ongoing game from an arbitrary board.
    #[must_use]
    pub const fn with_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            over: false,
        }
    }

    /// Sets up a game from [Forsyth-Edwards Notation]. Castling and en
    /// passant are not supported, so these fields have to be `-`. Halfmove
    /// clock and fullmove counter are optional and ignored.
    ///
    /// # Errors
    ///
    /// If the input is not a valid FEN or uses unsupported rules.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split_ascii_whitespace();
        let board = match parts.next() {
            Some(placement) => Board::from_placement(placement)?,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let turn = match parts.next() {
            Some(value) => Color::try_from(value)?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        for field in ["castling rights", "en passant square"] {
            match parts.next() {
                Some("-") | None => (),
                Some(value) => bail!("{field} are not supported, got {value}"),
            }
        }
        for value in parts.by_ref().take(2) {
            if !value.bytes().all(|c| c.is_ascii_digit()) {
                bail!("move counters can not contain anything other than digits, got {value}");
            }
        }
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        Ok(Self::with_board(board, turn))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the board. The turn and the game over flag stay the same.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// The color that is allowed to make the next move.
    #[must_use]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[allow(missing_docs)]
    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over
    }

    /// Marks the game as finished (or resumes it). No moves are accepted once
    /// the game is over.
    pub fn set_over(&mut self, over: bool) {
        self.over = over;
    }

    /// Ends the game because `color` resigned.
    ///
    /// # Errors
    ///
    /// If the game is already over.
    pub fn resign(&mut self, color: Color) -> anyhow::Result<()> {
        if self.over {
            bail!("{color} can not resign: the game is already over");
        }
        debug!("{color} resigned");
        self.over = true;
        Ok(())
    }

    /// Calculates the moves of the piece standing on `position` that do not
    /// leave its king in check. Returns `None` if the square is empty and
    /// an empty list if the piece can't move.
    ///
    /// Whose turn it is does not matter: this is also used to show the moves
    /// of the opponent's pieces.
    #[must_use]
    pub fn legal_moves(&self, position: Position) -> Option<Vec<Move>> {
        let piece = self.board.get(position)?;
        let moves = legal_moves(&self.board, piece, position);
        trace!("{piece} on {position} has {} legal moves", moves.len());
        Some(moves)
    }

    /// All legal moves of the given color.
    #[must_use]
    pub fn all_legal_moves(&self, color: Color) -> Vec<Move> {
        self.board
            .pieces_of(color)
            .flat_map(|(position, piece)| legal_moves(&self.board, piece, position))
            .collect()
    }

    /// Checks whether the king of `color` is attacked by any opponent piece.
    /// If there is no such king on the board, it is not in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check(&self.board, color)
    }

    /// The king of `color` is attacked and there is no move to save it.
    #[must_use]
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// `color` is not in check but has no legal moves.
    ///
    /// A color without any pieces on the board is not considered to be in
    /// stalemate: such a position can't come up in a real game.
    #[must_use]
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        self.board.pieces_of(color).next().is_some()
            && !self.is_in_check(color)
            && !self.has_legal_moves(color)
    }

    fn has_legal_moves(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(position, piece)| !legal_moves(&self.board, piece, position).is_empty())
    }

    /// The state of the game for the side to move.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let color = self.turn;
        if self.is_in_checkmate(color) {
            GameStatus::Checkmate(color)
        } else if self.is_in_stalemate(color) {
            GameStatus::Stalemate(color)
        } else if self.over {
            GameStatus::Over
        } else if self.is_in_check(color) {
            GameStatus::Check(color)
        } else {
            GameStatus::Ongoing
        }
    }

    /// Computes [`Game::status`] and marks the game as over if it ended in
    /// checkmate or stalemate. Meant to be called after every accepted move.
    pub fn adjudicate(&mut self) -> GameStatus {
        let status = self.status();
        if matches!(status, GameStatus::Checkmate(_) | GameStatus::Stalemate(_)) {
            debug!("game finished: {status}");
            self.over = true;
        }
        status
    }

    /// Applies the move and passes the turn to the opponent.
    ///
    /// # Errors
    ///
    /// If the game is over, there is no piece to move, the piece belongs to
    /// the player who is not to move or the move is not legal. Rejected moves
    /// don't change the game.
    pub fn make_move(&mut self, next_move: &Move) -> Result<(), IllegalMove> {
        let piece = self.check_move(next_move).map_err(|reason| {
            debug!("rejected {next_move}: {reason}");
            IllegalMove {
                attempted: *next_move,
                reason,
            }
        })?;
        let piece = match next_move.promotion() {
            Some(promotion) => Piece::new(piece.color, promotion.into()),
            None => piece,
        };
        self.board.set(next_move.destination(), Some(piece));
        self.board.set(next_move.source(), None);
        self.turn = self.turn.opponent();
        Ok(())
    }

    fn check_move(&self, next_move: &Move) -> Result<Piece, Rejection> {
        if self.over {
            return Err(Rejection::GameOver);
        }
        let source = next_move.source();
        let piece = self
            .board
            .get(source)
            .ok_or(Rejection::EmptySquare(source))?;
        if piece.color != self.turn {
            return Err(Rejection::OutOfTurn { turn: self.turn });
        }
        if !legal_moves(&self.board, piece, source).contains(next_move) {
            return Err(Rejection::NotLegal);
        }
        Ok(piece)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Pseudo-legal moves of the piece that don't expose its own king.
fn legal_moves(board: &Board, piece: Piece, from: Position) -> Vec<Move> {
    piece
        .moves(board, from)
        .into_iter()
        .filter(|candidate| {
            // The kind of the promoted piece doesn't change whether the king
            // is attacked after the move, so the pawn is moved as is.
            let mut hypothetical = board.copy();
            hypothetical.set(candidate.destination(), Some(piece));
            hypothetical.set(candidate.source(), None);
            !in_check(&hypothetical, piece.color)
        })
        .collect()
}

fn in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        return false;
    };
    board.pieces_of(color.opponent()).any(|(position, piece)| {
        piece
            .moves(board, position)
            .iter()
            .any(|attack| attack.destination() == king)
    })
}
