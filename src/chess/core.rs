//! Chess primitives commonly used within [`crate::chess`]: colors, pieces,
//! board coordinates and moves.

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank offset of a single pawn push.
    pub(super) const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Rank from which pawns of this color can advance by two squares.
    pub(super) const fn pawns_starting_rank(self) -> u8 {
        match self {
            Self::White => 2,
            Self::Black => 7,
        }
    }

    /// Rank on which pawns of this color are promoted.
    pub(super) const fn promotion_rank(self) -> u8 {
        match self {
            Self::White => BOARD_WIDTH,
            Self::Black => 1,
        }
    }

    /// Rank holding the pieces of this color in the starting position.
    pub(super) const fn backrank(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => BOARD_WIDTH,
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("color should be 'w', 'b', 'white' or 'black', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// A pawn reaching the last rank is replaced with one of these pieces, chosen
/// by the player.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Every promotion option, in the order the move generator emits them.
    pub const ALL: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];
}

impl TryFrom<char> for Promotion {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_lowercase() {
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            _ => bail!("promotion should be one of 'q', 'r', 'b', 'n', got '{symbol}'"),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PieceKind::from(*self))
    }
}

/// Represents a specific piece owned by a player. Pieces have no identity:
/// two pieces of the same color and kind are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    #[allow(missing_docs)]
    pub color: Color,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses the piece from its [FEN] symbol: uppercase letters are white
    /// pieces, lowercase ones are black.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.color {
            Color::White => f.write_str(&symbol.to_ascii_uppercase()),
            Color::Black => f.write_str(&symbol),
        }
    }
}

/// A square on the board: rank (row) and file (column), both 1-based. The
/// only way to get a [`Position`] is through constructors that check the
/// bounds, so every value refers to a square on the board.
///
/// ```
/// use chesslink::chess::core::Position;
///
/// let square = Position::try_from("e2").unwrap();
/// assert_eq!(square.rank(), 2);
/// assert_eq!(square.file(), 5);
/// assert!(Position::new(9, 1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Coordinates")]
pub struct Position {
    rank: u8,
    file: u8,
}

impl Position {
    /// Creates a position from 1-based rank and file.
    ///
    /// # Errors
    ///
    /// If either coordinate is outside `1..=BOARD_WIDTH`.
    pub fn new(rank: u8, file: u8) -> anyhow::Result<Self> {
        if !(1..=BOARD_WIDTH).contains(&rank) {
            bail!("rank should be within 1..={BOARD_WIDTH}, got {rank}");
        }
        if !(1..=BOARD_WIDTH).contains(&file) {
            bail!("file should be within 1..={BOARD_WIDTH}, got {file}");
        }
        Ok(Self { rank, file })
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the square shifted by the given number of ranks and files or
    /// `None` if it would fall off the board.
    #[must_use]
    pub fn offset(self, ranks: i8, files: i8) -> Option<Self> {
        let on_board = |coordinate: Option<u8>| {
            coordinate.filter(|coordinate| (1..=BOARD_WIDTH).contains(coordinate))
        };
        let rank = on_board(self.rank.checked_add_signed(ranks))?;
        let file = on_board(self.file.checked_add_signed(files))?;
        Some(Self { rank, file })
    }

    /// Iterates over all squares: from a1 to h1, then a2 to h2 and so on up
    /// to h8.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=BOARD_WIDTH)
            .flat_map(|rank| (1..=BOARD_WIDTH).map(move |file| Self { rank, file }))
    }

    /// Index of the square in the `0..BOARD_SIZE` range, a1 being 0 and h8
    /// being 63.
    pub(super) const fn index(self) -> usize {
        ((self.rank - 1) * BOARD_WIDTH + (self.file - 1)) as usize
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        let file = match file {
            'a'..='h' => file as u8 - b'a' + 1,
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'0',
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Self::new(rank, file)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file - 1) as char, self.rank)
    }
}

/// Unchecked form of [`Position`] used for deserialization.
#[derive(Deserialize)]
struct Coordinates {
    rank: u8,
    file: u8,
}

impl TryFrom<Coordinates> for Position {
    type Error = anyhow::Error;

    fn try_from(coordinates: Coordinates) -> anyhow::Result<Self> {
        Self::new(coordinates.rank, coordinates.file)
    }
}

/// A request to move the piece standing on `source` to `destination`,
/// promoting it if the promotion is set. Creating a move does not check
/// whether it is legal: that is decided by [`crate::chess::game::Game`].
///
/// The text representation is [UCI] long algebraic notation, e.g. `e2e4` or
/// `e7e8q`.
///
/// [UCI]: https://www.chessprogramming.org/Algebraic_Chess_Notation#UCI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    source: Position,
    destination: Position,
    promotion: Option<Promotion>,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(source: Position, destination: Position, promotion: Option<Promotion>) -> Self {
        Self {
            source,
            destination,
            promotion,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn source(&self) -> Position {
        self.source
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn destination(&self) -> Position {
        self.destination
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Parses a move in UCI notation.
    ///
    /// # Errors
    ///
    /// If the input is not two squares optionally followed by a promotion
    /// symbol.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if !input.is_ascii() || !(4..=5).contains(&input.len()) {
            bail!("UCI move should be 4 or 5 ASCII characters, got '{input}'");
        }
        let promotion = match input[4..].chars().next() {
            Some(symbol) => Some(Promotion::try_from(symbol)?),
            None => None,
        };
        Ok(Self::new(
            Position::try_from(&input[..2])?,
            Position::try_from(&input[2..4])?,
            promotion,
        ))
    }
}

impl fmt::Display for Move {
    /// Serializes a move in [UCI format].
    ///
    /// [UCI format]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{promotion}")?;
        }
        Ok(())
    }
}
