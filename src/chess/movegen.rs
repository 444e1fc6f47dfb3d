//! Pseudo-legal move generation: moves that follow the movement and capture
//! rules of each piece but may leave the mover's own king in check. Filtering
//! these down to legal moves is done by [`crate::chess::game::Game`].
//!
//! Each piece kind has its own rule and [`Piece::moves`] dispatches on the
//! kind. Castling and en passant are not supported.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Color, Move, Piece, PieceKind, Position, Promotion};

/// Upper bound on the number of pseudo-legal moves of a single piece: a queen
/// in the middle of an empty board has 27.
pub const MAX_PIECE_MOVES: usize = 32;

/// Moves of a single piece, stored on the stack.
pub type MoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

type Offsets = [(i8, i8)];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const ADJACENT: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

impl Piece {
    /// Calculates all the squares this piece standing on `from` can move to
    /// according to its movement rules, without taking the safety of its
    /// king into account.
    #[must_use]
    pub fn moves(self, board: &Board, from: Position) -> MoveList {
        let mut moves = MoveList::new();
        match self.kind {
            PieceKind::King => leap(&mut moves, board, from, self.color, &ADJACENT),
            PieceKind::Queen => {
                slide(&mut moves, board, from, self.color, &DIAGONALS);
                slide(&mut moves, board, from, self.color, &ORTHOGONALS);
            },
            PieceKind::Rook => slide(&mut moves, board, from, self.color, &ORTHOGONALS),
            PieceKind::Bishop => slide(&mut moves, board, from, self.color, &DIAGONALS),
            PieceKind::Knight => leap(&mut moves, board, from, self.color, &KNIGHT_JUMPS),
            PieceKind::Pawn => pawn(&mut moves, board, from, self.color),
        }
        moves
    }
}

fn can_land(board: &Board, to: Position, color: Color) -> bool {
    board.get(to).map_or(true, |piece| piece.color != color)
}

/// Walks each ray until it hits the edge of the board or a piece. Opponent
/// pieces can be captured, own pieces block the ray.
fn slide(moves: &mut MoveList, board: &Board, from: Position, color: Color, rays: &Offsets) {
    for &(ranks, files) in rays {
        let mut current = from;
        while let Some(to) = current.offset(ranks, files) {
            match board.get(to) {
                None => moves.push(Move::new(from, to, None)),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(Move::new(from, to, None));
                    }
                    break;
                },
            }
            current = to;
        }
    }
}

/// Single step to each of the offsets: king and knight.
fn leap(moves: &mut MoveList, board: &Board, from: Position, color: Color, offsets: &Offsets) {
    for &(ranks, files) in offsets {
        if let Some(to) = from.offset(ranks, files) {
            if can_land(board, to, color) {
                moves.push(Move::new(from, to, None));
            }
        }
    }
}

fn pawn(moves: &mut MoveList, board: &Board, from: Position, color: Color) {
    let direction = color.pawn_direction();
    if let Some(single) = from.offset(direction, 0) {
        if board.get(single).is_none() {
            push_pawn_move(moves, from, single, color);
            if from.rank() == color.pawns_starting_rank() {
                if let Some(double) = single.offset(direction, 0) {
                    if board.get(double).is_none() {
                        moves.push(Move::new(from, double, None));
                    }
                }
            }
        }
    }
    for files in [-1, 1] {
        if let Some(to) = from.offset(direction, files) {
            if board.get(to).is_some_and(|piece| piece.color != color) {
                push_pawn_move(moves, from, to, color);
            }
        }
    }
}

/// Reaching the last rank expands into one move per promotion option.
fn push_pawn_move(moves: &mut MoveList, from: Position, to: Position, color: Color) {
    if to.rank() == color.promotion_rank() {
        for promotion in Promotion::ALL {
            moves.push(Move::new(from, to, Some(promotion)));
        }
    } else {
        moves.push(Move::new(from, to, None));
    }
}
