//! Implementation of chess rules: board, pieces and their movement, legality
//! checks and the game state machine.

pub mod board;
pub mod core;
pub mod game;
pub mod movegen;
