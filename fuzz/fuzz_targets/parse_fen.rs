#![no_main]
use chesslink::chess::board::Board;
use chesslink::chess::game::Game;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(game) = Game::from_fen(input) else {
        return;
    };
    // Printing the placement back and parsing it again gives the same board.
    let placement = game.board().to_string();
    assert_eq!(Board::from_placement(&placement).unwrap(), *game.board());
});
