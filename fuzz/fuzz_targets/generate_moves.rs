#![no_main]
use chesslink::chess::core::Move;
use chesslink::chess::game::Game;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use shakmaty::{CastlingMode, Chess, Position};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(game) = Game::from_fen(input) else {
        return;
    };
    let shakmaty_setup: shakmaty::fen::Fen = input
        .parse()
        .expect("when we parsed a valid position it should be accepted by shakmaty");
    // Positions shakmaty rejects (e.g. missing kings or the side not to move
    // being in check) are fine for us but can't be compared.
    let Ok(shakmaty_position) = shakmaty_setup.into_position::<Chess>(CastlingMode::Standard)
    else {
        return;
    };
    assert_eq!(
        game.all_legal_moves(game.turn())
            .iter()
            .map(Move::to_string)
            .sorted()
            .collect::<Vec<_>>(),
        shakmaty_position
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .sorted()
            .collect::<Vec<_>>()
    );
});
