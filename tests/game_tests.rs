//! Game Controller Tests
//!
//! Tests for configuration, one-call moves and the checkmate signal.

use chess_rules::core::STARTING_PLACEMENT;
use chess_rules::{Color, Coord, EngineError, Game, GameConfig, PieceKind};

fn sq(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap()
}

fn game_from(fen: &str) -> Game {
    Game::new(&GameConfig::from_fen(fen).unwrap()).unwrap()
}

#[test]
fn test_default_game() {
    let game = Game::new(&GameConfig::default()).unwrap();
    assert_eq!(game.state().turn(), Color::White);
    assert_eq!(game.legal_move_count(), 20);
    assert_eq!(game.winner(), None);
}

#[test]
fn test_black_moves_first() {
    let config = GameConfig {
        placement: STARTING_PLACEMENT.to_string(),
        first_to_move: Color::Black,
    };
    let mut game = Game::new(&config).unwrap();
    assert_eq!(
        game.play(sq("e2"), sq("e4"), None),
        Err(EngineError::IllegalSelection { square: sq("e2") })
    );
    game.play(sq("e7"), sq("e5"), None).unwrap();
    assert_eq!(game.state().turn(), Color::White);
}

#[test]
fn test_play_is_all_or_nothing() {
    let mut game = Game::default();
    game.state_mut().select_square(sq("g1")).unwrap();
    let before = game.state().clone();

    assert_eq!(
        game.play(sq("e2"), sq("e5"), None),
        Err(EngineError::IllegalDestination { square: sq("e5") })
    );
    assert_eq!(game.state(), &before);
}

#[test]
fn test_play_with_promotion() {
    let mut game = game_from("4k3/P7/8/8/8/8/8/4K3 w");
    let records = game.play(sq("a7"), sq("a8"), Some(PieceKind::Rook)).unwrap();
    assert_eq!(records[0].promoted_to(), Some(PieceKind::Rook));
    assert_eq!(game.state().turn(), Color::Black);
    assert!(game.is_in_check());
}

#[test]
fn test_play_without_promotion_leaves_it_pending() {
    let mut game = game_from("4k3/P7/8/8/8/8/8/4K3 w");
    game.play(sq("a7"), sq("a8"), None).unwrap();
    assert_eq!(game.state().promotion_pending(), Some(sq("a8")));
    assert_eq!(game.winner(), None);
}

#[test]
fn test_play_rejects_promotion_on_ordinary_move() {
    let mut game = Game::default();
    let before = game.state().clone();

    assert_eq!(
        game.play(sq("e2"), sq("e4"), Some(PieceKind::Queen)),
        Err(EngineError::IllegalPromotionRequest { square: sq("e4") })
    );
    assert_eq!(game.state(), &before);
    assert_eq!(game.state().undo_stack().len(), 0);
}

#[test]
fn test_fools_mate() {
    let mut game = Game::default();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.play(sq(from), sq(to), None).unwrap();
        if from != "d8" {
            assert_eq!(game.winner(), None);
        }
    }
    assert!(game.is_in_check());
    assert_eq!(game.legal_move_count(), 0);
    assert_eq!(game.winner(), Some(Color::Black));

    game.undo().unwrap();
    assert_eq!(game.winner(), None);
    game.redo().unwrap();
    assert_eq!(game.winner(), Some(Color::Black));
}

#[test]
fn test_stalemate_has_no_winner() {
    let game = game_from("7k/5Q2/6K1/8/8/8/8/8 b");
    assert!(!game.is_in_check());
    assert_eq!(game.legal_move_count(), 0);
    assert_eq!(game.winner(), None);
}

#[test]
fn test_remote_replay_between_games() {
    let mut white = Game::default();
    let mut black = Game::default();
    let records = white.play(sq("d2"), sq("d4"), None).unwrap();
    black.apply_remote(&records).unwrap();
    let records = black.play(sq("d7"), sq("d5"), None).unwrap();
    white.apply_remote(&records).unwrap();
    assert_eq!(white.state().position(), black.state().position());
}
