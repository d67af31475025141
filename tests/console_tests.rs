//! Console Protocol Tests
//!
//! These tests drive the line protocol through an in-memory writer.

use chess_rules::{Color, Console, Game, MoveRecord};

fn run(console: &mut Console, line: &str) -> String {
    let mut out = Vec::new();
    let keep_going = console.handle_line(line, &mut out).unwrap();
    assert!(keep_going, "'{line}' stopped the console");
    String::from_utf8(out).unwrap()
}

fn console() -> Console {
    Console::new(Game::default())
}

// ============================================================================
// Selection and Moves
// ============================================================================

#[test]
fn test_select_lists_destinations() {
    let mut console = console();
    assert_eq!(run(&mut console, "select e2"), "available: e3 e4\n");
    assert_eq!(run(&mut console, "move e4"), "ok e2e4 | black to move\n");
    assert_eq!(console.game.state().turn(), Color::Black);
}

#[test]
fn test_errors_are_reported() {
    let mut console = console();
    assert!(run(&mut console, "select e7").starts_with("error: "));
    assert!(run(&mut console, "move e4").starts_with("error: "));
    assert!(run(&mut console, "select z9").starts_with("usage: "));
    assert!(run(&mut console, "play e2").starts_with("usage: "));
    assert!(run(&mut console, "frobnicate").starts_with("unknown command"));
    assert_eq!(console.game.state().undo_stack().len(), 0);
}

#[test]
fn test_play_and_checkmate() {
    let mut console = console();
    run(&mut console, "play f2f3");
    run(&mut console, "play e7e5");
    run(&mut console, "play g2g4");
    assert_eq!(run(&mut console, "play d8h4"), "ok d8h4 | checkmate, black wins\n");
}

#[test]
fn test_promotion_flow() {
    let mut console = console();
    run(&mut console, "position 4k3/P7/8/8/8/8/8/4K3 w");
    assert_eq!(run(&mut console, "play a7a8"), "ok a7a8 | promotion pending on a8\n");
    assert!(run(&mut console, "select e1").starts_with("error: "));
    assert!(run(&mut console, "promote k").starts_with("error: "));
    assert_eq!(run(&mut console, "promote q"), "ok a7a8q | black to move, in check\n");
    assert!(run(&mut console, "promote q").starts_with("error: "));
}

#[test]
fn test_play_with_promotion_suffix() {
    let mut console = console();
    run(&mut console, "position 4k3/P7/8/8/8/8/8/4K3 w");
    assert_eq!(run(&mut console, "play a7a8n"), "ok a7a8n | black to move\n");
}

#[test]
fn test_promotion_suffix_on_ordinary_move() {
    let mut console = console();
    assert!(run(&mut console, "play e2e4q").starts_with("error: "));
    assert_eq!(console.game.state().turn(), Color::White);
    assert_eq!(console.game.state().undo_stack().len(), 0);
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_undo_redo() {
    let mut console = console();
    run(&mut console, "play e2e4");
    assert_eq!(run(&mut console, "undo"), "ok e2e4 | white to move\n");
    assert!(run(&mut console, "undo").starts_with("error: "));
    assert_eq!(run(&mut console, "redo"), "ok e2e4 | black to move\n");
}

#[test]
fn test_history_and_remote() {
    let mut sender = console();
    run(&mut sender, "play e2e4");
    run(&mut sender, "play e7e5");
    let history = run(&mut sender, "history");
    let groups: serde_json::Value = serde_json::from_str(history.trim()).unwrap();
    assert_eq!(groups.as_array().map(Vec::len), Some(2));

    let mut receiver = console();
    for group in groups.as_array().unwrap() {
        let records: Vec<MoveRecord> = serde_json::from_value(group["records"].clone()).unwrap();
        let line = format!("remote {}", serde_json::to_string(&records).unwrap());
        assert!(run(&mut receiver, &line).starts_with("ok "));
    }
    assert_eq!(receiver.game.state().position(), sender.game.state().position());
    assert!(run(&mut receiver, "remote not-json").starts_with("error: "));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_position_and_fen() {
    let mut console = console();
    assert_eq!(run(&mut console, "position 4k3/8/8/8/8/8/8/4K3 b"), "ok\n");
    assert_eq!(run(&mut console, "fen"), "4k3/8/8/8/8/8/8/4K3 b\n");
    assert!(run(&mut console, "position 8/8/8").starts_with("error: "));
    assert_eq!(run(&mut console, "fen"), "4k3/8/8/8/8/8/8/4K3 b\n");
    assert_eq!(run(&mut console, "position startpos"), "ok\n");
    assert_eq!(
        run(&mut console, "fen"),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w\n"
    );
}

#[test]
fn test_moves_listing() {
    let mut console = console();
    let listing = run(&mut console, "moves");
    assert_eq!(listing.lines().count(), 10);
    assert!(listing.lines().any(|l| l == "b1: a3 c3"));
}

#[test]
fn test_perft_command() {
    let mut console = console();
    assert!(run(&mut console, "perft 2").starts_with("Nodes: 400 "));
}

#[test]
fn test_perft_depth_limit() {
    let mut console = console();
    assert_eq!(run(&mut console, "perft 12"), "error: perft depth is limited to 6\n");
}

#[test]
fn test_display() {
    let mut console = console();
    let board = run(&mut console, "d");
    assert!(board.contains("a b c d e f g h"));
    assert!(board.contains("FEN: rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"));
    assert!(board.contains("white to move"));
}

#[test]
fn test_quit() {
    let mut console = console();
    let mut out = Vec::new();
    assert!(!console.handle_line("quit", &mut out).unwrap());
}
