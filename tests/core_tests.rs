//! Core Module Tests
//!
//! Tests for coordinates, square sets, pieces, the grid and placement loading.

use chess_rules::FenError;
use chess_rules::core::{
    Capture, Color, Coord, Effect, Grid, MoveRecord, PieceId, PieceKind, Position, SquareSet,
    STARTING_PLACEMENT,
};
use std::collections::HashSet;

fn sq(s: &str) -> Coord {
    Coord::from_algebraic(s).unwrap()
}

// ============================================================================
// Coordinate Tests
// ============================================================================

#[test]
fn test_coord_bounds() {
    assert!(Coord::new(1, 1).is_some());
    assert!(Coord::new(8, 8).is_some());
    assert!(Coord::new(0, 4).is_none());
    assert!(Coord::new(4, 9).is_none());
}

#[test]
fn test_coord_algebraic() {
    let e4 = sq("e4");
    assert_eq!(e4.file(), 5);
    assert_eq!(e4.rank(), 4);
    assert_eq!(e4.to_string(), "e4");
    assert_eq!(Coord::from_algebraic("E4"), Some(e4));
    assert_eq!(Coord::from_algebraic("i1"), None);
    assert_eq!(Coord::from_algebraic("a0"), None);
    assert_eq!(Coord::from_algebraic("a10"), None);
    assert_eq!(Coord::from_algebraic(""), None);
}

#[test]
fn test_coord_offset_stays_on_board() {
    assert_eq!(sq("a1").offset(-1, 0), None);
    assert_eq!(sq("h8").offset(0, 1), None);
    assert_eq!(sq("g1").offset(-1, 2), Some(sq("f3")));
}

#[test]
fn test_coord_all_unique() {
    let all: HashSet<Coord> = Coord::all().collect();
    assert_eq!(all.len(), 64);
    for (i, c) in Coord::all().enumerate() {
        assert_eq!(c.index(), i);
    }
}

// ============================================================================
// Square Set Tests
// ============================================================================

#[test]
fn test_square_set_insert() {
    let mut set = SquareSet::EMPTY;
    assert!(set.is_empty());
    set.insert(sq("e3"));
    set.insert(sq("e4"));
    set.insert(sq("e4"));
    assert_eq!(set.len(), 2);
    assert!(set.contains(sq("e3")));
    assert!(!set.contains(sq("e5")));
}

#[test]
fn test_square_set_ops() {
    let a: SquareSet = [sq("a1"), sq("b2")].into_iter().collect();
    let b: SquareSet = [sq("b2"), sq("c3")].into_iter().collect();
    assert_eq!((a | b).len(), 3);
    assert_eq!(a | b, [sq("a1"), sq("b2"), sq("c3")].into_iter().collect());
}

#[test]
fn test_square_set_iterates_in_index_order() {
    let set: SquareSet = [sq("h8"), sq("a1"), sq("e4")].into_iter().collect();
    let order: Vec<Coord> = set.iter().collect();
    assert_eq!(order, vec![sq("a1"), sq("e4"), sq("h8")]);
}

// ============================================================================
// Piece Tests
// ============================================================================

#[test]
fn test_color_helpers() {
    assert_eq!(Color::White.opposite(), Color::Black);
    assert_eq!(!Color::Black, Color::White);
    assert_eq!(Color::White.forward(), 1);
    assert_eq!(Color::Black.forward(), -1);
    assert_eq!(Color::White.promotion_rank(), 8);
    assert_eq!(Color::Black.promotion_rank(), 1);
    assert_eq!(Color::Black.pawn_start_rank(), 7);
}

#[test]
fn test_promotion_targets() {
    assert_eq!(PieceKind::PROMOTIONS.len(), 4);
    assert!(PieceKind::PROMOTIONS.iter().all(|k| k.is_promotion_target()));
    assert!(!PieceKind::King.is_promotion_target());
    assert!(!PieceKind::Pawn.is_promotion_target());
}

// ============================================================================
// Placement Tests
// ============================================================================

#[test]
fn test_startpos_layout() {
    let grid = Grid::from_placement(STARTING_PLACEMENT).unwrap();
    assert_eq!(grid.occupied().count(), 32);
    let e1 = grid.occupant(sq("e1")).unwrap();
    assert_eq!((e1.kind, e1.color), (PieceKind::King, Color::White));
    let d8 = grid.occupant(sq("d8")).unwrap();
    assert_eq!((d8.kind, d8.color), (PieceKind::Queen, Color::Black));
    assert!(grid.occupied().all(|(_, p)| !p.has_moved));
    assert_eq!(grid.to_placement(), STARTING_PLACEMENT);
}

#[test]
fn test_piece_ids_follow_scan_order() {
    let grid = Grid::from_placement(STARTING_PLACEMENT).unwrap();
    assert_eq!(grid.occupant_id(sq("a8")), Some(PieceId(0)));
    assert_eq!(grid.occupant_id(sq("h1")), Some(PieceId(31)));
    assert_eq!(grid.locate(PieceId(0)), Some(sq("a8")));
}

#[test]
fn test_placement_errors() {
    assert_eq!(Grid::from_placement(""), Err(FenError::Empty));
    assert_eq!(Grid::from_placement("8/8/8"), Err(FenError::RankCount(3)));
    assert!(matches!(
        Grid::from_placement("rnbqkbnr/8p/8/8/8/8/PPPPPPPP/RNBQKBNR"),
        Err(FenError::RankOverflow { .. })
    ));
    assert!(matches!(
        Grid::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN"),
        Err(FenError::RankUnderflow { .. })
    ));
    assert_eq!(
        Grid::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX"),
        Err(FenError::UnknownSymbol('X'))
    );
    assert!(matches!(
        Grid::from_placement("8/8/8/8/8/8/8/4K3"),
        Err(FenError::KingCount { color: Color::Black, count: 0 })
    ));
}

#[test]
fn test_position_fen_side_to_move() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    assert_eq!(position.turn(), Color::Black);
    assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/8/4K3 b");

    let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
    assert_eq!(position.turn(), Color::White);

    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x"),
        Err(FenError::SideToMove(_))
    ));
}

#[test]
fn test_full_fen_extra_fields_ignored() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let position = Position::from_fen(fen).unwrap();
    assert_eq!(
        position.to_fen(),
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w"
    );
    assert_eq!(position.en_passant(), None);
}

// ============================================================================
// Grid Apply / Revert Tests
// ============================================================================

#[test]
fn test_apply_revert_capture_restores_identity() {
    let mut grid = Grid::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
    let before = grid.clone();
    let pawn = grid.occupant_id(sq("e4")).unwrap();
    let victim = grid.occupant_id(sq("d5")).unwrap();

    let mut record = MoveRecord::new(sq("e4"), sq("d5"));
    record.capture = Some(Capture { piece: victim, square: sq("d5") });
    record.effect = Some(Effect::ResetHasMoved(pawn));

    grid.apply(&record);
    assert_eq!(grid.occupant_id(sq("d5")), Some(pawn));
    assert!(grid.is_empty(sq("e4")));
    assert_eq!(grid.locate(victim), None);
    assert!(grid.piece(pawn).unwrap().has_moved);

    grid.revert(&record);
    assert_eq!(grid, before);
    assert_eq!(grid.occupant_id(sq("d5")), Some(victim));
}

#[test]
fn test_king_square() {
    let grid = Grid::from_placement(STARTING_PLACEMENT).unwrap();
    assert_eq!(grid.king_square(Color::White), Some(sq("e1")));
    assert_eq!(grid.king_square(Color::Black), Some(sq("e8")));
}
