//! Attack detection
//!
//! Answers "is this square attacked by the opponent?" by looking outward from
//! the target: ray walks for sliding pieces and fixed offsets for kings, pawns
//! and knights. Stops at the first attacker found.

use crate::core::coord::Coord;
use crate::core::piece::{Color, PieceKind};
use crate::core::position::Position;

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// True if `target` is attacked by the side opposing its defender
///
/// The defender is the occupant's color when the square is occupied, otherwise
/// the side to move.
pub fn is_attacked(position: &Position, target: Coord) -> bool {
    let defender = position
        .grid()
        .occupant(target)
        .map(|p| p.color)
        .unwrap_or(position.turn());
    is_attacked_by(position, target, defender.opposite())
}

/// True if any piece of `attacker` attacks `target`
pub fn is_attacked_by(position: &Position, target: Coord, attacker: Color) -> bool {
    let grid = position.grid();
    let hits = |c: Coord, kinds: &[PieceKind]| {
        grid.occupant(c)
            .is_some_and(|p| p.color == attacker && kinds.contains(&p.kind))
    };

    // Sliding pieces: first occupied square along each ray
    let families: [(&[(i8, i8); 4], &[PieceKind]); 2] = [
        (&DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen]),
        (&ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen]),
    ];
    for (directions, kinds) in families {
        for &(df, dr) in directions {
            let mut cursor = target.offset(df, dr);
            while let Some(c) = cursor {
                if !grid.is_empty(c) {
                    if hits(c, kinds) {
                        return true;
                    }
                    break;
                }
                cursor = c.offset(df, dr);
            }
        }
    }

    if KING_STEPS
        .iter()
        .filter_map(|&(df, dr)| target.offset(df, dr))
        .any(|c| hits(c, &[PieceKind::King]))
    {
        return true;
    }

    // An attacking pawn sits one rank behind the target in its own direction
    let back = -attacker.forward();
    if [(-1, back), (1, back)]
        .iter()
        .filter_map(|&(df, dr)| target.offset(df, dr))
        .any(|c| hits(c, &[PieceKind::Pawn]))
    {
        return true;
    }

    KNIGHT_JUMPS
        .iter()
        .filter_map(|&(df, dr)| target.offset(df, dr))
        .any(|c| hits(c, &[PieceKind::Knight]))
}

/// True if the side to move has its king attacked
pub fn is_in_check(position: &Position) -> bool {
    position
        .king_square(position.turn())
        .is_some_and(|king| is_attacked(position, king))
}
