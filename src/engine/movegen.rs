//! Move generation
//!
//! Per-piece destination generation:
//! - Pseudo-legal destinations follow each kind's movement rule
//! - Legal destinations additionally survive a simulated application with the
//!   mover's king left unattacked
//! - Castling checks the king's path through simulation

use super::attacks::{self, DIAGONALS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONALS};
use crate::core::coord::Coord;
use crate::core::moves::{Capture, Effect, MoveRecord, Promotion};
use crate::core::piece::{Color, Piece, PieceKind};
use crate::core::position::Position;
use crate::core::square_set::SquareSet;

/// Destinations allowed by the movement rule of the piece on `from`
///
/// Empty when `from` is empty. Does not look at whose turn it is.
pub fn pseudo_legal_moves(position: &Position, from: Coord) -> SquareSet {
    let Some(piece) = position.grid().occupant(from).copied() else {
        return SquareSet::EMPTY;
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, piece.color),
        PieceKind::Knight => step_moves(position, from, piece.color, &KNIGHT_JUMPS),
        PieceKind::Bishop => ray_moves(position, from, piece.color, &DIAGONALS),
        PieceKind::Rook => ray_moves(position, from, piece.color, &ORTHOGONALS),
        PieceKind::Queen => {
            ray_moves(position, from, piece.color, &DIAGONALS)
                | ray_moves(position, from, piece.color, &ORTHOGONALS)
        }
        PieceKind::King => {
            step_moves(position, from, piece.color, &KING_STEPS) | castling_moves(position, from, piece)
        }
    }
}

/// Pseudo-legal destinations that do not leave the mover's own king attacked
pub fn legal_moves(position: &Position, from: Coord) -> SquareSet {
    let Some(piece) = position.grid().occupant(from).copied() else {
        return SquareSet::EMPTY;
    };
    let candidates = pseudo_legal_moves(position, from);
    if candidates.is_empty() {
        return candidates;
    }

    let king = position.king_square(piece.color);
    let mut scratch = position.clone();
    candidates
        .iter()
        .filter(|&to| {
            let record = primary_record(position, from, to);
            let king = if piece.kind == PieceKind::King { Some(to) } else { king };
            scratch.simulate(&record, |p| match king {
                Some(king) => !attacks::is_attacked(p, king),
                None => true,
            })
        })
        .collect()
}

/// Legal destinations for every piece of `color`, keyed by origin
pub fn all_legal_moves(position: &Position, color: Color) -> Vec<(Coord, SquareSet)> {
    position
        .grid()
        .occupied()
        .filter(|(_, p)| p.color == color)
        .map(|(c, _)| (c, legal_moves(position, c)))
        .filter(|(_, moves)| !moves.is_empty())
        .collect()
}

/// The records moving the piece on `from` to `to` produces, in order
///
/// The first record relocates the mover (with any capture, including en
/// passant); castling adds a second record for the rook. A pawn arriving on its
/// last rank carries a pending promotion.
pub fn plan_move(position: &Position, from: Coord, to: Coord) -> Vec<MoveRecord> {
    let mut records = vec![primary_record(position, from, to)];
    if let Some(rook) = castling_rook_record(position, from, to) {
        records.push(rook);
    }
    records
}

fn primary_record(position: &Position, from: Coord, to: Coord) -> MoveRecord {
    let grid = position.grid();
    let mut record = MoveRecord::new(from, to);
    let Some(piece) = grid.occupant(from) else {
        return record;
    };

    if !piece.has_moved {
        record.effect = Some(Effect::ResetHasMoved(piece.id));
    }

    record.capture = grid.occupant_id(to).map(|id| Capture { piece: id, square: to });

    if piece.kind == PieceKind::Pawn {
        if let Some(ep) = position.en_passant() {
            if record.capture.is_none() && to == ep.capture_square && from.file() != to.file() {
                record.capture = grid
                    .occupant_id(ep.piece_square)
                    .map(|id| Capture { piece: id, square: ep.piece_square });
            }
        }
        if to.rank() == piece.color.promotion_rank() {
            record.promotion = Some(Promotion::Pending);
        }
    }

    record
}

fn castling_rook_record(position: &Position, from: Coord, to: Coord) -> Option<MoveRecord> {
    let grid = position.grid();
    let king = grid.occupant(from)?;
    if king.kind != PieceKind::King || from.rank() != to.rank() {
        return None;
    }
    let (rook_file, rook_to_file) = match to.file() as i8 - from.file() as i8 {
        2 => (8, to.file() - 1),
        -2 => (1, to.file() + 1),
        _ => return None,
    };
    let rook_from = Coord::new(rook_file, from.rank())?;
    let rook_to = Coord::new(rook_to_file, from.rank())?;
    let rook = grid.occupant(rook_from)?;
    let mut record = MoveRecord::new(rook_from, rook_to);
    if !rook.has_moved {
        record.effect = Some(Effect::ResetHasMoved(rook.id));
    }
    Some(record)
}

fn pawn_moves(position: &Position, from: Coord, color: Color) -> SquareSet {
    let grid = position.grid();
    let forward = color.forward();
    let mut moves = SquareSet::EMPTY;

    let reach = if from.rank() == color.pawn_start_rank() { 2 } else { 1 };
    let mut cursor = from;
    for _ in 0..reach {
        match cursor.offset(0, forward) {
            Some(next) if grid.is_empty(next) => {
                moves.insert(next);
                cursor = next;
            }
            _ => break,
        }
    }

    for df in [-1, 1] {
        if let Some(target) = from.offset(df, forward) {
            if grid.occupant(target).is_some_and(|p| p.color != color) {
                moves.insert(target);
            }
        }
    }

    if let Some(ep) = position.en_passant() {
        let beside = ep.piece_square.rank() == from.rank()
            && (ep.piece_square.file() as i8 - from.file() as i8).abs() == 1;
        let opposing = grid
            .occupant(ep.piece_square)
            .is_some_and(|p| p.color != color && p.kind == PieceKind::Pawn);
        if beside && opposing {
            moves.insert(ep.capture_square);
        }
    }

    moves
}

fn step_moves(position: &Position, from: Coord, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    let grid = position.grid();
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&to| grid.occupant(to).is_none_or(|p| p.color != color))
        .collect()
}

fn ray_moves(position: &Position, from: Coord, color: Color, directions: &[(i8, i8)]) -> SquareSet {
    let grid = position.grid();
    let mut moves = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match grid.occupant(to) {
                None => moves.insert(to),
                Some(p) => {
                    if p.color != color {
                        moves.insert(to);
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
    moves
}

fn castling_moves(position: &Position, from: Coord, king: Piece) -> SquareSet {
    let mut moves = SquareSet::EMPTY;
    let home = king.color.home_rank();
    if king.has_moved || from.rank() != home || from.file() != 5 {
        return moves;
    }
    if attacks::is_attacked(position, from) {
        return moves;
    }

    // (rook file, direction, squares between king and rook)
    for (rook_file, dir, between) in [(8u8, 1i8, 2i8), (1, -1, 3)] {
        let Some(rook_sq) = Coord::new(rook_file, home) else {
            continue;
        };
        let rook_ready = position.grid().occupant(rook_sq).is_some_and(|r| {
            r.kind == PieceKind::Rook && r.color == king.color && !r.has_moved
        });
        if !rook_ready {
            continue;
        }
        let path_clear = (1..=between)
            .filter_map(|step| from.offset(dir * step, 0))
            .all(|c| position.grid().is_empty(c));
        if !path_clear {
            continue;
        }

        let (Some(through), Some(dest)) = (from.offset(dir, 0), from.offset(2 * dir, 0)) else {
            continue;
        };
        let mut scratch = position.clone();
        let safe = [through, dest].into_iter().all(|square| {
            let step = primary_record(position, from, square);
            scratch.simulate(&step, |p| !attacks::is_attacked(p, square))
        });
        if safe {
            moves.insert(dest);
        }
    }
    moves
}
