//! Perft: leaf-node counts of the legal move tree
//!
//! Each promotion choice counts as a separate move, which makes the counts
//! comparable with published perft tables.

use super::movegen::all_legal_moves;
use crate::core::board::BoardState;
use crate::core::piece::PieceKind;

/// Count the leaf nodes `depth` plies below `state`
pub fn perft(state: &BoardState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let position = state.position();
    let moves = all_legal_moves(position, state.turn());

    if depth == 1 {
        return moves
            .iter()
            .map(|&(from, targets)| {
                let promotes = position
                    .grid()
                    .occupant(from)
                    .is_some_and(|p| p.kind == PieceKind::Pawn);
                targets
                    .iter()
                    .map(|to| {
                        if promotes && to.rank() == state.turn().promotion_rank() {
                            PieceKind::PROMOTIONS.len() as u64
                        } else {
                            1
                        }
                    })
                    .sum::<u64>()
            })
            .sum();
    }

    let mut nodes = 0;
    for (from, targets) in moves {
        for to in targets {
            let mut child = state.clone();
            if child.select_square(from).is_err() || child.move_to(to).is_err() {
                continue;
            }
            match child.promotion_pending() {
                Some(square) => {
                    for kind in PieceKind::PROMOTIONS {
                        let mut promoted = child.clone();
                        if promoted.promote(square, kind).is_ok() {
                            nodes += perft(&promoted, depth - 1);
                        }
                    }
                }
                None => nodes += perft(&child, depth - 1),
            }
        }
    }
    nodes
}
