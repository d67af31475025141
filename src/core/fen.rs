//! Placement notation
//!
//! Reads and writes the piece-placement field of FEN: ranks 8 down to 1
//! separated by `/`, one symbol per piece (uppercase white, lowercase black)
//! and digits for runs of empty squares.

use super::coord::Coord;
use super::grid::Grid;
use super::piece::{Color, Piece, PieceKind};
use crate::error::FenError;

/// Standard starting placement
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

impl Grid {
    /// Parse a placement, assigning identities in scan order (a8, b8, ..., h1)
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let placement = placement.trim();
        if placement.is_empty() {
            return Err(FenError::Empty);
        }
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut grid = Grid::empty();
        for (row, text) in ranks.iter().enumerate() {
            let rank = 8 - row as u8;
            let mut file = 1u8;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += run as u8;
                    if file > 9 {
                        return Err(FenError::RankOverflow { rank });
                    }
                    continue;
                }
                let (kind, color) = Piece::parse_symbol(c).ok_or(FenError::UnknownSymbol(c))?;
                let at = Coord::new(file, rank).ok_or(FenError::RankOverflow { rank })?;
                grid.spawn(kind, color, at);
                file += 1;
            }
            if file != 9 {
                return Err(FenError::RankUnderflow {
                    rank,
                    squares: file - 1,
                });
            }
        }

        for color in [Color::White, Color::Black] {
            let count = grid
                .occupied()
                .filter(|(_, p)| p.kind == PieceKind::King && p.color == color)
                .count();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        Ok(grid)
    }

    /// Render the placement in the notation [`Grid::from_placement`] reads
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for rank in (1..=8).rev() {
            let mut empty = 0;
            for file in 1..=8 {
                match Coord::new(file, rank).and_then(|c| self.occupant(c)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 1 {
                out.push('/');
            }
        }
        out
    }
}
