//! The rule-relevant part of a board state
//!
//! A `Position` is what the attack scout and the move navigator look at: the
//! grid, whose turn it is and the en-passant marker. Selection and history
//! belong to the enclosing [`BoardState`](super::board::BoardState).

use super::coord::Coord;
use super::fen::STARTING_PLACEMENT;
use super::grid::Grid;
use super::moves::{EnPassant, MoveRecord};
use super::piece::Color;
use crate::error::FenError;
use tracing::trace;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub(crate) grid: Grid,
    pub(crate) turn: Color,
    pub(crate) en_passant: Option<EnPassant>,
}

impl Position {
    pub fn new(grid: Grid, turn: Color) -> Self {
        Position {
            grid,
            turn,
            en_passant: None,
        }
    }

    /// Standard starting position, white to move
    pub fn startpos() -> Self {
        match Grid::from_placement(STARTING_PLACEMENT) {
            Ok(grid) => Position::new(grid, Color::White),
            Err(_) => unreachable!("starting placement is well formed"),
        }
    }

    /// Load a placement, optionally followed by a `w`/`b` side-to-move field
    ///
    /// Further FEN fields are ignored: castling eligibility comes from the
    /// pieces' move flags and en passant from the move history.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let grid = Grid::from_placement(parts.next().unwrap_or(""))?;
        let turn = match parts.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::SideToMove(other.to_string())),
        };
        Ok(Position::new(grid, turn))
    }

    /// Placement plus side to move
    pub fn to_fen(&self) -> String {
        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.grid.to_placement(), side)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Coord> {
        self.grid.king_square(color)
    }

    /// Apply `record` without any legality check, run `inspect`, then put the
    /// grid back as it was. Turn and en-passant state are not touched.
    ///
    /// The record need not describe the board accurately: a missing capture or
    /// an empty origin is still undone exactly.
    pub fn simulate<R>(&mut self, record: &MoveRecord, inspect: impl FnOnce(&Position) -> R) -> R {
        trace!(from = %record.from, to = %record.to, "simulate");
        let snapshot = self.grid.snapshot(record.from);
        self.grid.apply(record);
        let result = inspect(self);
        self.grid.restore(snapshot);
        result
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
