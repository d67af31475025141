//! The 8×8 square grid
//!
//! Pieces live in an arena indexed by `PieceId`; each of the 64 cells holds the
//! id of its occupant, if any. Captured pieces stay in the arena (off-board) so
//! that undoing a capture puts the very same piece back.

use super::coord::Coord;
use super::moves::{Effect, MoveRecord};
use super::piece::{Color, Piece, PieceId, PieceKind};
use std::fmt;

/// A borrowed view of one square
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Square<'a> {
    pub coord: Coord,
    pub occupant: Option<&'a Piece>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    pieces: Vec<Piece>,
    cells: [Option<PieceId>; 64],
}

impl Grid {
    /// Create a grid with no pieces
    pub fn empty() -> Self {
        Grid {
            pieces: Vec::new(),
            cells: [None; 64],
        }
    }

    /// Allocate a new piece with the next identity and place it on `at`
    ///
    /// Whatever stood on `at` before is dropped from the grid (it stays in the
    /// arena). Only used while setting up a position.
    pub fn spawn(&mut self, kind: PieceKind, color: Color, at: Coord) -> PieceId {
        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(Piece::new(id, kind, color));
        self.cells[at.index()] = Some(id);
        id
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Square<'_> {
        Square {
            coord,
            occupant: self.occupant(coord),
        }
    }

    #[inline]
    pub fn occupant(&self, coord: Coord) -> Option<&Piece> {
        self.cells[coord.index()].map(|id| &self.pieces[id.index()])
    }

    #[inline]
    pub fn occupant_id(&self, coord: Coord) -> Option<PieceId> {
        self.cells[coord.index()]
    }

    #[inline]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.cells[coord.index()].is_none()
    }

    /// Place a piece from the arena on `coord`
    #[inline]
    pub fn set_occupant(&mut self, coord: Coord, piece: PieceId) {
        self.cells[coord.index()] = Some(piece);
    }

    /// Remove and return the occupant of `coord`
    #[inline]
    pub fn take_occupant(&mut self, coord: Coord) -> Option<PieceId> {
        self.cells[coord.index()].take()
    }

    /// Look up a piece by identity (on or off the board)
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index())
    }

    #[inline]
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.index())
    }

    /// Every square in index order (a1, b1, ..., h8)
    pub fn squares(&self) -> impl Iterator<Item = Square<'_>> + '_ {
        Coord::all().map(move |c| self.get(c))
    }

    /// Occupied squares with their pieces
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &Piece)> + '_ {
        Coord::all().filter_map(move |c| self.occupant(c).map(|p| (c, p)))
    }

    /// Find where a piece currently stands
    pub fn locate(&self, id: PieceId) -> Option<Coord> {
        Coord::all().find(|c| self.cells[c.index()] == Some(id))
    }

    /// Square of the king of `color`
    pub fn king_square(&self, color: Color) -> Option<Coord> {
        self.occupied()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(c, _)| c)
    }

    /// Apply one record: remove its capture, relocate the mover, mark it moved
    /// and apply a chosen promotion.
    pub fn apply(&mut self, record: &MoveRecord) {
        if let Some(capture) = record.capture {
            self.take_occupant(capture.square);
        }
        if let Some(id) = self.take_occupant(record.from) {
            self.set_occupant(record.to, id);
            if let Some(piece) = self.piece_mut(id) {
                piece.has_moved = true;
                if let Some(kind) = record.promoted_to() {
                    piece.kind = kind;
                }
            }
        }
    }

    /// Exact inverse of [`Grid::apply`]
    pub fn revert(&mut self, record: &MoveRecord) {
        if let Some(id) = self.take_occupant(record.to) {
            self.set_occupant(record.from, id);
            if let Some(piece) = self.piece_mut(id) {
                if record.promotion.is_some() {
                    piece.kind = PieceKind::Pawn;
                }
            }
        }
        if let Some(Effect::ResetHasMoved(id)) = record.effect {
            if let Some(piece) = self.piece_mut(id) {
                piece.has_moved = false;
            }
        }
        if let Some(capture) = record.capture {
            self.set_occupant(capture.square, capture.piece);
        }
    }

    /// Capture everything [`Grid::apply`] may change for a record leaving `from`
    pub(crate) fn snapshot(&self, from: Coord) -> Snapshot {
        Snapshot {
            cells: self.cells,
            mover: self.occupant(from).copied(),
        }
    }

    /// Put the grid back exactly as it was when `snapshot` was taken
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.cells = snapshot.cells;
        if let Some(mover) = snapshot.mover {
            if let Some(piece) = self.piece_mut(mover.id) {
                *piece = mover;
            }
        }
    }
}

/// Cell layout plus the mover's state, taken before a simulated record
#[derive(Clone, Copy)]
pub(crate) struct Snapshot {
    cells: [Option<PieceId>; 64],
    mover: Option<Piece>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for rank in (1..=8).rev() {
            write!(f, "  {} ", rank)?;
            for file in 1..=8 {
                match Coord::new(file, rank).and_then(|c| self.occupant(c)) {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_placement())
    }
}
