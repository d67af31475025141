//! Board-state engine
//!
//! `BoardState` owns a [`Position`] plus the interaction state around it: the
//! selected square and its legal destinations, a pending promotion, and the
//! undo/redo history. All changes go through the transition methods below;
//! a rejected transition returns an [`EngineError`] and leaves the state as it
//! was.

use super::coord::Coord;
use super::grid::Grid;
use super::moves::{EnPassant, MoveGroup, MoveRecord, Promotion};
use super::piece::{Color, PieceKind};
use super::position::Position;
use super::square_set::SquareSet;
use crate::engine::{attacks, movegen};
use crate::error::{EngineError, EngineResult, FenError};
use tracing::{debug, trace};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    position: Position,
    active_square: Option<Coord>,
    available_squares: SquareSet,
    promotion_pending: Option<Coord>,
    undo_stack: Vec<MoveGroup>,
    redo_stack: Vec<MoveGroup>,
}

impl BoardState {
    pub fn new(position: Position) -> Self {
        BoardState {
            position,
            active_square: None,
            available_squares: SquareSet::EMPTY,
            promotion_pending: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Standard starting position, white to move
    pub fn startpos() -> Self {
        Self::new(Position::startpos())
    }

    /// Load a placement (optionally followed by `w`/`b`)
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::new)
    }

    /// Load a bare placement with an explicit side to move
    pub fn from_placement(placement: &str, turn: Color) -> Result<Self, FenError> {
        let grid = Grid::from_placement(placement)?;
        Ok(Self::new(Position::new(grid, turn)))
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.position.grid
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.position.turn
    }

    #[inline]
    pub fn en_passant(&self) -> Option<EnPassant> {
        self.position.en_passant
    }

    #[inline]
    pub fn active_square(&self) -> Option<Coord> {
        self.active_square
    }

    #[inline]
    pub fn available_squares(&self) -> SquareSet {
        self.available_squares
    }

    #[inline]
    pub fn promotion_pending(&self) -> Option<Coord> {
        self.promotion_pending
    }

    pub fn undo_stack(&self) -> &[MoveGroup] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[MoveGroup] {
        &self.redo_stack
    }

    /// Check if the side to move is in check
    pub fn is_in_check(&self) -> bool {
        attacks::is_in_check(&self.position)
    }

    /// Legal destinations for the piece on `from`, regardless of selection
    pub fn legal_moves(&self, from: Coord) -> SquareSet {
        movegen::legal_moves(&self.position, from)
    }

    /// Select a piece of the side to move and compute its legal destinations
    pub fn select_square(&mut self, square: Coord) -> EngineResult<SquareSet> {
        if let Some(pending) = self.promotion_pending {
            return Err(rejected(EngineError::PromotionRequired { square: pending }));
        }
        if self.active_square == Some(square) {
            return Err(rejected(EngineError::AlreadySelected { square }));
        }
        let owned = self
            .grid()
            .occupant(square)
            .is_some_and(|p| p.color == self.turn());
        if !owned {
            return Err(rejected(EngineError::IllegalSelection { square }));
        }

        self.active_square = Some(square);
        self.available_squares = movegen::legal_moves(&self.position, square);
        debug!(%square, available = self.available_squares.len(), "selected");
        Ok(self.available_squares)
    }

    pub fn clear_selection(&mut self) {
        self.active_square = None;
        self.available_squares = SquareSet::EMPTY;
    }

    /// Move the selected piece to `to`
    ///
    /// Returns the records applied: one, or two for castling. When a pawn
    /// reaches its last rank the turn stays with the mover until
    /// [`BoardState::promote`] resolves the choice.
    pub fn move_to(&mut self, to: Coord) -> EngineResult<Vec<MoveRecord>> {
        if let Some(pending) = self.promotion_pending {
            return Err(rejected(EngineError::PromotionRequired { square: pending }));
        }
        let from = self
            .active_square
            .ok_or_else(|| rejected(EngineError::NoActiveSelection))?;
        if to == from || !self.available_squares.contains(to) {
            return Err(rejected(EngineError::IllegalDestination { square: to }));
        }
        let Some(mover) = self.grid().occupant(from).copied() else {
            return Err(rejected(EngineError::NoActiveSelection));
        };

        let records = movegen::plan_move(&self.position, from, to);
        for record in &records {
            self.position.grid.apply(record);
        }

        let en_passant_before = self.position.en_passant;
        let advance = to.rank() as i8 - from.rank() as i8;
        let en_passant_after = match (mover.kind, from.offset(0, advance / 2)) {
            (PieceKind::Pawn, Some(skipped)) if advance.abs() == 2 => Some(EnPassant {
                piece_square: to,
                capture_square: skipped,
            }),
            _ => None,
        };
        self.position.en_passant = en_passant_after;

        let group = MoveGroup {
            records: records.clone(),
            en_passant_before,
            en_passant_after,
        };
        if group.awaiting_promotion() {
            self.promotion_pending = Some(to);
        } else {
            self.position.turn = !self.position.turn;
        }
        self.undo_stack.push(group);
        self.redo_stack.clear();
        self.clear_selection();

        debug!(%from, %to, records = records.len(), promotion = self.promotion_pending.is_some(), "moved");
        Ok(records)
    }

    /// Resolve a pending promotion on `square` into `kind`
    ///
    /// The piece keeps its identity and color. Returns the completed records
    /// of the move, now carrying the chosen kind.
    pub fn promote(&mut self, square: Coord, kind: PieceKind) -> EngineResult<Vec<MoveRecord>> {
        if self.promotion_pending != Some(square) {
            return Err(rejected(EngineError::IllegalPromotionRequest { square }));
        }
        if !kind.is_promotion_target() {
            return Err(rejected(EngineError::InvalidPromotionKind { kind }));
        }
        let Some(piece) = self.position.grid.occupant_id(square) else {
            return Err(rejected(EngineError::IllegalPromotionRequest { square }));
        };
        let Some(group) = self.undo_stack.last_mut() else {
            return Err(rejected(EngineError::IllegalPromotionRequest { square }));
        };
        let Some(record) = group
            .records
            .iter_mut()
            .find(|r| r.to == square && r.promotion == Some(Promotion::Pending))
        else {
            return Err(rejected(EngineError::IllegalPromotionRequest { square }));
        };

        record.promotion = Some(Promotion::To(kind));
        let records = group.records.clone();
        if let Some(p) = self.position.grid.piece_mut(piece) {
            p.kind = kind;
        }
        self.promotion_pending = None;
        self.position.turn = !self.position.turn;

        debug!(%square, ?kind, "promoted");
        Ok(records)
    }

    /// Take back the last player action
    pub fn undo(&mut self) -> EngineResult<Vec<MoveRecord>> {
        let group = self
            .undo_stack
            .pop()
            .ok_or_else(|| rejected(EngineError::EmptyHistory))?;

        for record in group.records.iter().rev() {
            self.position.grid.revert(record);
        }
        self.position.en_passant = group.en_passant_before;
        if group.awaiting_promotion() {
            self.promotion_pending = None;
        } else {
            self.position.turn = !self.position.turn;
        }
        self.clear_selection();

        debug!(records = group.records.len(), remaining = self.undo_stack.len(), "undo");
        let records = group.records.clone();
        self.redo_stack.push(group);
        Ok(records)
    }

    /// Replay the most recently undone player action
    pub fn redo(&mut self) -> EngineResult<Vec<MoveRecord>> {
        if let Some(pending) = self.promotion_pending {
            return Err(rejected(EngineError::PromotionRequired { square: pending }));
        }
        let group = self
            .redo_stack
            .pop()
            .ok_or_else(|| rejected(EngineError::EmptyHistory))?;

        for record in &group.records {
            self.position.grid.apply(record);
        }
        self.position.en_passant = group.en_passant_after;
        if group.awaiting_promotion() {
            self.promotion_pending = group
                .records
                .iter()
                .find(|r| r.promotion == Some(Promotion::Pending))
                .map(|r| r.to);
        } else {
            self.position.turn = !self.position.turn;
        }
        self.clear_selection();

        debug!(records = group.records.len(), remaining = self.redo_stack.len(), "redo");
        let records = group.records.clone();
        self.undo_stack.push(group);
        Ok(records)
    }

    /// Apply `record` without legality checks, evaluate `inspect`, then restore
    /// the grid exactly. History, turn and selection are untouched.
    pub fn simulate<R>(&mut self, record: &MoveRecord, inspect: impl FnOnce(&Position) -> R) -> R {
        self.position.simulate(record, inspect)
    }

    /// Replay a move group produced by a remote peer
    ///
    /// The group is re-derived locally through selection, move and promotion
    /// on a scratch copy; it is committed only if the locally produced records
    /// relocate the same squares in the same order.
    pub fn apply_remote(&mut self, records: &[MoveRecord]) -> EngineResult<Vec<MoveRecord>> {
        let first = records
            .first()
            .ok_or_else(|| rejected(EngineError::EmptyReplay))?;
        let choice = records.iter().find_map(MoveRecord::promoted_to);

        let mut scratch = self.clone();
        let produced = if scratch.promotion_pending == Some(first.to) {
            let kind = choice.ok_or_else(|| {
                rejected(EngineError::PromotionRequired { square: first.to })
            })?;
            scratch.promote(first.to, kind)?
        } else {
            scratch.clear_selection();
            scratch.select_square(first.from)?;
            let moved = scratch.move_to(first.to)?;
            match choice {
                Some(kind) => scratch.promote(first.to, kind)?,
                None => moved,
            }
        };

        if let Some(index) = mismatch(&produced, records) {
            return Err(rejected(EngineError::ReplayMismatch { index }));
        }
        *self = scratch;
        debug!(records = produced.len(), "applied remote move");
        Ok(produced)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::startpos()
    }
}

fn rejected(err: EngineError) -> EngineError {
    trace!(%err, "transition rejected");
    err
}

fn mismatch(local: &[MoveRecord], remote: &[MoveRecord]) -> Option<usize> {
    let index = local
        .iter()
        .zip(remote)
        .position(|(a, b)| a.from != b.from || a.to != b.to);
    match index {
        Some(i) => Some(i),
        None if local.len() != remote.len() => Some(local.len().min(remote.len())),
        None => None,
    }
}
