//! Game-mode controller
//!
//! Wraps a [`BoardState`] for a front end: one-call moves, remote replay and
//! the win signal. The engine itself never decides that a game is over; the
//! controller derives it from check and the absence of legal moves.

use crate::config::GameConfig;
use crate::core::board::BoardState;
use crate::core::coord::Coord;
use crate::core::moves::MoveRecord;
use crate::core::piece::{Color, PieceKind};
use crate::engine::movegen::all_legal_moves;
use crate::error::{EngineError, EngineResult, FenError};
use tracing::info;

#[derive(Clone, Debug, Default)]
pub struct Game {
    state: BoardState,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, FenError> {
        let state = BoardState::from_placement(&config.placement, config.first_to_move)?;
        info!(fen = %state.to_fen(), "new game");
        Ok(Game { state })
    }

    pub fn from_state(state: BoardState) -> Self {
        Game { state }
    }

    #[inline]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    /// Select `from`, move to `to` and, when given, resolve the promotion
    ///
    /// All or nothing: a failure at any step leaves the game untouched.
    /// Without `promotion` a last-rank pawn move stays pending. A `promotion`
    /// given for any other move is rejected.
    pub fn play(
        &mut self,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> EngineResult<Vec<MoveRecord>> {
        let mut scratch = self.state.clone();
        scratch.clear_selection();
        scratch.select_square(from)?;
        let mut records = scratch.move_to(to)?;
        match (promotion, scratch.promotion_pending()) {
            (Some(kind), Some(square)) => records = scratch.promote(square, kind)?,
            (Some(_), None) => return Err(EngineError::IllegalPromotionRequest { square: to }),
            _ => {}
        }
        self.state = scratch;
        Ok(records)
    }

    pub fn undo(&mut self) -> EngineResult<Vec<MoveRecord>> {
        self.state.undo()
    }

    pub fn redo(&mut self) -> EngineResult<Vec<MoveRecord>> {
        self.state.redo()
    }

    /// Replay a move group received from the other player
    pub fn apply_remote(&mut self, records: &[MoveRecord]) -> EngineResult<Vec<MoveRecord>> {
        self.state.apply_remote(records)
    }

    /// Number of legal (origin, destination) pairs for the side to move
    pub fn legal_move_count(&self) -> usize {
        all_legal_moves(self.state.position(), self.state.turn())
            .iter()
            .map(|(_, targets)| targets.len())
            .sum()
    }

    pub fn is_in_check(&self) -> bool {
        self.state.is_in_check()
    }

    /// The side that delivered checkmate, if the side to move is mated
    ///
    /// A side to move without legal moves that is not in check yields `None`:
    /// stalemate is not scored.
    pub fn winner(&self) -> Option<Color> {
        if self.state.promotion_pending().is_some() {
            return None;
        }
        if self.is_in_check() && self.legal_move_count() == 0 {
            Some(self.state.turn().opposite())
        } else {
            None
        }
    }
}
