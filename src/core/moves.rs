//! Move records and history entries
//!
//! A player action produces a `MoveGroup`: one `MoveRecord` per primitive
//! piece relocation (two for castling) plus the en-passant state on either side
//! of the action. Records carry enough data to be replayed forward or reversed
//! without consulting anything else, and serialize to JSON for transmission.

use super::coord::Coord;
use super::piece::{PieceId, PieceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A piece removed from the board by a move
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Capture {
    pub piece: PieceId,
    /// Where the captured piece stood (differs from `to` for en passant)
    pub square: Coord,
}

/// Promotion marker on a pawn move reaching the last rank
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    /// Awaiting the player's choice
    Pending,
    To(PieceKind),
}

/// Reversible side effect interpreted on undo
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// The moving piece had not moved before this record
    ResetHasMoved(PieceId),
}

/// One atomic piece relocation
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Capture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

impl MoveRecord {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        MoveRecord {
            from,
            to,
            capture: None,
            promotion: None,
            effect: None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Chosen promotion kind, if the choice has been made
    #[inline]
    pub const fn promoted_to(&self) -> Option<PieceKind> {
        match self.promotion {
            Some(Promotion::To(kind)) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promoted_to() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

/// Transient marker after a two-square pawn advance
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EnPassant {
    /// Where the pawn that just advanced stands
    pub piece_square: Coord,
    /// The skipped square a capturing pawn moves to
    pub capture_square: Coord,
}

/// Everything one player action did, in application order
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveGroup {
    pub records: Vec<MoveRecord>,
    pub en_passant_before: Option<EnPassant>,
    pub en_passant_after: Option<EnPassant>,
}

impl MoveGroup {
    /// True while the group's pawn promotion is still awaiting a choice
    pub fn awaiting_promotion(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.promotion == Some(Promotion::Pending))
    }
}
