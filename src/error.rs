//! Error types
//!
//! Every rejected transition of the board-state engine is reported as an
//! [`EngineError`]; the state is left exactly as it was. Position loading
//! reports [`FenError`], configuration loading [`ConfigError`].

use crate::core::coord::Coord;
use crate::core::piece::{Color, PieceKind};

/// Reasons the engine declines a transition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Square is empty or holds a piece of the side not to move
    #[error("cannot select {square}: no piece of the side to move there")]
    IllegalSelection { square: Coord },

    /// Square is already the active selection
    #[error("{square} is already selected")]
    AlreadySelected { square: Coord },

    /// Move submitted with nothing selected
    #[error("no square is selected")]
    NoActiveSelection,

    /// Target not among the available squares
    #[error("{square} is not a legal destination")]
    IllegalDestination { square: Coord },

    /// A pawn on `square` is waiting for its promotion choice
    #[error("promotion pending on {square}")]
    PromotionRequired { square: Coord },

    /// No promotion is pending on the requested square
    #[error("no promotion pending on {square}")]
    IllegalPromotionRequest { square: Coord },

    /// Pawns may only promote to queen, rook, bishop or knight
    #[error("cannot promote to {kind:?}")]
    InvalidPromotionKind { kind: PieceKind },

    /// Undo or redo with nothing to replay
    #[error("no moves to replay")]
    EmptyHistory,

    /// A remote move group without records
    #[error("remote move group is empty")]
    EmptyReplay,

    /// A remote move group disagrees with what the move produces locally
    #[error("remote record {index} does not match the local move")]
    ReplayMismatch { index: usize },
}

/// Result type alias for engine transitions
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors while loading a board placement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("placement is empty")]
    Empty,

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes more than 8 squares")]
    RankOverflow { rank: u8 },

    #[error("rank {rank} describes only {squares} squares")]
    RankUnderflow { rank: u8, squares: u8 },

    #[error("unknown piece symbol '{0}'")]
    UnknownSymbol(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: usize },
}

/// Errors while loading a game configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid starting position: {0}")]
    Position(#[from] FenError),
}
