//! Core chess types and representations
//!
//! This module contains the fundamental building blocks of the rules engine:
//! - Coordinates and coordinate sets
//! - Pieces and the square grid
//! - Move records and history groups
//! - Placement notation
//! - Position and the board-state engine

pub mod board;
pub mod coord;
pub mod fen;
pub mod grid;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square_set;

pub use board::BoardState;
pub use coord::Coord;
pub use fen::STARTING_PLACEMENT;
pub use grid::{Grid, Square};
pub use moves::{Capture, Effect, EnPassant, MoveGroup, MoveRecord, Promotion};
pub use piece::{Color, Piece, PieceId, PieceKind};
pub use position::Position;
pub use square_set::{SquareSet, SquareSetIter};
