//! Rules algorithms
//!
//! This module contains the rule logic that reads a position:
//! - Attack detection (is a square attacked, is the side to move in check)
//! - Move generation (pseudo-legal and legal destinations, castling)
//! - Perft node counting for validating the two

pub mod attacks;
pub mod movegen;
pub mod perft;

pub use attacks::{is_attacked, is_attacked_by, is_in_check};
pub use movegen::{all_legal_moves, legal_moves, plan_move, pseudo_legal_moves};
pub use perft::perft;
