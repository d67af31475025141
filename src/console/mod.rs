//! Line-oriented console front end
//!
//! Reads one command per line and drives a [`Game`](crate::game::Game):
//! selection and moves, promotion, history navigation, remote replay and
//! diagnostics such as `perft`.

pub mod protocol;

pub use protocol::Console;
