pub mod config;
pub mod console;
pub mod core;
pub mod engine;
pub mod error;
pub mod game;

pub use config::GameConfig;
pub use console::Console;
pub use crate::core::{BoardState, Color, Coord, MoveRecord, PieceKind, Position};
pub use error::{ConfigError, EngineError, EngineResult, FenError};
pub use game::Game;
