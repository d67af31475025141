//! Game configuration
//!
//! A game starts from a placement and a side to move. Both can come from a
//! JSON file or from command-line flags; anything missing falls back to the
//! standard starting position with white to move.

use crate::core::fen::STARTING_PLACEMENT;
use crate::core::piece::Color;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Piece placement in FEN's first-field notation
    pub placement: String,
    pub first_to_move: Color,
}

impl GameConfig {
    /// Read a JSON config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Config for a FEN string (placement plus optional side to move)
    pub fn from_fen(fen: &str) -> Result<Self, ConfigError> {
        let position = crate::core::position::Position::from_fen(fen)?;
        Ok(GameConfig {
            placement: position.grid().to_placement(),
            first_to_move: position.turn(),
        })
    }

    /// Make sure the placement loads
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::core::grid::Grid::from_placement(&self.placement)?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            placement: STARTING_PLACEMENT.to_string(),
            first_to_move: Color::White,
        }
    }
}
