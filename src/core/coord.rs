//! Board coordinates
//!
//! A coordinate is a `(file, rank)` pair of ordinals in `1..=8`. The fields are
//! private, so every `Coord` a caller can hold addresses a real square.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A square address (a1 = file 1, rank 1; h8 = file 8, rank 8)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coord {
    rank: u8,
    file: u8,
}

impl Coord {
    /// Build a coordinate from 1-based file and rank ordinals
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file >= 1 && file <= 8 && rank >= 1 && rank <= 8 {
            Some(Coord { file, rank })
        } else {
            None
        }
    }

    /// Build a coordinate from a 0-63 index (a1 = 0, h8 = 63)
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Coord {
                file: (index % 8) as u8 + 1,
                rank: (index / 8) as u8 + 1,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn index(self) -> usize {
        (self.rank as usize - 1) * 8 + (self.file as usize - 1)
    }

    /// Step by a file/rank delta, `None` when the result leaves the board
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Coord {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// All 64 coordinates in index order (a1, b1, ..., h8)
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..64).filter_map(Coord::from_index)
    }

    /// Parse a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase().wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Coord::new(file.wrapping_add(1), rank.wrapping_add(1))
    }

    /// Convert to algebraic notation
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file - 1) as char;
        let rank = (b'0' + self.rank) as char;
        format!("{}{}", file, rank)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl TryFrom<String> for Coord {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Coord::from_algebraic(&s).ok_or_else(|| format!("invalid square '{}'", s))
    }
}

impl From<Coord> for String {
    fn from(c: Coord) -> Self {
        c.to_algebraic()
    }
}
