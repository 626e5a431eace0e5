// Square coordinates and algebraic notation
// Files and ranks both run 1..=8 (file 1 = 'a', rank 1 = white's back rank)

use std::fmt;
use std::str::FromStr;

use crate::error::SquareParseError;

/// A square on the board, stored as (file, rank) with both axes in 1..=8
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square, or None if either axis is outside 1..=8
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Index into a flat 64-cell board: (file-1)*8 + (rank-1)
    pub fn index(self) -> usize {
        (self.file as usize - 1) * 8 + (self.rank as usize - 1)
    }

    /// Inverse of `index`
    pub fn from_index(index: usize) -> Option<Self> {
        if index < 64 {
            Some(Square {
                file: (index / 8) as u8 + 1,
                rank: (index % 8) as u8 + 1,
            })
        } else {
            None
        }
    }

    /// All 64 squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    /// The square `(df, dr)` away, or None when that leaves the board
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Light squares have an odd file+rank sum (a1 is dark, h1 is light)
    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file - 1) as char;
        let rank = (b'0' + self.rank) as char;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareParseError(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a').wrapping_add(1);
        let rank = bytes[1].wrapping_sub(b'0');
        Square::new(file, rank).ok_or_else(|| SquareParseError(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
