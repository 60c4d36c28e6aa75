//! Board coordinates.

use std::fmt;

/// A cell on the 9x9 board.
///
/// Files run 9 down to 1 from left to right as the board is printed
/// in SFEN; ranks run `a` to `i` top to bottom. Both are stored
/// 1-based, so `Square::new(7, 7)` is the square written `7g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// The total number of squares on the board.
    pub const COUNT: usize = 81;

    /// Creates a square from 1-based file and rank numbers.
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if !(1..=9).contains(&file) || !(1..=9).contains(&rank) {
            return None;
        }
        Some(Square { file, rank })
    }

    /// The file (column), 1-9.
    pub fn file(self) -> u8 {
        self.file
    }

    /// The rank (row), 1-9 where 1 is the rank written `a`.
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// All squares in SFEN writing order: rank `a` through `i`, and
    /// file 9 down to 1 within each rank.
    pub fn iter() -> impl Iterator<Item = Square> {
        (1..=9u8).flat_map(|rank| (1..=9u8).rev().map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file, (b'a' + self.rank - 1) as char)
    }
}
