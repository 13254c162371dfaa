use crate::types::{Coord, File, Rank};
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;

/// Set of squares, bit `i` stands for the square with index `i`
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    #[inline]
    pub const fn from_raw(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn from_coord(coord: Coord) -> Bitboard {
        Bitboard(1 << coord.index())
    }

    #[inline]
    pub const fn with(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 | Bitboard::from_coord(coord).0)
    }

    #[inline]
    pub fn set(&mut self, coord: Coord) {
        self.0 |= Bitboard::from_coord(coord).0;
    }

    #[inline]
    pub const fn has(&self, coord: Coord) -> bool {
        self.0 & Bitboard::from_coord(coord).0 != 0
    }

    #[inline]
    pub const fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonempty(&self) -> bool {
        !self.is_empty()
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({})", self)
    }
}

/// Ranks from 8 down to 1 separated by `/`, one `0` or `1` per file
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = Rank::iter()
            .rev()
            .map(|rank| {
                File::iter()
                    .map(|file| if self.has(Coord::from_parts(file, rank)) { '1' } else { '0' })
                    .collect()
            })
            .collect();
        f.write_str(&rows.join("/"))
    }
}

/// Squares of a [`Bitboard`] in increasing index order
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        let rest = self.0;
        if rest == 0 {
            return None;
        }
        // Clear the lowest set bit
        self.0 = rest & (rest - 1);
        Some(Coord::from_index(rest.trailing_zeros() as usize))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for Bitboard {
    type Item = Coord;
    type IntoIter = Iter;

    #[inline]
    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

impl FromIterator<Coord> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Bitboard {
        let mut res = Bitboard::EMPTY;
        for coord in iter {
            res.set(coord);
        }
        res
    }
}
