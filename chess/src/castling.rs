//! Squares involved in castling

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::types::{CastlingRights, CastlingSide, Color, Coord, File};

#[inline]
const fn on_rank(c: Color, x: u64) -> Bitboard {
    Bitboard::from_raw(match c {
        Color::White => x,
        Color::Black => x << 56,
    })
}

/// Squares between the king and the rook, which must be empty
#[inline]
pub const fn pass(c: Color, s: CastlingSide) -> Bitboard {
    on_rank(
        c,
        match s {
            CastlingSide::King => 0x60,
            CastlingSide::Queen => 0x0e,
        },
    )
}

/// Squares the king moves through, including the destination but not the source
///
/// None of them may be attacked.
#[inline]
pub const fn transit(c: Color, s: CastlingSide) -> Bitboard {
    on_rank(
        c,
        match s {
            CastlingSide::King => 0x60,
            CastlingSide::Queen => 0x0c,
        },
    )
}

/// Home squares of the king and the rook
#[inline]
pub const fn srcs(c: Color, s: CastlingSide) -> Bitboard {
    on_rank(
        c,
        match s {
            CastlingSide::King => 0x90,
            CastlingSide::Queen => 0x11,
        },
    )
}

pub const ALL_SRCS: Bitboard = Bitboard::from_raw(0x91 | (0x91 << 56));

#[inline]
pub const fn king_src(c: Color) -> Coord {
    Coord::from_parts(File::E, geometry::castling_rank(c))
}

#[inline]
pub const fn king_dst(c: Color, s: CastlingSide) -> Coord {
    Coord::from_parts(geometry::castling_king_dst_file(s), geometry::castling_rank(c))
}

/// Source and destination of the rook
#[inline]
pub const fn rook_move(c: Color, s: CastlingSide) -> (Coord, Coord) {
    let rank = geometry::castling_rank(c);
    let (src, dst) = geometry::castling_rook_files(s);
    (Coord::from_parts(src, rank), Coord::from_parts(dst, rank))
}

/// Clears the rights lost when a piece moves from or to `coord`
#[inline]
pub fn update_rights(rights: &mut CastlingRights, coord: Coord) {
    if !ALL_SRCS.has(coord) {
        return;
    }
    for c in [Color::White, Color::Black] {
        for s in CastlingSide::iter() {
            if srcs(c, s).has(coord) {
                rights.unset(c, s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn coord(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    #[test]
    fn test_squares() {
        assert_eq!(
            pass(Color::White, CastlingSide::Queen),
            Bitboard::EMPTY.with(coord("b1")).with(coord("c1")).with(coord("d1"))
        );
        assert_eq!(
            transit(Color::Black, CastlingSide::Queen),
            Bitboard::EMPTY.with(coord("c8")).with(coord("d8"))
        );
        assert_eq!(
            srcs(Color::Black, CastlingSide::King),
            Bitboard::EMPTY.with(coord("e8")).with(coord("h8"))
        );
        assert_eq!(king_dst(Color::White, CastlingSide::King), coord("g1"));
        assert_eq!(
            rook_move(Color::Black, CastlingSide::Queen),
            (coord("a8"), coord("d8"))
        );
    }

    #[test]
    fn test_update_rights() {
        let mut rights = CastlingRights::FULL;
        update_rights(&mut rights, coord("e4"));
        assert_eq!(rights, CastlingRights::FULL);
        update_rights(&mut rights, coord("h1"));
        assert_eq!(rights.to_string(), "Qkq");
        update_rights(&mut rights, coord("e8"));
        assert_eq!(rights.to_string(), "Q");
    }
}
