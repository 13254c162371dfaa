//! Attacked squares and attackers
//!
//! Leapers (knights, kings and pawn captures) use tables generated at build time. Sliders walk
//! their rays square by square on the 0x88 grid, so the first occupied square on a ray is
//! included and everything behind it is not.

use crate::bitboard::Bitboard;
use crate::board::RawBoard;
use crate::geometry;
use crate::types::{Cell, Color, Coord, Piece};

#[inline]
const fn bb(val: u64) -> Bitboard {
    Bitboard::from_raw(val)
}

include!(concat!(env!("OUT_DIR"), "/near_attacks.rs"));

#[inline]
pub fn king(coord: Coord) -> Bitboard {
    KING_ATTACKS[coord.index()]
}

#[inline]
pub fn knight(coord: Coord) -> Bitboard {
    KNIGHT_ATTACKS[coord.index()]
}

/// Squares attacked by a pawn of color `color` standing on `coord`
#[inline]
pub fn pawn(color: Color, coord: Coord) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[coord.index()],
        Color::Black => BLACK_PAWN_ATTACKS[coord.index()],
    }
}

/// Walks from `src` in direction `dir` (a 0x88 delta) until the edge of the board
/// or the first occupied square, which is included
#[inline]
pub fn ray(b: &RawBoard, src: Coord, dir: isize) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    let mut pos = src.x88_index() as isize + dir;
    while let Some(c) = Coord::from_x88(pos) {
        res.set(c);
        if b.get(c).is_occupied() {
            break;
        }
        pos += dir;
    }
    res
}

#[inline]
fn rays(b: &RawBoard, src: Coord, dirs: &[isize]) -> Bitboard {
    dirs.iter()
        .fold(Bitboard::EMPTY, |acc, &dir| acc | ray(b, src, dir))
}

#[inline]
pub fn bishop(b: &RawBoard, coord: Coord) -> Bitboard {
    rays(b, coord, &geometry::BISHOP_DIRS_X88)
}

#[inline]
pub fn rook(b: &RawBoard, coord: Coord) -> Bitboard {
    rays(b, coord, &geometry::ROOK_DIRS_X88)
}

#[inline]
pub fn queen(b: &RawBoard, coord: Coord) -> Bitboard {
    bishop(b, coord) | rook(b, coord)
}

/// Returns the squares attacked by the piece of color `color` and kind `piece`, assuming it
/// stands on `coord`
pub fn piece_attacks(b: &RawBoard, color: Color, piece: Piece, coord: Coord) -> Bitboard {
    match piece {
        Piece::Pawn => pawn(color, coord),
        Piece::Knight => knight(coord),
        Piece::Bishop => bishop(b, coord),
        Piece::Rook => rook(b, coord),
        Piece::Queen => queen(b, coord),
        Piece::King => king(coord),
    }
}

/// Returns the squares attacked by the piece on `coord`
///
/// The result is empty if the square is empty. Squares occupied by pieces of the same color are
/// included, as they are "defended" by the piece.
pub fn attacks_from(b: &RawBoard, coord: Coord) -> Bitboard {
    let cell = b.get(coord);
    match (cell.color(), cell.piece()) {
        (Some(color), Some(piece)) => piece_attacks(b, color, piece, coord),
        _ => Bitboard::EMPTY,
    }
}

/// Returns the set of pieces of color `by` that attack `coord`
///
/// This is a purely geometric query: it doesn't matter whose move it is, and pinned pieces
/// are still considered as attackers.
pub fn cell_attackers(b: &RawBoard, coord: Coord, by: Color) -> Bitboard {
    let mut res = Bitboard::EMPTY;

    // A pawn of color `by` attacks `coord` iff a pawn of the opposite color on `coord`
    // would attack the pawn's square.
    for src in pawn(by.inv(), coord) {
        if b.get(src).is(by, Piece::Pawn) {
            res.set(src);
        }
    }
    for src in knight(coord) {
        if b.get(src).is(by, Piece::Knight) {
            res.set(src);
        }
    }
    for src in king(coord) {
        if b.get(src).is(by, Piece::King) {
            res.set(src);
        }
    }

    let (diag, line) = slider_cells(by);
    for src in bishop(b, coord) {
        let cell = b.get(src);
        if cell == diag[0] || cell == diag[1] {
            res.set(src);
        }
    }
    for src in rook(b, coord) {
        let cell = b.get(src);
        if cell == line[0] || cell == line[1] {
            res.set(src);
        }
    }

    res
}

/// Returns `true` if `coord` is attacked by any piece of color `by`
pub fn is_cell_attacked(b: &RawBoard, coord: Coord, by: Color) -> bool {
    for src in pawn(by.inv(), coord) {
        if b.get(src).is(by, Piece::Pawn) {
            return true;
        }
    }
    for src in knight(coord) {
        if b.get(src).is(by, Piece::Knight) {
            return true;
        }
    }
    for src in king(coord) {
        if b.get(src).is(by, Piece::King) {
            return true;
        }
    }

    let (diag, line) = slider_cells(by);
    for dir in geometry::BISHOP_DIRS_X88 {
        if let Some(src) = ray_end(b, coord, dir) {
            let cell = b.get(src);
            if cell == diag[0] || cell == diag[1] {
                return true;
            }
        }
    }
    for dir in geometry::ROOK_DIRS_X88 {
        if let Some(src) = ray_end(b, coord, dir) {
            let cell = b.get(src);
            if cell == line[0] || cell == line[1] {
                return true;
            }
        }
    }

    false
}

/// Returns the first occupied square when walking from `src` along `dir`
fn ray_end(b: &RawBoard, src: Coord, dir: isize) -> Option<Coord> {
    let mut pos = src.x88_index() as isize + dir;
    while let Some(c) = Coord::from_x88(pos) {
        if b.get(c).is_occupied() {
            return Some(c);
        }
        pos += dir;
    }
    None
}

#[inline]
fn slider_cells(c: Color) -> ([Cell; 2], [Cell; 2]) {
    let queen = Cell::from_parts(c, Piece::Queen);
    (
        [Cell::from_parts(c, Piece::Bishop), queen],
        [Cell::from_parts(c, Piece::Rook), queen],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn coords(s: &[&str]) -> Bitboard {
        s.iter().map(|c| Coord::from_str(c).unwrap()).collect()
    }

    #[test]
    fn test_leapers() {
        let a1 = Coord::from_str("a1").unwrap();
        let e4 = Coord::from_str("e4").unwrap();
        assert_eq!(knight(a1), coords(&["b3", "c2"]));
        assert_eq!(king(a1), coords(&["a2", "b1", "b2"]));
        assert_eq!(knight(e4).popcount(), 8);
        assert_eq!(pawn(Color::White, e4), coords(&["d5", "f5"]));
        assert_eq!(pawn(Color::Black, e4), coords(&["d3", "f3"]));
        assert_eq!(
            pawn(Color::White, Coord::from_str("a2").unwrap()),
            coords(&["b3"])
        );
    }

    #[test]
    fn test_sliders() {
        let b = RawBoard::from_fen("4k3/8/8/2p5/8/4R3/8/4K3 w - - 0 1").unwrap();
        let e3 = Coord::from_str("e3").unwrap();
        assert_eq!(
            rook(&b, e3),
            coords(&[
                "e2", "e1", "e4", "e5", "e6", "e7", "e8", "a3", "b3", "c3", "d3", "f3", "g3",
                "h3"
            ])
        );
        assert_eq!(attacks_from(&b, e3), rook(&b, e3));
        let c5 = Coord::from_str("c5").unwrap();
        assert_eq!(attacks_from(&b, c5), coords(&["b4", "d4"]));
        assert_eq!(
            attacks_from(&b, Coord::from_str("d4").unwrap()),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn test_cell_attackers() {
        let b = RawBoard::from_fen(
            "1q3knr/2p1pppp/1n2r3/3b4/1N6/1B6/2Q5/1K3RN1 w - - 0 1",
        )
        .unwrap();
        let c = Coord::from_str("d5").unwrap();
        assert!(!is_cell_attacked(&b, Coord::from_str("d4").unwrap(), Color::Black));
        assert_eq!(cell_attackers(&b, c, Color::White), coords(&["b3", "b4"]));
        assert_eq!(cell_attackers(&b, c, Color::Black), coords(&["b6"]));
        assert!(is_cell_attacked(&b, c, Color::White));
        assert!(is_cell_attacked(&b, c, Color::Black));

        let f7 = Coord::from_str("f7").unwrap();
        assert_eq!(cell_attackers(&b, f7, Color::White), coords(&["f1"]));
        assert_eq!(cell_attackers(&b, f7, Color::Black), coords(&["f8"]));
    }

    #[test]
    fn test_attacks_match_attackers() {
        let b = RawBoard::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        )
        .unwrap();
        for target in Coord::iter() {
            for color in [Color::White, Color::Black] {
                let expected: Bitboard = Coord::iter()
                    .filter(|&src| {
                        b.get(src).color() == Some(color) && attacks_from(&b, src).has(target)
                    })
                    .collect();
                assert_eq!(cell_attackers(&b, target, color), expected);
                assert_eq!(is_cell_attacked(&b, target, color), expected.is_nonempty());
            }
        }
    }
}
