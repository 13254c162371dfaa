//! Position keys
//!
//! The keys are the ones of Polyglot opening books: a key per piece and square, four
//! castling keys, eight enpassant file keys and a key for White to move. The enpassant key is
//! only included if the side to move has a pawn next to the pawn that has just moved by two
//! squares.

use crate::board::RawBoard;
use crate::geometry;
use crate::types::{CastlingRights, Cell, Coord, File, Piece};

include!(concat!(env!("OUT_DIR"), "/zobrist.rs"));

/// Returns the key for `cell` on `coord`, which is zero for an empty cell
#[inline]
pub fn pieces(cell: Cell, coord: Coord) -> u64 {
    PIECES[cell.index()][coord.index()]
}

#[inline]
pub fn castling(rights: CastlingRights) -> u64 {
    CASTLING[rights.index()]
}

#[inline]
pub fn enpassant(file: File) -> u64 {
    ENPASSANT[file.index()]
}

/// Returns the enpassant part of the key for `b`
#[inline]
pub fn enpassant_term(b: &RawBoard) -> u64 {
    match b.ep_target {
        Some(target) if has_enpassant_capturer(b, target) => enpassant(target.file()),
        _ => 0,
    }
}

fn has_enpassant_capturer(b: &RawBoard, target: Coord) -> bool {
    let pushed = Coord::from_parts(target.file(), geometry::enpassant_src_rank(b.side));
    let pawn = Cell::from_parts(b.side, Piece::Pawn);
    [-1, 1]
        .into_iter()
        .filter_map(|delta| pushed.try_shift(delta, 0))
        .any(|c| b.get(c) == pawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::make::Uci;
    use crate::types::Color;

    #[test]
    fn test_empty_cell() {
        for coord in Coord::iter() {
            assert_eq!(pieces(Cell::EMPTY, coord), 0);
        }
    }

    #[test]
    fn test_keys_distinct() {
        let mut keys = Vec::new();
        for cell in Cell::iter().skip(1) {
            for coord in Coord::iter() {
                keys.push(pieces(cell, coord));
            }
        }
        keys.extend(File::iter().map(enpassant));
        keys.push(MOVE_SIDE);
        for i in 0..4 {
            keys.push(castling(CastlingRights::from_index(1 << i)));
        }
        let len = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), len);
        assert_eq!(len, 781);
    }

    #[test]
    fn test_castling_combines() {
        let full = CastlingRights::FULL;
        let mut expected = 0;
        for i in 0..4 {
            expected ^= castling(CastlingRights::from_index(1 << i));
        }
        assert_eq!(castling(full), expected);
        assert_eq!(castling(CastlingRights::EMPTY), 0);
    }

    #[test]
    fn test_polyglot_hashes() {
        let mut b = Board::initial();
        assert_eq!(b.zobrist_hash(), 0x463b96181691fc9c);
        for (mv, hash) in [
            ("e2e4", 0x823c9b50fd114196),
            ("d7d5", 0x0756b94461c50fb0),
            ("e4e5", 0x662fafb965db29d4),
            ("f7f5", 0x22a48b5a8e47ff78),
            ("e1e2", 0x652a607ca3f242c1),
            ("e8f7", 0x00fdd303c946bdd9),
        ] {
            b = b.make_move(Uci(mv)).unwrap();
            assert_eq!(b.zobrist_hash(), hash, "after {}", mv);
            assert_eq!(b.raw().zobrist_hash(), hash, "after {}", mv);
        }

        let mut b = Board::initial();
        for (mv, hash) in [
            ("a2a4", None),
            ("b7b5", None),
            ("h2h4", None),
            ("b5b4", None),
            ("c2c4", Some(0x3c8123ea7b067637)),
            ("b4c3", None),
            ("a1a2", Some(0x5c3f9b829b279560)),
        ] {
            b = b.make_move(Uci(mv)).unwrap();
            if let Some(hash) = hash {
                assert_eq!(b.zobrist_hash(), hash, "after {}", mv);
            }
        }
    }

    #[test]
    fn test_enpassant_term() {
        // No black pawn can take on e3
        let b = RawBoard::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(enpassant_term(&b), 0);

        let b = RawBoard::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(b.side, Color::Black);
        assert_eq!(enpassant_term(&b), enpassant(File::E));
    }
}
