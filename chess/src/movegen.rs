//! Pseudo-legal move generation
//!
//! Generated moves follow the movement rules of the pieces, but may leave the own king under
//! attack. Use [`legal`](crate::legal) to keep only the legal ones.
//!
//! Moves come out ordered by source square, then by destination square, then by promote piece
//! (knight, bishop, rook, queen).

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{Move, MoveFlags, PromotePiece};
use crate::types::{CastlingSide, Color, Coord, Piece};
use crate::{attack, castling, geometry};

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// List of moves stored inline
///
/// The capacity is enough for any position reachable from a valid board.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Receiver of generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

/// Receiver of generated moves which may stop the generation by returning an error
pub(crate) trait MaybeMovePush {
    type Err;

    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    fn push(&mut self, m: Move) -> Result<(), Self::Err> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

pub(crate) struct MoveGen<'a, P> {
    board: &'a Board,
    dst: &'a mut P,
}

impl<'a, P: MaybeMovePush> MoveGen<'a, P> {
    pub fn new(board: &'a Board, dst: &'a mut P) -> Self {
        MoveGen { board, dst }
    }

    #[inline]
    fn side(&self) -> Color {
        self.board.r.side
    }

    #[inline]
    fn is_own(&self, c: Coord) -> bool {
        self.board.r.get(c).color() == Some(self.side())
    }

    fn without_own(&self, targets: Bitboard) -> Bitboard {
        targets.into_iter().filter(|&c| !self.is_own(c)).collect()
    }

    fn pawn_targets(&self, src: Coord) -> Bitboard {
        let b = &self.board.r;
        let side = self.side();
        let mut res = Bitboard::EMPTY;

        let fwd = geometry::pawn_forward_delta(side);
        let single = src.add(fwd);
        if b.get(single).is_empty() {
            res.set(single);
            if src.rank() == geometry::double_move_src_rank(side) {
                let double = single.add(fwd);
                if b.get(double).is_empty() {
                    res.set(double);
                }
            }
        }

        for dst in attack::pawn(side, src) {
            if b.get(dst).color() == Some(side.inv()) || b.ep_target == Some(dst) {
                res.set(dst);
            }
        }

        res
    }

    fn castling_targets(&self, src: Coord) -> Bitboard {
        let b = &self.board.r;
        let side = self.side();
        let mut res = Bitboard::EMPTY;
        if src != castling::king_src(side) || !b.castling.has_color(side) {
            return res;
        }
        let by = side.inv();
        if attack::is_cell_attacked(b, src, by) {
            return res;
        }
        for s in CastlingSide::iter() {
            if !b.castling.has(side, s) {
                continue;
            }
            let is_free = castling::pass(side, s)
                .into_iter()
                .all(|c| b.get(c).is_empty());
            let (_, king_pass) = castling::rook_move(side, s);
            if is_free && !attack::is_cell_attacked(b, king_pass, by) {
                res.set(castling::king_dst(side, s));
            }
        }
        res
    }

    fn emit_pawn(&mut self, src: Coord, dst: Coord) -> Result<(), P::Err> {
        let b = &self.board.r;
        let flags = if src.file() == dst.file() {
            if src.rank().index().abs_diff(dst.rank().index()) == 2 {
                MoveFlags::DOUBLE_PUSH
            } else {
                MoveFlags::NONE
            }
        } else if b.get(dst).is_empty() {
            MoveFlags::CAPTURE | MoveFlags::EN_PASSANT
        } else {
            MoveFlags::CAPTURE
        };

        if dst.rank() == geometry::promote_dst_rank(self.side()) {
            for p in PromotePiece::iter() {
                self.dst.push(Move::with_flags(
                    src,
                    dst,
                    Some(p),
                    flags | MoveFlags::PROMOTION,
                ))?;
            }
            return Ok(());
        }
        self.dst.push(Move::with_flags(src, dst, None, flags))
    }

    /// Generates all the moves of the piece standing on `src`
    ///
    /// Nothing is generated if the square doesn't contain a piece of the side to move.
    pub fn gen_from(&mut self, src: Coord) -> Result<(), P::Err> {
        let cell = self.board.r.get(src);
        let side = self.side();
        let piece = match (cell.color(), cell.piece()) {
            (Some(c), Some(p)) if c == side => p,
            _ => return Ok(()),
        };

        if piece == Piece::Pawn {
            for dst in self.pawn_targets(src) {
                self.emit_pawn(src, dst)?;
            }
            return Ok(());
        }

        let targets = self.without_own(attack::piece_attacks(&self.board.r, side, piece, src));
        let castlings = match piece {
            Piece::King => self.castling_targets(src),
            _ => Bitboard::EMPTY,
        };
        for dst in targets | castlings {
            let flags = if castlings.has(dst) {
                match dst.file().index() > src.file().index() {
                    true => MoveFlags::KINGSIDE_CASTLE,
                    false => MoveFlags::QUEENSIDE_CASTLE,
                }
            } else if self.board.r.get(dst).is_occupied() {
                MoveFlags::CAPTURE
            } else {
                MoveFlags::NONE
            };
            self.dst.push(Move::with_flags(src, dst, None, flags))?;
        }
        Ok(())
    }

    pub fn gen_all(&mut self) -> Result<(), P::Err> {
        for src in Coord::iter() {
            self.gen_from(src)?;
        }
        Ok(())
    }
}

pub mod semilegal {
    use super::{MoveGen, MoveList, MovePush};
    use crate::board::Board;
    use crate::types::Coord;

    /// Pushes all the pseudo-legal moves into `dst`
    pub fn gen_all_into<P: MovePush>(b: &Board, dst: &mut P) {
        let _ = MoveGen::new(b, dst).gen_all();
    }

    /// Returns all the pseudo-legal moves
    pub fn gen_all(b: &Board) -> MoveList {
        let mut res = MoveList::new();
        gen_all_into(b, &mut res);
        res
    }

    /// Pushes all the pseudo-legal moves of the piece on `src` into `dst`
    pub fn gen_from_into<P: MovePush>(b: &Board, src: Coord, dst: &mut P) {
        let _ = MoveGen::new(b, dst).gen_from(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn uci_list(moves: &MoveList) -> Vec<String> {
        moves.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_initial() {
        let moves = semilegal::gen_all(&Board::initial());
        assert_eq!(
            uci_list(&moves),
            [
                "b1a3", "b1c3", "g1f3", "g1h3", "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4",
                "d2d3", "d2d4", "e2e3", "e2e4", "f2f3", "f2f4", "g2g3", "g2g4", "h2h3", "h2h4",
            ]
        );
        let doubles = moves.iter().filter(|m| m.is_double_push()).count();
        assert_eq!(doubles, 8);
    }

    #[test]
    fn test_sorted() {
        let b = Board::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let moves = semilegal::gen_all(&b);
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
        assert!(moves.contains(&Move::from_castling(Color::White, CastlingSide::King)));
        assert!(moves.contains(&Move::from_castling(Color::White, CastlingSide::Queen)));
    }

    #[test]
    fn test_promote_order() {
        let b = Board::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut moves = MoveList::new();
        semilegal::gen_from_into(&b, Coord::from_str("a7").unwrap(), &mut moves);
        assert_eq!(
            uci_list(&moves),
            ["a7a8n", "a7a8b", "a7a8r", "a7a8q", "a7b8n", "a7b8b", "a7b8r", "a7b8q"]
        );
        assert!(moves[4].is_capture());
        assert!(!moves[0].is_capture());
        assert!(moves.iter().all(|m| m.flags().contains(MoveFlags::PROMOTION)));
    }

    #[test]
    fn test_enpassant() {
        let b = Board::from_fen("4k3/8/8/2PpP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = semilegal::gen_all(&b);
        let eps: Vec<_> = moves
            .iter()
            .filter(|m| m.is_enpassant())
            .map(|m| m.to_string())
            .collect();
        assert_eq!(eps, ["c5d6", "e5d6"]);

        // The target is set after every double push, but only adjacent pawns can use it
        let b = Board::from_fen("4k3/8/8/3p4/8/8/P7/4K3 w - d6 0 1").unwrap();
        assert!(semilegal::gen_all(&b).iter().all(|m| !m.is_enpassant()));
    }

    #[test]
    fn test_castling_blocked() {
        // Castling through an attacked square is not generated
        let b = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = semilegal::gen_all(&b);
        assert!(!moves.contains(&Move::from_castling(Color::White, CastlingSide::King)));
        assert!(moves.contains(&Move::from_castling(Color::White, CastlingSide::Queen)));

        // Pieces between the king and the rook
        let b = Board::from_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
        let moves = semilegal::gen_all(&b);
        assert!(!moves.contains(&Move::from_castling(Color::White, CastlingSide::King)));
        assert!(!moves.contains(&Move::from_castling(Color::White, CastlingSide::Queen)));

        // No castling out of check
        let b = Board::from_fen("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1").unwrap();
        let moves = semilegal::gen_all(&b);
        assert!(!moves.contains(&Move::from_castling(Color::White, CastlingSide::Queen)));
    }

    #[test]
    fn test_gen_from_other_side() {
        let b = Board::initial();
        let mut moves = MoveList::new();
        semilegal::gen_from_into(&b, Coord::from_str("e7").unwrap(), &mut moves);
        semilegal::gen_from_into(&b, Coord::from_str("e4").unwrap(), &mut moves);
        assert!(moves.is_empty());
    }
}
