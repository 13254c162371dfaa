//! Legal move generation and legality checks
//!
//! A pseudo-legal move is legal if it doesn't leave the own king under attack. This is checked
//! by making the move on a scratch board, looking at the king and undoing the move. Castling
//! additionally requires that the king doesn't pass through an attacked square.

use crate::board::Board;
use crate::castling;
use crate::movegen::{semilegal, MaybeMovePush, MoveGen, MoveList, MovePush};
use crate::moves::{self, Move};

/// Returns `true` if pseudo-legal move `mv` is legal when made on `scratch`
///
/// `scratch` is left unchanged.
fn is_legal_on(scratch: &mut Board, mv: Move) -> bool {
    if let Some(s) = mv.castling_side() {
        let side = scratch.r.side;
        let by = side.inv();
        if scratch.is_cell_attacked(castling::king_src(side), by)
            || castling::transit(side, s)
                .into_iter()
                .any(|c| scratch.is_cell_attacked(c, by))
        {
            return false;
        }
    }
    let u = moves::make_move_unchecked(scratch, mv);
    let ok = !scratch.is_opponent_king_attacked();
    moves::unmake_move_unchecked(scratch, mv, u);
    ok
}

/// Returns `true` if move `mv` is legal in position `b`
///
/// The move must be pseudo-legal and carry the flags set by the move generator, see
/// [`Move::validate()`] for a check of an arbitrary move.
pub fn is_legal(b: &Board, mv: Move) -> bool {
    is_legal_on(&mut b.clone(), mv)
}

struct LegalFilter<'a, P> {
    board: Board,
    inner: &'a mut P,
}

impl<'a, P: MaybeMovePush> LegalFilter<'a, P> {
    fn new(board: Board, inner: &'a mut P) -> Self {
        Self { board, inner }
    }
}

impl<'a, P: MaybeMovePush> MaybeMovePush for LegalFilter<'a, P> {
    type Err = P::Err;

    fn push(&mut self, mv: Move) -> Result<(), Self::Err> {
        match is_legal_on(&mut self.board, mv) {
            true => self.inner.push(mv),
            false => Ok(()),
        }
    }
}

/// Pushes all the legal moves into `dst`
pub fn gen_all_into<P: MovePush>(b: &Board, dst: &mut P) {
    let mut filter = LegalFilter::new(b.clone(), dst);
    let _ = MoveGen::new(b, &mut filter).gen_all();
}

/// Returns all the legal moves
///
/// The moves are ordered as described in [`movegen`](crate::movegen).
pub fn gen_all(b: &Board) -> MoveList {
    let mut res = MoveList::new();
    gen_all_into(b, &mut res);
    res
}

struct ErrOnFirst;

impl MaybeMovePush for ErrOnFirst {
    type Err = ();

    fn push(&mut self, _mv: Move) -> Result<(), ()> {
        Err(())
    }
}

/// Returns `true` if the side to move has at least one legal move
///
/// Stops at the first legal move found.
pub fn has_legal_moves(b: &Board) -> bool {
    let mut err_on_first = ErrOnFirst;
    let mut filter = LegalFilter::new(b.clone(), &mut err_on_first);
    MoveGen::new(b, &mut filter).gen_all().is_err()
}

/// Counts the leaf nodes of the legal move tree of depth `depth`
pub fn perft(b: &Board, depth: u32) -> u64 {
    fn go(b: &mut Board, depth: u32) -> u64 {
        let list = semilegal::gen_all(b);
        let mut res = 0;
        for &mv in &list {
            if !is_legal_on(b, mv) {
                continue;
            }
            if depth == 1 {
                res += 1;
                continue;
            }
            let u = moves::make_move_unchecked(b, mv);
            res += go(b, depth - 1);
            moves::unmake_move_unchecked(b, mv, u);
        }
        res
    }

    match depth {
        0 => 1,
        _ => go(&mut b.clone(), depth),
    }
}
