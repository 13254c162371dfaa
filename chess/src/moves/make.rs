//! Applying moves given in different forms

use super::base::{self, Move, RawUndo, ValidateError};
use super::{san, uci};
use crate::board::Board;

/// Something that can be applied to a board as a move
///
/// A failed [`Make::make_raw()`] leaves the board unchanged.
pub trait Make {
    type Err;

    /// Applies the move to `board` in place
    ///
    /// Returns the move that was made, with all the flags set, and the data needed to undo it
    /// with [`unmake_move_unchecked()`](super::unmake_move_unchecked).
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err>;

    /// Returns the board after the move, leaving `board` intact
    fn make(&self, board: &Board) -> Result<Board, Self::Err> {
        let mut cloned = board.clone();
        let _ = self.make_raw(&mut cloned)?;
        Ok(cloned)
    }
}

impl Make for Move {
    type Err = ValidateError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err> {
        let mv = self.validate(board)?;
        Ok((mv, base::make_move_unchecked(board, mv)))
    }
}

/// Move given as UCI string
pub struct Uci<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Uci<S> {
    type Err = uci::ParseError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err> {
        let mv = Move::from_uci_legal(self.0.as_ref(), board)?;
        Ok((mv, base::make_move_unchecked(board, mv)))
    }
}

/// Move given as SAN string
pub struct San<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for San<S> {
    type Err = san::ParseError;

    #[inline]
    fn make_raw(&self, board: &mut Board) -> Result<(Move, RawUndo), Self::Err> {
        let mv = Move::from_san(self.0.as_ref(), board)?;
        Ok((mv, base::make_move_unchecked(board, mv)))
    }
}
