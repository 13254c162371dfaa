//! Information about a move in a given position

use super::base::{self, Move, MoveFlags, ValidateError};
use super::san;
use crate::board::Board;
use crate::types::Piece;

/// Summary of a legal move: what moves, what is captured and what the move leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInfo {
    /// The move itself, with all the flags set
    pub mv: Move,
    /// Kind of the moving piece
    pub piece: Piece,
    /// Kind of the captured piece, if any. For enpassant, this is a pawn.
    pub captured: Option<Piece>,
    /// Whether the move gives check
    pub is_check: bool,
    /// Whether the move gives checkmate
    pub is_checkmate: bool,
    /// The move in SAN
    pub san: san::Move,
}

impl MoveInfo {
    /// Collects the information about `mv` in position `b`
    pub fn new(mv: Move, b: &Board) -> Result<MoveInfo, ValidateError> {
        let mv = mv.validate(b)?;
        let piece = b.get(mv.src()).piece().ok_or(ValidateError::NotSemiLegal)?;
        let captured = if mv.is_enpassant() {
            Some(Piece::Pawn)
        } else {
            b.get(mv.dst()).piece()
        };

        let mut after = b.clone();
        let _ = base::make_move_unchecked(&mut after, mv);
        let is_check = after.is_check();
        let is_checkmate = is_check && !after.has_legal_moves();

        Ok(MoveInfo {
            mv,
            piece,
            captured,
            is_check,
            is_checkmate,
            san: san::Move::from_move(mv, b)?,
        })
    }

    #[inline]
    pub fn flags(&self) -> MoveFlags {
        self.mv.flags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    #[test]
    fn test_capture() {
        let b = Board::from_fen("3K4/3p4/8/3PpP2/8/5p2/6P1/2k5 w - e6 0 1").unwrap();
        let info = Move::from_uci("d5e6").unwrap().info(&b).unwrap();
        assert_eq!(info.piece, Piece::Pawn);
        assert_eq!(info.captured, Some(Piece::Pawn));
        assert!(info.flags().contains(MoveFlags::EN_PASSANT | MoveFlags::CAPTURE));
        assert!(!info.is_check);
        assert_eq!(info.san.to_string(), "dxe6");

        let info = Move::from_uci("g2f3").unwrap().info(&b).unwrap();
        assert_eq!(info.captured, Some(Piece::Pawn));
        assert!(!info.flags().contains(MoveFlags::EN_PASSANT));
    }

    #[test]
    fn test_mate() {
        let b = Board::from_fen("1r5k/8/8/8/8/6p1/r7/5K2 b - - 0 1").unwrap();
        let info = Move::from_uci("b8b1").unwrap().info(&b).unwrap();
        assert_eq!(info.piece, Piece::Rook);
        assert_eq!(info.captured, None);
        assert!(info.is_check);
        assert!(info.is_checkmate);
        assert_eq!(info.san.to_string(), "Rb1#");

        let info = Move::from_uci("g3g2").unwrap().info(&b).unwrap();
        assert!(info.is_check);
        assert!(!info.is_checkmate);
    }

    #[test]
    fn test_illegal() {
        let b = Board::initial();
        assert_eq!(
            Move::from_uci("e2e5").unwrap().info(&b),
            Err(ValidateError::NotSemiLegal)
        );
    }
}
