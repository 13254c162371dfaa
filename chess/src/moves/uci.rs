//! Utilities to work with moves in UCI format

use super::base::{self, PromotePiece, ValidateError};
use crate::board::Board;
use crate::types::{Coord, CoordParseError, Piece};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error in the text of a UCI move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Length is not 4 or 5, or the string is not ASCII
    #[error("UCI move must have 4 or 5 ASCII chars")]
    BadLength,
    #[error("source square: {0}")]
    BadSrc(CoordParseError),
    #[error("destination square: {0}")]
    BadDst(CoordParseError),
    #[error("cannot promote to {0:?}")]
    BadPromote(char),
}

/// Error turning a UCI string into a legal move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("malformed move: {0}")]
    Parse(#[from] RawParseError),
    #[error("illegal move: {0}")]
    Validate(#[from] ValidateError),
}

/// Move in UCI text form, like `e2e4` or `b7b8q`
///
/// It is not bound to any position until converted with [`Move::into_move()`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub src: Coord,
    pub dst: Coord,
    pub promote: Option<PromotePiece>,
}

impl Move {
    /// Converts the UCI move into a move request, without looking at any position
    #[inline]
    pub fn into_request(self) -> base::Move {
        base::Move::new(self.src, self.dst, self.promote)
    }

    /// Converts the UCI move into a legal [`moves::Move`](super::Move) in position `b`
    pub fn into_move(self, b: &Board) -> Result<base::Move, ValidateError> {
        self.into_request().validate(b)
    }
}

impl From<base::Move> for Move {
    #[inline]
    fn from(mv: base::Move) -> Move {
        Move {
            src: mv.src(),
            dst: mv.dst(),
            promote: mv.promote(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !s.is_ascii() {
            return Err(RawParseError::BadLength);
        }
        let (src, dst, promote) = match s.len() {
            4 => (&s[..2], &s[2..], None),
            5 => (&s[..2], &s[2..4], s[4..].chars().next()),
            _ => return Err(RawParseError::BadLength),
        };
        Ok(Move {
            src: src.parse().map_err(RawParseError::BadSrc)?,
            dst: dst.parse().map_err(RawParseError::BadDst)?,
            promote: promote
                .map(|c| {
                    Some(c)
                        .filter(char::is_ascii_lowercase)
                        .and_then(Piece::from_char)
                        .and_then(PromotePiece::from_piece)
                        .ok_or(RawParseError::BadPromote(c))
                })
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_simple() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        let mv = Move::from_str("e2e4").unwrap();
        assert_eq!(
            mv,
            Move {
                src: e2,
                dst: e4,
                promote: None
            }
        );
        let legal = mv.into_move(&Board::initial()).unwrap();
        assert_eq!(legal, base::Move::new(e2, e4, None));
        assert!(legal.is_double_push());
        assert_eq!(legal.to_string(), "e2e4");
    }

    #[test]
    fn test_promote() {
        let mv = Move::from_str("a7a8q").unwrap();
        assert_eq!(mv.promote, Some(PromotePiece::Queen));
        assert_eq!(mv.to_string(), "a7a8q");
        assert_eq!(Move::from_str("a7a8n").unwrap().to_string(), "a7a8n");
    }

    #[test]
    fn test_bad() {
        assert!(matches!(
            Move::from_str("0000"),
            Err(RawParseError::BadSrc(_))
        ));
        assert_eq!(Move::from_str("e2e"), Err(RawParseError::BadLength));
        assert_eq!(Move::from_str("e2e4qq"), Err(RawParseError::BadLength));
        assert!(matches!(
            Move::from_str("i2e4"),
            Err(RawParseError::BadSrc(_))
        ));
        assert!(matches!(
            Move::from_str("e2e9"),
            Err(RawParseError::BadDst(_))
        ));
        assert_eq!(Move::from_str("e7e8k"), Err(RawParseError::BadPromote('k')));
        assert_eq!(Move::from_str("e7e8Q"), Err(RawParseError::BadPromote('Q')));
        assert_eq!(Move::from_str("e2é"), Err(RawParseError::BadLength));
        assert_eq!(
            Move::from_str("e2e5").unwrap().into_move(&Board::initial()),
            Err(ValidateError::NotSemiLegal)
        );
    }
}
