//! Standard algebraic notation (SAN)
//!
//! A SAN string names the moving piece and the destination square, plus only as much of the
//! source square as needed to tell the move apart from the other legal moves. So, unlike UCI,
//! it can be parsed and formatted only with respect to a position.

use super::base::{self, PromotePiece, ValidateError};
use crate::board::Board;
use crate::legal;
use crate::types::{CastlingSide, Coord, CoordParseError, File, Piece, Rank};

use std::fmt;
use std::str::{self, FromStr};

use thiserror::Error;

/// Error parsing SAN representation from string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    #[error("string is empty")]
    EmptyString,
    #[error("move too short")]
    TooShort,
    #[error("invalid destination cell")]
    InvalidDst(#[from] CoordParseError),
    /// Something other than source file, source rank and capture sign precedes the destination
    #[error("unexpected characters before destination")]
    ExtraChars,
    #[error("only pawns can promote")]
    PromoteNonPawn,
    #[error("syntax error")]
    Syntax,
}

/// Error converting SAN move into [`moves::Move`](super::Move)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum IntoMoveError {
    /// Castling is not legal
    #[error("invalid move: {0}")]
    Validate(#[from] ValidateError),
    /// Capture sign is put when the move is non-capture
    #[error("got capture sign on a non-capture move")]
    CaptureExpected,
    /// No legal move matches the given SAN
    #[error("no such move")]
    NotFound,
    /// More than one legal move matches the given SAN
    #[error("ambiguous move (candidates are at least `{0}` and `{1}`)")]
    Ambiguity(base::Move, base::Move),
}

/// Error parsing [`moves::Move`](super::Move) from SAN string
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("cannot parse move: {0}")]
    Parse(#[from] RawParseError),
    #[error("cannot convert move: {0}")]
    Convert(#[from] IntoMoveError),
}

/// Parsed SAN string, without check indicator
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Data {
    Castling(CastlingSide),
    /// Pawn move. `src` is the source file, which is given for captures only
    Pawn {
        src: Option<File>,
        dst: Coord,
        promote: Option<PromotePiece>,
    },
    /// Move of a piece other than pawn
    Piece {
        piece: Piece,
        file: Option<File>,
        rank: Option<Rank>,
        is_capture: bool,
        dst: Coord,
    },
}

fn piece_char(piece: Piece) -> char {
    piece.as_char().to_ascii_uppercase()
}

/// Returns which parts of the source square of `mv` are needed to distinguish it from the
/// other legal moves of `piece` to the same destination
fn disambiguate(b: &Board, mv: base::Move, piece: Piece) -> (Option<File>, Option<Rank>) {
    let moves = legal::gen_all(b);
    let mut rivals = moves
        .iter()
        .filter(|m| **m != mv && m.dst() == mv.dst() && b.get(m.src()).piece() == Some(piece))
        .map(|m| m.src())
        .peekable();
    if rivals.peek().is_none() {
        return (None, None);
    }

    let (src_file, src_rank) = (mv.src().file(), mv.src().rank());
    let (same_file, same_rank) = rivals.fold((false, false), |(f, r), src| {
        (f || src.file() == src_file, r || src.rank() == src_rank)
    });
    match (same_file, same_rank) {
        (false, _) => (Some(src_file), None),
        (true, false) => (None, Some(src_rank)),
        (true, true) => (Some(src_file), Some(src_rank)),
    }
}

/// Returns the only legal move satisfying `pred`
fn find_unique(
    b: &Board,
    pred: impl Fn(&base::Move) -> bool,
) -> Result<base::Move, IntoMoveError> {
    let moves = legal::gen_all(b);
    let mut found = moves.iter().copied().filter(|mv| pred(mv));
    match (found.next(), found.next()) {
        (None, _) => Err(IntoMoveError::NotFound),
        (Some(mv), None) => Ok(mv),
        (Some(mv), Some(mv2)) => Err(IntoMoveError::Ambiguity(mv, mv2)),
    }
}

impl Data {
    /// Creates the parsed SAN from move `mv` in position `b`
    ///
    /// Returns an error if the move is not legal.
    pub fn from_move(mv: base::Move, b: &Board) -> Result<Data, ValidateError> {
        let mv = mv.validate(b)?;
        if let Some(side) = mv.castling_side() {
            return Ok(Data::Castling(side));
        }
        let piece = b
            .get(mv.src())
            .piece()
            .ok_or(ValidateError::NotSemiLegal)?;
        if piece == Piece::Pawn {
            return Ok(Data::Pawn {
                src: mv.is_capture().then(|| mv.src().file()),
                dst: mv.dst(),
                promote: mv.promote(),
            });
        }

        let (file, rank) = disambiguate(b, mv, piece);
        Ok(Data::Piece {
            piece,
            file,
            rank,
            is_capture: mv.is_capture(),
            dst: mv.dst(),
        })
    }

    /// Converts the parsed SAN into [`moves::Move`](super::Move) in the position `b`
    pub fn into_move(self, b: &Board) -> Result<base::Move, IntoMoveError> {
        let piece_at = |c: Coord| b.get(c).piece();
        match self {
            Self::Castling(side) => Ok(base::Move::from_castling(b.side(), side).validate(b)?),
            Self::Pawn { src, dst, promote } => {
                let src_file = match src {
                    Some(file) => {
                        if b.get(dst).is_empty() && b.ep_target() != Some(dst) {
                            return Err(IntoMoveError::CaptureExpected);
                        }
                        file
                    }
                    None => dst.file(),
                };
                find_unique(b, |mv| {
                    mv.dst() == dst
                        && mv.src().file() == src_file
                        && mv.promote() == promote
                        && piece_at(mv.src()) == Some(Piece::Pawn)
                })
            }
            Self::Piece {
                piece,
                file,
                rank,
                is_capture,
                dst,
            } => {
                if is_capture && b.get(dst).is_empty() {
                    return Err(IntoMoveError::CaptureExpected);
                }
                find_unique(b, |mv| {
                    mv.dst() == dst
                        && file.map_or(true, |f| mv.src().file() == f)
                        && rank.map_or(true, |r| mv.src().rank() == r)
                        && piece_at(mv.src()) == Some(piece)
                })
            }
        }
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Self::Castling(CastlingSide::King) => write!(f, "O-O"),
            Self::Castling(CastlingSide::Queen) => write!(f, "O-O-O"),
            Self::Pawn { src, dst, promote } => {
                if let Some(src) = src {
                    write!(f, "{}x", src)?;
                }
                write!(f, "{}", dst)?;
                if let Some(p) = promote {
                    write!(f, "={}", piece_char(p.into()))?;
                }
                Ok(())
            }
            Self::Piece {
                piece,
                file,
                rank,
                is_capture,
                dst,
            } => {
                write!(f, "{}", piece_char(piece))?;
                if let Some(file) = file {
                    write!(f, "{}", file)?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank)?;
                }
                if is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)
            }
        }
    }
}

fn parse_promote(b: u8) -> Option<PromotePiece> {
    match b {
        b'N' => Some(PromotePiece::Knight),
        b'B' => Some(PromotePiece::Bishop),
        b'R' => Some(PromotePiece::Rook),
        b'Q' => Some(PromotePiece::Queen),
        _ => None,
    }
}

fn parse_piece(b: u8) -> Option<Piece> {
    match b {
        b'K' => Some(Piece::King),
        _ => parse_promote(b).map(Piece::from),
    }
}

fn parse_pawn(
    prefix: &[u8],
    dst: Coord,
    promote: Option<PromotePiece>,
) -> Result<Data, RawParseError> {
    let src = match prefix {
        [] => None,
        [src, b'x' | b':'] => match File::from_char(char::from(*src)) {
            Some(src) => Some(src),
            None => return Err(RawParseError::Syntax),
        },
        _ => return Err(RawParseError::ExtraChars),
    };
    Ok(Data::Pawn { src, dst, promote })
}

impl FromStr for Data {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Data, Self::Err> {
        match s {
            "" => return Err(RawParseError::EmptyString),
            "O-O" | "0-0" => return Ok(Data::Castling(CastlingSide::King)),
            "O-O-O" | "0-0-0" => return Ok(Data::Castling(CastlingSide::Queen)),
            _ => {}
        }
        if !s.is_ascii() {
            return Err(RawParseError::Syntax);
        }

        // Read from the end: promotion, destination, then whatever precedes the destination
        let mut bytes = s.as_bytes();
        let mut promote = None;
        if let Some((&last, rest)) = bytes.split_last() {
            if let Some(p) = parse_promote(last) {
                promote = Some(p);
                bytes = match rest.split_last() {
                    Some((b'=', before)) => before,
                    _ => rest,
                };
            }
        }
        if bytes.len() < 2 {
            return Err(RawParseError::TooShort);
        }
        let (prefix, dst) = bytes.split_at(bytes.len() - 2);
        let dst = str::from_utf8(dst).map_err(|_| RawParseError::Syntax)?;
        let dst = Coord::from_str(dst)?;

        let piece = match prefix.first().copied().and_then(parse_piece) {
            Some(piece) => piece,
            None => return parse_pawn(prefix, dst, promote),
        };
        if promote.is_some() {
            return Err(RawParseError::PromoteNonPawn);
        }

        let mut rest = &prefix[1..];
        let mut file = None;
        if let Some(f) = rest.first().and_then(|&b| File::from_char(char::from(b))) {
            file = Some(f);
            rest = &rest[1..];
        }
        let mut rank = None;
        if let Some(r) = rest.first().and_then(|&b| Rank::from_char(char::from(b))) {
            rank = Some(r);
            rest = &rest[1..];
        }
        let is_capture = matches!(rest, [b'x' | b':']);
        if !is_capture && !rest.is_empty() {
            return Err(RawParseError::ExtraChars);
        }
        Ok(Data::Piece {
            piece,
            file,
            rank,
            is_capture,
            dst,
        })
    }
}

/// Check indication
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CheckMark {
    /// `+`
    Check,
    /// `#`
    Checkmate,
}

/// Parsed SAN move with a [`CheckMark`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub data: Data,
    pub check: Option<CheckMark>,
}

impl Move {
    /// Creates the parsed SAN from move `mv` in position `b`
    ///
    /// Returns an error if the move is not legal.
    pub fn from_move(mv: base::Move, b: &Board) -> Result<Move, ValidateError> {
        let data = Data::from_move(mv, b)?;
        let mut after = b.clone();
        let _ = base::make_move_unchecked(&mut after, mv.validate(b)?);
        let check = if !after.is_check() {
            None
        } else if after.has_legal_moves() {
            Some(CheckMark::Check)
        } else {
            Some(CheckMark::Checkmate)
        };
        Ok(Move { data, check })
    }

    /// Converts the parsed SAN into [`moves::Move`](super::Move) in the position `b`
    ///
    /// The check mark is not verified.
    pub fn into_move(self, b: &Board) -> Result<base::Move, IntoMoveError> {
        self.data.into_move(b)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.data)?;
        match self.check {
            Some(CheckMark::Check) => write!(f, "+"),
            Some(CheckMark::Checkmate) => write!(f, "#"),
            None => Ok(()),
        }
    }
}

impl FromStr for Move {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        let (s, check) = match s.as_bytes().last() {
            Some(b'+') => (&s[..s.len() - 1], Some(CheckMark::Check)),
            Some(b'#') => (&s[..s.len() - 1], Some(CheckMark::Checkmate)),
            _ => (s, None),
        };
        Ok(Move {
            data: Data::from_str(s)?,
            check,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::moves::base;

    fn uci(s: &str, b: &Board) -> base::Move {
        base::Move::from_uci_legal(s, b).unwrap()
    }

    fn san(s: &str, b: &Board) -> Result<base::Move, ParseError> {
        base::Move::from_san(s, b)
    }

    fn convert_err(e: IntoMoveError) -> Result<base::Move, ParseError> {
        Err(ParseError::Convert(e))
    }

    #[test]
    fn test_game() {
        let mut b = Board::initial();
        for (mv_str, fen_str) in [
            (
                "d4",
                "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 1",
            ),
            (
                "Nf6",
                "rnbqkb1r/pppppppp/5n2/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq - 1 2",
            ),
            (
                "c4",
                "rnbqkb1r/pppppppp/5n2/8/2PP4/8/PP2PPPP/RNBQKBNR b KQkq c3 0 2",
            ),
            (
                "e6",
                "rnbqkb1r/pppp1ppp/4pn2/8/2PP4/8/PP2PPPP/RNBQKBNR w KQkq - 0 3",
            ),
            (
                "Nc3",
                "rnbqkb1r/pppp1ppp/4pn2/8/2PP4/2N5/PP2PPPP/R1BQKBNR b KQkq - 1 3",
            ),
            (
                "Bb4",
                "rnbqk2r/pppp1ppp/4pn2/8/1bPP4/2N5/PP2PPPP/R1BQKBNR w KQkq - 2 4",
            ),
            (
                "Qc2",
                "rnbqk2r/pppp1ppp/4pn2/8/1bPP4/2N5/PPQ1PPPP/R1B1KBNR b KQkq - 3 4",
            ),
            (
                "O-O",
                "rnbq1rk1/pppp1ppp/4pn2/8/1bPP4/2N5/PPQ1PPPP/R1B1KBNR w KQ - 4 5",
            ),
            (
                "a3",
                "rnbq1rk1/pppp1ppp/4pn2/8/1bPP4/P1N5/1PQ1PPPP/R1B1KBNR b KQ - 0 5",
            ),
            (
                "Bxc3+",
                "rnbq1rk1/pppp1ppp/4pn2/8/2PP4/P1b5/1PQ1PPPP/R1B1KBNR w KQ - 0 6",
            ),
            (
                "Qxc3",
                "rnbq1rk1/pppp1ppp/4pn2/8/2PP4/P1Q5/1P2PPPP/R1B1KBNR b KQ - 0 6",
            ),
        ] {
            let m = san(mv_str, &b).unwrap();
            assert_eq!(
                Move::from_str(mv_str).unwrap(),
                Move::from_move(m, &b).unwrap()
            );
            assert_eq!(m.san(&b).unwrap().to_string(), mv_str);
            b = b.make_move(m).unwrap();
            assert_eq!(b.as_fen(), fen_str);
        }
    }

    #[test]
    fn test_pawn_captures() {
        let b = Board::from_str("8/8/1p6/2P5/1p5k/2P5/7K/8 w - - 0 1").unwrap();
        assert_eq!(san("cxb4", &b).unwrap(), uci("c3b4", &b));
        assert_eq!(san("c:b4", &b).unwrap(), uci("c3b4", &b));
        assert_eq!(san("cxb6", &b).unwrap(), uci("c5b6", &b));
        assert_eq!(san("c6", &b).unwrap(), uci("c5c6", &b));
        assert_eq!(san("cxd4", &b), convert_err(IntoMoveError::CaptureExpected));
        assert_eq!(san("dxc4", &b), convert_err(IntoMoveError::CaptureExpected));
        assert_eq!(san("c5", &b), convert_err(IntoMoveError::NotFound));

        let b = Board::from_str("8/8/8/2PpP3/8/8/5k1K/8 w - d6 0 1").unwrap();
        assert_eq!(san("cxd6", &b).unwrap(), uci("c5d6", &b));
        assert_eq!(san("exd6", &b).unwrap(), uci("e5d6", &b));
        assert_eq!(uci("e5d6", &b).san(&b).unwrap().to_string(), "exd6");
    }

    #[test]
    fn test_disambiguation() {
        let b = Board::from_str("k5K1/8/5q2/6n1/8/2P5/5q2/8 b - - 0 1").unwrap();
        for (san_str, uci_str) in [
            ("Qe5", "f6e5"),
            ("Qxc3", "f6c3"),
            ("Qb2", "f2b2"),
            ("Qe3", "f2e3"),
            ("Q2d4", "f2d4"),
            ("Q6d4", "f6d4"),
            ("Qf6d4", "f6d4"),
            ("Qfe5", "f6e5"),
            ("Kaa7", "a8a7"),
        ] {
            assert_eq!(san(san_str, &b).unwrap(), uci(uci_str, &b));
        }
        for san_str in ["Qa1", "Qg5", "Qge5", "Q5e5"] {
            assert_eq!(san(san_str, &b), convert_err(IntoMoveError::NotFound));
        }
        for san_str in ["Qd4", "Qfd4"] {
            assert!(matches!(
                san(san_str, &b),
                Err(ParseError::Convert(IntoMoveError::Ambiguity(_, _)))
            ));
        }
        assert_eq!(uci("f2d4", &b).san(&b).unwrap().to_string(), "Q2d4");
        assert_eq!(uci("f6d4", &b).san(&b).unwrap().to_string(), "Q6d4");
        assert_eq!(uci("f6c3", &b).san(&b).unwrap().to_string(), "Qxc3");
    }

    #[test]
    fn test_capture_sign() {
        let b = Board::from_str("k5K1/8/p4q2/1P4n1/8/2P5/5q2/8 b - - 0 1").unwrap();
        assert_eq!(san("Qxe5", &b), convert_err(IntoMoveError::CaptureExpected));
        assert_eq!(san("Qe5", &b).unwrap(), uci("f6e5", &b));
        assert_eq!(san("Qc3", &b).unwrap(), uci("f6c3", &b));
        assert_eq!(san("Qxc3", &b).unwrap(), uci("f6c3", &b));
        assert_eq!(san("axb5", &b).unwrap(), uci("a6b5", &b));
        assert_eq!(san("axa5", &b), convert_err(IntoMoveError::CaptureExpected));
        assert_eq!(san("a5", &b).unwrap(), uci("a6a5", &b));
    }

    #[test]
    fn test_promotions() {
        let b = Board::from_str("2n2n1n/3P2P1/8/8/8/8/3K1k2/8 w - - 0 1").unwrap();
        for (uci_str, san_str, canonical) in [
            ("d7d8n", "d8N", "d8=N"),
            ("d7c8b", "dxc8B", "dxc8=B"),
            ("g7f8r", "gxf8=R", "gxf8=R+"),
            ("g7h8q", "gxh8=Q", "gxh8=Q"),
        ] {
            let m = san(san_str, &b).unwrap();
            assert_eq!(m, uci(uci_str, &b));
            assert_eq!(m, san(canonical, &b).unwrap());
            assert_eq!(m.san(&b).unwrap().to_string(), canonical);
        }

        let b = Board::from_str("8/3P4/8/8/8/8/3K1k2/8 w - - 0 1").unwrap();
        assert_eq!(san("d8", &b), convert_err(IntoMoveError::NotFound));
        assert_eq!(san("d8=Q", &b).unwrap(), uci("d7d8q", &b));
    }

    #[test]
    fn test_knights() {
        for (fen_str, uci_str, mv_str) in [
            ("4k3/6K1/8/2N5/8/8/8/N7 w - - 0 1", "a1b3", "Nab3"),
            ("4k3/6K1/8/N7/8/8/8/N7 w - - 0 1", "a1b3", "N1b3"),
            ("4k3/6K1/8/8/8/8/8/N1N5 w - - 0 1", "a1b3", "Nab3"),
            ("4k3/6K1/8/N1N5/8/8/8/N1N5 w - - 0 1", "a1b3", "Na1b3"),
            ("5k2/8/5K2/8/3R3R/8/8/b7 w - - 0 1", "h4f4", "Rf4"),
            ("4k3/6K1/8/2N5/8/1r6/8/N7 w - - 0 1", "a1b3", "Naxb3"),
            ("4k3/6K1/8/N1N5/8/1r6/8/N1N5 w - - 0 1", "a1b3", "Na1xb3"),
        ] {
            let b = Board::from_str(fen_str).unwrap();
            let m = san(mv_str, &b).unwrap();
            assert_eq!(m, uci(uci_str, &b));
            assert_eq!(
                Move::from_str(mv_str).unwrap(),
                Move::from_move(m, &b).unwrap()
            );
            assert_eq!(m.san(&b).unwrap().to_string(), mv_str);
        }
    }

    #[test]
    fn test_check() {
        let b = Board::from_str("1r5k/8/8/8/8/6p1/r7/5K2 b - - 0 1").unwrap();
        assert_eq!(uci("g3g2", &b).san(&b).unwrap().to_string(), "g2+");
        assert_eq!(uci("b8b1", &b).san(&b).unwrap().to_string(), "Rb1#");
        for san_str in ["g2", "g2+"] {
            assert_eq!(san(san_str, &b).unwrap(), uci("g3g2", &b));
        }
        for san_str in ["Rb1", "Rb1+", "Rb1#"] {
            assert_eq!(san(san_str, &b).unwrap(), uci("b8b1", &b));
        }
    }

    #[test]
    fn test_castling() {
        let b = Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(san("O-O", &b).unwrap(), uci("e1g1", &b));
        assert_eq!(san("0-0-0", &b).unwrap(), uci("e1c1", &b));
        assert_eq!(uci("e1c1", &b).san(&b).unwrap().to_string(), "O-O-O");

        let b = Board::from_str("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1").unwrap();
        assert!(matches!(
            san("O-O", &b),
            Err(ParseError::Convert(IntoMoveError::Validate(_)))
        ));
    }

    #[test]
    fn test_overspecified() {
        let b = Board::initial();
        for san_str in ["Ngf3", "N1f3", "Ng1f3"] {
            assert_eq!(san(san_str, &b).unwrap(), uci("g1f3", &b));
        }
        assert_eq!(san("Nbf3", &b), convert_err(IntoMoveError::NotFound));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Move::from_str(""), Err(RawParseError::EmptyString));
        assert_eq!(Move::from_str("e"), Err(RawParseError::TooShort));
        assert_eq!(Move::from_str("Nfg1e5"), Err(RawParseError::ExtraChars));
        assert_eq!(Move::from_str("exyd5"), Err(RawParseError::ExtraChars));
        assert_eq!(Move::from_str("Nf8=Q"), Err(RawParseError::PromoteNonPawn));
        assert_eq!(Move::from_str("zxd5"), Err(RawParseError::Syntax));
        assert!(matches!(
            Move::from_str("Nz9"),
            Err(RawParseError::InvalidDst(_))
        ));
    }
}
