use super::{info::MoveInfo, san, uci};
use crate::board::Board;
use crate::types::{CastlingSide, Cell, Color, Coord, Piece};
use crate::{castling, geometry, legal, movegen, zobrist};

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::BitOr;
use std::str::FromStr;

use thiserror::Error;

/// Piece a pawn can be promoted to
///
/// The variants are ordered as moves are ordered in the generated move lists.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromotePiece {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotePiece {
    /// Returns an iterator over all the promote pieces, from knight to queen
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            PromotePiece::Knight,
            PromotePiece::Bishop,
            PromotePiece::Rook,
            PromotePiece::Queen,
        ]
        .into_iter()
    }

    /// Converts `piece` into a promote piece, if a pawn can be promoted to it
    pub fn from_piece(piece: Piece) -> Option<Self> {
        match piece {
            Piece::Knight => Some(PromotePiece::Knight),
            Piece::Bishop => Some(PromotePiece::Bishop),
            Piece::Rook => Some(PromotePiece::Rook),
            Piece::Queen => Some(PromotePiece::Queen),
            Piece::Pawn | Piece::King => None,
        }
    }

    /// Lowercase letter used in UCI notation
    pub fn as_char(&self) -> char {
        Piece::from(*self).as_char()
    }
}

impl From<PromotePiece> for Piece {
    #[inline]
    fn from(p: PromotePiece) -> Piece {
        match p {
            PromotePiece::Knight => Piece::Knight,
            PromotePiece::Bishop => Piece::Bishop,
            PromotePiece::Rook => Piece::Rook,
            PromotePiece::Queen => Piece::Queen,
        }
    }
}

/// Set of properties of a move
///
/// The flags are filled by the move generator. A move created by hand with [`Move::new()`] has
/// no flags, use [`Move::validate()`] to get the move with proper flags.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1);
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags(2);
    pub const EN_PASSANT: MoveFlags = MoveFlags(4);
    pub const KINGSIDE_CASTLE: MoveFlags = MoveFlags(8);
    pub const QUEENSIDE_CASTLE: MoveFlags = MoveFlags(16);
    pub const PROMOTION: MoveFlags = MoveFlags(32);

    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: MoveFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for MoveFlags {
    type Output = MoveFlags;

    #[inline]
    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for MoveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 6] = [
            "CAPTURE",
            "DOUBLE_PUSH",
            "EN_PASSANT",
            "KINGSIDE_CASTLE",
            "QUEENSIDE_CASTLE",
            "PROMOTION",
        ];
        let mut list = f.debug_set();
        for (i, name) in NAMES.iter().enumerate() {
            if self.0 & (1 << i) != 0 {
                list.entry(&format_args!("{}", name));
            }
        }
        list.finish()
    }
}

/// Chess move
///
/// The move is identified by its source, destination and promote piece. Two moves with the
/// same identity are equal even if their [`MoveFlags`] differ, so a hand-made move compares
/// equal to the generated one.
///
/// Moves are ordered by source square, then by destination square, then by promote piece.
#[derive(Debug, Copy, Clone)]
pub struct Move {
    src: Coord,
    dst: Coord,
    promote: Option<PromotePiece>,
    flags: MoveFlags,
}

/// Error indicating that the move is invalid in the given position
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq, Hash)]
pub enum ValidateError {
    #[error("move is not semi-legal")]
    NotSemiLegal,
    #[error("move is not legal")]
    NotLegal,
}

impl Move {
    /// Creates a move request from `src` to `dst`
    ///
    /// The resulting move has no flags. It can be applied to a board with
    /// [`Make::make()`](super::Make::make), which validates it first.
    #[inline]
    pub const fn new(src: Coord, dst: Coord, promote: Option<PromotePiece>) -> Move {
        Move {
            src,
            dst,
            promote,
            flags: MoveFlags::NONE,
        }
    }

    #[inline]
    pub(crate) const fn with_flags(
        src: Coord,
        dst: Coord,
        promote: Option<PromotePiece>,
        flags: MoveFlags,
    ) -> Move {
        Move {
            src,
            dst,
            promote,
            flags,
        }
    }

    /// Creates a castling move for color `c` and side `s`
    #[inline]
    pub const fn from_castling(c: Color, s: CastlingSide) -> Move {
        let flags = match s {
            CastlingSide::King => MoveFlags::KINGSIDE_CASTLE,
            CastlingSide::Queen => MoveFlags::QUEENSIDE_CASTLE,
        };
        Move::with_flags(castling::king_src(c), castling::king_dst(c, s), None, flags)
    }

    /// Parses a move request from UCI string
    ///
    /// The move is not checked against any position, so it has no flags.
    pub fn from_uci(s: &str) -> Result<Move, uci::RawParseError> {
        Ok(uci::Move::from_str(s)?.into_request())
    }

    /// Parses a semi-legal move from UCI string in position `b`
    pub fn from_uci_semilegal(s: &str, b: &Board) -> Result<Move, uci::ParseError> {
        Ok(Move::from_uci(s)?.semi_validate(b)?)
    }

    /// Parses a legal move from UCI string in position `b`
    pub fn from_uci_legal(s: &str, b: &Board) -> Result<Move, uci::ParseError> {
        Ok(Move::from_uci(s)?.validate(b)?)
    }

    /// Parses a legal move from SAN string in position `b`
    pub fn from_san(s: &str, b: &Board) -> Result<Move, san::ParseError> {
        Ok(san::Move::from_str(s)?.into_move(b)?)
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        self.promote
    }

    #[inline]
    pub const fn flags(&self) -> MoveFlags {
        self.flags
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }

    #[inline]
    pub const fn is_double_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PUSH)
    }

    #[inline]
    pub const fn is_enpassant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promote.is_some()
    }

    #[inline]
    pub const fn is_castling(&self) -> bool {
        self.flags
            .intersects(MoveFlags(MoveFlags::KINGSIDE_CASTLE.0 | MoveFlags::QUEENSIDE_CASTLE.0))
    }

    /// Returns the castling side if the move is castling
    #[inline]
    pub const fn castling_side(&self) -> Option<CastlingSide> {
        if self.flags.contains(MoveFlags::KINGSIDE_CASTLE) {
            Some(CastlingSide::King)
        } else if self.flags.contains(MoveFlags::QUEENSIDE_CASTLE) {
            Some(CastlingSide::Queen)
        } else {
            None
        }
    }

    /// Returns `true` if the move is semi-legal in position `b`
    ///
    /// Semi-legal moves follow the movement rules of the pieces, but may leave the king
    /// under attack.
    pub fn is_semilegal(&self, b: &Board) -> bool {
        self.semi_validate(b).is_ok()
    }

    /// Returns `true` if the move is legal in position `b`
    pub fn is_legal(&self, b: &Board) -> bool {
        self.validate(b).is_ok()
    }

    /// Checks that the move is semi-legal in position `b`
    ///
    /// On success, returns the move as produced by the move generator, with all the flags set.
    pub fn semi_validate(&self, b: &Board) -> Result<Move, ValidateError> {
        let mut candidates = movegen::MoveList::new();
        movegen::semilegal::gen_from_into(b, self.src, &mut candidates);
        candidates
            .iter()
            .find(|mv| *mv == self)
            .copied()
            .ok_or(ValidateError::NotSemiLegal)
    }

    /// Checks that the move is legal in position `b`
    ///
    /// On success, returns the move as produced by the move generator, with all the flags set.
    pub fn validate(&self, b: &Board) -> Result<Move, ValidateError> {
        let mv = self.semi_validate(b)?;
        match legal::is_legal(b, mv) {
            true => Ok(mv),
            false => Err(ValidateError::NotLegal),
        }
    }

    /// Converts this move into a parsed UCI representation
    #[inline]
    pub fn uci(&self) -> uci::Move {
        (*self).into()
    }

    /// Converts this move into a parsed SAN representation in given position `b`
    ///
    /// This function returns an error if the move is not legal in the given position.
    pub fn san(&self, b: &Board) -> Result<san::Move, ValidateError> {
        san::Move::from_move(*self, b)
    }

    /// Collects the information about this move in position `b`
    ///
    /// This function returns an error if the move is not legal in the given position.
    pub fn info(&self, b: &Board) -> Result<MoveInfo, ValidateError> {
        MoveInfo::new(*self, b)
    }

    #[inline]
    fn key(&self) -> (Coord, Coord, Option<PromotePiece>) {
        (self.src, self.dst, self.promote)
    }
}

impl PartialEq for Move {
    #[inline]
    fn eq(&self, other: &Move) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Move {}

impl Hash for Move {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl PartialOrd for Move {
    #[inline]
    fn partial_cmp(&self, other: &Move) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Move {
    #[inline]
    fn cmp(&self, other: &Move) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        fmt::Display::fmt(&self.uci(), f)
    }
}

/// Metadata necessary to undo the applied move
#[derive(Debug, Copy, Clone)]
pub struct RawUndo {
    hash: u64,
    captured: Cell,
    castling: crate::types::CastlingRights,
    ep_target: Option<Coord>,
    move_counter: u16,
    move_number: u16,
}

/// Returns the square of the piece captured by `mv`, made by color `c`
#[inline]
fn capture_square(c: Color, mv: Move) -> Coord {
    if mv.is_enpassant() {
        mv.dst.add(-geometry::pawn_forward_delta(c))
    } else {
        mv.dst
    }
}

/// Makes move `mv` on board `b` without any checks
///
/// The move must be semi-legal and carry the flags set by the move generator, i.e. it must be
/// obtained from [`movegen`] or from [`Move::semi_validate()`] on the same position. Otherwise
/// the board contents become meaningless.
///
/// If the move is not legal, the board is left with the opponent's king under attack. It must
/// be reverted with [`unmake_move_unchecked()`] before doing anything else.
pub fn make_move_unchecked(b: &mut Board, mv: Move) -> RawUndo {
    let side = b.r.side;
    let src_cell = b.r.get(mv.src);
    let capture_at = capture_square(side, mv);
    let captured = b.r.get(capture_at);
    let undo = RawUndo {
        hash: b.hash,
        captured,
        castling: b.r.castling,
        ep_target: b.r.ep_target,
        move_counter: b.r.move_counter,
        move_number: b.r.move_number,
    };

    let mut hash = b.hash ^ zobrist::enpassant_term(&b.r) ^ zobrist::castling(b.r.castling);

    hash ^= zobrist::pieces(captured, capture_at);
    b.r.put(capture_at, Cell::EMPTY);

    let placed = match mv.promote {
        Some(p) => Cell::from_parts(side, p.into()),
        None => src_cell,
    };
    hash ^= zobrist::pieces(src_cell, mv.src) ^ zobrist::pieces(placed, mv.dst);
    b.r.put(mv.src, Cell::EMPTY);
    b.r.put(mv.dst, placed);

    if let Some(s) = mv.castling_side() {
        let (rook_src, rook_dst) = castling::rook_move(side, s);
        let rook = Cell::from_parts(side, Piece::Rook);
        hash ^= zobrist::pieces(rook, rook_src) ^ zobrist::pieces(rook, rook_dst);
        b.r.put(rook_src, Cell::EMPTY);
        b.r.put(rook_dst, rook);
    }

    let piece = src_cell.piece();
    if piece == Some(Piece::King) {
        b.kings[side.index()] = mv.dst;
    }

    castling::update_rights(&mut b.r.castling, mv.src);
    castling::update_rights(&mut b.r.castling, mv.dst);
    b.r.ep_target = match mv.is_double_push() {
        true => Some(mv.src.add(geometry::pawn_forward_delta(side))),
        false => None,
    };
    if captured.is_occupied() || piece == Some(Piece::Pawn) {
        b.r.move_counter = 0;
    } else {
        b.r.move_counter = b.r.move_counter.saturating_add(1);
    }
    if side == Color::Black {
        b.r.move_number = b.r.move_number.saturating_add(1);
    }
    b.r.side = side.inv();

    hash ^= zobrist::castling(b.r.castling) ^ zobrist::MOVE_SIDE ^ zobrist::enpassant_term(&b.r);
    b.hash = hash;

    #[cfg(feature = "selftest")]
    b.selftest();

    undo
}

/// Reverts move `mv` made by [`make_move_unchecked()`]
///
/// `u` must be the value returned by [`make_move_unchecked()`] for this move, and the board must
/// not be changed since then.
pub fn unmake_move_unchecked(b: &mut Board, mv: Move, u: RawUndo) {
    let side = b.r.side.inv();
    let src_cell = match mv.promote {
        Some(_) => Cell::from_parts(side, Piece::Pawn),
        None => b.r.get(mv.dst),
    };

    b.r.put(mv.dst, Cell::EMPTY);
    b.r.put(mv.src, src_cell);
    b.r.put(capture_square(side, mv), u.captured);

    if let Some(s) = mv.castling_side() {
        let (rook_src, rook_dst) = castling::rook_move(side, s);
        b.r.put(rook_dst, Cell::EMPTY);
        b.r.put(rook_src, Cell::from_parts(side, Piece::Rook));
    }

    if src_cell.piece() == Some(Piece::King) {
        b.kings[side.index()] = mv.src;
    }

    b.hash = u.hash;
    b.r.castling = u.castling;
    b.r.ep_target = u.ep_target;
    b.r.move_counter = u.move_counter;
    b.r.move_number = u.move_number;
    b.r.side = side;

    #[cfg(feature = "selftest")]
    b.selftest();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    fn coord(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn apply(b: &mut Board, uci: &str) -> Move {
        let mv = Move::from_uci_legal(uci, b).unwrap();
        let _ = make_move_unchecked(b, mv);
        assert_eq!(b.zobrist_hash(), b.raw().zobrist_hash());
        mv
    }

    #[test]
    fn test_notation() {
        let b = Board::initial();
        let mv = Move::new(coord("g1"), coord("f3"), None);
        assert_eq!(mv.to_string(), "g1f3");
        assert_eq!(mv.uci().to_string(), "g1f3");
        assert_eq!(mv.san(&b).unwrap().to_string(), "Nf3");
        assert_eq!(
            Move::new(coord("g1"), coord("g3"), None).san(&b),
            Err(ValidateError::NotSemiLegal)
        );
    }

    #[test]
    fn test_simple() {
        let mut b = Board::initial();
        for (mv_str, fen_str) in [
            (
                "e2e4",
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            ),
            (
                "b8c6",
                "r1bqkbnr/pppppppp/2n5/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2",
            ),
            (
                "g1f3",
                "r1bqkbnr/pppppppp/2n5/8/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 2 2",
            ),
            (
                "e7e5",
                "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq e6 0 3",
            ),
            (
                "f1b5",
                "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 1 3",
            ),
            (
                "g8f6",
                "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 2 4",
            ),
            (
                "e1g1",
                "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 3 4",
            ),
            (
                "f6e4",
                "r1bqkb1r/pppp1ppp/2n5/1B2p3/4n3/5N2/PPPP1PPP/RNBQ1RK1 w kq - 0 5",
            ),
        ] {
            apply(&mut b, mv_str);
            assert_eq!(b.as_fen(), fen_str);
            assert_eq!(b, Board::from_fen(fen_str).unwrap());
            assert_eq!(b.zobrist_hash(), Board::from_fen(fen_str).unwrap().zobrist_hash());
        }
        assert_eq!(b.king_pos(Color::White), coord("g1"));
    }

    #[test]
    fn test_flags() {
        let b = Board::from_fen(
            "r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQK2R w KQkq - 0 6",
        )
        .unwrap();
        let castle = Move::new(coord("e1"), coord("g1"), None).validate(&b).unwrap();
        assert_eq!(castle.flags(), MoveFlags::KINGSIDE_CASTLE);
        assert_eq!(castle.castling_side(), Some(CastlingSide::King));
        assert_eq!(castle, Move::from_castling(Color::White, CastlingSide::King));

        let capture = Move::new(coord("f3"), coord("e5"), None).validate(&b).unwrap();
        assert_eq!(capture.flags(), MoveFlags::CAPTURE);

        let double = Move::new(coord("b2"), coord("b4"), None).validate(&b).unwrap();
        assert_eq!(double.flags(), MoveFlags::DOUBLE_PUSH);

        let quiet = Move::new(coord("c3"), coord("c4"), None).validate(&b).unwrap();
        assert!(quiet.flags().is_empty());
    }

    #[test]
    fn test_promote() {
        let b = Board::from_fen("1b1b1K2/2P5/8/8/7k/8/8/8 w - - 0 1").unwrap();
        for (mv_str, fen_str, flags) in [
            (
                "c7c8q",
                "1bQb1K2/8/8/8/7k/8/8/8 b - - 0 1",
                MoveFlags::PROMOTION,
            ),
            (
                "c7b8n",
                "1N1b1K2/8/8/8/7k/8/8/8 b - - 0 1",
                MoveFlags::PROMOTION | MoveFlags::CAPTURE,
            ),
            (
                "c7d8r",
                "1b1R1K2/8/8/8/7k/8/8/8 b - - 0 1",
                MoveFlags::PROMOTION | MoveFlags::CAPTURE,
            ),
        ] {
            let mut cloned = b.clone();
            let mv = apply(&mut cloned, mv_str);
            assert_eq!(mv.flags(), flags);
            assert_eq!(cloned.as_fen(), fen_str);
        }
        assert_eq!(
            Move::from_uci_legal("c7c8", &b),
            Err(uci::ParseError::Validate(ValidateError::NotSemiLegal))
        );
    }

    #[test]
    fn test_undo() {
        let b_initial = Board::from_fen(
            "r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQK2R w KQkq - 0 6",
        )
        .unwrap();
        for mv_str in ["e1g1", "f3e5", "b2b4", "c3c4", "b5c6", "h2h3"] {
            let mut b = b_initial.clone();
            let mv = Move::from_uci_legal(mv_str, &b).unwrap();
            let u = make_move_unchecked(&mut b, mv);
            assert_ne!(b, b_initial);
            unmake_move_unchecked(&mut b, mv, u);
            assert_eq!(b, b_initial);
            assert_eq!(b.zobrist_hash(), b_initial.zobrist_hash());
            assert_eq!(b.king_pos(Color::White), coord("e1"));
        }
    }

    #[test]
    fn test_counter_limits() {
        let b_initial = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 65535 65535").unwrap();
        let mut b = b_initial.clone();
        let mv = Move::from_uci_legal("e8e7", &b).unwrap();
        let u = make_move_unchecked(&mut b, mv);
        assert_eq!(b.move_number(), 65535);
        assert_eq!(b.move_counter(), 65535);
        assert_eq!(b.side(), Color::White);
        unmake_move_unchecked(&mut b, mv, u);
        assert_eq!(b, b_initial);
        assert_eq!(b.as_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 65535 65535");

        let b = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 65535").unwrap();
        let b = b.make_move(Move::from_uci("e8d8").unwrap()).unwrap();
        assert_eq!(b.as_fen(), "3k4/8/8/8/8/8/8/4K3 w - - 1 65535");
    }

    #[test]
    fn test_pawns() {
        let b = Board::from_fen("3K4/3p4/8/3PpP2/8/5p2/6P1/2k5 w - e6 0 1").unwrap();
        for (mv_str, fen_str) in [
            ("g2g3", "3K4/3p4/8/3PpP2/8/5pP1/8/2k5 b - - 0 1"),
            ("g2g4", "3K4/3p4/8/3PpP2/6P1/5p2/8/2k5 b - g3 0 1"),
            ("g2f3", "3K4/3p4/8/3PpP2/8/5P2/8/2k5 b - - 0 1"),
            ("d5e6", "3K4/3p4/4P3/5P2/8/5p2/6P1/2k5 b - - 0 1"),
            ("f5e6", "3K4/3p4/4P3/3P4/8/5p2/6P1/2k5 b - - 0 1"),
        ] {
            let mut cloned = b.clone();
            let mv = Move::from_uci_legal(mv_str, &cloned).unwrap();
            let u = make_move_unchecked(&mut cloned, mv);
            assert_eq!(cloned.as_fen(), fen_str);
            assert_eq!(cloned.zobrist_hash(), cloned.raw().zobrist_hash());
            unmake_move_unchecked(&mut cloned, mv, u);
            assert_eq!(cloned, b);
        }

        let ep = Move::from_uci_legal("d5e6", &b).unwrap();
        assert!(ep.is_enpassant());
        assert!(ep.is_capture());
        assert!(!Move::from_uci_legal("g2g3", &b).unwrap().is_capture());
        assert!(Move::from_uci_legal("g2g4", &b).unwrap().is_double_push());
    }

    #[test]
    fn test_legal() {
        let b = Board::from_fen(
            "r1bqk2r/ppp2ppp/2np1n2/1Bb1p3/4P3/2PP1N2/PP3PPP/RNBQK2R w KQkq - 0 6",
        )
        .unwrap();
        for mv_str in ["e1c1", "b5e8", "a3a4", "e1d1", "c3c5", "a2a5"] {
            let mv = Move::from_uci(mv_str).unwrap();
            assert!(!mv.is_semilegal(&b), "{} is semi-legal", mv_str);
            assert_eq!(mv.validate(&b), Err(ValidateError::NotSemiLegal));
        }

        let b = Board::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let mv = Move::new(
            Coord::from_parts(File::E, Rank::R2),
            Coord::from_parts(File::D, Rank::R3),
            None,
        );
        assert!(mv.is_semilegal(&b));
        assert!(!mv.is_legal(&b));
        assert_eq!(mv.validate(&b), Err(ValidateError::NotLegal));
    }

    #[test]
    fn test_castling_rights_update() {
        let mut b = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        apply(&mut b, "a1a8");
        assert_eq!(b.castling().to_string(), "Kk");
        apply(&mut b, "e8d7");
        assert_eq!(b.castling().to_string(), "K");
        apply(&mut b, "h1h2");
        assert_eq!(b.castling().to_string(), "-");
    }

    #[test]
    fn test_ordering() {
        let a = Move::new(coord("a7"), coord("a8"), Some(PromotePiece::Knight));
        let b = Move::new(coord("a7"), coord("a8"), Some(PromotePiece::Queen));
        let c = Move::new(coord("a7"), coord("b8"), None);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(
            Move::with_flags(coord("a7"), coord("b8"), None, MoveFlags::CAPTURE),
            c
        );
    }
}
