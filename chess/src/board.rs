//! Board and related things

use crate::bitboard::Bitboard;
use crate::moves::Make;
use crate::types::{
    self, CastlingRights, CastlingSide, Cell, Color, Coord, DrawReason, File, Outcome, Piece, Rank,
    WinReason,
};
use crate::{attack, bitboard_consts, castling, geometry, legal, movegen, zobrist};

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Reason why a [`RawBoard`] is not a legal position
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// No pawn could have just moved through the enpassant square
    #[error("enpassant target {0} has no matching pawn")]
    InvalidEnpassant(Coord),
    /// King or rook is away from its home square
    #[error("castling {1:?} for {0:?} is not possible")]
    InvalidCastling(Color, CastlingSide),
    /// More than 16 pieces
    #[error("{0:?} has more than 16 pieces")]
    TooManyPieces(Color),
    #[error("{0:?} has no king")]
    NoKing(Color),
    #[error("{0:?} has several kings")]
    TooManyKings(Color),
    /// Pawn on a back rank
    #[error("pawn on back rank square {0}")]
    InvalidPawn(Coord),
    /// The side to move could capture the king
    #[error("side to move attacks the enemy king")]
    OpponentKingAttacked,
}

/// Error in the piece placement field of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    #[error("rank {0} is longer than 8 squares")]
    RankOverflow(Rank),
    #[error("rank {0} is shorter than 8 squares")]
    RankUnderflow(Rank),
    #[error("more than 8 ranks")]
    Overflow,
    #[error("fewer than 8 ranks")]
    Underflow,
    #[error("bad piece char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`RawBoard`] from FEN
///
/// The `No*` variants mean that the field is absent, others mean that it is malformed.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawFenParseError {
    #[error("FEN must be ASCII")]
    NonAscii,
    #[error("empty FEN")]
    NoBoard,
    #[error("piece placement: {0}")]
    Board(#[from] CellsParseError),
    #[error("missing side to move")]
    NoMoveSide,
    #[error("side to move: {0}")]
    MoveSide(#[from] types::ColorParseError),
    #[error("missing castling field")]
    NoCastling,
    #[error("castling field: {0}")]
    Castling(#[from] types::CastlingRightsParseError),
    #[error("missing enpassant field")]
    NoEnpassant,
    #[error("enpassant field: {0}")]
    Enpassant(#[from] types::CoordParseError),
    /// Enpassant square is not on the rank behind a pawn pushed by the opponent
    #[error("enpassant square on rank {0}")]
    InvalidEnpassantRank(Rank),
    #[error("halfmove clock: {0}")]
    MoveCounter(ParseIntError),
    #[error("fullmove number: {0}")]
    MoveNumber(ParseIntError),
    #[error("trailing fields in FEN")]
    ExtraData,
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    #[error("malformed FEN: {0}")]
    Fen(#[from] RawFenParseError),
    #[error("illegal position: {0}")]
    Valid(#[from] ValidateError),
}

/// Position fields as they appear in FEN, without any validation
///
/// Use it to set up a position by hand, then turn it into a [`Board`] with
/// [`Board::try_from()`], which checks that the position is legal.
///
/// # Example
///
/// ```
/// # use chessrules::{RawBoard, Board, Coord, File, Rank, Color, Piece, Cell};
/// #
/// let mut raw = RawBoard::empty();
/// raw.side = Color::Black;
/// raw.move_number = 30;
/// raw.put(Coord::from_parts(File::G, Rank::R1), Cell::from_parts(Color::White, Piece::King));
/// raw.put(Coord::from_parts(File::A, Rank::R7), Cell::from_parts(Color::White, Piece::Rook));
/// raw.put(Coord::from_parts(File::G, Rank::R8), Cell::from_parts(Color::Black, Piece::King));
///
/// let board: Board = raw.try_into().unwrap();
/// assert_eq!(board.as_fen(), "6k1/R7/8/8/8/8/8/6K1 b - - 0 30");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Squares indexed by [`Coord::index()`], from `a1` to `h8`
    pub cells: [Cell; 64],
    pub side: Color,
    pub castling: CastlingRights,
    /// Square skipped by the last double pawn push, set even if no capture is possible
    pub ep_target: Option<Coord>,
    /// Halfmove clock for the 50 and 75 move rules
    pub move_counter: u16,
    /// Fullmove number, incremented after Black moves
    pub move_number: u16,
}

impl RawBoard {
    /// Board without pieces, White to move, fullmove number 1
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [Cell::EMPTY; 64],
            side: Color::White,
            castling: CastlingRights::EMPTY,
            ep_target: None,
            move_counter: 0,
            move_number: 1,
        }
    }

    /// Starting position of a standard game
    pub fn initial() -> RawBoard {
        use Piece::*;
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut res = RawBoard {
            castling: CastlingRights::FULL,
            ..RawBoard::empty()
        };
        for (file, piece) in File::iter().zip(BACK_RANK) {
            for (color, back, front) in [
                (Color::White, Rank::R1, Rank::R2),
                (Color::Black, Rank::R8, Rank::R7),
            ] {
                res.put(Coord::from_parts(file, back), Cell::from_parts(color, piece));
                res.put(Coord::from_parts(file, front), Cell::from_parts(color, Pawn));
            }
        }
        res
    }

    /// Same as [`RawBoard::from_str`]
    #[inline]
    pub fn from_fen(fen: &str) -> Result<RawBoard, RawFenParseError> {
        RawBoard::from_str(fen)
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Computes the Polyglot key of the position from scratch
    ///
    /// Counters are not part of the key. The derived [`Hash`] uses every field.
    pub fn zobrist_hash(&self) -> u64 {
        let mut hash = if self.side == Color::White {
            zobrist::MOVE_SIDE
        } else {
            0
        };
        hash ^= zobrist::enpassant_term(self);
        hash ^= zobrist::castling(self.castling);
        for (coord, cell) in Coord::iter().zip(self.cells.iter()) {
            hash ^= zobrist::pieces(*cell, coord);
        }
        hash
    }

    /// Finds the only king of color `c`
    pub fn king_pos(&self, c: Color) -> Result<Coord, ValidateError> {
        let king = Cell::from_parts(c, Piece::King);
        let mut kings = Coord::iter().filter(|&p| self.get(p) == king);
        let pos = kings.next().ok_or(ValidateError::NoKing(c))?;
        if kings.next().is_some() {
            return Err(ValidateError::TooManyKings(c));
        }
        Ok(pos)
    }

    /// Returns a [`Display`] wrapper that draws the board as a text diagram
    ///
    /// # Example
    ///
    /// ```
    /// # use chessrules::{RawBoard, board::PrettyStyle};
    /// #
    /// let r = RawBoard::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(r.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    ///
    /// let res = r#"
    /// 8│♜♞♝♛♚♝♞♜
    /// 7│♟♟♟♟♟♟♟♟
    /// 6│........
    /// 5│........
    /// 4│........
    /// 3│........
    /// 2│♙♙♙♙♙♙♙♙
    /// 1│♖♘♗♕♔♗♘♖
    /// ─┼────────
    /// ○│abcdefgh
    /// "#;
    /// assert_eq!(r.pretty(PrettyStyle::Utf8).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { raw: self, style }
    }

    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Legal chess position
///
/// Wraps a [`RawBoard`] that passed validation, together with the king squares and the
/// position key. Both are kept up to date when moves are applied.
///
/// `b.raw().try_into()` gives back `Ok(b)` at all times, except between
/// [`make_move_unchecked`](crate::moves::make_move_unchecked) of a move that leaves the own
/// king attacked and the matching
/// [`unmake_move_unchecked`](crate::moves::unmake_move_unchecked).
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) r: RawBoard,
    pub(crate) hash: u64,
    pub(crate) kings: [Coord; 2],
}

impl Board {
    /// Starting position of a standard game
    pub fn initial() -> Board {
        let r = RawBoard::initial();
        Board {
            hash: r.zobrist_hash(),
            kings: [
                castling::king_src(Color::White),
                castling::king_src(Color::Black),
            ],
            r,
        }
    }

    /// Parses and validates a FEN string
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.r.get(c)
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.r.side
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.r.castling
    }

    #[inline]
    pub fn ep_target(&self) -> Option<Coord> {
        self.r.ep_target
    }

    /// Number of half-moves since the last capture or pawn move
    #[inline]
    pub fn move_counter(&self) -> u16 {
        self.r.move_counter
    }

    #[inline]
    pub fn move_number(&self) -> u16 {
        self.r.move_number
    }

    #[inline]
    pub fn king_pos(&self, c: Color) -> Coord {
        self.kings[c.index()]
    }

    /// Polyglot key of the position, maintained incrementally
    ///
    /// Equal keys mean a repeated position for the repetition rules. See also
    /// [`RawBoard::zobrist_hash()`].
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// Applies `m` and returns the new position, see [`Make`]
    pub fn make_move<M: Make>(&self, m: M) -> Result<Self, M::Err> {
        m.make(self)
    }

    /// Legal moves in generation order
    #[inline]
    pub fn legal_moves(&self) -> movegen::MoveList {
        legal::gen_all(self)
    }

    #[inline]
    pub fn attacks_from(&self, c: Coord) -> Bitboard {
        attack::attacks_from(&self.r, c)
    }

    #[inline]
    pub fn is_cell_attacked(&self, c: Coord, by: Color) -> bool {
        attack::is_cell_attacked(&self.r, c, by)
    }

    /// Squares of the `by` pieces that attack `c`
    #[inline]
    pub fn cell_attackers(&self, c: Coord, by: Color) -> Bitboard {
        attack::cell_attackers(&self.r, c, by)
    }

    /// Checks whether the side to move could capture the enemy king
    ///
    /// Only possible right after an unchecked move that was not legal.
    #[inline]
    pub fn is_opponent_king_attacked(&self) -> bool {
        let c = self.r.side;
        self.is_cell_attacked(self.king_pos(c.inv()), c)
    }

    /// Stops at the first legal move found
    #[inline]
    pub fn has_legal_moves(&self) -> bool {
        legal::has_legal_moves(self)
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        let c = self.r.side;
        self.is_cell_attacked(self.king_pos(c), c.inv())
    }

    /// Enemy pieces attacking the king of the side to move
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        let c = self.r.side;
        self.cell_attackers(self.king_pos(c), c.inv())
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves()
    }

    /// Checkmate, stalemate or insufficient material
    ///
    /// Move counters are ignored here, unlike in [`Board::calc_outcome()`].
    pub fn is_game_over(&self) -> bool {
        self.is_insufficient_material() || !self.has_legal_moves()
    }

    /// Are the king and the `s` rook of color `c` on their home squares?
    pub fn could_have_castling(&self, c: Color, s: CastlingSide) -> bool {
        could_have_castling(&self.r, c, s)
    }

    /// Neither side can ever mate
    ///
    /// Recognized cases are bare kings, a single knight, and any number of bishops all
    /// standing on squares of one color. Two knights are not a draw, since a helpmate exists.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = Bitboard::EMPTY;
        let mut knights = 0;
        for (coord, cell) in Coord::iter().zip(self.r.cells.iter()) {
            match cell.piece() {
                None | Some(Piece::King) => {}
                Some(Piece::Knight) => {
                    knights += 1;
                    minors.set(coord);
                }
                Some(Piece::Bishop) => minors.set(coord),
                Some(_) => return false,
            }
        }

        match knights {
            // Only bishops left, all on the squares of one color
            0 => {
                (minors & bitboard_consts::LIGHT_SQUARES).is_empty()
                    || (minors & bitboard_consts::DARK_SQUARES).is_empty()
            }
            1 => minors.popcount() == 1,
            _ => false,
        }
    }

    /// Outcome of the position alone
    ///
    /// Mate and stalemate come first, then [`Board::calc_draw_simple()`]. Repetitions need
    /// the game history and are handled by [`MoveChain`](crate::chain::MoveChain).
    pub fn calc_outcome(&self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            return if self.is_check() {
                Some(Outcome::Win {
                    side: self.r.side.inv(),
                    reason: WinReason::Checkmate,
                })
            } else {
                Some(Outcome::Draw(DrawReason::Stalemate))
            };
        }

        self.calc_draw_simple().map(Outcome::Draw)
    }

    /// Draws that need no move generation: insufficient material, then the 75 and 50 move
    /// rules
    pub fn calc_draw_simple(&self) -> Option<DrawReason> {
        if self.is_insufficient_material() {
            return Some(DrawReason::InsufficientMaterial);
        }

        if self.r.move_counter >= 150 {
            return Some(DrawReason::Moves75);
        }
        if self.r.move_counter >= 100 {
            return Some(DrawReason::Moves50);
        }

        None
    }

    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.r.pretty(style)
    }

    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    /// Verifies that the cached data matches the position
    #[cfg(feature = "selftest")]
    pub(crate) fn selftest(&self) {
        assert_eq!(self.hash, self.r.zobrist_hash(), "hash mismatch on {}", self.r);
        for c in [Color::White, Color::Black] {
            assert_eq!(
                Ok(self.kings[c.index()]),
                self.r.king_pos(c),
                "king position mismatch on {}",
                self.r
            );
        }
    }
}

impl PartialEq for Board {
    #[inline]
    fn eq(&self, other: &Board) -> bool {
        self.r == other.r
    }
}

impl Eq for Board {}

impl Hash for Board {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state)
    }
}

fn could_have_castling(raw: &RawBoard, c: Color, s: CastlingSide) -> bool {
    let (rook_src, _) = castling::rook_move(c, s);
    raw.get(castling::king_src(c)) == Cell::from_parts(c, Piece::King)
        && raw.get(rook_src) == Cell::from_parts(c, Piece::Rook)
}

/// Returns `true` if `target` can be the square passed over by the pawn that has just moved
fn is_valid_ep_target(raw: &RawBoard, target: Coord) -> bool {
    if target.rank() != geometry::enpassant_dst_rank(raw.side) {
        return false;
    }
    let fwd = geometry::pawn_forward_delta(raw.side);
    raw.get(target.add(-fwd)) == Cell::from_parts(raw.side.inv(), Piece::Pawn)
        && raw.get(target).is_empty()
        && raw.get(target.add(fwd)).is_empty()
}

fn validate(raw: &RawBoard) -> Result<[Coord; 2], ValidateError> {
    let mut counts = [0_usize; 2];
    for color in raw.cells.iter().filter_map(|c| c.color()) {
        counts[color.index()] += 1;
    }
    for color in [Color::White, Color::Black] {
        if counts[color.index()] > 16 {
            return Err(ValidateError::TooManyPieces(color));
        }
    }

    let kings = [raw.king_pos(Color::White)?, raw.king_pos(Color::Black)?];

    let pawn_on_backrank =
        Coord::iter().find(|&p| p.is_backrank() && raw.get(p).piece() == Some(Piece::Pawn));
    if let Some(p) = pawn_on_backrank {
        return Err(ValidateError::InvalidPawn(p));
    }

    let bad_castling = [Color::White, Color::Black]
        .into_iter()
        .flat_map(|c| CastlingSide::iter().map(move |s| (c, s)))
        .find(|&(c, s)| raw.castling.has(c, s) && !could_have_castling(raw, c, s));
    if let Some((c, s)) = bad_castling {
        return Err(ValidateError::InvalidCastling(c, s));
    }

    if let Some(p) = raw.ep_target {
        if !is_valid_ep_target(raw, p) {
            return Err(ValidateError::InvalidEnpassant(p));
        }
    }

    let c = raw.side;
    if attack::is_cell_attacked(raw, kings[c.inv().index()], c) {
        return Err(ValidateError::OpponentKingAttacked);
    }

    Ok(kings)
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: RawBoard) -> Result<Board, ValidateError> {
        match validate(&raw) {
            Ok(kings) => Ok(Board {
                r: raw,
                hash: raw.zobrist_hash(),
                kings,
            }),
            Err(err) => {
                debug!(%err, fen = %raw, "rejected invalid position");
                Err(err)
            }
        }
    }
}

/// Style for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`RawBoard::pretty()`] for more details.
pub struct Pretty<'a> {
    raw: &'a RawBoard,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    let mut cells = [Cell::EMPTY; 64];
    // FEN lists the ranks from the eighth to the first one
    let mut rows = s.split('/');
    for rank in Rank::iter().rev() {
        let row = rows.next().ok_or(CellsParseError::Underflow)?;
        let mut file = 0_usize;
        for ch in row.chars() {
            let (cell, width) = match ch.to_digit(10) {
                Some(n @ 1..=8) => (None, n as usize),
                _ => {
                    let cell = Cell::from_char(ch).ok_or(CellsParseError::UnexpectedChar(ch))?;
                    (Some(cell), 1)
                }
            };
            if file + width > 8 {
                return Err(CellsParseError::RankOverflow(rank));
            }
            if let Some(cell) = cell {
                cells[Coord::from_parts(File::from_index(file), rank).index()] = cell;
            }
            file += width;
        }
        if file < 8 {
            return Err(CellsParseError::RankUnderflow(rank));
        }
    }
    if rows.next().is_some() {
        return Err(CellsParseError::Overflow);
    }
    Ok(cells)
}

fn parse_ep_target(s: &str, side: Color) -> Result<Option<Coord>, RawFenParseError> {
    if s == "-" {
        return Ok(None);
    }
    let enpassant = Coord::from_str(s)?;
    if enpassant.rank() != geometry::enpassant_dst_rank(side) {
        return Err(RawFenParseError::InvalidEnpassantRank(enpassant.rank()));
    }
    Ok(Some(enpassant))
}

impl FromStr for RawBoard {
    type Err = RawFenParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        type Error = RawFenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut fields = s.split_ascii_whitespace();
        let mut next = |missing: Error| fields.next().ok_or(missing);

        let cells = parse_cells(next(Error::NoBoard)?)?;
        let side = Color::from_str(next(Error::NoMoveSide)?)?;
        let castling = CastlingRights::from_str(next(Error::NoCastling)?)?;
        let ep_target = parse_ep_target(next(Error::NoEnpassant)?, side)?;

        // Counters are often omitted, so they are optional
        let move_counter = fields
            .next()
            .map(u16::from_str)
            .transpose()
            .map_err(Error::MoveCounter)?
            .unwrap_or(0);
        let move_number = fields
            .next()
            .map(u16::from_str)
            .transpose()
            .map_err(Error::MoveNumber)?
            .unwrap_or(1);
        if fields.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(RawBoard {
            cells,
            side,
            castling,
            ep_target,
            move_counter,
            move_number,
        })
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(RawBoard::from_str(s)?.try_into()?)
    }
}

fn format_cells(cells: &[Cell; 64], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for (i, rank) in Rank::iter().rev().enumerate() {
        if i != 0 {
            write!(f, "/")?;
        }
        let mut gap = 0;
        for file in File::iter() {
            let cell = cells[Coord::from_parts(file, rank).index()];
            if cell.is_empty() {
                gap += 1;
                continue;
            }
            if gap != 0 {
                write!(f, "{}", gap)?;
                gap = 0;
            }
            write!(f, "{}", cell)?;
        }
        if gap != 0 {
            write!(f, "{}", gap)?;
        }
    }
    Ok(())
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)?;
        write!(f, " {} {}", self.side, self.castling)?;
        match self.ep_target {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        write!(f, " {} {}", self.move_counter, self.move_number)?;
        Ok(())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.r.fmt(f)
    }
}

/// Characters to draw the board with
struct Frame {
    horz: char,
    vert: char,
    corner: char,
    /// Side to move indicator, indexed by color
    side: [char; 2],
    cell: fn(&Cell) -> char,
}

const ASCII_FRAME: Frame = Frame {
    horz: '-',
    vert: '|',
    corner: '+',
    side: ['W', 'B'],
    cell: Cell::as_char,
};

const UTF8_FRAME: Frame = Frame {
    horz: '─',
    vert: '│',
    corner: '┼',
    side: ['○', '●'],
    cell: Cell::as_utf8_char,
};

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let frame = match self.style {
            PrettyStyle::Ascii => &ASCII_FRAME,
            PrettyStyle::Utf8 => &UTF8_FRAME,
        };
        let r = self.raw;
        for rank in Rank::iter().rev() {
            let row: String = File::iter()
                .map(|file| (frame.cell)(&r.get(Coord::from_parts(file, rank))))
                .collect();
            writeln!(f, "{}{}{}", rank, frame.vert, row)?;
        }
        let line: String = File::iter().map(|_| frame.horz).collect();
        writeln!(f, "{}{}{}", frame.horz, frame.corner, line)?;
        let files: String = File::iter().map(|file| file.as_char()).collect();
        writeln!(f, "{}{}{}", frame.side[r.side.index()], frame.vert, files)
    }
}
