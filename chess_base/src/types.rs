use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("{0:?} is not a file letter")]
    UnexpectedFileChar(char),
    #[error("{0:?} is not a rank digit")]
    UnexpectedRankChar(char),
    #[error("square must be two chars long")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 'w' or 'b', got {0:?}")]
    UnexpectedChar(char),
    #[error("color must be one char long")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CastlingRightsParseError {
    #[error("{0:?} is not a castling letter")]
    UnexpectedChar(char),
    #[error("castling letter {0:?} repeated")]
    DuplicateChar(char),
    #[error("empty castling field")]
    EmptyString,
}

/// Declares a line of eight squares (file or rank), labeled by consecutive characters
macro_rules! board_line {
    ($(#[$attr:meta])* $name:ident, $first:literal, [$($var:ident),+]) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($var),+
        }

        impl $name {
            const ALL: [$name; 8] = [$($name::$var),+];

            pub const fn index(&self) -> usize {
                *self as u8 as usize
            }

            /// # Panics
            ///
            /// The function panics if `val` is not less than 8.
            pub const fn from_index(val: usize) -> Self {
                Self::ALL[val]
            }

            pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
                Self::ALL.into_iter()
            }

            pub fn from_char(c: char) -> Option<Self> {
                let idx = u32::from(c).checked_sub(u32::from($first))?;
                Self::ALL.get(idx as usize).copied()
            }

            pub fn as_char(&self) -> char {
                char::from($first as u8 + *self as u8)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
                write!(f, "{}", self.as_char())
            }
        }
    };
}

board_line!(File, 'a', [A, B, C, D, E, F, G, H]);
board_line!(
    /// Rank of the board, counted from White's side
    Rank,
    '1',
    [R1, R2, R3, R4, R5, R6, R7, R8]
);

/// Square of the board
///
/// Squares are indexed as `rank * 8 + file`, so `a1` has index 0 and `h8` has index 63.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    /// Panics if `index` is not below 64
    pub const fn from_index(index: usize) -> Coord {
        assert!(index < 64, "square index out of range");
        Coord(index as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(rank as u8 * 8 + file as u8)
    }

    pub const fn file(&self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    pub const fn rank(&self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Index of the square on a 16x8 board, where the right half is off-board
    pub const fn x88_index(&self) -> usize {
        ((self.0 as usize >> 3) << 4) | (self.0 as usize & 7)
    }

    /// Converts a 0x88 index back into a square
    ///
    /// Returns `None` for every off-board index, which makes it the natural
    /// termination test for walking along a ray.
    pub const fn from_x88(val: isize) -> Option<Coord> {
        if val < 0 || (val & 0x88) != 0 {
            return None;
        }
        Some(Coord((((val >> 4) << 3) | (val & 7)) as u8))
    }

    /// Moves by `delta` square indices, which must stay on the board
    pub const fn add(self, delta: isize) -> Coord {
        Coord::from_index((self.0 as isize + delta) as usize)
    }

    /// Moves by the given number of files and ranks, both within `-7..=7`
    ///
    /// Returns `None` if the result leaves the board.
    pub const fn try_shift(self, delta_file: isize, delta_rank: isize) -> Option<Coord> {
        Coord::from_x88(self.x88_index() as isize + delta_rank * 16 + delta_file)
    }

    pub const fn is_light(&self) -> bool {
        (self.file().index() + self.rank().index()) % 2 == 1
    }

    pub const fn is_dark(&self) -> bool {
        !self.is_light()
    }

    /// Returns `true` if the square lies on the first or on the eighth rank
    pub const fn is_backrank(&self) -> bool {
        matches!(self.rank(), Rank::R1 | Rank::R8)
    }

    /// Returns `true` if the square lies on the second or on the seventh rank
    pub const fn is_seventh(&self) -> bool {
        matches!(self.rank(), Rank::R2 | Rank::R7)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Ok(Coord::from_parts(
                File::from_char(file).ok_or(CoordParseError::UnexpectedFileChar(file))?,
                Rank::from_char(rank).ok_or(CoordParseError::UnexpectedRankChar(rank))?,
            )),
            _ => Err(CoordParseError::BadLength),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn as_char(&self) -> char {
        match *self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'w' => Some(Color::White),
            'b' => Some(Color::Black),
            _ => None,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Color::from_char(c).ok_or(ColorParseError::UnexpectedChar(c)),
            _ => Err(ColorParseError::BadLength),
        }
    }
}

/// Piece kind, without color
///
/// The order of variants is the one used by opening book keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    pub const COUNT: usize = 6;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const fn from_index(val: usize) -> Piece {
        match val {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            5 => Piece::King,
            _ => panic!("piece index must be between 0 and 5"),
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index)
    }

    /// Lowercase letter of the piece, as used in FEN for black pieces
    pub fn as_char(&self) -> char {
        b"pnbrqk"[self.index()] as char
    }

    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

/// Contents of a single square: either empty or a piece of some color
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const MAX_INDEX: usize = 13;

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    pub const fn from_index(index: usize) -> Cell {
        assert!(index < Self::MAX_INDEX, "cell index out of range");
        Cell(index as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn from_parts(c: Color, p: Piece) -> Cell {
        Cell(match c {
            Color::White => 1 + p as u8,
            Color::Black => 7 + p as u8,
        })
    }

    pub const fn color(&self) -> Option<Color> {
        match self.0 {
            0 => None,
            1..=6 => Some(Color::White),
            _ => Some(Color::Black),
        }
    }

    pub const fn piece(&self) -> Option<Piece> {
        match self.0 {
            0 => None,
            v => Some(Piece::from_index(((v - 1) % 6) as usize)),
        }
    }

    /// Returns `true` if the cell holds exactly the given piece of the given color
    pub const fn is(&self, c: Color, p: Piece) -> bool {
        self.0 == Cell::from_parts(c, p).0
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::MAX_INDEX).map(Self::from_index)
    }

    pub fn as_char(&self) -> char {
        b".PNBRQKpnbrqk"[self.0 as usize] as char
    }

    pub fn as_utf8_char(&self) -> char {
        [
            '.', '♙', '♘', '♗', '♖', '♕', '♔', '♟', '♞', '♝', '♜', '♛', '♚',
        ][self.0 as usize]
    }

    /// Inverse of [`Cell::as_char()`]: uppercase is White, lowercase is Black, `.` is empty
    pub fn from_char(c: char) -> Option<Self> {
        b".PNBRQKpnbrqk"
            .iter()
            .position(|&b| char::from(b) == c)
            .map(Cell::from_index)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CastlingSide {
    Queen = 0,
    King = 1,
}

impl CastlingSide {
    pub fn iter() -> impl Iterator<Item = Self> {
        [CastlingSide::Queen, CastlingSide::King].into_iter()
    }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

/// FEN letters of the castling rights, in the order they are written
const CASTLING_CHARS: [(char, Color, CastlingSide); 4] = [
    ('K', Color::White, CastlingSide::King),
    ('Q', Color::White, CastlingSide::Queen),
    ('k', Color::Black, CastlingSide::King),
    ('q', Color::Black, CastlingSide::Queen),
];

impl CastlingRights {
    const fn to_index(c: Color, s: CastlingSide) -> u8 {
        ((c as u8) << 1) | s as u8
    }

    pub const EMPTY: CastlingRights = CastlingRights(0);
    pub const FULL: CastlingRights = CastlingRights(15);

    pub const fn has(&self, c: Color, s: CastlingSide) -> bool {
        ((self.0 >> Self::to_index(c, s)) & 1) != 0
    }

    pub const fn has_color(&self, c: Color) -> bool {
        self.has(c, CastlingSide::Queen) || self.has(c, CastlingSide::King)
    }

    pub const fn with(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 | (1_u8 << Self::to_index(c, s)))
    }

    pub const fn without(self, c: Color, s: CastlingSide) -> CastlingRights {
        CastlingRights(self.0 & !(1_u8 << Self::to_index(c, s)))
    }

    pub fn set(&mut self, c: Color, s: CastlingSide) {
        *self = self.with(c, s)
    }

    pub fn unset(&mut self, c: Color, s: CastlingSide) {
        *self = self.without(c, s)
    }

    /// Bit set as used by [`CastlingRights::index()`], panics above 15
    pub const fn from_index(index: usize) -> CastlingRights {
        assert!(index < 16, "castling index out of range");
        CastlingRights(index as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::EMPTY {
            return write!(f, "-");
        }
        for (ch, color, side) in CASTLING_CHARS {
            if self.has(color, side) {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<CastlingRights, Self::Err> {
        type Error = CastlingRightsParseError;
        match s {
            "-" => return Ok(CastlingRights::EMPTY),
            "" => return Err(Error::EmptyString),
            _ => {}
        }
        s.chars().try_fold(CastlingRights::EMPTY, |res, ch| {
            let (_, color, side) = CASTLING_CHARS
                .into_iter()
                .find(|&(c, _, _)| c == ch)
                .ok_or(Error::UnexpectedChar(ch))?;
            if res.has(color, side) {
                return Err(Error::DuplicateChar(ch));
            }
            Ok(res.with(color, side))
        })
    }
}

/// Reason for a drawn game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// The side to move has no legal moves and is not in check
    Stalemate,
    /// Neither side can deliver checkmate
    InsufficientMaterial,
    /// 75 moves without captures and pawn moves
    Moves75,
    /// The same position occurred five times
    Repeat5,
    /// 50 moves without captures and pawn moves
    Moves50,
    /// The same position occurred three times
    Repeat3,
}

/// Reason for a won game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WinReason {
    Checkmate,
}

/// Game outcome
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win { side: Color, reason: WinReason },
    Draw(DrawReason),
}

/// Which outcomes are applied automatically
///
/// - `Force` only accepts checkmate and stalemate
/// - `Strict` also accepts the draws that end the game without any claim
///   (insufficient material, 75 moves, fivefold repetition)
/// - `Relaxed` also accepts the claimable draws (50 moves, threefold repetition)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeFilter {
    Force,
    Strict,
    Relaxed,
}

impl Outcome {
    /// Weakest filter that still accepts this outcome
    pub const fn min_filter(&self) -> OutcomeFilter {
        match *self {
            Self::Win { .. } | Self::Draw(DrawReason::Stalemate) => OutcomeFilter::Force,
            Self::Draw(
                DrawReason::InsufficientMaterial | DrawReason::Moves75 | DrawReason::Repeat5,
            ) => OutcomeFilter::Strict,
            Self::Draw(DrawReason::Moves50 | DrawReason::Repeat3) => OutcomeFilter::Relaxed,
        }
    }

    pub fn passes(&self, filter: OutcomeFilter) -> bool {
        self.min_filter() <= filter
    }
}

/// Game result as written in PGN
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Win { side: Color::White, .. } => "1-0",
            Self::Win { side: Color::Black, .. } => "0-1",
            Self::Draw(_) => "1/2-1/2",
        })
    }
}
