use crate::bitboard::Bitboard;

/// `b1`, `d1`, ..., `a2`, `c2`, ...
pub const LIGHT_SQUARES: Bitboard = Bitboard::from_raw(0x55aa_55aa_55aa_55aa);
pub const DARK_SQUARES: Bitboard = Bitboard::from_raw(!LIGHT_SQUARES.as_raw());
