use crate::types::{CastlingSide, Color, File, Rank};

pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Rank where a pawn of color `c` stands when it may capture en passant
pub const fn enpassant_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R5,
        Color::Black => Rank::R4,
    }
}

/// Rank of the en passant target square when `c` is to move
pub const fn enpassant_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

pub const fn double_move_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Index delta of one pawn step forward
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => 8,
        Color::Black => -8,
    }
}

/// Files of the rook before and after castling
pub const fn castling_rook_files(s: CastlingSide) -> (File, File) {
    match s {
        CastlingSide::King => (File::H, File::F),
        CastlingSide::Queen => (File::A, File::D),
    }
}

/// File where the king lands after castling
pub const fn castling_king_dst_file(s: CastlingSide) -> File {
    match s {
        CastlingSide::King => File::G,
        CastlingSide::Queen => File::C,
    }
}

/// (file, rank) offsets of the knight jumps
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
];

/// (file, rank) offsets of the king steps
pub const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// (file, rank) offsets of the squares attacked by a white pawn
///
/// Negate the rank component for a black pawn.
pub const PAWN_CAPTURE_OFFSETS: [(isize, isize); 2] = [(-1, 1), (1, 1)];

/// Bishop ray directions in 0x88 index space
pub const BISHOP_DIRS_X88: [isize; 4] = [-17, -15, 15, 17];

/// Rook ray directions in 0x88 index space
pub const ROOK_DIRS_X88: [isize; 4] = [-16, -1, 1, 16];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    #[test]
    fn test_x88_dirs() {
        let d4 = Coord::from_parts(File::D, Rank::R4);
        let base = d4.x88_index() as isize;
        let targets: Vec<String> = BISHOP_DIRS_X88
            .iter()
            .chain(ROOK_DIRS_X88.iter())
            .filter_map(|d| Coord::from_x88(base + d))
            .map(|c| c.to_string())
            .collect();
        assert_eq!(targets, ["c3", "e3", "c5", "e5", "d3", "c4", "e4", "d5"]);
    }

    #[test]
    fn test_ranks() {
        for c in [Color::White, Color::Black] {
            let fwd = pawn_forward_delta(c) / 8;
            let ep_src = enpassant_src_rank(c).index() as isize;
            assert_eq!(enpassant_dst_rank(c).index() as isize, ep_src + fwd);
        }
    }
}
