//! # Chess rules engine
//!
//! This crate implements the rules of chess: positions with FEN parsing and formatting, legal
//! move generation, making and unmaking moves, move formats (UCI and SAN), game outcomes and
//! position hashing.
//!
//! # Example
//!
//! ```
//! use chessrules::{Board, Move};
//!
//! let b = Board::initial();
//! let moves = b.legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let b = b.make_move(Move::from_uci("e2e4").unwrap()).unwrap();
//! assert_eq!(
//!     b.as_fen(),
//!     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
//! );
//! ```
//!
//! Use [`MoveChain`] to keep the history of the game and detect draws by repetition.

pub use chessrules_base::{bitboard, bitboard_consts, geometry, types};

pub mod attack;
pub mod board;
pub mod castling;
pub mod chain;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use board::{Board, RawBoard};
pub use chain::MoveChain;
pub use movegen::MoveList;
pub use moves::{Make, Move, MoveFlags, MoveInfo};
pub use types::{
    CastlingRights, CastlingSide, Cell, Color, Coord, DrawReason, File, Outcome, OutcomeFilter,
    Piece, Rank, WinReason,
};
