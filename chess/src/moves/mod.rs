//! Moves and their representations

mod base;

pub mod info;
pub mod make;
pub mod san;
pub mod uci;

pub use base::*;
pub use info::MoveInfo;
pub use make::Make;

pub type SanMove = san::Move;
pub type UciMove = uci::Move;
