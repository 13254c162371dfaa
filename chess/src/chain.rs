//! Sequence of moves made from a starting position
//!
//! [`MoveChain`] remembers the positions it went through, so it can detect draws by repetition,
//! which a single [`Board`] cannot do.

use crate::board::{self, Board};
use crate::moves::{self, san, uci, Make, Move, RawUndo, ValidateError};
use crate::types::{Color, DrawReason, Outcome, OutcomeFilter};

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Error parsing a list of UCI moves
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse UCI move #{}: {}", .pos + 1, .source)]
pub struct UciListParseError {
    /// Zero-based index of the offending move in the list
    pub pos: usize,
    pub source: uci::ParseError,
}

/// Counter of positions met in the game
pub trait Repeat: Default {
    fn push(&mut self, b: &Board);
    fn pop(&mut self, b: &Board);
    fn repeat_count(&self, b: &Board) -> usize;
}

/// [`Repeat`] implementation which identifies positions by their keys
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct HashRepeat(HashMap<u64, usize>);

impl Repeat for HashRepeat {
    fn push(&mut self, b: &Board) {
        *self.0.entry(b.zobrist_hash()).or_insert(0) += 1;
    }

    fn pop(&mut self, b: &Board) {
        let hash = b.zobrist_hash();
        if let Some(r) = self.0.get_mut(&hash) {
            *r -= 1;
            if *r == 0 {
                self.0.remove(&hash);
            }
        }
    }

    fn repeat_count(&self, b: &Board) -> usize {
        self.0.get(&b.zobrist_hash()).copied().unwrap_or(0)
    }
}

pub type MoveChain = BaseMoveChain<HashRepeat>;

/// Game as a starting position and a list of moves
#[derive(Debug, Clone)]
pub struct BaseMoveChain<R: Repeat> {
    board: Board,
    repeat: R,
    stack: Vec<(Move, RawUndo)>,
    outcome: Option<Outcome>,
}

impl<R: Repeat> BaseMoveChain<R> {
    pub fn new(b: Board) -> Self {
        let mut res = BaseMoveChain {
            board: b,
            repeat: R::default(),
            stack: Vec::new(),
            outcome: None,
        };
        res.repeat.push(&res.board);
        res
    }

    pub fn new_initial() -> Self {
        Self::new(Board::initial())
    }

    pub fn from_uci_list(b: Board, uci_list: &str) -> Result<Self, UciListParseError> {
        let mut res = BaseMoveChain::new(b);
        res.push_uci_list(uci_list)?;
        Ok(res)
    }

    pub fn from_fen(s: &str) -> Result<Self, board::FenParseError> {
        Ok(Self::new(Board::from_fen(s)?))
    }

    /// Returns the current position
    #[inline]
    pub fn last(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(m, _)| *m)
    }

    pub fn get(&self, idx: usize) -> Option<Move> {
        self.stack.get(idx).map(|(m, _)| *m)
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns `true` if the outcome is set, so no more moves can be added
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn clear_outcome(&mut self) {
        self.outcome = None;
    }

    /// Sets the outcome of the game
    ///
    /// # Panics
    ///
    /// The function panics if the outcome is already set.
    pub fn set_outcome(&mut self, outcome: Outcome) {
        assert!(!self.is_finished(), "the game is already finished");
        self.outcome = Some(outcome);
    }

    pub fn reset_outcome(&mut self, outcome: Option<Outcome>) {
        self.outcome = outcome;
    }

    /// Number of times the current position occurred in the game, including the current one
    pub fn repeat_count(&self) -> usize {
        self.repeat.repeat_count(&self.board)
    }

    /// Calculates the outcome of the current position, considering also draws by repetition
    ///
    /// Outcomes that end the game without a claim come first, see
    /// [`Board::calc_outcome()`] for the details.
    pub fn calc_outcome(&self) -> Option<Outcome> {
        let outcome = self.board.calc_outcome();
        if let Some(o) = outcome {
            if o.passes(OutcomeFilter::Strict) {
                return outcome;
            }
        }

        let rep = self.repeat_count();
        if rep >= 5 {
            return Some(Outcome::Draw(DrawReason::Repeat5));
        }
        if rep >= 3 {
            return Some(Outcome::Draw(DrawReason::Repeat3));
        }
        outcome
    }

    /// Sets the outcome calculated by [`BaseMoveChain::calc_outcome()`] if it passes `filter`
    ///
    /// Returns the resulting outcome. If the outcome is already set, it is kept intact.
    pub fn set_auto_outcome(&mut self, filter: OutcomeFilter) -> Option<Outcome> {
        if self.is_finished() {
            return self.outcome;
        }
        if let Some(outcome) = self.calc_outcome() {
            if outcome.passes(filter) {
                debug!(%outcome, reason = ?outcome, fen = %self.board, "game finished");
                self.outcome = Some(outcome);
            }
        }
        self.outcome
    }

    fn do_push<M: Make>(&mut self, m: M) -> Result<(), M::Err>
    where
        M::Err: fmt::Display,
    {
        assert!(!self.is_finished(), "the game is already finished");
        match m.make_raw(&mut self.board) {
            Ok((mv, u)) => {
                self.repeat.push(&self.board);
                self.stack.push((mv, u));
                Ok(())
            }
            Err(err) => {
                debug!(%err, fen = %self.board, "rejected move");
                Err(err)
            }
        }
    }

    /// Adds a legal move to the chain
    ///
    /// # Panics
    ///
    /// The function panics if the game is finished.
    pub fn push(&mut self, mv: Move) -> Result<(), ValidateError> {
        self.do_push(mv)
    }

    /// Adds a legal move given as UCI string
    ///
    /// # Panics
    ///
    /// The function panics if the game is finished.
    pub fn push_uci(&mut self, s: &str) -> Result<(), uci::ParseError> {
        self.do_push(moves::make::Uci(s))
    }

    /// Adds a legal move given as SAN string
    ///
    /// # Panics
    ///
    /// The function panics if the game is finished.
    pub fn push_san(&mut self, s: &str) -> Result<(), san::ParseError> {
        self.do_push(moves::make::San(s))
    }

    /// Adds the moves from a whitespace-separated list of UCI strings
    ///
    /// On error, the moves before the offending one stay in the chain.
    pub fn push_uci_list(&mut self, uci_list: &str) -> Result<(), UciListParseError> {
        for (pos, token) in uci_list.split_ascii_whitespace().enumerate() {
            self.push_uci(token)
                .map_err(|source| UciListParseError { pos, source })?;
        }
        Ok(())
    }

    /// Removes the last move and returns it
    ///
    /// The outcome is cleared, as it doesn't correspond to the new position.
    pub fn pop(&mut self) -> Option<Move> {
        let (m, u) = self.stack.pop()?;
        self.repeat.pop(&self.board);
        moves::unmake_move_unchecked(&mut self.board, m, u);
        self.outcome = None;
        Some(m)
    }

    pub fn uci_list(&self) -> UciList<'_, R> {
        UciList(self)
    }

    /// Returns a cursor over the positions of the chain
    pub fn walk(&self) -> Walker<'_> {
        Walker {
            board: self.board.clone(),
            stack: &self.stack,
            pos: 0,
            board_pos: self.stack.len(),
        }
    }

    pub fn san_list(&self, policy: NumberPolicy) -> SanList<'_, R> {
        SanList {
            inner: self,
            policy,
        }
    }
}

impl<R: Repeat + Eq> PartialEq<Self> for BaseMoveChain<R> {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
            && self.repeat == other.repeat
            && self.outcome == other.outcome
            && self.iter().eq(other.iter())
    }
}

impl<R: Repeat + Eq> Eq for BaseMoveChain<R> {}

/// Wrapper to format the moves of the chain as space-separated UCI strings
pub struct UciList<'a, R: Repeat>(&'a BaseMoveChain<R>);

impl<'a, R: Repeat> fmt::Display for UciList<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// Cursor over the positions of a [`BaseMoveChain`]
///
/// Position `i` is the one before the `i`-th move is made.
pub struct Walker<'a> {
    board: Board,
    stack: &'a [(Move, RawUndo)],
    pos: usize,
    board_pos: usize,
}

impl<'a> Walker<'a> {
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    fn set_board_pos(&mut self, target: usize) {
        while self.board_pos > target {
            self.board_pos -= 1;
            let (mv, u) = self.stack[self.board_pos];
            moves::unmake_move_unchecked(&mut self.board, mv, u);
        }
        while self.board_pos < target {
            let (mv, _) = self.stack[self.board_pos];
            let _ = moves::make_move_unchecked(&mut self.board, mv);
            self.board_pos += 1;
        }
    }

    /// Returns the position before the next move together with the move, and advances
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&Board, Move)> {
        if self.pos == self.stack.len() {
            return None;
        }
        self.pos += 1;
        self.set_board_pos(self.pos - 1);
        Some((&self.board, self.stack[self.pos - 1].0))
    }

    /// Steps back and returns the position before the previous move together with the move
    pub fn prev(&mut self) -> Option<(&Board, Move)> {
        if self.pos == 0 {
            return None;
        }
        self.pos -= 1;
        self.set_board_pos(self.pos);
        Some((&self.board, self.stack[self.pos].0))
    }

    pub fn start(&mut self) {
        self.pos = 0;
    }

    pub fn end(&mut self) {
        self.pos = self.stack.len();
    }
}

/// How to put move numbers into [`SanList`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum NumberPolicy {
    /// No move numbers
    Omit,
    /// Take the numbers from the starting position
    FromBoard,
    /// Start numbering from the given value
    Custom(usize),
}

/// Wrapper to format the moves of the chain in SAN
pub struct SanList<'a, R: Repeat> {
    inner: &'a BaseMoveChain<R>,
    policy: NumberPolicy,
}

impl<'a, R: Repeat> fmt::Display for SanList<'a, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let mut walker = self.inner.walk();
        let mut start = None;
        let mut first = true;
        while let Some((b, mv)) = walker.next() {
            let board_num = usize::from(b.move_number());
            let real_start = *start.get_or_insert(board_num);
            let num = match self.policy {
                NumberPolicy::Omit => None,
                NumberPolicy::FromBoard => Some(board_num),
                NumberPolicy::Custom(u) => Some(board_num - real_start + u),
            };
            if !first {
                write!(f, " ")?;
            }
            match (num, b.side()) {
                (Some(n), Color::White) => write!(f, "{}. ", n)?,
                (Some(n), Color::Black) if first => write!(f, "{}... ", n)?,
                _ => {}
            }
            let san = mv.san(b).map_err(|_| fmt::Error)?;
            write!(f, "{}", san)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WinReason;

    #[test]
    fn test_push_pop() {
        let mut chain = MoveChain::new_initial();
        chain.push_uci("e2e4").unwrap();
        chain.push_san("e5").unwrap();
        chain
            .push(Move::from_uci("g1f3").unwrap())
            .unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.uci_list().to_string(), "e2e4 e7e5 g1f3");
        assert_eq!(
            chain.last().as_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        assert!(chain.get(0).unwrap().is_double_push());
        assert_eq!(chain.get(3), None);

        assert_eq!(chain.pop(), Some(Move::from_uci("g1f3").unwrap()));
        assert_eq!(chain.pop(), Some(Move::from_uci("e7e5").unwrap()));
        assert_eq!(chain.pop(), Some(Move::from_uci("e2e4").unwrap()));
        assert_eq!(chain.pop(), None);
        assert_eq!(chain, MoveChain::new_initial());
    }

    #[test]
    fn test_bad_moves() {
        let mut chain = MoveChain::new_initial();
        assert_eq!(
            chain.push_uci("e2e5"),
            Err(uci::ParseError::Validate(ValidateError::NotSemiLegal))
        );
        assert!(chain.push_san("Ke2").is_err());
        assert_eq!(
            chain.push_uci_list("e2e4 e7e5 e1e3"),
            Err(UciListParseError {
                pos: 2,
                source: uci::ParseError::Validate(ValidateError::NotSemiLegal)
            })
        );
        assert_eq!(chain.uci_list().to_string(), "e2e4 e7e5");
    }

    #[test]
    fn test_checkmate() {
        let mut chain = MoveChain::from_uci_list(Board::initial(), "f2f3 e7e5 g2g4").unwrap();
        assert_eq!(chain.set_auto_outcome(OutcomeFilter::Relaxed), None);
        chain.push_san("Qh4#").unwrap();
        let outcome = Outcome::Win {
            side: Color::Black,
            reason: WinReason::Checkmate,
        };
        assert_eq!(chain.calc_outcome(), Some(outcome));
        assert_eq!(chain.set_auto_outcome(OutcomeFilter::Force), Some(outcome));
        assert!(chain.is_finished());
        assert_eq!(
            chain.san_list(NumberPolicy::FromBoard).to_string(),
            "1. f3 e5 2. g4 Qh4#"
        );
        assert_eq!(
            chain.san_list(NumberPolicy::Omit).to_string(),
            "f3 e5 g4 Qh4#"
        );

        chain.pop();
        assert!(!chain.is_finished());
    }

    #[test]
    fn test_repetitions() {
        let mut chain = MoveChain::new_initial();
        for _ in 0..2 {
            chain.push_uci_list("g1f3 g8f6 f3g1 f6g8").unwrap();
        }
        assert_eq!(chain.repeat_count(), 3);
        assert_eq!(
            chain.calc_outcome(),
            Some(Outcome::Draw(DrawReason::Repeat3))
        );
        assert_eq!(chain.set_auto_outcome(OutcomeFilter::Strict), None);

        for _ in 0..2 {
            chain.push_uci_list("g1f3 g8f6 f3g1 f6g8").unwrap();
        }
        assert_eq!(chain.repeat_count(), 5);
        assert_eq!(
            chain.set_auto_outcome(OutcomeFilter::Strict),
            Some(Outcome::Draw(DrawReason::Repeat5))
        );

        let mut chain = MoveChain::new_initial();
        chain.push_uci_list("g1f3 g8f6 f3g1 f6g8 g1f3").unwrap();
        assert_eq!(chain.repeat_count(), 2);
        assert_eq!(chain.calc_outcome(), None);
    }

    #[test]
    fn test_walk() {
        let chain = MoveChain::from_uci_list(Board::initial(), "e2e4 c7c5 g1f3").unwrap();
        let mut walker = chain.walk();
        let (b, mv) = walker.next().unwrap();
        assert_eq!(*b, Board::initial());
        assert_eq!(mv.to_string(), "e2e4");
        let (b, mv) = walker.next().unwrap();
        assert_eq!(b.side(), Color::Black);
        assert_eq!(mv.to_string(), "c7c5");
        walker.end();
        assert!(walker.next().is_none());
        let (b, mv) = walker.prev().unwrap();
        assert_eq!(mv.to_string(), "g1f3");
        assert_eq!(
            b.as_fen(),
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
        );
        walker.start();
        assert_eq!(walker.pos(), 0);
        assert!(walker.prev().is_none());
    }

    #[test]
    fn test_san_list_black_start() {
        let chain = MoveChain::from_uci_list(
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap(),
            "e7e5 g1f3",
        )
        .unwrap();
        assert_eq!(
            chain.san_list(NumberPolicy::FromBoard).to_string(),
            "1... e5 2. Nf3"
        );
        assert_eq!(
            chain.san_list(NumberPolicy::Custom(10)).to_string(),
            "10... e5 11. Nf3"
        );
    }
}
