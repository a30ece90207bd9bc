//! The engine facade tying book lookup and iterative deepening together.

use chess::{Board, ChessMove};

use crate::book::OpeningBook;
use crate::error::{EngineError, EngineResult};
use crate::search;
use crate::types::{SearchLimits, DEFAULT_DEPTH, DEFAULT_TIME_LIMIT_SECS};

/// Move-selection engine. Owns the opening book; every request runs an
/// independent search episode with its own clock, node counter, and
/// move-ordering cache, so an `Engine` can be shared freely.
#[derive(Debug, Default)]
pub struct Engine {
    book: OpeningBook,
}

impl Engine {
    /// Engine with an empty opening book; every request goes to search.
    #[must_use]
    pub fn new() -> Self {
        Engine {
            book: OpeningBook::new(),
        }
    }

    /// Engine consulting `book` before searching.
    #[must_use]
    pub fn with_book(book: OpeningBook) -> Self {
        Engine { book }
    }

    /// Best move for the side to move.
    ///
    /// `depth` is clamped to at least 1 and `time_limit_secs` to at least
    /// one second. A book hit bypasses the search entirely. Fails only when
    /// the position has no legal continuation, which is the caller's
    /// precondition violation.
    pub fn engine_move(
        &self,
        board: &Board,
        depth: u32,
        time_limit_secs: u64,
    ) -> EngineResult<ChessMove> {
        if let Some(mv) = self.book.pick(board) {
            log::debug!("book move {mv}");
            return Ok(mv);
        }

        let report = search::iterative_deepening(board, SearchLimits::new(depth, time_limit_secs));
        log::debug!(
            "search finished: depth {} nodes {} elapsed {:?} timed out {}",
            report.depth_completed,
            report.nodes,
            report.elapsed,
            report.timed_out
        );
        report.best_move.ok_or(EngineError::NoLegalMoves)
    }

    /// [`Engine::engine_move`] with the default depth and time limit.
    pub fn engine_move_default(&self, board: &Board) -> EngineResult<ChessMove> {
        self.engine_move(board, DEFAULT_DEPTH, DEFAULT_TIME_LIMIT_SECS)
    }
}
