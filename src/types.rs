//! Score conventions, search limits, and the per-search report.

use std::time::Duration;

use chess::ChessMove;

/// Checkmate sentinel. Strictly larger than any sum of material and
/// positional terms the evaluator can produce.
pub const MATE_SCORE: i32 = 100_000;

/// Alpha/beta bound substitute for infinity. Strictly larger than
/// `MATE_SCORE` so a mate still registers as a strict improvement over the
/// initial window.
pub const INFINITY: i32 = 1_000_000;

/// Ceiling on the capture/promotion extension past the nominal depth.
pub const QUIESCENCE_MAX_DEPTH: u32 = 20;

/// Default nominal search depth.
pub const DEFAULT_DEPTH: u32 = 3;

/// Default wall-clock budget in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 15;

/// Bounds for one search episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest iteration the driver will attempt.
    pub depth: u32,
    /// Wall-clock budget for the whole episode.
    pub budget: Duration,
}

impl SearchLimits {
    /// Build limits from raw caller input, clamping depth to at least 1 and
    /// the budget to at least one second.
    #[must_use]
    pub fn new(depth: u32, time_limit_secs: u64) -> Self {
        SearchLimits {
            depth: depth.max(1),
            budget: Duration::from_secs(time_limit_secs.max(1)),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits::new(DEFAULT_DEPTH, DEFAULT_TIME_LIMIT_SECS)
    }
}

/// Outcome of one iterative-deepening episode.
#[derive(Clone, Copy, Debug)]
pub struct SearchReport {
    /// Best move from the deepest iteration that completed in time.
    /// `None` only when the position has no legal moves.
    pub best_move: Option<ChessMove>,
    /// Score of the deepest completed iteration, from White's point of view.
    pub score: i32,
    /// Depth of the deepest completed full-width iteration (0 if only the
    /// static root comparison ran).
    pub depth_completed: u32,
    /// Nodes visited across all iterations, quiescence included.
    pub nodes: u64,
    /// Wall-clock time spent in the episode.
    pub elapsed: Duration,
    /// Whether the clock cut off the last iteration.
    pub timed_out: bool,
}
