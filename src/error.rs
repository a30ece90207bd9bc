//! Error types for the search engine.

use thiserror::Error;

/// Errors surfaced by the engine's public entry points.
///
/// Internal invariant violations (a capture whose source square holds no
/// piece) are not represented here: they indicate a corrupted position and
/// abort the search by panic instead of being returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The position has no legal continuation. Searching a terminal
    /// position is the caller's precondition violation.
    #[error("no legal moves in the given position")]
    NoLegalMoves,
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
