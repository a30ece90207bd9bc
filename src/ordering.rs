//! Move-ordering cache: last-seen scores per (position fingerprint, move).
//!
//! This is not a transposition table. Entries are overwritten across search
//! depths and across transpositions that share a fingerprint, and a lookup
//! miss simply means "no information". The cache only biases the order in
//! which the minimax searcher tries moves; it never decides a score.

use std::collections::HashMap;

use chess::ChessMove;

/// Scores keyed by position fingerprint, then by move. Scoped to one search
/// episode; a fresh cache is created per engine-move request.
#[derive(Debug, Default)]
pub struct OrderingCache {
    scores: HashMap<String, HashMap<ChessMove, i32>>,
}

impl OrderingCache {
    #[must_use]
    pub fn new() -> Self {
        OrderingCache::default()
    }

    /// Last score recorded for `mv` out of the fingerprinted position, or 0
    /// when nothing is known.
    #[must_use]
    pub fn hint(&self, fingerprint: &str, mv: ChessMove) -> i32 {
        self.scores
            .get(fingerprint)
            .and_then(|moves| moves.get(&mv))
            .copied()
            .unwrap_or(0)
    }

    /// Record `score` for `mv` out of the fingerprinted position,
    /// overwriting whatever an earlier (possibly shallower) visit stored.
    pub fn record(&mut self, fingerprint: &str, mv: ChessMove, score: i32) {
        self.scores
            .entry(fingerprint.to_owned())
            .or_default()
            .insert(mv, score);
    }

    /// Number of distinct positions with at least one recorded score.
    #[must_use]
    pub fn positions(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use chess::Square;

    use super::*;

    fn mv(from: Square, to: Square) -> ChessMove {
        ChessMove::new(from, to, None)
    }

    #[test]
    fn unseen_moves_score_zero() {
        let cache = OrderingCache::new();
        assert_eq!(cache.hint("anything", mv(Square::E2, Square::E4)), 0);
    }

    #[test]
    fn last_write_wins() {
        let mut cache = OrderingCache::new();
        let m = mv(Square::E2, Square::E4);
        cache.record("fp", m, 35);
        cache.record("fp", m, -120);
        assert_eq!(cache.hint("fp", m), -120);
        assert_eq!(cache.positions(), 1);
    }

    #[test]
    fn fingerprints_do_not_alias() {
        let mut cache = OrderingCache::new();
        let m = mv(Square::G1, Square::F3);
        cache.record("one", m, 10);
        assert_eq!(cache.hint("two", m), 0);
        assert_eq!(cache.hint("one", m), 10);
    }
}
