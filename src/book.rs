//! Opening book: weighted-random move lookup for known positions.
//!
//! The book is an in-memory mapping from position fingerprints to weighted
//! candidate moves. How a book asset is stored on disk is not this crate's
//! concern; whoever owns the asset decodes it and feeds entries in.

use std::collections::HashMap;

use chess::{Board, ChessMove};
use rand::seq::SliceRandom;

/// One weighted candidate move for a book position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookEntry {
    pub mv: ChessMove,
    /// Relative weight among the candidates of the same position.
    pub weight: u32,
}

/// Read-mostly opening book keyed by position fingerprint.
#[derive(Debug, Default)]
pub struct OpeningBook {
    entries: HashMap<String, Vec<BookEntry>>,
}

impl OpeningBook {
    /// An empty book; every lookup misses and falls through to search.
    #[must_use]
    pub fn new() -> Self {
        OpeningBook::default()
    }

    /// Build a book from (fingerprint, move, weight) triples.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ChessMove, u32)>,
    {
        let mut book = OpeningBook::new();
        for (fingerprint, mv, weight) in entries {
            book.insert(fingerprint, mv, weight);
        }
        book
    }

    /// Add one candidate move for a position.
    pub fn insert(&mut self, fingerprint: impl Into<String>, mv: ChessMove, weight: u32) {
        self.entries
            .entry(fingerprint.into())
            .or_default()
            .push(BookEntry { mv, weight });
    }

    /// Candidates recorded for a fingerprint; empty on a miss.
    #[must_use]
    pub fn candidates(&self, fingerprint: &str) -> &[BookEntry] {
        self.entries
            .get(fingerprint)
            .map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weighted-random choice among the candidates for `board`.
    ///
    /// `None` on a miss, on an empty candidate set, and when every
    /// candidate carries weight 0. All of these mean "consult the search".
    #[must_use]
    pub fn pick(&self, board: &Board) -> Option<ChessMove> {
        let candidates = self.candidates(&board.to_string());
        candidates
            .choose_weighted(&mut rand::thread_rng(), |entry| entry.weight)
            .ok()
            .map(|entry| entry.mv)
    }
}
