//! Iterative-deepening alpha-beta search with a quiescence extension.
//!
//! The searcher is written as explicit max/min halves rather than negamax:
//! White is structurally the maximizer and Black the minimizer, whichever
//! side is to move. Scores are always from White's point of view.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use chess::{Board, BoardStatus, ChessMove, Color, MoveGen};

use crate::evaluation::{evaluate, is_favorable};
use crate::ordering::OrderingCache;
use crate::types::{SearchLimits, SearchReport, INFINITY, MATE_SCORE, QUIESCENCE_MAX_DEPTH};

/// Per-episode search state: the clock, counters, the best root move of the
/// iteration in progress, and the move-ordering cache. One context is
/// created per engine-move request and dropped with it; nothing survives
/// across requests.
struct SearchContext {
    started: Instant,
    budget: Duration,
    nodes: u64,
    timed_out: bool,
    /// Depth of the iteration currently running. Minimax records the best
    /// root move only in frames at exactly this depth.
    target_depth: u32,
    best_at_depth: Option<ChessMove>,
    cache: OrderingCache,
}

impl SearchContext {
    fn new(budget: Duration) -> Self {
        SearchContext {
            started: Instant::now(),
            budget,
            nodes: 0,
            timed_out: false,
            target_depth: 0,
            best_at_depth: None,
            cache: OrderingCache::new(),
        }
    }

    /// Depth-0 iteration: pick the root move whose resulting position
    /// statically evaluates best for the side to move. Runs without clock
    /// polling, so a committed answer exists before any deeper iteration
    /// can be cut off.
    fn root_static_choice(&mut self, board: &Board) -> Option<ChessMove> {
        let white = board.side_to_move() == Color::White;
        let mut best: Option<(ChessMove, i32)> = None;

        for mv in MoveGen::new_legal(board) {
            self.nodes += 1;
            let value = evaluate(&board.make_move_new(mv));
            let improved = match best {
                None => true,
                Some((_, seen)) => {
                    if white {
                        value > seen
                    } else {
                        value < seen
                    }
                }
            };
            if improved {
                best = Some((mv, value));
            }
        }

        best.map(|(mv, _)| mv)
    }

    /// Fail-soft alpha-beta over the full legal-move tree.
    fn minimax(&mut self, board: &Board, alpha: i32, beta: i32, depth: u32) -> i32 {
        self.nodes += 1;

        let white = board.side_to_move() == Color::White;

        // One clock poll per node. A single slow node can overshoot the
        // budget until the next poll; the returned bound is a cheap,
        // non-authoritative cutoff that unwinds the stack.
        if self.started.elapsed() > self.budget {
            self.timed_out = true;
            return if white { alpha } else { beta };
        }

        match board.status() {
            BoardStatus::Checkmate => {
                // The side to move is the side that got mated.
                return if white { -MATE_SCORE } else { MATE_SCORE };
            }
            BoardStatus::Stalemate => return 0,
            BoardStatus::Ongoing => {}
        }

        if depth < 1 {
            return self.quiesce(board, alpha, beta, 1);
        }

        let fingerprint = board.to_string();

        // Cached scores from earlier visits (often shallower iterations)
        // bias the iteration order toward early cutoffs; unseen moves sort
        // as 0. The stable sort keeps generation order among ties, which
        // makes move choice deterministic.
        let mut moves: Vec<ChessMove> = MoveGen::new_legal(board).collect();
        if white {
            moves.sort_by_key(|mv| Reverse(self.cache.hint(&fingerprint, *mv)));
        } else {
            moves.sort_by_key(|mv| self.cache.hint(&fingerprint, *mv));
        }

        let mut score = if white { alpha } else { beta };

        for mv in moves {
            let child = board.make_move_new(mv);
            let move_score = if white {
                self.minimax(&child, score, beta, depth - 1)
            } else {
                self.minimax(&child, alpha, score, depth - 1)
            };
            self.cache.record(&fingerprint, mv, move_score);

            if (white && move_score > score) || (!white && move_score < score) {
                score = move_score;
                if depth == self.target_depth {
                    self.best_at_depth = Some(mv);
                }
                if (white && score >= beta) || (!white && score <= alpha) {
                    break;
                }
            }
        }

        score
    }

    /// Capture/promotion extension past the nominal depth. Recurses only
    /// over favorable moves until the position goes quiet, the move list
    /// runs dry, or `qdepth` hits the ceiling; then falls back to the
    /// static evaluation. No ordering cache and no clock polling here.
    fn quiesce(&mut self, board: &Board, alpha: i32, beta: i32, qdepth: u32) -> i32 {
        self.nodes += 1;

        if qdepth >= QUIESCENCE_MAX_DEPTH {
            return evaluate(board);
        }

        let favorable: Vec<ChessMove> = MoveGen::new_legal(board)
            .filter(|mv| is_favorable(board, *mv))
            .collect();
        if favorable.is_empty() {
            return evaluate(board);
        }

        let white = board.side_to_move() == Color::White;
        let mut score = if white { alpha } else { beta };

        for mv in favorable {
            let child = board.make_move_new(mv);
            let move_score = if white {
                self.quiesce(&child, score, beta, qdepth + 1)
            } else {
                self.quiesce(&child, alpha, score, qdepth + 1)
            };

            score = if white {
                score.max(move_score)
            } else {
                score.min(move_score)
            };
            if (white && score >= beta) || (!white && score <= alpha) {
                break;
            }
        }

        score
    }
}

/// Run one full search episode over `board` and report the outcome.
///
/// Iterations run from depth 1 to `limits.depth`, preceded by a clock-exempt
/// static comparison of the root moves. Each completed iteration commits its
/// best move; a timed-out iteration is discarded in favor of the previous
/// one. Deepening also stops once an iteration proves a forced mate, since
/// nothing deeper can change the decision.
#[must_use]
pub fn iterative_deepening(board: &Board, limits: SearchLimits) -> SearchReport {
    let mut ctx = SearchContext::new(limits.budget);

    let mut best_move = ctx.root_static_choice(board);
    let mut depth_completed = 0;
    let mut score: i32 = 0;

    for depth in 1..=limits.depth {
        if ctx.timed_out || score.abs() >= MATE_SCORE {
            break;
        }

        ctx.target_depth = depth;
        ctx.best_at_depth = None;
        let iteration_score = ctx.minimax(board, -INFINITY, INFINITY, depth);

        if ctx.timed_out {
            break;
        }
        score = iteration_score;
        if let Some(mv) = ctx.best_at_depth {
            best_move = Some(mv);
            depth_completed = depth;
            log::debug!(
                "depth {depth} best {mv} score {score} nodes {} cached positions {}",
                ctx.nodes,
                ctx.cache.positions()
            );
        }
    }

    SearchReport {
        best_move,
        score,
        depth_completed,
        nodes: ctx.nodes,
        elapsed: ctx.started.elapsed(),
        timed_out: ctx.timed_out,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chess::Square;

    use super::*;

    #[test]
    fn startpos_depth_one_returns_a_legal_move() {
        let board = Board::default();
        let report = iterative_deepening(&board, SearchLimits::new(1, 30));
        let mv = report.best_move.expect("startpos has moves");
        assert!(MoveGen::new_legal(&board).any(|legal| legal == mv));
        assert_eq!(report.depth_completed, 1);
        assert!(report.nodes > 0);
        assert!(!report.timed_out);
    }

    #[test]
    fn root_static_choice_grabs_the_hanging_queen() {
        let board = Board::from_str("k7/8/8/3q4/8/8/3R4/K7 w - - 0 1").expect("valid FEN");
        let mut ctx = SearchContext::new(Duration::from_secs(30));
        let mv = ctx.root_static_choice(&board).expect("white has moves");
        assert_eq!(mv, ChessMove::new(Square::D2, Square::D5, None));
    }

    #[test]
    fn mated_position_reports_no_move() {
        // Fool's mate: White is checkmated.
        let board =
            Board::from_str("rnb1kbnr/pppp1ppp/4p3/8/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1")
                .expect("valid FEN");
        let report = iterative_deepening(&board, SearchLimits::new(3, 30));
        assert_eq!(report.best_move, None);
        assert_eq!(report.score, -MATE_SCORE);
    }

    #[test]
    fn mate_score_stops_deepening() {
        // Back-rank mate in one; the depth-1 iteration already proves it.
        let board = Board::from_str("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").expect("valid FEN");
        let report = iterative_deepening(&board, SearchLimits::new(6, 30));
        assert_eq!(
            report.best_move,
            Some(ChessMove::new(Square::E1, Square::E8, None))
        );
        assert_eq!(report.score, MATE_SCORE);
        assert_eq!(report.depth_completed, 1);
    }
}
