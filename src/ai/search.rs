use log::trace;

use crate::ai::eval::evaluate;
use crate::board::{Board, BoardError};
use crate::types::Position;

const MIN_SCORE: i32 = -i32::MAX;
const MAX_SCORE: i32 = i32::MAX;

/// Backed-up value and the move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub value: i32,
    /// `None` at a leaf.
    pub best_move: Option<Position>,
}

/// Depth-bounded search with a single pruning bound.
///
/// Each node receives its parent's current best value as `bound` and stops
/// expanding siblings as soon as its own best value strictly beats it on the
/// node's side of the comparison. Only one bound travels down the tree, so
/// this prunes less than alpha-beta and may return a different move on ties.
///
/// `Board::apply_move` keeps the mover on turn, so every ply expands the
/// moves of the side to move at the root while maximizing and minimizing
/// alternate.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the last call to [`Searcher::search`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// Searches `board` to `depth` plies. `bound == None` never cuts off,
    /// which is how the root is searched.
    ///
    /// `board` is not modified; the search plays and takes back moves on a
    /// snapshot of it.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        bound: Option<i32>,
        maximizing: bool,
    ) -> Result<SearchOutcome, BoardError> {
        self.nodes = 0;
        self.cutoffs = 0;

        let mut scratch = board.snapshot();
        self.single_bound(&mut scratch, depth, bound, maximizing)
    }

    fn single_bound(
        &mut self,
        board: &mut Board,
        depth: u32,
        bound: Option<i32>,
        maximizing: bool,
    ) -> Result<SearchOutcome, BoardError> {
        self.nodes += 1;

        let side = board.side_to_move();
        let moves = if depth == 0 {
            Vec::new()
        } else {
            board.legal_moves(side)
        };
        if moves.is_empty() {
            return Ok(SearchOutcome {
                value: evaluate(board),
                best_move: None,
            });
        }

        let sign = if maximizing { 1 } else { -1 };
        let mut best_value = if maximizing { MIN_SCORE } else { MAX_SCORE };
        let mut best_move = None;

        for mv in moves {
            if !board.apply_move(mv, side) {
                return Err(BoardError::IllegalMove(mv));
            }
            let child = self.single_bound(board, depth - 1, Some(best_value), !maximizing);
            board.undo_move()?;
            let child = child?;

            if child.value * sign > best_value * sign {
                best_value = child.value;
                best_move = Some(mv);

                if bound.is_some_and(|bound| best_value * sign > bound * sign) {
                    trace!("cutoff at depth {depth} after {mv}: {best_value}");
                    self.cutoffs += 1;
                    break;
                }
            }
        }

        Ok(SearchOutcome {
            value: best_value,
            best_move,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_with;
    use crate::types::Side;

    #[test]
    fn depth_zero_returns_static_value_without_move() {
        let mut board = Board::new();
        assert!(board.apply_move(Position::new(3, 2), Side::Black));

        let outcome = Searcher::new()
            .search(&board, 0, None, true)
            .expect("search must succeed");

        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.value, evaluate(&mut board.snapshot()));
    }

    #[test]
    fn terminal_position_is_evaluated_at_any_depth() {
        let board = board_with(&[(0, 0, Side::White), (8, 6, Side::Black)], Side::White);

        let outcome = Searcher::new()
            .search(&board, 4, None, true)
            .expect("search must succeed");

        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.value, evaluate(&mut board.snapshot()));
    }

    #[test]
    fn depth_one_picks_first_strictly_best_move() {
        let board = Board::new();
        let mut searcher = Searcher::new();

        let outcome = searcher
            .search(&board, 1, None, false)
            .expect("search must succeed");

        let mut expected: Option<(i32, Position)> = None;
        let mut probe = board.snapshot();
        for mv in probe.legal_moves(Side::Black) {
            let mut child = board.snapshot();
            assert!(child.apply_move(mv, Side::Black));
            let value = evaluate(&mut child);
            if expected.is_none_or(|(best, _)| value < best) {
                expected = Some((value, mv));
            }
        }

        let (value, mv) = expected.expect("opening has moves");
        assert_eq!(outcome, SearchOutcome { value, best_move: Some(mv) });
        assert_eq!(searcher.nodes(), 5);
        assert_eq!(searcher.cutoffs(), 0);
    }

    #[test]
    fn search_leaves_input_board_untouched() {
        let board = Board::new();
        let before = board.clone();

        let outcome = Searcher::new()
            .search(&board, 3, None, true)
            .expect("search must succeed");

        assert!(outcome.best_move.is_some());
        assert_eq!(board, before);
    }

    #[test]
    fn bound_cuts_off_remaining_siblings() {
        // White to move with three replies; every child beats a bound of
        // MIN_SCORE, so only the first one is explored.
        let board = board_with(
            &[
                (4, 3, Side::White),
                (3, 3, Side::Black),
                (5, 3, Side::Black),
                (4, 4, Side::Black),
            ],
            Side::White,
        );
        let mut searcher = Searcher::new();

        let outcome = searcher
            .search(&board, 1, Some(MIN_SCORE), true)
            .expect("search must succeed");

        assert_eq!(outcome.best_move, Some(Position::new(2, 3)));
        assert_eq!(searcher.cutoffs(), 1);
        assert_eq!(searcher.nodes(), 2);
    }

    #[test]
    fn depth_two_value_matches_plain_minimax() {
        let board = Board::new();

        let pruned = Searcher::new()
            .search(&board, 2, None, true)
            .expect("search must succeed");
        let full = minimax(&mut board.snapshot(), 2, true);

        assert_eq!(pruned.value, full);
    }

    /// Reference minimax with the same move generation, no pruning.
    fn minimax(board: &mut Board, depth: u32, maximizing: bool) -> i32 {
        let side = board.side_to_move();
        let moves = if depth == 0 { Vec::new() } else { board.legal_moves(side) };
        if moves.is_empty() {
            return evaluate(board);
        }
        let values = moves.into_iter().map(|mv| {
            let mut child = board.snapshot();
            assert!(child.apply_move(mv, side));
            minimax(&mut child, depth - 1, !maximizing)
        });
        let best = if maximizing { values.max() } else { values.min() };
        best.expect("non-empty")
    }
}
