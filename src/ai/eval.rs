//! Static evaluation, always from White's point of view.
//!
//! The score is the sum of three percentage-like terms: coin parity, mobility
//! and corner control. Corner control is scaled by 10 where the others are
//! scaled by 100. A fourth term, stability, is computed by [`breakdown`] but is
//! not part of the returned total.

use crate::board::Board;
use crate::types::{CellState, Position, Side};

const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, 6),
    Position::new(8, 0),
    Position::new(8, 6),
];

/// Each heuristic term separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    pub coin_parity: i32,
    pub mobility: i32,
    pub corners: i32,
    /// Not included in [`Evaluation::total`].
    pub stability: i32,
}

impl Evaluation {
    pub fn total(&self) -> i32 {
        self.coin_parity + self.mobility + self.corners
    }
}

/// Heuristic value of `board`, positive when White is ahead.
///
/// Probing mobility runs a full legal-move query for both sides, so pass
/// flags on `board` are updated exactly as `Board::legal_moves` would.
/// The side to move is left as it was.
pub fn evaluate(board: &mut Board) -> i32 {
    coin_parity(board) + mobility(board) + corners(board)
}

/// All four terms, stability included.
pub fn breakdown(board: &mut Board) -> Evaluation {
    Evaluation {
        coin_parity: coin_parity(board),
        mobility: mobility(board),
        corners: corners(board),
        stability: stability(board),
    }
}

pub fn coin_parity(board: &Board) -> i32 {
    let white = board.pawn_count(Side::White) as i32;
    let black = board.pawn_count(Side::Black) as i32;
    ratio(100, white, black)
}

/// White legal moves against Black legal moves, duplicates counted.
pub fn mobility(board: &mut Board) -> i32 {
    let side_to_move = board.side_to_move();
    let white = board.legal_moves(Side::White).len() as i32;
    let black = board.legal_moves(Side::Black).len() as i32;
    debug_assert_eq!(board.side_to_move(), side_to_move);

    if white + black == 0 {
        return 0;
    }
    truncated_percentage(white - black, white + black)
}

pub fn corners(board: &Board) -> i32 {
    let count = |side: Side| {
        CORNERS
            .iter()
            .filter(|&&corner| board.cell(corner) == Some(CellState::from(side)))
            .count() as i32
    };
    ratio(10, count(Side::White), count(Side::Black))
}

/// Balance of stable moves: a move scores +1 when no reply of the opponent
/// flips any cell it changed, -1 otherwise.
pub fn stability(board: &Board) -> i32 {
    let white = stable_move_tally(board, Side::White);
    let black = stable_move_tally(board, Side::Black);
    let total = white.abs() + black.abs();
    if total == 0 {
        return 0;
    }
    100 * (white - black) / total
}

fn stable_move_tally(board: &Board, side: Side) -> i32 {
    let opponent = side.opposite();
    let mut tally = 0;

    for candidate in board.scan_moves(side) {
        let mut scratch = board.snapshot();
        if !scratch.apply_move(candidate, side) {
            continue;
        }
        let Some(changed) = scratch.history().last().map(|record| &record.positions) else {
            continue;
        };

        let exposed = scratch.scan_moves(opponent).into_iter().any(|reply| {
            scratch
                .pawns_to_flip(reply, opponent)
                .iter()
                .any(|flipped| changed.contains(flipped))
        });
        tally += if exposed { -1 } else { 1 };
    }

    tally
}

/// `scale * (white - black) / (white + black)` in integer arithmetic, zero
/// when both counts are zero.
fn ratio(scale: i32, white: i32, black: i32) -> i32 {
    if white + black == 0 {
        return 0;
    }
    scale * (white - black) / (white + black)
}

/// `100 * diff / total` through `f64`, truncated toward zero.
///
/// Differs from integer division when the quotient is not representable,
/// e.g. 58/100 gives 57.
fn truncated_percentage(diff: i32, total: i32) -> i32 {
    (100.0 * (diff as f64 / total as f64)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_with;
    use crate::types::{RAW_BLACK, RAW_WHITE};

    fn color_swapped(board: &Board) -> Board {
        let mut raw = board.to_raw();
        for value in raw.iter_mut().flatten() {
            *value = match *value {
                RAW_WHITE => RAW_BLACK,
                RAW_BLACK => RAW_WHITE,
                other => other,
            };
        }
        Board::from_raw(&raw, board.side_to_move().opposite()).expect("valid raw grid")
    }

    /// W B W along row 1 from A1: White has no move, Black has D1 only.
    fn unstable_black_board() -> Board {
        board_with(
            &[
                (0, 0, Side::White),
                (1, 0, Side::Black),
                (2, 0, Side::White),
            ],
            Side::Black,
        )
    }

    #[test]
    fn opening_is_balanced() {
        let mut board = Board::new();

        let terms = breakdown(&mut board);

        assert_eq!(terms.coin_parity, 0);
        assert_eq!(terms.mobility, 0);
        assert_eq!(terms.corners, 0);
        assert_eq!(evaluate(&mut board), 0);
    }

    #[test]
    fn coin_parity_uses_integer_division() {
        let mut board = Board::new();
        assert!(board.apply_move(Position::new(3, 2), Side::Black));

        // 1 white against 4 black.
        assert_eq!(coin_parity(&board), -60);
    }

    #[test]
    fn empty_board_terms_are_zero() {
        let mut board = Board::empty(Side::White);

        assert_eq!(coin_parity(&board), 0);
        assert_eq!(mobility(&mut board), 0);
        assert_eq!(corners(&board), 0);
        assert_eq!(stability(&board), 0);
    }

    #[test]
    fn corners_are_scaled_by_ten() {
        let board = board_with(
            &[
                (0, 0, Side::White),
                (8, 6, Side::White),
                (0, 6, Side::Black),
            ],
            Side::White,
        );

        assert_eq!(corners(&board), 3);
    }

    #[test]
    fn truncated_percentage_goes_through_floating_point() {
        assert_eq!(truncated_percentage(58, 100), 57);
        assert_eq!(truncated_percentage(-58, 100), -57);
        assert_eq!(truncated_percentage(1, 3), 33);
        assert_eq!(truncated_percentage(-4, 4), -100);
    }

    #[test]
    fn stability_penalizes_moves_that_can_be_flipped_back() {
        let board = unstable_black_board();

        assert_eq!(stable_move_tally(&board, Side::White), 0);
        assert_eq!(stable_move_tally(&board, Side::Black), -1);
        assert_eq!(stability(&board), 100);
        assert_eq!(stability(&color_swapped(&board)), -100);
    }

    #[test]
    fn stability_counts_moves_out_of_reach() {
        // Black D1 flips C1 and leaves nothing for White to bracket.
        let board = board_with(
            &[(1, 0, Side::Black), (2, 0, Side::White)],
            Side::White,
        );

        assert_eq!(stable_move_tally(&board, Side::Black), 1);
        assert_eq!(stable_move_tally(&board, Side::White), 1);
        assert_eq!(stability(&board), 0);
    }

    #[test]
    fn total_leaves_stability_out() {
        let mut board = unstable_black_board();

        let terms = breakdown(&mut board);

        assert_eq!(
            terms,
            Evaluation {
                coin_parity: 33,
                mobility: -100,
                corners: 10,
                stability: 100,
            }
        );
        assert_eq!(terms.total(), -57);
        assert_eq!(evaluate(&mut board), -57);
    }

    #[test]
    fn evaluation_is_antisymmetric_under_color_swap() {
        let mut board = Board::new();
        assert!(board.apply_move(Position::new(3, 2), Side::Black));
        assert!(board.apply_move(Position::new(2, 2), Side::White));
        assert!(board.apply_move(Position::new(2, 3), Side::Black));

        let mut swapped = color_swapped(&board);

        assert_eq!(coin_parity(&board), -42);
        assert_eq!(evaluate(&mut swapped), -evaluate(&mut board));
        let original = breakdown(&mut board);
        assert_eq!(breakdown(&mut swapped).stability, -original.stability);
    }

    #[test]
    fn mobility_probe_keeps_side_but_records_passes() {
        let mut board = unstable_black_board();

        assert_eq!(mobility(&mut board), -100);

        assert_eq!(board.side_to_move(), Side::Black);
        assert!(board.has_skipped_last_turn(Side::White));
        assert!(!board.has_skipped_last_turn(Side::Black));
        assert!(!board.is_game_finished());
    }
}
