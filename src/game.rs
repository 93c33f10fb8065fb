use log::debug;
use serde::Deserialize;

use crate::ai::search::Searcher;
use crate::board::{Board, BoardError, UndoneMove};
use crate::clock::TurnClock;
use crate::types::{GameState, PlayerRecord, Position, RawGrid, Side};

pub const ENGINE_NAME: &str = "ArcOthelloFH";
pub const DEFAULT_DEPTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched by [`Engine::suggest_move`].
    pub depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Move-query contract a host expects from a player engine.
///
/// Grids are indexed `[column][row]` with -1 empty, 0 white and 1 black.
pub trait Playable {
    fn name(&self) -> &str;

    /// Best move for the given position, [`Position::PASS`] when the side
    /// has no legal move. The engine's own board is not consulted.
    fn next_move(&self, grid: &RawGrid, depth: u32, white_turn: bool) -> Result<Position, BoardError>;

    fn play_move(&mut self, column: i32, row: i32, is_white: bool) -> bool;

    fn is_playable(&self, column: i32, row: i32, is_white: bool) -> bool;

    fn board(&self) -> RawGrid;

    fn white_score(&self) -> u32;

    fn black_score(&self) -> u32;
}

/// Searches `grid` for `side`; `None` means the side must pass.
pub fn next_move(grid: &RawGrid, depth: u32, side: Side) -> Result<Option<Position>, BoardError> {
    best_move(Board::from_raw(grid, side)?, depth)
}

/// Searches `board` for its side to move.
///
/// A depth of 0 is searched as 1 so that a side with legal moves never
/// gets a pass back.
pub fn best_move(mut board: Board, depth: u32) -> Result<Option<Position>, BoardError> {
    let side = board.side_to_move();
    if board.legal_moves(side).is_empty() {
        debug!("{side:?} has no legal move, passing");
        return Ok(None);
    }

    let depth = depth.max(1);
    let mut searcher = Searcher::new();
    let outcome = searcher.search(&board, depth, None, side == Side::White)?;
    debug!(
        "{side:?} depth {depth}: {:?} valued {} ({} nodes, {} cutoffs)",
        outcome.best_move.map(|mv| mv.to_string()),
        outcome.value,
        searcher.nodes(),
        searcher.cutoffs()
    );

    Ok(outcome.best_move)
}

/// A game in progress plus the engine that plays it.
#[derive(Debug, Default)]
pub struct Engine {
    board: Board,
    clock: TurnClock,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            clock: TurnClock::new(),
            config,
        }
    }

    pub fn with_board(board: Board, config: EngineConfig) -> Self {
        Self {
            board,
            clock: TurnClock::new(),
            config,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn game_board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move()
    }

    pub fn switch_side(&mut self) {
        self.board.switch_side();
    }

    pub fn is_game_finished(&self) -> bool {
        self.board.is_game_finished()
    }

    /// Distinct legal moves of the side to move, in scan order.
    ///
    /// An empty answer counts as a pass for that side.
    pub fn legal_moves(&mut self) -> Vec<Position> {
        let side = self.board.side_to_move();
        let mut moves = self.board.legal_moves(side);
        let mut seen = Vec::with_capacity(moves.len());
        moves.retain(|mv| {
            if seen.contains(mv) {
                false
            } else {
                seen.push(*mv);
                true
            }
        });

        if moves.is_empty() {
            debug!("{side:?} passes");
            if self.board.is_game_finished() {
                debug!(
                    "game finished: white {} black {}",
                    self.white_score(),
                    self.black_score()
                );
            }
        }
        moves
    }

    /// Engine's choice for the side to move at the configured depth.
    pub fn suggest_move(&self) -> Result<Option<Position>, BoardError> {
        best_move(self.board.snapshot(), self.config.depth)
    }

    pub fn undo_move(&mut self) -> Result<UndoneMove, BoardError> {
        self.board.undo_move()
    }

    pub fn player_record(&self, side: Side) -> PlayerRecord {
        PlayerRecord {
            pawns: self.board.pawn_count(side),
            seconds_elapsed: self.clock.seconds_elapsed(side),
            has_skipped_last_turn: self.board.has_skipped_last_turn(side),
        }
    }

    pub fn set_seconds_elapsed(&mut self, side: Side, seconds: u64) {
        self.clock.set_seconds_elapsed(side, seconds);
    }

    /// Credits elapsed time to the side to move.
    pub fn tick_clock(&mut self) {
        let side = self.board.side_to_move();
        if self.clock.running() == Some(side) {
            self.clock.tick();
        } else {
            self.clock.start(side);
        }
    }

    pub fn state(&self) -> GameState {
        GameState {
            board: self.board.to_raw().iter().map(|column| column.to_vec()).collect(),
            side_to_move: self.board.side_to_move(),
            white: self.player_record(Side::White),
            black: self.player_record(Side::Black),
            is_game_finished: self.board.is_game_finished(),
            last_move: self
                .board
                .history()
                .last()
                .map(|record| record.positions.clone())
                .unwrap_or_default(),
        }
    }
}

impl Playable for Engine {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn next_move(&self, grid: &RawGrid, depth: u32, white_turn: bool) -> Result<Position, BoardError> {
        let side = Side::from_white_turn(white_turn);
        Ok(next_move(grid, depth, side)?.unwrap_or(Position::PASS))
    }

    fn play_move(&mut self, column: i32, row: i32, is_white: bool) -> bool {
        let side = Side::from_white_turn(is_white);
        let position = Position::new(column, row);
        let played = self.board.apply_move(position, side);
        if played {
            debug!("{side:?} plays {position}");
        }
        played
    }

    fn is_playable(&self, column: i32, row: i32, is_white: bool) -> bool {
        self.board
            .is_playable(Position::new(column, row), Side::from_white_turn(is_white))
    }

    fn board(&self) -> RawGrid {
        self.board.to_raw()
    }

    fn white_score(&self) -> u32 {
        self.board.pawn_count(Side::White)
    }

    fn black_score(&self) -> u32 {
        self.board.pawn_count(Side::Black)
    }
}
