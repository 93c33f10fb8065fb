use thiserror::Error;

use crate::types::{COLUMNS, CellState, Position, ROWS, RawGrid, Side};

/// Column and row of the top-left pawn of the opening cross.
const INITIAL_CROSS: Position = Position::new(3, 3);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("no move to undo")]
    EmptyHistory,

    #[error("invalid cell value {value} at ({column}, {row})")]
    InvalidCell { column: usize, row: usize, value: i8 },

    #[error("board must be 9x7, got {columns}x{rows}")]
    Dimensions { columns: usize, rows: usize },

    #[error("illegal move at {0}")]
    IllegalMove(Position),
}

/// An applied move: every changed cell, placed pawn last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub positions: Vec<Position>,
    pub side: Side,
}

/// What `Board::undo_move` put back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoneMove {
    /// Cells returned to the opposite of `side`.
    pub restored: Vec<Position>,
    pub side: Side,
    /// Cell emptied again.
    pub placed: Position,
}

/// 9x7 game board, column-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[CellState; ROWS]; COLUMNS],
    side_to_move: Side,
    history: Vec<MoveRecord>,
    skipped_last_turn: [bool; 2],
    game_finished: bool,
}

impl Board {
    /// Creates the opening position with Black to move:
    /// D4=white, E4=black, D5=black, E5=white.
    pub fn new() -> Self {
        let mut board = Self::empty(Side::Black);
        let origin = INITIAL_CROSS;
        board.set_cell(origin, CellState::White);
        board.set_cell(origin + Position::new(1, 0), CellState::Black);
        board.set_cell(origin + Position::new(0, 1), CellState::Black);
        board.set_cell(origin + Position::new(1, 1), CellState::White);
        board
    }

    /// Board with no pawns at all.
    pub fn empty(side_to_move: Side) -> Self {
        Self {
            cells: [[CellState::Empty; ROWS]; COLUMNS],
            side_to_move,
            history: Vec::new(),
            skipped_last_turn: [false; 2],
            game_finished: false,
        }
    }

    /// Builds a board from the host encoding (-1 empty, 0 white, 1 black).
    pub fn from_raw(grid: &RawGrid, side_to_move: Side) -> Result<Self, BoardError> {
        let mut board = Self::empty(side_to_move);
        for (column, cells) in grid.iter().enumerate() {
            for (row, &value) in cells.iter().enumerate() {
                let cell = CellState::from_raw(value).ok_or(BoardError::InvalidCell {
                    column,
                    row,
                    value,
                })?;
                board.cells[column][row] = cell;
            }
        }
        Ok(board)
    }

    /// Same as `from_raw` for a grid of unchecked dimensions.
    pub fn from_raw_slices(grid: &[Vec<i8>], side_to_move: Side) -> Result<Self, BoardError> {
        let rows = grid.first().map_or(0, Vec::len);
        if grid.len() != COLUMNS || grid.iter().any(|column| column.len() != ROWS) {
            return Err(BoardError::Dimensions {
                columns: grid.len(),
                rows,
            });
        }

        let mut raw = [[0i8; ROWS]; COLUMNS];
        for (target, source) in raw.iter_mut().zip(grid) {
            target.copy_from_slice(source);
        }
        Self::from_raw(&raw, side_to_move)
    }

    /// Copies grid and side to move only; history and pass flags start fresh.
    pub fn snapshot(&self) -> Self {
        Self {
            cells: self.cells,
            ..Self::empty(self.side_to_move)
        }
    }

    pub fn to_raw(&self) -> RawGrid {
        let mut raw = [[0i8; ROWS]; COLUMNS];
        for (target, cells) in raw.iter_mut().zip(self.cells.iter()) {
            for (value, cell) in target.iter_mut().zip(cells.iter()) {
                *value = cell.to_raw();
            }
        }
        raw
    }

    pub fn is_position_valid(&self, position: Position) -> bool {
        (0..COLUMNS as i32).contains(&position.column) && (0..ROWS as i32).contains(&position.row)
    }

    /// Returns `None` outside the grid.
    pub fn cell(&self, position: Position) -> Option<CellState> {
        if !self.is_position_valid(position) {
            return None;
        }
        Some(self.cells[position.column as usize][position.row as usize])
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side: Side) {
        self.side_to_move = side;
    }

    pub fn switch_side(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    pub fn has_skipped_last_turn(&self, side: Side) -> bool {
        self.skipped_last_turn[side.index()]
    }

    pub fn is_game_finished(&self) -> bool {
        self.game_finished
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Recounted from the grid on every call.
    pub fn pawn_count(&self, side: Side) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_side(side))
            .count() as u32
    }

    /// Legal destinations for `side`, in scan order, possibly with duplicates.
    ///
    /// Records a pass for `side` when the list is empty; a pass right after
    /// the opponent's pass finishes the game.
    pub fn legal_moves(&mut self, side: Side) -> Vec<Position> {
        let moves = self.scan_moves(side);
        if moves.is_empty() {
            self.record_pass(side);
        } else {
            self.skipped_last_turn[side.index()] = false;
        }
        moves
    }

    /// Scan behind `legal_moves` without pass bookkeeping.
    ///
    /// Starts from each pawn of `side` and walks over opponent runs looking
    /// for an empty landing cell; a destination reachable from several pawns
    /// is listed once per pawn and direction.
    pub fn scan_moves(&self, side: Side) -> Vec<Position> {
        let own = CellState::from(side);
        let mut moves = Vec::new();

        for row in 0..ROWS as i32 {
            for column in 0..COLUMNS as i32 {
                let origin = Position::new(column, row);
                if self.cell(origin) != Some(own) {
                    continue;
                }
                for direction in self.capture_directions(origin, side) {
                    if let Some(landing) = self.landing_cell(origin, direction, side) {
                        moves.push(landing);
                    }
                }
            }
        }

        moves
    }

    /// Side-effect-free legality query.
    pub fn is_playable(&self, position: Position, side: Side) -> bool {
        self.scan_moves(side).contains(&position)
    }

    /// Opponent pawns that a pawn of `side` placed on `position` would flip.
    pub fn pawns_to_flip(&self, position: Position, side: Side) -> Vec<Position> {
        let own = CellState::from(side);
        let opponent = CellState::from(side.opposite());
        let mut flips = Vec::new();

        for direction in self.capture_directions(position, side) {
            let mut path = Vec::new();
            let mut current = position + direction;
            while self.cell(current) == Some(opponent) {
                path.push(current);
                current = current + direction;
            }
            if self.cell(current) == Some(own) {
                flips.extend(path);
            }
        }

        flips
    }

    /// Plays `position` for `side`. Returns false and leaves the board
    /// untouched when the move is illegal.
    pub fn apply_move(&mut self, position: Position, side: Side) -> bool {
        if !self.is_playable(position, side) {
            return false;
        }

        self.side_to_move = side;
        let mut positions = self.pawns_to_flip(position, side);
        positions.push(position);

        let own = CellState::from(side);
        for &changed in &positions {
            self.set_cell(changed, own);
        }
        self.history.push(MoveRecord { positions, side });

        true
    }

    /// Reverts the most recent move.
    pub fn undo_move(&mut self) -> Result<UndoneMove, BoardError> {
        let MoveRecord {
            mut positions,
            side,
        } = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        let placed = positions.pop().ok_or(BoardError::EmptyHistory)?;

        let previous = CellState::from(side.opposite());
        for &restored in &positions {
            self.set_cell(restored, previous);
        }
        self.set_cell(placed, CellState::Empty);

        Ok(UndoneMove {
            restored: positions,
            side,
            placed,
        })
    }

    /// Directions whose adjacent cell holds an opponent pawn.
    fn capture_directions(&self, position: Position, side: Side) -> Vec<Position> {
        let opponent = CellState::from(side.opposite());
        let mut directions = Vec::with_capacity(8);

        for row_delta in -1..=1 {
            for column_delta in -1..=1 {
                if row_delta == 0 && column_delta == 0 {
                    continue;
                }
                let direction = Position::new(column_delta, row_delta);
                if self.cell(position + direction) == Some(opponent) {
                    directions.push(direction);
                }
            }
        }

        directions
    }

    fn landing_cell(&self, origin: Position, direction: Position, side: Side) -> Option<Position> {
        let opponent = CellState::from(side.opposite());
        let mut current = origin + direction;
        while self.cell(current) == Some(opponent) {
            current = current + direction;
        }
        (self.cell(current) == Some(CellState::Empty)).then_some(current)
    }

    fn record_pass(&mut self, side: Side) {
        self.skipped_last_turn[side.index()] = true;
        if self.skipped_last_turn[side.opposite().index()] {
            self.game_finished = true;
        }
    }

    fn set_cell(&mut self, position: Position, cell: CellState) {
        debug_assert!(self.is_position_valid(position), "write outside board: {position}");
        if self.is_position_valid(position) {
            self.cells[position.column as usize][position.row as usize] = cell;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
