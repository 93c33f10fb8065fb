use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of columns (`A`..`I`).
pub const COLUMNS: usize = 9;
/// Number of rows (`1`..`7`).
pub const ROWS: usize = 7;

/// Raw cell codes used by the host grid.
pub const RAW_EMPTY: i8 = -1;
pub const RAW_WHITE: i8 = 0;
pub const RAW_BLACK: i8 = 1;

/// Raw host grid, indexed `[column][row]`.
pub type RawGrid = [[i8; ROWS]; COLUMNS];

/// A board coordinate, also used as a scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub column: i32,
    pub row: i32,
}

impl Position {
    /// The host's encoding of a forced pass.
    pub const PASS: Position = Position {
        column: -1,
        row: -1,
    };

    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    pub fn is_pass(&self) -> bool {
        *self == Self::PASS
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.column + rhs.column, self.row + rhs.row)
    }
}

/// Game notation: column letter then rank, `D3` is `{3, 2}`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return f.write_str("pass");
        }
        match u8::try_from(self.column) {
            Ok(column) if (column as usize) < COLUMNS => {
                write!(f, "{}{}", (b'A' + column) as char, self.row + 1)
            }
            _ => write!(f, "({}, {})", self.column, self.row),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let letter = chars
            .next()
            .ok_or_else(|| "empty coordinate".to_string())?
            .to_ascii_uppercase();
        let column = (letter as i32) - ('A' as i32);
        let rank: i32 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("invalid rank in {s:?}"))?;

        let position = Position::new(column, rank - 1);
        if !(0..COLUMNS as i32).contains(&position.column)
            || !(0..ROWS as i32).contains(&position.row)
        {
            return Err(format!("coordinate {s:?} is off the board"));
        }
        Ok(position)
    }
}

/// One of the two players. The discriminants match the raw cell codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn from_white_turn(white_turn: bool) -> Side {
        if white_turn { Side::White } else { Side::Black }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Empty,
    White,
    Black,
}

impl CellState {
    pub fn from_raw(value: i8) -> Option<CellState> {
        match value {
            RAW_EMPTY => Some(CellState::Empty),
            RAW_WHITE => Some(CellState::White),
            RAW_BLACK => Some(CellState::Black),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i8 {
        match self {
            CellState::Empty => RAW_EMPTY,
            CellState::White => RAW_WHITE,
            CellState::Black => RAW_BLACK,
        }
    }

    pub fn is_side(self, side: Side) -> bool {
        self == CellState::from(side)
    }
}

impl From<Side> for CellState {
    fn from(side: Side) -> Self {
        match side {
            Side::White => CellState::White,
            Side::Black => CellState::Black,
        }
    }
}

/// Per-side information exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub pawns: u32,
    pub seconds_elapsed: u64,
    pub has_skipped_last_turn: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Raw grid, `board[column][row]` with -1 empty, 0 white, 1 black.
    pub board: Vec<Vec<i8>>,
    pub side_to_move: Side,
    pub white: PlayerRecord,
    pub black: PlayerRecord,
    pub is_game_finished: bool,
    /// Contract:
    /// - Normal move: positions flipped by the last move, placed pawn last.
    /// - No move yet: empty.
    pub last_move: Vec<Position>,
}
