//! Move engine for Othello on a 9x7 board.
//!
//! - [`board`]: grid, legal moves, flips, play and undo
//! - [`ai::eval`]: static evaluation from White's point of view
//! - [`ai::search`]: fixed-depth search with a single pruning bound
//! - [`game`]: the host-facing engine and its move-query contract

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod clock;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::{Board, BoardError};
pub use game::{Engine, EngineConfig, Playable};
pub use types::{Position, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
