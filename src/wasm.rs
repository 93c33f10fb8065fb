//! JavaScript bindings for browser hosts.

use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::game::{self, Engine, EngineConfig, Playable};
use crate::types::{Position, Side};

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Best move as `[column, row]`, `[-1, -1]` for a pass.
///
/// `board` is an array of 9 columns of 7 cells (-1 empty, 0 white, 1 black).
#[wasm_bindgen(js_name = getNextMove)]
pub fn get_next_move(board: JsValue, depth: u32, white_turn: bool) -> Result<Vec<i32>, JsValue> {
    let grid: Vec<Vec<i8>> = serde_wasm_bindgen::from_value(board)?;
    let board = Board::from_raw_slices(&grid, Side::from_white_turn(white_turn))
        .map_err(to_js_error)?;
    let mv = game::best_move(board, depth)
        .map_err(to_js_error)?
        .unwrap_or(Position::PASS);
    Ok(vec![mv.column, mv.row])
}

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl WasmEngine {
    /// `config` may be `undefined` or `{ depth }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmEngine, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            engine: Engine::new(config),
        })
    }

    pub fn name(&self) -> String {
        self.engine.name().to_string()
    }

    #[wasm_bindgen(js_name = playMove)]
    pub fn play_move(&mut self, column: i32, row: i32, is_white: bool) -> bool {
        self.engine.play_move(column, row, is_white)
    }

    #[wasm_bindgen(js_name = isPlayable)]
    pub fn is_playable(&self, column: i32, row: i32, is_white: bool) -> bool {
        self.engine.is_playable(column, row, is_white)
    }

    #[wasm_bindgen(js_name = undoMove)]
    pub fn undo_move(&mut self) -> Result<(), JsValue> {
        self.engine.undo_move().map(|_| ()).map_err(to_js_error)
    }

    /// Distinct legal moves of the side to move as `[column, row]` pairs.
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&mut self) -> Result<JsValue, JsValue> {
        let moves = self.engine.legal_moves();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    #[wasm_bindgen(js_name = suggestMove)]
    pub fn suggest_move(&self) -> Result<Vec<i32>, JsValue> {
        let mv = self
            .engine
            .suggest_move()
            .map_err(to_js_error)?
            .unwrap_or(Position::PASS);
        Ok(vec![mv.column, mv.row])
    }

    #[wasm_bindgen(js_name = switchSide)]
    pub fn switch_side(&mut self) {
        self.engine.switch_side();
    }

    #[wasm_bindgen(js_name = tickClock)]
    pub fn tick_clock(&mut self) {
        self.engine.tick_clock();
    }

    #[wasm_bindgen(js_name = whiteScore)]
    pub fn white_score(&self) -> u32 {
        self.engine.white_score()
    }

    #[wasm_bindgen(js_name = blackScore)]
    pub fn black_score(&self) -> u32 {
        self.engine.black_score()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.state())?)
    }
}
