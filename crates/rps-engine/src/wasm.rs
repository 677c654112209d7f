//! WASM bindings for the browser front end

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{describe_round, MatchConfig, MatchEngine, Move, SeededRng};

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn parse_move(value: &str) -> Result<Move, JsError> {
    value.parse::<Move>().map_err(|e| JsError::new(&e.to_string()))
}

/// Match engine handle owned by the page
#[wasm_bindgen]
pub struct WasmMatchEngine {
    inner: MatchEngine,
}

#[wasm_bindgen]
impl WasmMatchEngine {
    /// Best-of-five engine seeded from browser entropy
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmMatchEngine {
        WasmMatchEngine {
            inner: MatchEngine::with_config(MatchConfig::best_of_five(), SeededRng::from_entropy()),
        }
    }

    /// Best-of-five engine with a fixed seed, for replays
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32) -> WasmMatchEngine {
        WasmMatchEngine {
            inner: MatchEngine::new(seed as u64),
        }
    }

    #[wasm_bindgen(js_name = setPlayerName)]
    pub fn set_player_name(&mut self, name: &str) -> Result<(), JsError> {
        self.inner
            .set_player_name(name)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Play a round with `"rock"`, `"paper"` or `"scissors"`
    ///
    /// # Returns
    /// Serialized RoundResult
    pub fn play(&mut self, player_move: &str) -> Result<JsValue, JsError> {
        let player_move = parse_move(player_move)?;
        let result = self
            .inner
            .resolve_round(player_move)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&result)
    }

    /// Abandon the active match and count it
    #[wasm_bindgen(js_name = finalizeMatch)]
    pub fn finalize_match(&mut self) -> Result<JsValue, JsError> {
        let result = self
            .inner
            .finalize_match()
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&result)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(self.inner.state())
    }

    pub fn stats(&self) -> Result<JsValue, JsError> {
        to_js(self.inner.stats())
    }

    /// Result of the last finished match, or `null`
    #[wasm_bindgen(js_name = lastResult)]
    pub fn last_result(&self) -> Result<JsValue, JsError> {
        match self.inner.last_result() {
            Some(result) => to_js(result),
            None => Ok(JsValue::NULL),
        }
    }
}

impl Default for WasmMatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Serialize)]
struct MoveInfo {
    id: String,
    name: String,
    symbol: String,
}

/// Get all playable moves with their display symbols
#[wasm_bindgen]
pub fn get_move_types() -> Result<JsValue, JsError> {
    let moves: Vec<MoveInfo> = Move::ALL
        .iter()
        .map(|m| MoveInfo {
            id: m.to_string(),
            name: m.title().to_string(),
            symbol: m.symbol().to_string(),
        })
        .collect();

    to_js(&moves)
}

/// Get the announcement text for a round
#[wasm_bindgen]
pub fn describe_round_outcome(
    player_move: &str,
    bot_move: &str,
    player_name: &str,
) -> Result<String, JsError> {
    let player_move = parse_move(player_move)?;
    let bot_move = parse_move(bot_move)?;
    Ok(describe_round(player_name, player_move, bot_move))
}
