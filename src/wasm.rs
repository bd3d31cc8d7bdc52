//! WebAssembly bindings for the abacus.
//!
//! This module provides JavaScript-friendly wrappers around [`BeadModel`].
//! Methods that mutate the abacus return the new value so the page can
//! re-render without a second call.

use wasm_bindgen::prelude::*;
use crate::{Action, BeadModel, Controls, Direction, Key, DEFAULT_ROWS};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly abacus wrapper.
#[wasm_bindgen]
pub struct WasmAbacus {
    model: BeadModel,
}

#[wasm_bindgen]
impl WasmAbacus {
    /// Create an abacus; out-of-range arguments are clamped.
    #[wasm_bindgen(constructor)]
    pub fn new(base: u8, rows: usize) -> Self {
        Self {
            model: BeadModel::new(base, rows),
        }
    }

    /// Reconfigure base and row count, clearing the abacus.
    #[wasm_bindgen]
    pub fn configure(&mut self, base: u8, rows: usize) {
        self.model.configure(base, rows);
    }

    /// Add `delta` to the value (clamped). Returns the new value.
    #[wasm_bindgen]
    pub fn change_value(&mut self, delta: i32) -> f64 {
        self.model.change_value(delta as i64) as f64
    }

    /// Move one (or all) beads on a row. Returns whether anything moved.
    #[wasm_bindgen]
    pub fn move_bead(&mut self, row: usize, toward_active: bool, move_all: bool) -> Result<bool, JsError> {
        let direction = if toward_active { Direction::TowardActive } else { Direction::TowardInactive };
        self.model.move_bead(row, direction, move_all)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Raise the base by one. Returns the new base.
    #[wasm_bindgen]
    pub fn increment_base(&mut self) -> u8 {
        self.model.increment_base().get()
    }

    /// Lower the base by one. Returns the new base.
    #[wasm_bindgen]
    pub fn decrement_base(&mut self) -> u8 {
        self.model.decrement_base().get()
    }

    /// Clear the abacus.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.model.reset();
    }

    /// Handle a `keydown` event by its `key` name. Returns whether the
    /// abacus changed.
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str) -> bool {
        match Key::from_dom_name(key).and_then(Action::from_arrow) {
            Some(action) => self.model.apply_enabled(action).unwrap_or(false),
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn base(&self) -> u8 {
        self.model.base().get()
    }

    #[wasm_bindgen]
    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    /// Current value. JavaScript numbers are exact up to 2^53.
    #[wasm_bindgen]
    pub fn value(&self) -> f64 {
        self.model.value() as f64
    }

    /// Current value as a decimal string (exact for every row count).
    #[wasm_bindgen]
    pub fn value_string(&self) -> String {
        self.model.value().to_string()
    }

    /// Current value written in the current base.
    #[wasm_bindgen]
    pub fn value_in_base(&self) -> String {
        self.model.base().format_value(self.model.value())
    }

    #[wasm_bindgen]
    pub fn max_value(&self) -> f64 {
        self.model.max_value() as f64
    }

    /// Active bead counts, least significant row first.
    #[wasm_bindgen]
    pub fn active_counts(&self) -> Vec<u8> {
        self.model.rows().iter().map(|r| r.active()).collect()
    }

    /// Inactive bead counts, least significant row first.
    #[wasm_bindgen]
    pub fn inactive_counts(&self) -> Vec<u8> {
        self.model.rows().iter().map(|r| r.inactive()).collect()
    }

    /// Place value label for a row.
    #[wasm_bindgen]
    pub fn place_value(&self, row: usize) -> f64 {
        self.model.place_value(row) as f64
    }

    /// Full state as JSON.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.model.snapshot())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Control enablement as JSON.
    #[wasm_bindgen]
    pub fn controls_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&Controls::of(&self.model))
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for WasmAbacus {
    fn default() -> Self {
        Self::new(10, DEFAULT_ROWS)
    }
}
