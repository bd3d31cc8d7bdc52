//! The bead model: configuration, row state and the operations on them.
//!
//! Row state is the only store of truth. The value is cached for display and
//! recomputed from the rows after every mutation.

use std::fmt;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};
use crate::bead::{self, Base, Direction, Row, MAX_ROWS, DEFAULT_ROWS};
use crate::config::AbacusConfig;

/// Errors from model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("row {index} out of range (abacus has {rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },
}

/// The abacus.
#[derive(Clone, PartialEq, Eq)]
pub struct BeadModel {
    base: Base,
    rows: Vec<Row>,
    /// Cached `rows_to_value(rows)`.
    value: u64,
}

/// Read-only view of the model, for rendering or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub base: Base,
    pub value: u64,
    pub max_value: u64,
    /// Least significant first.
    pub rows: Vec<Row>,
}

impl BeadModel {
    /// Create an abacus with `base` and `rows`, both clamped to their ranges.
    pub fn new(base: u8, rows: usize) -> Self {
        let mut model = Self {
            base: Base::DECIMAL,
            rows: Vec::new(),
            value: 0,
        };
        model.configure(base, rows);
        model
    }

    /// Create an abacus from a loaded configuration.
    pub fn from_config(config: &AbacusConfig) -> Self {
        Self::new(config.base, config.rows)
    }

    /// Set base and row count, clearing every row.
    pub fn configure(&mut self, base: u8, rows: usize) {
        let base = Base::new(base);
        let rows = rows.clamp(1, MAX_ROWS);
        self.base = base;
        self.rows = vec![Row::empty(base); rows];
        self.value = 0;
        debug!(base = base.get(), rows, "abacus configured");
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Current base.
    #[inline]
    pub fn base(&self) -> Base {
        self.base
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Rows, least significant first.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// A single row, if `index` is in range.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Weight of row `index`.
    pub fn place_value(&self, index: usize) -> u64 {
        bead::place_value(self.base, index)
    }

    /// Ceiling for value increments.
    pub fn max_value(&self) -> u64 {
        bead::max_value(self.base, self.rows.len())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            base: self.base,
            value: self.value,
            max_value: self.max_value(),
            rows: self.rows.clone(),
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Add `delta` to the value, clamping to `[0, max_value]`, and lay the
    /// result out over the rows.
    ///
    /// Returns the new value.
    pub fn change_value(&mut self, delta: i64) -> u64 {
        let max = self.max_value();
        let candidate = self.value as i128 + delta as i128;
        let target = candidate.clamp(0, max as i128) as u64;
        self.set_value(target);
        debug!(delta, value = self.value, "value changed");
        self.value
    }

    /// Move beads on row `index`: one bead, or every available bead when
    /// `move_all`.
    ///
    /// Returns `Ok(true)` if beads moved and `Ok(false)` if the source side
    /// did not hold enough beads (the row is left untouched).
    pub fn move_bead(&mut self, index: usize, direction: Direction, move_all: bool) -> Result<bool, ModelError> {
        let rows = self.rows.len();
        let row = self.rows
            .get_mut(index)
            .ok_or(ModelError::RowOutOfRange { index, rows })?;

        let moved = row.transfer(direction, move_all);
        if moved == 0 {
            debug!(index, ?direction, move_all, "bead move ignored");
            return Ok(false);
        }

        self.resync_value();
        trace!(index, ?direction, moved, value = self.value, "beads moved");
        Ok(true)
    }

    /// Switch to `base` (clamped to `[2, 16]`) and clear every row.
    pub fn set_base(&mut self, base: u8) -> Base {
        let rows = self.rows.len();
        self.configure(base, rows);
        self.base
    }

    /// Raise the base by one (up to 16) and clear every row.
    pub fn increment_base(&mut self) -> Base {
        self.set_base(self.base.incremented().get())
    }

    /// Lower the base by one (down to 2) and clear every row.
    pub fn decrement_base(&mut self) -> Base {
        self.set_base(self.base.decremented().get())
    }

    /// Set the value to zero and clear every row.
    pub fn reset(&mut self) {
        self.set_value(0);
        debug!("abacus reset");
    }

    fn set_value(&mut self, value: u64) {
        self.rows = bead::value_to_rows(value, self.base, self.rows.len());
        self.resync_value();
    }

    fn resync_value(&mut self) {
        self.value = bead::rows_to_value(&self.rows, self.base);
    }
}

impl Default for BeadModel {
    fn default() -> Self {
        Self::new(Base::DECIMAL.get(), DEFAULT_ROWS)
    }
}

impl fmt::Debug for BeadModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeadModel")
            .field("base", &self.base)
            .field("value", &self.value)
            .field("rows", &self.rows)
            .finish()
    }
}

/// One line per row, most significant first: `place× beads`.
impl fmt::Display for BeadModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.place_value(self.rows.len() - 1).to_string().len();
        for (i, row) in self.rows.iter().enumerate().rev() {
            writeln!(f, "{:>width$}× {}", self.place_value(i), row, width = width)?;
        }
        write!(f, "= {} (base {}: {})", self.value, self.base, self.base.format_value(self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actives(model: &BeadModel) -> Vec<u8> {
        model.rows().iter().map(|r| r.active()).collect()
    }

    #[test]
    fn test_new_is_zeroed() {
        let model = BeadModel::default();
        assert_eq!(model.base().get(), 10);
        assert_eq!(model.row_count(), 8);
        assert_eq!(model.value(), 0);
        assert!(model.rows().iter().all(|r| r.active() == 0 && r.inactive() == 9));
    }

    #[test]
    fn test_configure_clamps() {
        let model = BeadModel::new(40, 0);
        assert_eq!(model.base().get(), 16);
        assert_eq!(model.row_count(), 1);

        let model = BeadModel::new(1, 100);
        assert_eq!(model.base().get(), 2);
        assert_eq!(model.row_count(), MAX_ROWS);
    }

    #[test]
    fn test_change_value_decimal() {
        let mut model = BeadModel::new(10, 3);
        assert_eq!(model.change_value(235), 235);
        assert_eq!(actives(&model), vec![5, 3, 2]);
    }

    #[test]
    fn test_repeated_binary_increment() {
        let mut model = BeadModel::new(2, 4);
        for _ in 0..5 {
            model.change_value(1);
        }
        assert_eq!(model.value(), 5);
        assert_eq!(actives(&model), vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_change_value_clamps() {
        let mut model = BeadModel::new(10, 3);
        assert_eq!(model.change_value(-1), 0);
        assert_eq!(model.change_value(i64::MAX), 900);
        assert_eq!(model.change_value(1), 900);
        assert_eq!(model.change_value(i64::MIN), 0);
    }

    #[test]
    fn test_move_bead_one_then_all() {
        let mut model = BeadModel::new(10, 3);
        model.change_value(7);

        assert_eq!(model.move_bead(0, Direction::TowardActive, false), Ok(true));
        assert_eq!((model.rows()[0].active(), model.rows()[0].inactive()), (8, 1));
        assert_eq!(model.value(), 8);

        assert_eq!(model.move_bead(0, Direction::TowardActive, true), Ok(true));
        assert_eq!((model.rows()[0].active(), model.rows()[0].inactive()), (9, 0));
        assert_eq!(model.value(), 9);

        assert_eq!(model.move_bead(0, Direction::TowardActive, false), Ok(false));
        assert_eq!(model.value(), 9);
    }

    #[test]
    fn test_move_bead_updates_value_by_place() {
        let mut model = BeadModel::new(10, 3);
        model.move_bead(2, Direction::TowardActive, false).unwrap();
        model.move_bead(1, Direction::TowardActive, true).unwrap();
        assert_eq!(model.value(), 190);

        model.move_bead(1, Direction::TowardInactive, false).unwrap();
        assert_eq!(model.value(), 180);
    }

    #[test]
    fn test_move_bead_out_of_range() {
        let mut model = BeadModel::new(10, 3);
        assert_eq!(
            model.move_bead(3, Direction::TowardActive, false),
            Err(ModelError::RowOutOfRange { index: 3, rows: 3 })
        );
    }

    #[test]
    fn test_bead_moves_can_pass_increment_ceiling() {
        let mut model = BeadModel::new(10, 3);
        for i in 0..3 {
            model.move_bead(i, Direction::TowardActive, true).unwrap();
        }
        assert_eq!(model.value(), 999);

        // Value increments still clamp to the lower ceiling.
        assert_eq!(model.change_value(1), 900);
    }

    #[test]
    fn test_base_change_wipes_value() {
        let mut model = BeadModel::new(10, 3);
        model.change_value(50);

        assert_eq!(model.decrement_base().get(), 9);
        assert_eq!(model.value(), 0);
        assert!(model.rows().iter().all(|r| r.active() == 0 && r.inactive() == 8));

        model.change_value(5);
        assert_eq!(model.increment_base().get(), 10);
        assert_eq!(model.value(), 0);
        assert!(model.rows().iter().all(|r| r.inactive() == 9));
    }

    #[test]
    fn test_base_change_saturates() {
        let mut model = BeadModel::new(16, 2);
        assert_eq!(model.increment_base().get(), 16);

        let mut model = BeadModel::new(2, 2);
        assert_eq!(model.decrement_base().get(), 2);

        assert_eq!(model.set_base(99).get(), 16);
        assert_eq!(model.row_count(), 2);
    }

    #[test]
    fn test_reset() {
        let mut model = BeadModel::new(8, 4);
        model.change_value(100);
        model.reset();
        let once = model.clone();
        model.reset();
        assert_eq!(model, once);
        assert_eq!(model.value(), 0);
    }

    #[test]
    fn test_snapshot_json() {
        let mut model = BeadModel::new(2, 2);
        model.change_value(1);
        let json = serde_json::to_value(model.snapshot()).unwrap();
        assert_eq!(json["base"], 2);
        assert_eq!(json["value"], 1);
        assert_eq!(json["max_value"], 2);
        assert_eq!(json["rows"][0]["active"], 1);
        assert_eq!(json["rows"][1]["inactive"], 1);
    }

    #[test]
    fn test_display() {
        let mut model = BeadModel::new(4, 2);
        model.change_value(6);
        let text = format!("{}", model);
        assert_eq!(text, "4× ● ○○\n1× ●● ○\n= 6 (base 4: 12)");
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        fn model_strategy() -> impl Strategy<Value = BeadModel> {
            (Base::MIN..=Base::MAX, 1usize..=MAX_ROWS)
                .prop_map(|(base, rows)| BeadModel::new(base, rows))
        }

        fn assert_rows_full(model: &BeadModel) {
            let total = model.base().beads_per_row();
            for row in model.rows() {
                assert_eq!(row.active() + row.inactive(), total);
            }
        }

        proptest! {
            #[test]
            fn prop_round_trip(model in model_strategy(), seed in any::<u64>()) {
                let v = seed % (model.max_value() + 1);
                let rows = bead::value_to_rows(v, model.base(), model.row_count());
                prop_assert_eq!(bead::rows_to_value(&rows, model.base()), v);
            }

            #[test]
            fn prop_change_value_clamps(mut model in model_strategy(), deltas in prop::collection::vec(any::<i64>(), 1..8)) {
                for delta in deltas {
                    let value = model.change_value(delta);
                    prop_assert!(value <= model.max_value());
                    assert_rows_full(&model);
                }
            }

            #[test]
            fn prop_moves_keep_row_totals(
                mut model in model_strategy(),
                moves in prop::collection::vec((0usize..MAX_ROWS, any::<bool>(), any::<bool>()), 1..32),
            ) {
                for (index, toward_active, all) in moves {
                    let direction = if toward_active { Direction::TowardActive } else { Direction::TowardInactive };
                    let _ = model.move_bead(index % model.row_count(), direction, all);
                    assert_rows_full(&model);
                    prop_assert_eq!(model.value(), bead::rows_to_value(model.rows(), model.base()));
                }
            }

            #[test]
            fn prop_reset_idempotent(mut model in model_strategy(), delta in any::<i64>()) {
                model.change_value(delta);
                model.reset();
                let once = model.clone();
                model.reset();
                prop_assert_eq!(model, once);
            }

            #[test]
            fn prop_base_change_wipes(mut model in model_strategy(), delta in any::<i64>(), base in 0u8..=32) {
                model.change_value(delta);
                model.set_base(base);
                prop_assert_eq!(model.value(), 0);
                prop_assert!(model.rows().iter().all(|r| r.active() == 0));
                assert_rows_full(&model);
            }
        }
    }
}
