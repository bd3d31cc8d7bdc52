//! Conversion between integer values and row bead splits.
//!
//! Rows are indexed from least significant (index 0) to most significant
//! (index `rows - 1`). The weight of row `i` is `base^i`.

use crate::bead::{Base, Row};

/// Largest supported row count.
///
/// `16^15` is the largest place value that has to fit in a `u64`.
pub const MAX_ROWS: usize = 16;

/// Default row count.
pub const DEFAULT_ROWS: usize = 8;

/// Weight of row `index`: `base^index`, saturating at `u64::MAX`.
#[inline]
pub fn place_value(base: Base, index: usize) -> u64 {
    (base.get() as u64).saturating_pow(index as u32)
}

/// Ceiling reachable by value increments: `(base - 1) * base^(rows - 1)`.
///
/// This is lower than `base^rows - 1`, the value with every bead active.
/// Increments clamp here; only direct bead moves reach beyond it.
pub fn max_value(base: Base, rows: usize) -> u64 {
    let top = place_value(base, rows.saturating_sub(1));
    top.saturating_mul(base.beads_per_row() as u64)
}

/// Value with every bead on every row active: `base^rows - 1`.
pub fn full_value(base: Base, rows: usize) -> u64 {
    (0..rows).fold(0u64, |acc, i| {
        acc.saturating_add(place_value(base, i).saturating_mul(base.beads_per_row() as u64))
    })
}

/// Lay out `value` over `rows` rows.
///
/// Rows are filled from the most significant down. A digit that does not fit
/// a row is clamped to `base - 1`; magnitude above what the top row can show
/// is silently dropped.
pub fn value_to_rows(value: u64, base: Base, rows: usize) -> Vec<Row> {
    let mut out = vec![Row::empty(base); rows];
    let mut remaining = value;

    for i in (0..rows).rev() {
        let place = place_value(base, i);
        let digit = remaining / place;
        if digit > 0 {
            out[i] = Row::with_digit(digit, base);
            remaining -= digit * place;
        }
    }

    out
}

/// Sum of `active * base^i` over all rows.
pub fn rows_to_value(rows: &[Row], base: Base) -> u64 {
    rows.iter()
        .enumerate()
        .fold(0u64, |acc, (i, row)| {
            acc.saturating_add((row.active() as u64).saturating_mul(place_value(base, i)))
        })
}

/// Row digits, most significant first.
pub fn digits_msb_first(rows: &[Row]) -> Vec<u8> {
    rows.iter().rev().map(|row| row.active()).collect()
}
