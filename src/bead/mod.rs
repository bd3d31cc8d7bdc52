//! Place-value bead primitives.
//!
//! This module provides the value types of the abacus:
//! - [`Base`] - The radix, always within `[2, 16]`
//! - [`Row`] - One place-value row of `base - 1` beads
//! - [`Direction`] - Which way beads move on a row
//!
//! plus the pure conversions between an integer and a row layout.

mod base;
mod row;
pub mod convert;

pub use base::Base;
pub use row::{Direction, Row};
pub use convert::{
    value_to_rows, rows_to_value, max_value, full_value, place_value, MAX_ROWS, DEFAULT_ROWS,
};
