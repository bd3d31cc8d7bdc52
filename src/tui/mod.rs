//! Terminal front end for the abacus.
//!
//! Provides an interactive view with:
//! - One line of beads per row, labelled with its place value
//! - Value shown in decimal and in the current base
//! - Keyboard control of value, beads, base and reset

mod app;
mod ui;

pub use app::{AbacusApp, run_abacus};
