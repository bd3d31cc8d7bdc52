//! # Bead Abacus
//!
//! An interactive place-value abacus with a selectable base.
//!
//! Each row of the abacus is one digit position and holds `base - 1` beads,
//! split between an active side (counted) and an inactive side. The value
//! shown is the sum of every row's active beads times its place value.

pub mod bead;
pub mod model;
pub mod config;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use bead::{Base, Row, Direction, MAX_ROWS, DEFAULT_ROWS};
pub use model::{BeadModel, ModelError, Snapshot, Controls, Action, Key, InputRouter};
pub use config::{AbacusConfig, ConfigError, load_config};

#[cfg(feature = "tui")]
pub use tui::run_abacus;
