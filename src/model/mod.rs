//! The abacus model and its control surface.
//!
//! - [`BeadModel`] - Configuration plus row state, with every mutation
//! - [`Controls`] - Which controls a front end may offer right now
//! - [`Action`], [`Key`], [`InputRouter`] - Mapping user input onto the model

mod abacus;
mod controls;
mod input;

pub use abacus::{BeadModel, ModelError, Snapshot};
pub use controls::{Controls, RowControls};
pub use input::{Action, Key, InputRouter, Registration};
