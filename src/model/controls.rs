//! Which controls a front end should offer for the current state.
//!
//! A disabled control must not invoke its operation.

use serde::{Serialize, Deserialize};
use crate::bead::Direction;
use crate::model::{Action, BeadModel};

/// Enablement of the per-row bead controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowControls {
    /// "Push one"/"push all" toward the active side.
    pub to_active: bool,
    /// "Push one"/"push all" toward the inactive side.
    pub to_inactive: bool,
}

/// Enablement of every control on the abacus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub base_up: bool,
    pub base_down: bool,
    pub value_up: bool,
    pub value_down: bool,
    /// Least significant first.
    pub rows: Vec<RowControls>,
}

impl Controls {
    /// Compute control enablement for `model`.
    pub fn of(model: &BeadModel) -> Self {
        Self {
            base_up: !model.base().is_max(),
            base_down: !model.base().is_min(),
            value_up: model.value() < model.max_value(),
            value_down: model.value() > 0,
            rows: model.rows()
                .iter()
                .map(|row| RowControls {
                    to_active: row.can_move(Direction::TowardActive),
                    to_inactive: row.can_move(Direction::TowardInactive),
                })
                .collect(),
        }
    }

    /// Is the control that triggers `action` enabled?
    ///
    /// Value changes are judged by the sign of the delta, the way the
    /// +/- buttons and arrow keys use them. Reset is always enabled.
    pub fn allows(&self, action: &Action) -> bool {
        match *action {
            Action::ChangeValue(delta) if delta > 0 => self.value_up,
            Action::ChangeValue(delta) if delta < 0 => self.value_down,
            Action::ChangeValue(_) => false,
            Action::MoveBead { row, direction, .. } => match self.rows.get(row) {
                Some(rc) => match direction {
                    Direction::TowardActive => rc.to_active,
                    Direction::TowardInactive => rc.to_inactive,
                },
                None => false,
            },
            Action::IncrementBase => self.base_up,
            Action::DecrementBase => self.base_down,
            Action::Reset => true,
        }
    }
}
