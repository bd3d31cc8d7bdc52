//! A single place-value row of beads.
//!
//! Each row holds exactly `base - 1` beads, split between the active side
//! (counted toward the row's digit) and the inactive side. The fields are
//! private so the split can only change through operations that keep
//! `active + inactive == base - 1`.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::bead::Base;

/// Which way beads travel on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Inactive side to active side (digit goes up).
    TowardActive,
    /// Active side to inactive side (digit goes down).
    TowardInactive,
}

/// Bead split for one row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Row {
    active: u8,
    inactive: u8,
}

impl Row {
    /// A row with every bead on the inactive side (digit 0).
    #[inline]
    pub const fn empty(base: Base) -> Self {
        Self {
            active: 0,
            inactive: base.beads_per_row(),
        }
    }

    /// A row showing `digit`, clamped to `base - 1`.
    pub fn with_digit(digit: u64, base: Base) -> Self {
        let total = base.beads_per_row();
        let active = digit.min(total as u64) as u8;
        Self {
            active,
            inactive: total - active,
        }
    }

    /// Beads on the active side; this is the row's digit.
    #[inline]
    pub const fn active(&self) -> u8 {
        self.active
    }

    /// Beads on the inactive side.
    #[inline]
    pub const fn inactive(&self) -> u8 {
        self.inactive
    }

    /// Total beads on the row (always `base - 1`).
    #[inline]
    pub const fn total(&self) -> u8 {
        self.active + self.inactive
    }

    /// Beads available to move in `direction`.
    #[inline]
    pub const fn available(&self, direction: Direction) -> u8 {
        match direction {
            Direction::TowardActive => self.inactive,
            Direction::TowardInactive => self.active,
        }
    }

    /// Can at least one bead move in `direction`?
    #[inline]
    pub const fn can_move(&self, direction: Direction) -> bool {
        self.available(direction) > 0
    }

    /// Move beads in `direction`: all available when `move_all`, else one.
    ///
    /// Returns the number of beads moved. If the source side holds fewer
    /// beads than requested nothing moves and 0 is returned.
    pub fn transfer(&mut self, direction: Direction, move_all: bool) -> u8 {
        let available = self.available(direction);
        let count = if move_all { available } else { 1 };
        if available < count {
            return 0;
        }

        match direction {
            Direction::TowardActive => {
                self.active += count;
                self.inactive -= count;
            }
            Direction::TowardInactive => {
                self.active -= count;
                self.inactive += count;
            }
        }
        count
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row({}|{})", self.active, self.inactive)
    }
}

/// Beads drawn as `●` (active) then `○` (inactive), with a gap between.
impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.active {
            write!(f, "●")?;
        }
        write!(f, " ")?;
        for _ in 0..self.inactive {
            write!(f, "○")?;
        }
        Ok(())
    }
}
