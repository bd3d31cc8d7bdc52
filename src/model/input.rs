//! Translating user gestures into model operations.
//!
//! A front end turns clicks and key presses into [`Action`]s and hands them
//! to [`BeadModel::apply`]. Keyboard listeners are registered on an
//! [`InputRouter`]; each registration is a guard that detaches the listener
//! when dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use serde::{Serialize, Deserialize};
use tracing::trace;
use crate::bead::Direction;
use crate::model::{BeadModel, Controls, ModelError};

/// A key press, independent of any terminal or browser library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` name (`"ArrowUp"`, `"a"`, ...).
    pub fn from_dom_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// A model operation requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Add a delta to the value (clamped).
    ChangeValue(i64),
    /// Move one bead, or all available beads, on a row.
    MoveBead { row: usize, direction: Direction, all: bool },
    IncrementBase,
    DecrementBase,
    Reset,
}

impl Action {
    /// Arrow-key binding: Up/Right increment, Down/Left decrement.
    pub fn from_arrow(key: Key) -> Option<Self> {
        match key {
            Key::Up | Key::Right => Some(Action::ChangeValue(1)),
            Key::Down | Key::Left => Some(Action::ChangeValue(-1)),
            Key::Char(_) => None,
        }
    }
}

impl BeadModel {
    /// Perform `action`.
    ///
    /// Returns whether the state changed.
    pub fn apply(&mut self, action: Action) -> Result<bool, ModelError> {
        let before = self.snapshot();
        match action {
            Action::ChangeValue(delta) => {
                self.change_value(delta);
            }
            Action::MoveBead { row, direction, all } => {
                return self.move_bead(row, direction, all);
            }
            Action::IncrementBase => {
                self.increment_base();
            }
            Action::DecrementBase => {
                self.decrement_base();
            }
            Action::Reset => self.reset(),
        }
        Ok(self.snapshot() != before)
    }

    /// Perform `action` only if its control is enabled.
    ///
    /// Returns `Ok(false)` without touching the model for a disabled control.
    pub fn apply_enabled(&mut self, action: Action) -> Result<bool, ModelError> {
        if !Controls::of(self).allows(&action) {
            trace!(?action, "control disabled");
            return Ok(false);
        }
        self.apply(action)
    }
}

// ============================================================================
// Listener registration
// ============================================================================

type Listener = Box<dyn Fn(Key) -> Option<Action>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Fans key presses out to registered listeners.
#[derive(Default)]
pub struct InputRouter {
    listeners: Rc<RefCell<Listeners>>,
}

/// Keeps a listener attached; dropping it detaches the listener.
#[must_use = "dropping a Registration detaches its listener immediately"]
pub struct Registration {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl InputRouter {
    /// Create a router with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `listener` until the returned guard is dropped.
    pub fn listen<F>(&self, listener: F) -> Registration
    where
        F: Fn(Key) -> Option<Action> + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));
        trace!(id, "input listener attached");

        Registration {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Attach the standard arrow-key binding.
    pub fn listen_arrows(&self) -> Registration {
        self.listen(Action::from_arrow)
    }

    /// Collect the actions every attached listener produces for `key`,
    /// in registration order.
    ///
    /// Listeners must not attach or detach listeners on this router.
    pub fn dispatch(&self, key: Key) -> Vec<Action> {
        self.listeners
            .borrow()
            .entries
            .iter()
            .filter_map(|(_, listener)| listener(key))
            .collect()
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Are no listeners attached?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
            trace!(id = self.id, "input listener detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_bindings() {
        assert_eq!(Action::from_arrow(Key::Up), Some(Action::ChangeValue(1)));
        assert_eq!(Action::from_arrow(Key::Right), Some(Action::ChangeValue(1)));
        assert_eq!(Action::from_arrow(Key::Down), Some(Action::ChangeValue(-1)));
        assert_eq!(Action::from_arrow(Key::Left), Some(Action::ChangeValue(-1)));
        assert_eq!(Action::from_arrow(Key::Char('x')), None);
    }

    #[test]
    fn test_dom_names() {
        assert_eq!(Key::from_dom_name("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom_name("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom_name("r"), Some(Key::Char('r')));
        assert_eq!(Key::from_dom_name("Shift"), None);
    }

    #[test]
    fn test_apply_reports_change() {
        let mut model = BeadModel::new(10, 2);
        assert_eq!(model.apply(Action::ChangeValue(-1)), Ok(false));
        assert_eq!(model.apply(Action::ChangeValue(1)), Ok(true));
        assert_eq!(model.apply(Action::Reset), Ok(true));
        assert_eq!(model.apply(Action::Reset), Ok(false));

        let pull = Action::MoveBead { row: 0, direction: Direction::TowardInactive, all: false };
        assert_eq!(model.apply(pull), Ok(false));
        let push = Action::MoveBead { row: 1, direction: Direction::TowardActive, all: true };
        assert_eq!(model.apply(push), Ok(true));
        assert_eq!(model.value(), 90);
    }

    #[test]
    fn test_apply_enabled_respects_controls() {
        let mut model = BeadModel::new(16, 2);
        assert_eq!(model.apply_enabled(Action::IncrementBase), Ok(false));
        assert_eq!(model.apply_enabled(Action::DecrementBase), Ok(true));
        assert_eq!(model.base().get(), 15);
    }

    #[test]
    fn test_registration_detaches_on_drop() {
        let router = InputRouter::new();
        {
            let _arrows = router.listen_arrows();
            assert_eq!(router.len(), 1);
            assert_eq!(router.dispatch(Key::Up), vec![Action::ChangeValue(1)]);
        }
        assert!(router.is_empty());
        assert!(router.dispatch(Key::Up).is_empty());
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let router = InputRouter::new();
        let _arrows = router.listen_arrows();
        let reset = router.listen(|key| (key == Key::Char('r') || key == Key::Up).then_some(Action::Reset));

        assert_eq!(router.dispatch(Key::Up), vec![Action::ChangeValue(1), Action::Reset]);
        assert_eq!(router.dispatch(Key::Char('r')), vec![Action::Reset]);

        drop(reset);
        assert_eq!(router.dispatch(Key::Char('r')), Vec::<Action>::new());
    }

    #[test]
    fn test_registration_outlives_router() {
        let router = InputRouter::new();
        let guard = router.listen_arrows();
        drop(router);
        drop(guard);
    }

    #[test]
    fn test_action_json() {
        let action = Action::MoveBead { row: 2, direction: Direction::TowardActive, all: true };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"move_bead":{"row":2,"direction":"toward_active","all":true}}"#);
        assert_eq!(serde_json::from_str::<Action>(&json).unwrap(), action);
    }
}
