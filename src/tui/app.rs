//! Abacus application state and key handling.

use crate::{Action, BeadModel, Controls, Direction, InputRouter, Key};
use crate::model::Registration;

/// Abacus application state.
pub struct AbacusApp {
    /// The abacus being shown.
    pub model: BeadModel,
    /// Selected row (0 = least significant).
    pub selected_row: usize,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
}

impl AbacusApp {
    /// Create an app around `model`.
    pub fn new(model: BeadModel) -> Self {
        Self {
            model,
            selected_row: 0,
            should_quit: false,
            status: "Ready. ↑/→ add one, ↓/← take one, q to quit.".into(),
        }
    }

    /// Attach the app's stateless bindings: arrows plus base and reset keys.
    pub fn bind(router: &InputRouter) -> Vec<Registration> {
        vec![
            router.listen_arrows(),
            router.listen(|key| match key {
                Key::Char('+') | Key::Char('=') => Some(Action::IncrementBase),
                Key::Char('-') => Some(Action::DecrementBase),
                Key::Char('x') => Some(Action::Reset),
                _ => None,
            }),
        ]
    }

    /// Handle a key press: routed actions first, then row and app keys.
    pub fn handle_key(&mut self, router: &InputRouter, key: Key) {
        let actions = router.dispatch(key);
        if !actions.is_empty() {
            for action in actions {
                self.perform(action);
            }
            return;
        }

        match key {
            Key::Char('q') => self.should_quit = true,
            Key::Char('k') | Key::Char('\t') => self.select_row(1),
            Key::Char('j') => self.select_row(-1),
            Key::Char('a') => self.move_selected(Direction::TowardActive, false),
            Key::Char('A') => self.move_selected(Direction::TowardActive, true),
            Key::Char('d') => self.move_selected(Direction::TowardInactive, false),
            Key::Char('D') => self.move_selected(Direction::TowardInactive, true),
            _ => {}
        }
    }

    /// Perform `action` if its control is enabled, updating the status line.
    pub fn perform(&mut self, action: Action) {
        match self.model.apply_enabled(action) {
            Ok(true) => {
                self.status = self.describe(action);
                self.selected_row = self.selected_row.min(self.model.row_count() - 1);
            }
            Ok(false) => {
                self.status = format!("{} unavailable", label(action));
            }
            Err(e) => {
                self.status = format!("Error: {}", e);
            }
        }
    }

    /// Control enablement for the current state.
    pub fn controls(&self) -> Controls {
        Controls::of(&self.model)
    }

    fn move_selected(&mut self, direction: Direction, all: bool) {
        self.perform(Action::MoveBead {
            row: self.selected_row,
            direction,
            all,
        });
    }

    /// Move the selection toward more (`step > 0`) or less significant rows,
    /// wrapping at the ends.
    fn select_row(&mut self, step: isize) {
        let rows = self.model.row_count() as isize;
        self.selected_row = (self.selected_row as isize + step).rem_euclid(rows) as usize;
        self.status = format!("Row {} (×{})", self.selected_row, self.model.place_value(self.selected_row));
    }

    fn describe(&self, action: Action) -> String {
        match action {
            Action::IncrementBase | Action::DecrementBase => {
                format!("Base {}. Abacus cleared.", self.model.base())
            }
            Action::Reset => "Reset.".into(),
            _ => format!("Value = {}", self.model.value()),
        }
    }
}

fn label(action: Action) -> &'static str {
    match action {
        Action::ChangeValue(d) if d >= 0 => "Increment",
        Action::ChangeValue(_) => "Decrement",
        Action::MoveBead { direction: Direction::TowardActive, .. } => "Push",
        Action::MoveBead { .. } => "Pull",
        Action::IncrementBase => "Base up",
        Action::DecrementBase => "Base down",
        Action::Reset => "Reset",
    }
}

/// Run the interactive abacus.
pub fn run_abacus(model: BeadModel) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = AbacusApp::new(model);
    let router = InputRouter::new();
    let bindings = AbacusApp::bind(&router);

    // Main loop
    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let key = match key.code {
                        KeyCode::Up => Some(Key::Up),
                        KeyCode::Down => Some(Key::Down),
                        KeyCode::Left => Some(Key::Left),
                        KeyCode::Right => Some(Key::Right),
                        KeyCode::Tab => Some(Key::Char('\t')),
                        KeyCode::Esc => Some(Key::Char('q')),
                        KeyCode::Char(c) => Some(Key::Char(c)),
                        _ => None,
                    };
                    if let Some(key) = key {
                        app.handle_key(&router, key);
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    drop(bindings);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(base: u8, rows: usize) -> (AbacusApp, InputRouter, Vec<Registration>) {
        let router = InputRouter::new();
        let bindings = AbacusApp::bind(&router);
        (AbacusApp::new(BeadModel::new(base, rows)), router, bindings)
    }

    #[test]
    fn test_arrows_change_value() {
        let (mut app, router, _bindings) = app(10, 3);
        app.handle_key(&router, Key::Up);
        app.handle_key(&router, Key::Right);
        app.handle_key(&router, Key::Left);
        assert_eq!(app.model.value(), 1);

        app.handle_key(&router, Key::Down);
        app.handle_key(&router, Key::Down);
        assert_eq!(app.model.value(), 0);
        assert_eq!(app.status, "Decrement unavailable");
    }

    #[test]
    fn test_row_keys_move_beads() {
        let (mut app, router, _bindings) = app(10, 3);
        app.handle_key(&router, Key::Char('k'));
        assert_eq!(app.selected_row, 1);

        app.handle_key(&router, Key::Char('A'));
        assert_eq!(app.model.value(), 90);
        app.handle_key(&router, Key::Char('d'));
        assert_eq!(app.model.value(), 80);

        app.handle_key(&router, Key::Char('j'));
        app.handle_key(&router, Key::Char('j'));
        assert_eq!(app.selected_row, 2);
    }

    #[test]
    fn test_base_and_reset_keys() {
        let (mut app, router, _bindings) = app(15, 2);
        app.handle_key(&router, Key::Up);
        app.handle_key(&router, Key::Char('+'));
        assert_eq!(app.model.base().get(), 16);
        assert_eq!(app.model.value(), 0);

        app.handle_key(&router, Key::Char('+'));
        assert_eq!(app.status, "Base up unavailable");

        app.handle_key(&router, Key::Up);
        app.handle_key(&router, Key::Char('x'));
        assert_eq!(app.model.value(), 0);
        assert_eq!(app.status, "Reset.");
    }

    #[test]
    fn test_quit() {
        let (mut app, router, _bindings) = app(10, 3);
        app.handle_key(&router, Key::Char('q'));
        assert!(app.should_quit);
    }
}
