//! Keyboard input handling

pub mod mouse;

use crate::app::{App, CONTROLLER_TRIGGER, SERVICE_TRIGGER};
use crate::dialog::TabDirection;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

/// Handle a key press.
///
/// Keys go to the form while one is open. Ctrl+C always quits.
pub fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }
    if app.is_modal_open() {
        app.handle_modal_key(code, modifiers);
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Tab => app.cycle_trigger(TabDirection::Forward),
        KeyCode::BackTab => app.cycle_trigger(TabDirection::Backward),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_focused(),
        KeyCode::Char('1') => app.activate(&CONTROLLER_TRIGGER),
        KeyCode::Char('2') => app.activate(&SERVICE_TRIGGER),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_by(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_by(1),
        _ => {}
    }
}
