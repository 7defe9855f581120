//! TUI rendering
//!
//! - `colors`: Color palette definitions
//! - `page`: The demo page (triggers, results, status bar)
//! - `modals`: The form dialog overlay

pub mod colors;
pub mod modals;
pub mod page;

use crate::app::App;
use ratatui::Frame;

/// Render the full application UI
pub fn render(frame: &mut Frame<'_>, app: &App) {
    page::render_page(frame, app);
    if let Some(form) = app.active_form() {
        modals::render_form_modal(frame, form, &app.screen);
    }
}
