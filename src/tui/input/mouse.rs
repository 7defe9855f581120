//! Mouse input handling

use crate::app::{App, CONTROLLER_TRIGGER, SERVICE_TRIGGER};
use crate::form::layout::rect_contains;
use crate::tui::render::page::PageLayout;
use ratatui::{
    crossterm::event::{MouseButton, MouseEvent, MouseEventKind},
    layout::Rect,
};

/// Handle a mouse event.
///
/// Wheel events scroll the page unless it is scroll-locked. Other events go
/// to the form while one is open, otherwise a left click on a trigger opens
/// the form.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, frame_area: Rect) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(1),
        MouseEventKind::ScrollUp => app.scroll_by(-1),
        _ if app.is_modal_open() => app.handle_modal_mouse(mouse, frame_area),
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_click(app, mouse.column, mouse.row, frame_area);
        }
        _ => {}
    }
}

fn handle_left_click(app: &mut App, x: u16, y: u16, frame_area: Rect) {
    let layout = PageLayout::compute(frame_area);
    let trigger = if rect_contains(layout.controller_button, x, y) {
        CONTROLLER_TRIGGER
    } else if rect_contains(layout.service_button, x, y) {
        SERVICE_TRIGGER
    } else {
        return;
    };
    app.screen.focus(&trigger);
    app.activate(&trigger);
}
