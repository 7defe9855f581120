//! Geometry of the form dialog.
//!
//! Rendering and mouse hit-testing share [`FormLayout::compute`], so a click
//! always lands on what was drawn there.

use super::Field;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Dialog width as a percentage of the screen.
pub const PANEL_WIDTH_PERCENT: u16 = 60;

/// Rows taken by the multi-line message input.
pub const MESSAGE_ROWS: u16 = 4;

const CANCEL_WIDTH: u16 = 10;
const SUBMIT_WIDTH: u16 = 17;
const BUTTON_GAP: u16 = 2;

// border + heading + blank, three single-line fields (label, input, error),
// the message field, blank, buttons, hint, border
const PANEL_HEIGHT: u16 = 3 + 3 * 3 + (1 + MESSAGE_ROWS + 1) + 1 + 1 + 1 + 1;

/// Create a centered rect with percentage width and absolute height
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Whether the cell at (`x`, `y`) lies inside `rect`.
#[must_use]
pub const fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

/// Rows belonging to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldArea {
    /// Label row.
    pub label: Rect,
    /// Input rows.
    pub input: Rect,
    /// Inline error row.
    pub error: Rect,
}

impl FieldArea {
    /// Whether a click at (`x`, `y`) targets this field.
    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        rect_contains(self.label, x, y) || rect_contains(self.input, x, y)
    }
}

/// Every region of the form dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    /// The dialog panel, borders included. Clicks outside it dismiss.
    pub panel: Rect,
    /// Heading row.
    pub heading: Rect,
    /// Field regions, in form order.
    pub fields: [FieldArea; 4],
    /// Cancel button.
    pub cancel: Rect,
    /// Submit button.
    pub submit: Rect,
    /// Key hint row.
    pub hint: Rect,
}

impl FormLayout {
    /// Lay the dialog out on a screen of size `area`.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let panel = centered_rect_absolute(PANEL_WIDTH_PERCENT, PANEL_HEIGHT, area);
        let inner = Rect {
            x: panel.x.saturating_add(2),
            y: panel.y.saturating_add(1),
            width: panel.width.saturating_sub(4),
            height: panel.height.saturating_sub(2),
        };

        let mut cursor = inner.y;
        let mut take = |height: u16| {
            let row = Rect {
                x: inner.x,
                y: cursor,
                width: inner.width,
                height,
            }
            .intersection(inner);
            cursor = cursor.saturating_add(height);
            row
        };

        let heading = take(1);
        take(1);
        let fields = Field::ALL.map(|field| {
            let rows = if field == Field::Message { MESSAGE_ROWS } else { 1 };
            FieldArea {
                label: take(1),
                input: take(rows),
                error: take(1),
            }
        });
        take(1);
        let buttons = take(1);
        let hint = take(1);

        let submit_width = SUBMIT_WIDTH.min(buttons.width);
        let submit = Rect {
            x: buttons.right().saturating_sub(submit_width),
            width: submit_width,
            ..buttons
        };
        let cancel_x = submit.x.saturating_sub(BUTTON_GAP + CANCEL_WIDTH).max(buttons.x);
        let cancel = Rect {
            x: cancel_x,
            width: submit.x.saturating_sub(BUTTON_GAP).saturating_sub(cancel_x).min(CANCEL_WIDTH),
            ..buttons
        };

        Self {
            panel,
            heading,
            fields,
            cancel,
            submit,
            hint,
        }
    }

    /// Region of one field.
    #[must_use]
    pub const fn field(&self, field: Field) -> &FieldArea {
        &self.fields[field as usize]
    }

    /// The field whose label or input contains (`x`, `y`).
    #[must_use]
    pub fn field_at(&self, x: u16, y: u16) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| self.field(*field).contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_panel_is_centered() {
        let layout = FormLayout::compute(screen());
        assert_eq!(layout.panel.height, PANEL_HEIGHT);
        assert_eq!(layout.panel.width, 48);
        assert_eq!(layout.panel.x, 16);
    }

    #[test]
    fn test_regions_stay_inside_panel() {
        let layout = FormLayout::compute(screen());
        let mut regions = vec![layout.heading, layout.cancel, layout.submit, layout.hint];
        for area in &layout.fields {
            regions.extend([area.label, area.input, area.error]);
        }
        for region in regions {
            assert_eq!(region.intersection(layout.panel), region);
        }
    }

    #[test]
    fn test_fields_are_stacked_in_form_order() {
        let layout = FormLayout::compute(screen());
        for pair in layout.fields.windows(2) {
            assert!(pair[0].error.y < pair[1].label.y);
        }
        assert_eq!(layout.field(Field::Message).input.height, MESSAGE_ROWS);
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let layout = FormLayout::compute(screen());
        assert!(layout.cancel.right() <= layout.submit.x);
        assert_eq!(layout.submit.right(), layout.hint.right());
    }

    #[test]
    fn test_field_at() {
        let layout = FormLayout::compute(screen());
        let email = layout.field(Field::Email).input;
        assert_eq!(layout.field_at(email.x, email.y), Some(Field::Email));
        assert_eq!(layout.field_at(0, 0), None);
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(2, 2, 3, 3);
        assert!(rect_contains(rect, 2, 2));
        assert!(rect_contains(rect, 4, 4));
        assert!(!rect_contains(rect, 5, 4));
        assert!(!rect_contains(rect, 1, 2));
    }

    #[test]
    fn test_small_screen_does_not_overflow() {
        let small = Rect::new(0, 0, 20, 8);
        let layout = FormLayout::compute(small);
        assert_eq!(layout.panel.intersection(small), layout.panel);
    }
}
