//! Form dialog rendering

use crate::dialog::HEADING_ID;
use crate::form::layout::{FieldArea, FormLayout};
use crate::form::surface::{CANCEL_ID, LIVE_REGION_ID, SUBMIT_ID};
use crate::form::{Field, FormModal};
use crate::screen::{ElementId, Screen};
use crate::tui::render::colors;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EXPERIENCE_PLACEHOLDER: &str = "Select your experience";

/// Render the form dialog over a dimmed page
pub fn render_form_modal(frame: &mut Frame<'_>, form: &FormModal, screen: &Screen) {
    let area = frame.area();
    let layout = FormLayout::compute(area);

    frame
        .buffer_mut()
        .set_style(area, Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(Clear, layout.panel);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::BORDER))
            .style(Style::default().bg(colors::MODAL_BG)),
        layout.panel,
    );

    let mut heading_style = Style::default()
        .fg(colors::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD);
    if screen.has_focus(&HEADING_ID) {
        heading_style = heading_style.add_modifier(Modifier::UNDERLINED);
    }
    frame.render_widget(
        Paragraph::new(Span::styled(form.dialog().title(), heading_style)),
        layout.heading,
    );

    for field in Field::ALL {
        render_field(frame, form, screen, field, layout.field(field));
    }

    render_button(frame, "Cancel", layout.cancel, form, screen, &CANCEL_ID);
    render_button(
        frame,
        form.submit_label(),
        layout.submit,
        form,
        screen,
        &SUBMIT_ID,
    );

    let hint = if screen.has_focus(&LIVE_REGION_ID) {
        Span::styled(
            form.live_region_text(),
            Style::default().fg(colors::FIELD_ERROR),
        )
    } else {
        Span::styled(
            "Tab: next | Enter: submit | Esc: close",
            Style::default().fg(colors::TEXT_MUTED),
        )
    };
    frame.render_widget(Paragraph::new(hint), layout.hint);
}

fn render_field(
    frame: &mut Frame<'_>,
    form: &FormModal,
    screen: &Screen,
    field: Field,
    area: &FieldArea,
) {
    let focused = screen.has_focus(&field.element_id());
    let label_color = if focused {
        colors::SELECTED
    } else {
        colors::TEXT_DIM
    };
    frame.render_widget(
        Paragraph::new(Span::styled(field.label(), Style::default().fg(label_color))),
        area.label,
    );

    let input_style = Style::default()
        .bg(if focused {
            colors::SURFACE_HIGHLIGHT
        } else {
            colors::INPUT_BG
        })
        .fg(colors::TEXT_PRIMARY);
    let value = form.value(field);
    let input = match form.text_input(field) {
        Some(input) => {
            let text = if focused {
                input.with_cursor_marker()
            } else {
                value.to_string()
            };
            let cursor_line = input.value()[..input.cursor()].matches('\n').count();
            let scroll = u16::try_from(cursor_line)
                .unwrap_or(u16::MAX)
                .saturating_sub(area.input.height.saturating_sub(1));
            Paragraph::new(text).scroll((scroll, 0))
        }
        None if value.is_empty() => Paragraph::new(Line::from(vec![
            Span::raw("◀ "),
            Span::styled(
                EXPERIENCE_PLACEHOLDER,
                Style::default().fg(colors::TEXT_MUTED),
            ),
            Span::raw(" ▶"),
        ])),
        None => Paragraph::new(format!("◀ {value} ▶")),
    };
    frame.render_widget(input.style(input_style), area.input);

    if let Some(message) = form.errors().get(field) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message,
                Style::default().fg(colors::FIELD_ERROR),
            )),
            area.error,
        );
    }
}

fn render_button(
    frame: &mut Frame<'_>,
    label: &str,
    area: Rect,
    form: &FormModal,
    screen: &Screen,
    id: &ElementId,
) {
    let style = if form.is_submitting() {
        Style::default().fg(colors::TEXT_MUTED).bg(colors::SURFACE)
    } else if screen.has_focus(id) {
        Style::default()
            .fg(colors::MODAL_BG)
            .bg(colors::SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .bg(colors::SURFACE_HIGHLIGHT)
    };
    frame.render_widget(
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style),
        area,
    );
}
