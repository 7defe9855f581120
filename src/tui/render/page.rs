//! Demo page rendering: header, the two trigger sections, results, status bar.

use super::colors;
use crate::app::{App, CONTROLLER_TRIGGER, Origin, ResultPanel, SERVICE_TRIGGER};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BUTTON_WIDTH: u16 = 28;

/// Regions of the page. Shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Title and description
    pub header: Rect,
    /// Controller section
    pub controller_section: Rect,
    /// Controller trigger button
    pub controller_button: Rect,
    /// Service section
    pub service_section: Rect,
    /// Service trigger button
    pub service_button: Rect,
    /// Scrollable results area
    pub results: Rect,
    /// Bottom status bar
    pub status: Rect,
}

impl PageLayout {
    /// Lay the page out on `area`.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: chunks[0],
            controller_section: chunks[1],
            controller_button: button_rect(chunks[1]),
            service_section: chunks[2],
            service_button: button_rect(chunks[2]),
            results: chunks[3],
            status: chunks[4],
        }
    }
}

fn button_rect(section: Rect) -> Rect {
    Rect {
        x: section.x.saturating_add(2),
        y: section.y.saturating_add(2),
        width: BUTTON_WIDTH,
        height: 1,
    }
    .intersection(section)
}

/// Render the page under any modal
pub fn render_page(frame: &mut Frame<'_>, app: &App) {
    let layout = PageLayout::compute(frame.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            app.config.title.as_str(),
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "A modal application form with validation and focus management.",
            Style::default().fg(colors::TEXT_DIM),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(colors::BORDER)));
    frame.render_widget(header, layout.header);

    render_section(
        frame,
        layout.controller_section,
        layout.controller_button,
        "Bound controller",
        "Opens the form from a controller bound to this button.",
        "Open application form",
        button_style(app, Origin::Controller),
    );
    let service_label = if app.is_loading() {
        "Loading..."
    } else {
        "Open form via service"
    };
    render_section(
        frame,
        layout.service_section,
        layout.service_button,
        "Service call",
        "Opens the form through the single-instance service.",
        service_label,
        button_style(app, Origin::Service),
    );

    let mut lines = result_lines(Origin::Controller, &app.page.controller_result);
    lines.push(Line::from(""));
    lines.extend(result_lines(Origin::Service, &app.page.service_result));
    let results = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Results ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        )
        .scroll((app.page.scroll, 0));
    frame.render_widget(results, layout.results);

    let status = app.page.status.as_deref().map_or_else(
        || {
            Span::styled(
                "Tab: switch | Enter: open | ↑↓: scroll | q: quit",
                Style::default().fg(colors::TEXT_MUTED),
            )
        },
        |message| Span::styled(message, Style::default().fg(colors::FIELD_ERROR)),
    );
    frame.render_widget(
        Paragraph::new(Line::from(status)).style(Style::default().bg(colors::SURFACE)),
        layout.status,
    );
}

fn render_section(
    frame: &mut Frame<'_>,
    area: Rect,
    button: Rect,
    heading: &str,
    description: &str,
    label: &str,
    style: Style,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("  {heading}"),
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {description}"),
            Style::default().fg(colors::TEXT_DIM),
        )),
    ]);
    frame.render_widget(text, area);
    frame.render_widget(Paragraph::new(format!(" {label} ")).style(style), button);
}

fn button_style(app: &App, origin: Origin) -> Style {
    let (trigger, accent) = match origin {
        Origin::Controller => (&CONTROLLER_TRIGGER, colors::TRIGGER_CONTROLLER),
        Origin::Service => (&SERVICE_TRIGGER, colors::TRIGGER_SERVICE),
    };
    let accent = if origin == Origin::Service && app.is_loading() {
        colors::TRIGGER_DISABLED
    } else {
        accent
    };
    let style = Style::default().bg(accent).fg(Color::White);
    if app.screen.has_focus(trigger) {
        style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        style
    }
}

fn result_lines(origin: Origin, panel: &ResultPanel) -> Vec<Line<'static>> {
    let mut title = vec![Span::styled(
        origin.result_title(),
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = panel.updated_at {
        title.push(Span::styled(
            format!("  ({})", at.format("%H:%M:%S")),
            Style::default().fg(colors::TEXT_MUTED),
        ));
    }
    let mut lines = vec![Line::from(title)];

    let Some(data) = &panel.data else {
        let note = if panel.updated_at.is_some() {
            "  Cancelled"
        } else {
            "  No result yet"
        };
        lines.push(Line::from(Span::styled(
            note,
            Style::default().fg(colors::TEXT_DIM),
        )));
        return lines;
    };

    for (label, value) in [
        ("Name:       ", data.name.clone()),
        ("Email:      ", data.email.clone()),
        ("Experience: ", data.experience.label().to_string()),
        ("GitHub:     ", data.message.clone()),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {label}"), Style::default().fg(colors::TEXT_DIM)),
            Span::styled(value, Style::default().fg(colors::TEXT_PRIMARY)),
        ]));
    }
    lines
}
