//! Integration tests for TUI rendering
//!
//! Uses ratatui's `TestBackend` to verify rendering without a real terminal.

use intake::app::{App, CONTROLLER_TRIGGER, SERVICE_TRIGGER};
use intake::config::Config;
use intake::form::Field;
use intake::tui::render::render;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyModifiers};

fn draw(app: &App) -> Result<String, Box<dyn std::error::Error>> {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|frame| render(frame, app))?;

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    Ok(text)
}

fn type_into(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_modal_key(KeyCode::Char(c), KeyModifiers::NONE);
    }
}

#[test]
fn test_render_page_without_modal() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new(Config::default());
    let screen = draw(&app)?;

    assert!(screen.contains("Application Form"));
    assert!(screen.contains("Open application form"));
    assert!(screen.contains("Open form via service"));
    assert!(screen.contains("No result yet"));
    Ok(())
}

#[test]
fn test_render_open_form() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(Config::default());
    app.activate(&CONTROLLER_TRIGGER);
    let screen = draw(&app)?;

    for field in Field::ALL {
        assert!(screen.contains(field.label()), "missing label {}", field.label());
    }
    assert!(screen.contains("Select your experience"));
    assert!(screen.contains("Cancel"));
    assert!(screen.contains("Submit"));
    Ok(())
}

#[test]
fn test_render_inline_errors_after_invalid_submit() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(Config::default());
    app.activate(&CONTROLLER_TRIGGER);
    app.handle_modal_key(KeyCode::Tab, KeyModifiers::NONE);
    type_into(&mut app, "A");
    app.handle_modal_key(KeyCode::Enter, KeyModifiers::NONE);

    let screen = draw(&app)?;

    assert!(screen.contains("Name must be at least 2 characters."));
    assert!(screen.contains("Please enter your email."));
    Ok(())
}

#[test]
fn test_render_custom_title() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        title: "Join the team".to_string(),
        ..Config::default()
    };
    let mut app = App::new(config);
    app.activate(&SERVICE_TRIGGER);

    let screen = draw(&app)?;

    assert!(screen.contains("Join the team"));
    assert!(screen.contains("Loading..."));
    Ok(())
}

#[test]
fn test_render_result_after_submit() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(Config::default());
    app.activate(&CONTROLLER_TRIGGER);
    app.handle_modal_key(KeyCode::Tab, KeyModifiers::NONE);
    type_into(&mut app, "Jane Doe");
    app.handle_modal_key(KeyCode::Tab, KeyModifiers::NONE);
    type_into(&mut app, "jane@example.com");
    app.handle_modal_key(KeyCode::Tab, KeyModifiers::NONE);
    app.handle_modal_key(KeyCode::Left, KeyModifiers::NONE);
    app.handle_modal_key(KeyCode::Enter, KeyModifiers::NONE);

    let screen = draw(&app)?;

    assert!(!app.is_modal_open());
    assert!(screen.contains("Jane Doe"));
    assert!(screen.contains("8+ years"));
    Ok(())
}

#[test]
fn test_render_small_terminal_does_not_panic() -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(Config::default());
    app.activate(&CONTROLLER_TRIGGER);

    let backend = TestBackend::new(30, 10);
    let mut terminal = Terminal::new(backend)?;
    terminal.draw(|frame| render(frame, &app))?;
    Ok(())
}
