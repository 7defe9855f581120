//! Terminal User Interface for the demo page

pub mod input;
pub mod render;

use crate::app::{App, Event, Handler};
use anyhow::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    layout::Rect,
};
use std::io;
use std::time::Instant;
use tracing::info;

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn, or restored
pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = Handler::new(app.config.poll_interval());
    let result = run_loop(&mut terminal, &mut app, &event_handler);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &Handler,
) -> Result<()> {
    info!("Starting event loop");
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        match event_handler.next()? {
            Event::Tick | Event::Resize(_, _) => {}
            Event::Key(key) => input::handle_key_event(app, key.code, key.modifiers),
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let frame_area = Rect::new(0, 0, size.width, size.height);
                input::mouse::handle_mouse_event(app, mouse, frame_area);
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    info!("Event loop finished");
    Ok(())
}
