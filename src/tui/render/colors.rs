//! Color palette for the TUI
//!
//! Muted palette with a few semantic accents

use ratatui::style::Color;

// UI Chrome
pub const BORDER: Color = Color::Rgb(100, 110, 130);
pub const SELECTED: Color = Color::Rgb(100, 180, 220);
pub const SURFACE: Color = Color::Rgb(30, 32, 40);
pub const SURFACE_HIGHLIGHT: Color = Color::Rgb(50, 55, 70);

// Text
pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 230);
pub const TEXT_DIM: Color = Color::Rgb(130, 135, 150);
pub const TEXT_MUTED: Color = Color::Rgb(90, 95, 110);

// Modals
pub const MODAL_BG: Color = Color::Rgb(25, 27, 35);
pub const INPUT_BG: Color = Color::Rgb(35, 40, 50);
pub const FIELD_ERROR: Color = Color::Rgb(200, 100, 100);

// Triggers
pub const TRIGGER_CONTROLLER: Color = Color::Rgb(100, 140, 200);
pub const TRIGGER_SERVICE: Color = Color::Rgb(120, 180, 120);
pub const TRIGGER_DISABLED: Color = Color::Rgb(90, 95, 110);
