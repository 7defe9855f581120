//! Shared helpers for integration tests

#![allow(dead_code)]

use intake::form::{Experience, Field, FormData, FormModal};
use intake::screen::{ElementId, Screen};

/// Trigger element used by controller tests.
pub const TRIGGER: ElementId = ElementId::from_static("trigger");

/// A screen with [`TRIGGER`] registered and focused.
pub fn screen_with_trigger() -> Screen {
    let mut screen = Screen::new();
    screen.register(TRIGGER);
    screen.focus(&TRIGGER);
    screen
}

/// Fill the form with valid values.
pub fn fill_valid(form: &mut FormModal) {
    form.change(Field::Name, "Jane Doe");
    form.change(Field::Email, "jane@example.com");
    form.change(Field::Experience, "0-3 years");
    form.change(Field::Message, "");
}

/// The data [`fill_valid`] produces.
pub fn jane() -> FormData {
    FormData {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        experience: Experience::UpToThree,
        message: String::new(),
    }
}
