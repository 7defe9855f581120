//! Modal rendering

mod form;

pub use form::render_form_modal;
