//! Intake - a modal application form for the terminal
//!
//! A dialog collects a name, an email, a years-of-experience bracket and an
//! optional GitHub link, validates them, and settles a one-shot
//! [`PendingForm`] with the submitted [`FormData`] or a cancellation.
//!
//! The form can be driven two ways: a [`FormModalController`] bound to a
//! trigger element, or the single-instance [`FormModalService`].

pub mod app;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod form;
pub mod paths;
pub mod screen;
pub mod session;
pub mod tui;

pub use app::App;
pub use config::Config;
pub use controller::{FormModalController, FormModalService};
pub use error::ModalError;
pub use form::{Experience, Field, FormData, FormModal};
pub use screen::{ElementId, Screen};
pub use session::{FormOutcome, PendingForm};
