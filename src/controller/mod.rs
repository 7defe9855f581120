//! Controllers that open the form and settle its completion handle.
//!
//! Two styles are provided:
//! - [`FormModalController`]: owns one form, bound to an optional trigger
//!   element that regains focus when the form closes.
//! - [`FormModalService`]: a single-instance service that mounts a fresh form
//!   on the `modal-root` mount point for each session and restores whatever
//!   had focus before it opened.
//!
//! Both reject `open` while a session is pending with
//! [`ModalError::AlreadyOpen`](crate::error::ModalError::AlreadyOpen). The
//! pending session is left untouched.

pub mod bound;
pub mod service;

pub use bound::FormModalController;
pub use service::{FormModalService, MODAL_ROOT};
