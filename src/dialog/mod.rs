//! Dialog surface: overlay, panel, and the keyboard/focus rules of a modal.
//!
//! The dialog does not own its content. The owner tells it which elements are
//! focusable and draws the content inside the panel; the dialog reports what
//! the user asked for through [`DialogEvent`].
//!
//! While open, the dialog holds the page scroll lock and a global keyboard
//! listener. Both are guards, released on close or when the dialog is
//! dropped.

mod focus;

pub use focus::{TabDirection, next_focus};

use crate::form::layout::rect_contains;
use crate::screen::{ElementId, KeyListenerGuard, Screen, ScrollLockGuard};
use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use tracing::debug;

/// Id of the dialog heading, which labels the dialog.
pub const HEADING_ID: ElementId = ElementId::from_static("modal-title");

/// Id of the hidden dialog description.
pub const DESCRIPTION_ID: ElementId = ElementId::from_static("modal-description");

/// Fixed description read to assistive technology.
pub const DESCRIPTION: &str = "Form for entering your name or nickname, email, \
     frontend experience and GitHub link. The GitHub link is optional; all \
     other fields are required.";

/// Why the dialog asked to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Escape was pressed.
    Escape,
    /// The user clicked the overlay outside the panel.
    OutsideClick,
    /// The cancel control was activated.
    Cancel,
}

/// What the dialog asks its owner to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// Close the dialog.
    Close(CloseReason),
    /// Move focus to this element (focus trap step).
    Focus(ElementId),
    /// The input was not for the dialog.
    Unhandled,
}

/// Accessibility attributes of the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogA11y {
    /// ARIA role.
    pub role: &'static str,
    /// Whether the dialog is modal.
    pub modal: bool,
    /// Element labelling the dialog.
    pub labelled_by: ElementId,
    /// Element describing the dialog.
    pub described_by: ElementId,
    /// Description text.
    pub description: &'static str,
}

#[derive(Debug)]
struct Claims {
    _scroll: ScrollLockGuard,
    _listener: KeyListenerGuard,
}

/// A modal dialog.
#[derive(Debug)]
pub struct Dialog {
    title: String,
    initial_focus: Option<ElementId>,
    claims: Option<Claims>,
}

impl Dialog {
    /// Create a closed dialog.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            initial_focus: None,
            claims: None,
        }
    }

    /// Focus `id` on open instead of the heading.
    #[must_use]
    pub fn with_initial_focus(mut self, id: ElementId) -> Self {
        self.initial_focus = Some(id);
        self
    }

    /// Heading text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the dialog is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.claims.is_some()
    }

    /// Accessibility attributes.
    #[must_use]
    pub const fn accessibility(&self) -> DialogA11y {
        DialogA11y {
            role: "dialog",
            modal: true,
            labelled_by: HEADING_ID,
            described_by: DESCRIPTION_ID,
            description: DESCRIPTION,
        }
    }

    /// Open the dialog: lock scrolling, start listening for keys, and move
    /// focus to the initial target (or the heading).
    ///
    /// Content elements must already be registered for the initial focus
    /// target to be found.
    pub fn open(&mut self, screen: &mut Screen) {
        if self.is_open() {
            return;
        }
        screen.register(HEADING_ID);
        self.claims = Some(Claims {
            _scroll: screen.scroll_lock().hold(),
            _listener: screen.key_listeners().attach(),
        });

        let target = self
            .initial_focus
            .clone()
            .filter(|id| screen.is_registered(id))
            .unwrap_or(HEADING_ID);
        screen.focus(&target);
        debug!("Dialog '{}' opened, focus on {target}", self.title);
    }

    /// Close the dialog, releasing the scroll lock and the key listener.
    pub fn close(&mut self, screen: &mut Screen) {
        if self.claims.take().is_some() {
            screen.unregister(&HEADING_ID);
            debug!("Dialog '{}' closed", self.title);
        }
    }

    /// Handle a key press while open.
    ///
    /// Escape asks to close; Tab and Shift+Tab step focus through
    /// `focusables`, wrapping at either end.
    #[must_use]
    pub fn handle_key(
        &self,
        screen: &Screen,
        code: KeyCode,
        modifiers: KeyModifiers,
        focusables: &[ElementId],
    ) -> DialogEvent {
        if !self.is_open() {
            return DialogEvent::Unhandled;
        }
        let direction = match code {
            KeyCode::Esc => return DialogEvent::Close(CloseReason::Escape),
            KeyCode::BackTab => TabDirection::Backward,
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => TabDirection::Backward,
            KeyCode::Tab => TabDirection::Forward,
            _ => return DialogEvent::Unhandled,
        };
        next_focus(focusables, screen.focused(), direction)
            .map_or(DialogEvent::Unhandled, DialogEvent::Focus)
    }

    /// Handle a left click at (`x`, `y`); clicks outside `panel` ask to close.
    #[must_use]
    pub const fn handle_click(&self, x: u16, y: u16, panel: Rect) -> DialogEvent {
        if self.is_open() && !rect_contains(panel, x, y) {
            DialogEvent::Close(CloseReason::OutsideClick)
        } else {
            DialogEvent::Unhandled
        }
    }
}
