//! Controller bound to one form instance and an optional trigger element.

use crate::error::ModalError;
use crate::form::{FormEvent, FormModal};
use crate::screen::{ElementId, Screen};
use crate::session::{FormOutcome, PendingForm, Resolver, completion};
use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug)]
struct Session {
    resolver: Resolver,
    trigger: Option<ElementId>,
}

/// Opens a [`FormModal`] and settles one [`PendingForm`] per open.
///
/// Idle until [`open`](Self::open), open until the form is closed or
/// submitted. Dropping the controller with a pending session settles it as
/// [`FormOutcome::Cancelled`].
#[derive(Debug, Default)]
pub struct FormModalController {
    form: FormModal,
    session: Option<Session>,
    restoring: Option<Uuid>,
}

impl FormModalController {
    /// Create a controller around `form`.
    #[must_use]
    pub const fn new(form: FormModal) -> Self {
        Self {
            form,
            session: None,
            restoring: None,
        }
    }

    /// Whether a session is pending.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The controlled form.
    #[must_use]
    pub const fn form(&self) -> &FormModal {
        &self.form
    }

    /// The controlled form, for direct field updates.
    pub const fn form_mut(&mut self) -> &mut FormModal {
        &mut self.form
    }

    /// Open the form. Focus returns to `trigger` once the session ends.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::AlreadyOpen`] while a session is pending.
    pub fn open(
        &mut self,
        screen: &mut Screen,
        trigger: Option<ElementId>,
    ) -> Result<PendingForm, ModalError> {
        if let Some(session) = &self.session {
            warn!(
                "Rejected open: session {} is still pending",
                session.resolver.session()
            );
            return Err(ModalError::AlreadyOpen);
        }
        if let Some(previous) = self.restoring.take() {
            screen.cancel_deferred(previous);
        }
        let (resolver, pending) = completion();
        info!("Opening form session {}", resolver.session());
        self.form.open(screen);
        self.session = Some(Session { resolver, trigger });
        Ok(pending)
    }

    /// Close the form, settling the pending session as cancelled.
    pub fn close(&mut self, screen: &mut Screen) {
        self.finish(screen, FormOutcome::Cancelled);
    }

    /// Submit the form as if the submit button was activated.
    pub fn submit(&mut self, screen: &mut Screen) {
        let event = self.form.submit(screen);
        self.apply(screen, event);
    }

    /// Route a key press into the form.
    pub fn handle_key(&mut self, screen: &mut Screen, code: KeyCode, modifiers: KeyModifiers) {
        let event = self.form.handle_key(screen, code, modifiers);
        self.apply(screen, event);
    }

    /// Route a mouse event into the form.
    pub fn handle_mouse(&mut self, screen: &mut Screen, mouse: MouseEvent, frame_area: Rect) {
        let event = self.form.handle_mouse(screen, mouse, frame_area);
        self.apply(screen, event);
    }

    /// Run deferred screen tasks, then check in-flight submission work.
    pub fn tick(&mut self, screen: &mut Screen, now: Instant) {
        screen.tick(now);
        let event = self.form.poll_submission();
        self.apply(screen, event);
    }

    fn apply(&mut self, screen: &mut Screen, event: FormEvent) {
        match event {
            FormEvent::Continue => {}
            FormEvent::CloseRequested(_) => self.close(screen),
            FormEvent::Submitted(data) => self.finish(screen, FormOutcome::Submitted(data)),
        }
    }

    fn finish(&mut self, screen: &mut Screen, outcome: FormOutcome) {
        let Some(session) = self.session.take() else {
            return;
        };
        self.form.close(screen);
        if let Some(trigger) = session.trigger {
            screen.defer_focus_for(session.resolver.session(), trigger, Duration::ZERO);
            self.restoring = Some(session.resolver.session());
        }
        info!("Form session {} finished", session.resolver.session());
        session.resolver.resolve(outcome);
    }
}
