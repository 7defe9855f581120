//! Single-instance service that mounts a fresh form per session.

use crate::error::ModalError;
use crate::form::surface::{DEFAULT_LIVE_REGION_DELAY, DEFAULT_TITLE};
use crate::form::{AcceptSubmission, FormEvent, FormModal, SubmitHandler};
use crate::screen::{ElementId, MountGuard, MountId, Screen};
use crate::session::{FormOutcome, PendingForm, Resolver, completion};
use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

/// Name of the mount point the service renders into.
pub const MODAL_ROOT: &str = "modal-root";

type HandlerFactory = Box<dyn FnMut() -> Box<dyn SubmitHandler>>;

struct Mounted {
    form: FormModal,
    resolver: Resolver,
    restore: Option<ElementId>,
    guard: MountGuard,
}

/// The one form service of a host.
///
/// The mount point is created on first use and kept for the life of the
/// service. Each [`open`](Self::open) mounts a new form; closing or
/// submitting unmounts it.
pub struct FormModalService {
    title: String,
    live_region_delay: Duration,
    handlers: HandlerFactory,
    mount: Option<MountId>,
    active: Option<Mounted>,
    restoring: Option<(Uuid, ElementId)>,
}

impl fmt::Debug for FormModalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModalService")
            .field("title", &self.title)
            .field("mount", &self.mount)
            .field("form", &self.form())
            .finish_non_exhaustive()
    }
}

impl Default for FormModalService {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl FormModalService {
    /// Create a service whose forms accept submissions immediately.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            live_region_delay: DEFAULT_LIVE_REGION_DELAY,
            handlers: Box::new(|| Box::new(AcceptSubmission)),
            mount: None,
            active: None,
            restoring: None,
        }
    }

    /// Build the submit handler of each mounted form with `factory`.
    #[must_use]
    pub fn with_handler_factory<F, H>(mut self, mut factory: F) -> Self
    where
        F: FnMut() -> H + 'static,
        H: SubmitHandler + 'static,
    {
        self.handlers = Box::new(move || Box::new(factory()));
        self
    }

    /// Delay before the live region takes focus after a failed submit.
    #[must_use]
    pub const fn with_live_region_delay(mut self, delay: Duration) -> Self {
        self.live_region_delay = delay;
        self
    }

    /// Whether a session is pending.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// The mount point, once created.
    #[must_use]
    pub const fn mount(&self) -> Option<MountId> {
        self.mount
    }

    /// The mounted form, if any.
    #[must_use]
    pub fn form(&self) -> Option<&FormModal> {
        self.active.as_ref().map(|mounted| &mounted.form)
    }

    /// The mounted form, for direct field updates.
    pub fn form_mut(&mut self) -> Option<&mut FormModal> {
        self.active.as_mut().map(|mounted| &mut mounted.form)
    }

    /// Mount a fresh open form. Focus returns to the element focused now
    /// once the session ends.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::AlreadyOpen`] while a session is pending and
    /// [`ModalError::MountOccupied`] if something else holds the mount point.
    pub fn open(&mut self, screen: &mut Screen) -> Result<PendingForm, ModalError> {
        if let Some(mounted) = &self.active {
            warn!(
                "Rejected open: session {} is still pending",
                mounted.resolver.session()
            );
            return Err(ModalError::AlreadyOpen);
        }
        let mount = *self
            .mount
            .get_or_insert_with(|| screen.ensure_mount(MODAL_ROOT));

        let (resolver, pending) = completion();
        let guard = screen.occupy(mount, resolver.session()).inspect_err(|e| {
            warn!("Rejected open: {e}");
        })?;

        // A restore that has not run yet still names the element to return to.
        let carried = self.restoring.take().and_then(|(previous, target)| {
            (screen.cancel_deferred(previous) > 0).then_some(target)
        });
        let restore = screen.focused().cloned().or(carried);

        let mut form = FormModal::new(self.title.clone())
            .with_live_region_delay(self.live_region_delay)
            .with_boxed_submit_handler((self.handlers)());
        form.open(screen);
        info!("Mounted form session {} on {MODAL_ROOT}", resolver.session());

        self.active = Some(Mounted {
            form,
            resolver,
            restore,
            guard,
        });
        Ok(pending)
    }

    /// Unmount the form, settling the pending session as cancelled.
    pub fn close(&mut self, screen: &mut Screen) {
        self.finish(screen, FormOutcome::Cancelled);
    }

    /// Submit the mounted form.
    pub fn submit(&mut self, screen: &mut Screen) {
        let Some(mounted) = self.active.as_mut() else {
            return;
        };
        let event = mounted.form.submit(screen);
        self.apply(screen, event);
    }

    /// Route a key press into the mounted form.
    pub fn handle_key(&mut self, screen: &mut Screen, code: KeyCode, modifiers: KeyModifiers) {
        let Some(mounted) = self.active.as_mut() else {
            return;
        };
        let event = mounted.form.handle_key(screen, code, modifiers);
        self.apply(screen, event);
    }

    /// Route a mouse event into the mounted form.
    pub fn handle_mouse(&mut self, screen: &mut Screen, mouse: MouseEvent, frame_area: Rect) {
        let Some(mounted) = self.active.as_mut() else {
            return;
        };
        let event = mounted.form.handle_mouse(screen, mouse, frame_area);
        self.apply(screen, event);
    }

    /// Run deferred screen tasks, then check in-flight submission work.
    pub fn tick(&mut self, screen: &mut Screen, now: Instant) {
        screen.tick(now);
        let Some(mounted) = self.active.as_mut() else {
            return;
        };
        let event = mounted.form.poll_submission();
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
        let Some(mut mounted) = self.active.take() else {
            return;
        };
        mounted.form.close(screen);
        let Mounted {
            form,
            resolver,
            restore,
            guard,
        } = mounted;
        drop(form);
        drop(guard);

        if let Some(id) = restore {
            screen.defer_focus_for(resolver.session(), id.clone(), Duration::ZERO);
            self.restoring = Some((resolver.session(), id));
        }
        info!("Unmounted form session {}", resolver.session());
        resolver.resolve(outcome);
    }
}
