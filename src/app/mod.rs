//! The demo page: two triggers that open the form, one per controller style.

mod event;
mod state;

pub use event::{Event, Handler};
pub use state::{Origin, PageState, ResultPanel};

use crate::config::Config;
use crate::controller::{FormModalController, FormModalService};
use crate::dialog::{TabDirection, next_focus};
use crate::error::ModalError;
use crate::form::FormModal;
use crate::screen::{ElementId, Screen};
use crate::session::PendingForm;
use chrono::Local;
use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use std::time::Instant;
use tracing::{info, warn};

/// Trigger bound to the controller.
pub const CONTROLLER_TRIGGER: ElementId = ElementId::from_static("open-controller");

/// Trigger that opens the form through the service.
pub const SERVICE_TRIGGER: ElementId = ElementId::from_static("open-service");

const TRIGGERS: [ElementId; 2] = [CONTROLLER_TRIGGER, SERVICE_TRIGGER];

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Application configuration
    pub config: Config,

    /// Host screen: focus, scroll lock, deferred tasks
    pub screen: Screen,

    /// Page content around the form
    pub page: PageState,

    /// Whether the application should quit
    pub should_quit: bool,

    controller: FormModalController,
    service: FormModalService,
    controller_pending: Option<PendingForm>,
    service_pending: Option<PendingForm>,
}

impl App {
    /// Create a new application with the given config
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut screen = Screen::new();
        for trigger in TRIGGERS {
            screen.register(trigger);
        }
        screen.focus(&CONTROLLER_TRIGGER);

        let form = FormModal::new(config.title.clone())
            .with_live_region_delay(config.live_region_delay());
        let service = FormModalService::new(config.title.clone())
            .with_live_region_delay(config.live_region_delay());

        Self {
            config,
            screen,
            page: PageState::default(),
            should_quit: false,
            controller: FormModalController::new(form),
            service,
            controller_pending: None,
            service_pending: None,
        }
    }

    /// The form currently on screen, if any.
    #[must_use]
    pub fn active_form(&self) -> Option<&FormModal> {
        if self.controller.is_open() {
            Some(self.controller.form())
        } else {
            self.service.form()
        }
    }

    /// Whether a form is on screen.
    #[must_use]
    pub fn is_modal_open(&self) -> bool {
        self.active_form().is_some()
    }

    /// Whether the service trigger is waiting on its session.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.service_pending.is_some()
    }

    /// Open the form through the bound controller.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::AlreadyOpen`] while any form is on screen.
    pub fn open_controller_form(&mut self) -> Result<(), ModalError> {
        if self.is_modal_open() {
            return Err(ModalError::AlreadyOpen);
        }
        let pending = self
            .controller
            .open(&mut self.screen, Some(CONTROLLER_TRIGGER))?;
        self.controller_pending = Some(pending);
        Ok(())
    }

    /// Open the form through the single-instance service.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::AlreadyOpen`] while any form is on screen,
    /// or [`ModalError::MountOccupied`] if the mount point is taken.
    pub fn open_form_modal(&mut self) -> Result<PendingForm, ModalError> {
        if self.is_modal_open() {
            return Err(ModalError::AlreadyOpen);
        }
        self.service.open(&mut self.screen)
    }

    fn open_service_form(&mut self) -> Result<(), ModalError> {
        let pending = self.open_form_modal()?;
        self.service_pending = Some(pending);
        Ok(())
    }

    /// Activate a trigger, reporting a rejected open on the status line.
    pub fn activate(&mut self, trigger: &ElementId) {
        let result = if *trigger == CONTROLLER_TRIGGER {
            self.open_controller_form()
        } else if *trigger == SERVICE_TRIGGER {
            if self.is_loading() {
                return;
            }
            self.open_service_form()
        } else {
            return;
        };
        match result {
            Ok(()) => self.page.status = None,
            Err(e) => {
                warn!("Failed to open form: {e}");
                self.page.status = Some(e.to_string());
            }
        }
    }

    /// Activate the focused trigger.
    pub fn activate_focused(&mut self) {
        if let Some(focused) = self.screen.focused().cloned() {
            self.activate(&focused);
        }
    }

    /// Move page focus between the triggers.
    pub fn cycle_trigger(&mut self, direction: TabDirection) {
        if let Some(target) = next_focus(&TRIGGERS, self.screen.focused(), direction) {
            self.screen.focus(&target);
        }
    }

    /// Scroll the results area. Ignored while the page is scroll-locked.
    pub fn scroll_by(&mut self, delta: i16) {
        if self.screen.is_scroll_locked() {
            return;
        }
        self.page.scroll = self.page.scroll.saturating_add_signed(delta);
    }

    /// Route a key press to the open form.
    pub fn handle_modal_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.controller.is_open() {
            self.controller.handle_key(&mut self.screen, code, modifiers);
        } else {
            self.service.handle_key(&mut self.screen, code, modifiers);
        }
        self.collect_outcomes();
    }

    /// Route a mouse event to the open form.
    pub fn handle_modal_mouse(&mut self, mouse: MouseEvent, frame_area: Rect) {
        if self.controller.is_open() {
            self.controller
                .handle_mouse(&mut self.screen, mouse, frame_area);
        } else {
            self.service
                .handle_mouse(&mut self.screen, mouse, frame_area);
        }
        self.collect_outcomes();
    }

    /// Advance deferred tasks and in-flight submissions to `now`.
    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(&mut self.screen, now);
        self.service.tick(&mut self.screen, now);
        self.collect_outcomes();
    }

    fn collect_outcomes(&mut self) {
        for (origin, slot) in [
            (Origin::Controller, &mut self.controller_pending),
            (Origin::Service, &mut self.service_pending),
        ] {
            let Some(outcome) = slot.as_ref().and_then(PendingForm::outcome) else {
                continue;
            };
            *slot = None;
            info!("{origin:?} session settled");
            self.page.result_mut(origin).record(outcome, Local::now());
        }
    }

    /// Quit the application
    pub const fn quit(&mut self) {
        self.should_quit = true;
    }
}
