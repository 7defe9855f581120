//! The form surface: four fields inside a dialog.
//!
//! `FormModal` owns the field values and their errors. Validation is deferred
//! to blur and submit, except that a field already showing an error is
//! re-checked on every change so the message clears as soon as the value is
//! fixed.
//!
//! Submitting hands valid data to a [`SubmitHandler`]. The handler may finish
//! immediately or return a channel that reports later; until it does, the
//! form is "submitting": repeated submits are ignored and the buttons are
//! disabled.

use super::input::TextInput;
use super::layout::{FormLayout, rect_contains};
use super::{Experience, Field, FormData, FormDraft, FormErrors, validate_field};
use crate::dialog::{CloseReason, Dialog, DialogEvent};
use crate::error::ModalError;
use crate::screen::{ElementId, Politeness, Screen};
use ratatui::crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::fmt;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use tracing::{debug, error};
use uuid::Uuid;

/// Id of the cancel button.
pub const CANCEL_ID: ElementId = ElementId::from_static("cancel");

/// Id of the submit button.
pub const SUBMIT_ID: ElementId = ElementId::from_static("submit");

/// Id of the assertive live region listing validation errors.
pub const LIVE_REGION_ID: ElementId = ElementId::from_static("form-errors");

/// Default title of the form dialog.
pub const DEFAULT_TITLE: &str = "Application Form";

/// Default delay before the live region takes focus after a failed submit.
pub const DEFAULT_LIVE_REGION_DELAY: Duration = Duration::from_millis(100);

/// Work started by a [`SubmitHandler`].
#[derive(Debug)]
pub enum SubmitWork {
    /// The work already finished.
    Ready(anyhow::Result<()>),
    /// The work reports on this channel when it finishes.
    InFlight(Receiver<anyhow::Result<()>>),
}

/// Receives validated form data.
pub trait SubmitHandler {
    /// Start handling a submission.
    fn submit(&mut self, data: &FormData) -> SubmitWork;
}

impl<F> SubmitHandler for F
where
    F: FnMut(&FormData) -> SubmitWork,
{
    fn submit(&mut self, data: &FormData) -> SubmitWork {
        self(data)
    }
}

/// Handler that accepts every submission immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptSubmission;

impl SubmitHandler for AcceptSubmission {
    fn submit(&mut self, _data: &FormData) -> SubmitWork {
        SubmitWork::Ready(Ok(()))
    }
}

/// What the form asks its owner to do after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Nothing for the owner to do.
    Continue,
    /// The user asked to close the dialog.
    CloseRequested(CloseReason),
    /// The form was submitted and its state cleared.
    Submitted(FormData),
}

#[derive(Debug)]
struct InFlight {
    data: FormData,
    result: Receiver<anyhow::Result<()>>,
}

const EXPERIENCE_OPTIONS: [&str; 4] = [
    "",
    Experience::UpToThree.label(),
    Experience::FourToSeven.label(),
    Experience::EightPlus.label(),
];

/// The form dialog.
pub struct FormModal {
    dialog: Dialog,
    name: TextInput,
    email: TextInput,
    experience: String,
    message: TextInput,
    errors: FormErrors,
    in_flight: Option<InFlight>,
    submitting: bool,
    handler: Box<dyn SubmitHandler>,
    live_region_delay: Duration,
    owner: Uuid,
}

impl fmt::Debug for FormModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModal")
            .field("dialog", &self.dialog)
            .field("draft", &self.draft())
            .field("errors", &self.errors)
            .field("submitting", &self.submitting)
            .finish_non_exhaustive()
    }
}

impl Default for FormModal {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl FormModal {
    /// Create a closed form whose submissions are accepted immediately.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            dialog: Dialog::new(title),
            name: TextInput::new(),
            email: TextInput::new(),
            experience: String::new(),
            message: TextInput::new(),
            errors: FormErrors::default(),
            in_flight: None,
            submitting: false,
            handler: Box::new(AcceptSubmission),
            live_region_delay: DEFAULT_LIVE_REGION_DELAY,
            owner: Uuid::new_v4(),
        }
    }

    /// Use `handler` for submissions.
    #[must_use]
    pub fn with_submit_handler(mut self, handler: impl SubmitHandler + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    /// Use an already boxed `handler` for submissions.
    #[must_use]
    pub fn with_boxed_submit_handler(mut self, handler: Box<dyn SubmitHandler>) -> Self {
        self.handler = handler;
        self
    }

    /// Delay before the live region takes focus after a failed submit.
    #[must_use]
    pub const fn with_live_region_delay(mut self, delay: Duration) -> Self {
        self.live_region_delay = delay;
        self
    }

    // Accessors

    /// The underlying dialog.
    #[must_use]
    pub const fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Whether the form is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => self.name.value(),
            Field::Email => self.email.value(),
            Field::Experience => &self.experience,
            Field::Message => self.message.value(),
        }
    }

    /// The text input behind a field; `None` for the experience select.
    #[must_use]
    pub const fn text_input(&self, field: Field) -> Option<&TextInput> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Experience => None,
            Field::Message => Some(&self.message),
        }
    }

    fn text_input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Email => Some(&mut self.email),
            Field::Experience => None,
            Field::Message => Some(&mut self.message),
        }
    }

    /// Snapshot of every field value.
    #[must_use]
    pub fn draft(&self) -> FormDraft {
        let mut draft = FormDraft::default();
        for field in Field::ALL {
            draft.set(field, self.value(field));
        }
        draft
    }

    /// Current field errors.
    #[must_use]
    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Text of the assertive live region; empty while there are no errors.
    #[must_use]
    pub fn live_region_text(&self) -> String {
        self.errors.summary().unwrap_or_default()
    }

    /// Label of the submit button.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.submitting { "Submitting..." } else { "Submit" }
    }

    /// Elements the focus trap cycles through, in order. The buttons drop
    /// out while a submission is in flight.
    #[must_use]
    pub fn focusables(&self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = Field::ALL.into_iter().map(Field::element_id).collect();
        if !self.submitting {
            ids.extend([CANCEL_ID, SUBMIT_ID]);
        }
        ids
    }

    // Lifecycle

    /// Open the form with focus on the dialog heading.
    pub fn open(&mut self, screen: &mut Screen) {
        if self.is_open() {
            return;
        }
        for id in Self::element_ids() {
            screen.register(id);
        }
        self.dialog.open(screen);
    }

    /// Close the form and reset values, errors and submission state.
    pub fn close(&mut self, screen: &mut Screen) {
        if !self.is_open() {
            return;
        }
        screen.cancel_deferred(self.owner);
        self.dialog.close(screen);
        for id in Self::element_ids() {
            screen.unregister(&id);
        }
        self.reset();
    }

    fn element_ids() -> impl Iterator<Item = ElementId> {
        Field::ALL
            .into_iter()
            .map(Field::element_id)
            .chain([CANCEL_ID, SUBMIT_ID, LIVE_REGION_ID])
    }

    fn reset(&mut self) {
        self.clear_values();
        self.in_flight = None;
        self.submitting = false;
    }

    fn clear_values(&mut self) {
        self.name.clear();
        self.email.clear();
        self.experience.clear();
        self.message.clear();
        self.errors.clear();
    }

    // Field events

    /// Replace a field value (a change event).
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name.set(value),
            Field::Email => self.email.set(value),
            Field::Experience => self.experience = value,
            Field::Message => self.message.set(value),
        }
        self.changed(field);
    }

    fn changed(&mut self, field: Field) {
        if self.errors.has(field) {
            self.blur(field);
        }
    }

    /// Validate one field, as when it loses focus.
    pub fn blur(&mut self, field: Field) {
        let check = validate_field(field, self.value(field));
        self.errors.record(field, &check);
    }

    /// Move focus to `target`, blurring the field that had it.
    pub fn move_focus(&mut self, screen: &mut Screen, target: &ElementId) {
        let previous = screen.focused().cloned();
        if !screen.focus(target) || previous.as_ref() == Some(target) {
            return;
        }
        if let Some(field) = previous.as_ref().and_then(Field::from_element) {
            self.blur(field);
        }
    }

    // Submission

    /// Submit the form.
    ///
    /// Ignored while a submission is in flight. Invalid input leaves the
    /// errors in place, focuses the first invalid field and announces the
    /// errors.
    pub fn submit(&mut self, screen: &mut Screen) -> FormEvent {
        if !self.is_open() {
            return FormEvent::Continue;
        }
        if self.submitting {
            debug!("Submission already in flight; ignoring submit");
            return FormEvent::Continue;
        }

        let data = match self.draft().to_data() {
            Ok(data) => {
                self.errors.clear();
                data
            }
            Err(errors) => {
                self.errors = errors;
                self.report_invalid(screen);
                return FormEvent::Continue;
            }
        };

        self.submitting = true;
        match self.handler.submit(&data) {
            SubmitWork::Ready(result) => self.finish_submission(data, result),
            SubmitWork::InFlight(result) => {
                debug!("Submission in flight");
                self.in_flight = Some(InFlight { data, result });
                FormEvent::Continue
            }
        }
    }

    /// Check whether in-flight submission work has finished.
    pub fn poll_submission(&mut self) -> FormEvent {
        let Some(in_flight) = self.in_flight.take() else {
            return FormEvent::Continue;
        };
        match in_flight.result.try_recv() {
            Ok(result) => self.finish_submission(in_flight.data, result),
            Err(TryRecvError::Empty) => {
                self.in_flight = Some(in_flight);
                FormEvent::Continue
            }
            Err(TryRecvError::Disconnected) => {
                self.finish_submission(in_flight.data, Err(ModalError::SubmissionDropped.into()))
            }
        }
    }

    fn finish_submission(&mut self, data: FormData, result: anyhow::Result<()>) -> FormEvent {
        self.submitting = false;
        self.in_flight = None;
        match result {
            Ok(()) => {
                self.clear_values();
                FormEvent::Submitted(data)
            }
            Err(e) => {
                error!("Form submission error: {e:#}");
                FormEvent::Continue
            }
        }
    }

    fn report_invalid(&mut self, screen: &mut Screen) {
        let Some(first) = self.errors.first_field() else {
            return;
        };
        debug!("Form invalid; first error on {first}");
        self.move_focus(screen, &first.element_id());
        if let Some(summary) = self.errors.summary() {
            screen.announce(Politeness::Assertive, summary);
        }
        screen.defer_focus_for(self.owner, LIVE_REGION_ID, self.live_region_delay);
    }

    // Input routing

    /// Handle a key press.
    pub fn handle_key(
        &mut self,
        screen: &mut Screen,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> FormEvent {
        if !self.is_open() {
            return FormEvent::Continue;
        }
        match self
            .dialog
            .handle_key(screen, code, modifiers, &self.focusables())
        {
            DialogEvent::Close(reason) => return FormEvent::CloseRequested(reason),
            DialogEvent::Focus(target) => {
                self.move_focus(screen, &target);
                return FormEvent::Continue;
            }
            DialogEvent::Unhandled => {}
        }

        let Some(focused) = screen.focused().cloned() else {
            return FormEvent::Continue;
        };
        let activates = matches!(code, KeyCode::Enter | KeyCode::Char(' '));
        if focused == SUBMIT_ID {
            return if activates {
                self.submit(screen)
            } else {
                FormEvent::Continue
            };
        }
        if focused == CANCEL_ID {
            return if activates && !self.submitting {
                FormEvent::CloseRequested(CloseReason::Cancel)
            } else {
                FormEvent::Continue
            };
        }
        match Field::from_element(&focused) {
            Some(field) => self.edit_field(screen, field, code, modifiers),
            None => FormEvent::Continue,
        }
    }

    fn edit_field(
        &mut self,
        screen: &mut Screen,
        field: Field,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> FormEvent {
        if code == KeyCode::Enter && field != Field::Message {
            return self.submit(screen);
        }
        let Some(input) = self.text_input_mut(field) else {
            match code {
                KeyCode::Left | KeyCode::Up => self.step_experience(false),
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.step_experience(true),
                _ => {}
            }
            return FormEvent::Continue;
        };
        let changed = match code {
            KeyCode::Enter => input.insert_char('\n'),
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => input.delete_word(),
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => input.clear(),
            KeyCode::Char(_) if modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char(c) => input.insert_char(c),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => {
                input.cursor_left();
                false
            }
            KeyCode::Right => {
                input.cursor_right();
                false
            }
            KeyCode::Home => {
                input.cursor_home();
                false
            }
            KeyCode::End => {
                input.cursor_end();
                false
            }
            _ => false,
        };
        if changed {
            self.changed(field);
        }
        FormEvent::Continue
    }

    fn step_experience(&mut self, forward: bool) {
        let count = EXPERIENCE_OPTIONS.len();
        let current = EXPERIENCE_OPTIONS
            .iter()
            .position(|option| *option == self.experience)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.change(Field::Experience, EXPERIENCE_OPTIONS[next]);
    }

    /// Handle a mouse event on a screen of size `frame_area`.
    pub fn handle_mouse(
        &mut self,
        screen: &mut Screen,
        mouse: MouseEvent,
        frame_area: Rect,
    ) -> FormEvent {
        if !self.is_open() || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return FormEvent::Continue;
        }
        let (x, y) = (mouse.column, mouse.row);
        let layout = FormLayout::compute(frame_area);

        if let DialogEvent::Close(reason) = self.dialog.handle_click(x, y, layout.panel) {
            return FormEvent::CloseRequested(reason);
        }
        if rect_contains(layout.submit, x, y) {
            if self.submitting {
                return FormEvent::Continue;
            }
            self.move_focus(screen, &SUBMIT_ID);
            return self.submit(screen);
        }
        if rect_contains(layout.cancel, x, y) {
            return if self.submitting {
                FormEvent::Continue
            } else {
                FormEvent::CloseRequested(CloseReason::Cancel)
            };
        }
        if let Some(field) = layout.field_at(x, y) {
            self.move_focus(screen, &field.element_id());
        }
        FormEvent::Continue
    }
}
