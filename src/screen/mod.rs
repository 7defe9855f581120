//! The host screen the form modal lives on.
//!
//! The screen owns everything a dialog touches outside itself: which element
//! has keyboard focus, which elements currently exist, the page scroll lock,
//! global keyboard listeners, named mount points, a small scheduler for
//! deferred work, and the log of live announcements made for assistive
//! technology.
//!
//! Everything is single-threaded. Handlers receive `&mut Screen` explicitly.

mod guards;

pub use guards::{KeyListenerGuard, KeyListeners, ScrollLock, ScrollLockGuard};

use crate::error::ModalError;
use std::borrow::Cow;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

/// Identifier of a focusable element on the screen.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(Cow<'static, str>);

impl ElementId {
    /// Build an id from a static string.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Build an id from an owned string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How urgently a live announcement interrupts the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// Announced when the user is idle.
    Polite,
    /// Announced immediately, interrupting current speech.
    Assertive,
}

/// A message announced through a live region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// Announcement urgency.
    pub politeness: Politeness,
    /// Announced text.
    pub text: String,
}

/// Handle to a named mount point created on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountId(usize);

#[derive(Debug)]
struct MountPoint {
    name: String,
    occupant: Rc<Cell<Option<Uuid>>>,
}

/// Exclusive occupancy of a mount point. Dropping it vacates the mount.
#[derive(Debug)]
pub struct MountGuard {
    session: Uuid,
    occupant: Rc<Cell<Option<Uuid>>>,
}

impl MountGuard {
    /// Session occupying the mount.
    #[must_use]
    pub const fn session(&self) -> Uuid {
        self.session
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if self.occupant.get() == Some(self.session) {
            self.occupant.set(None);
        }
    }
}

#[derive(Debug)]
enum Task {
    Focus(ElementId),
}

#[derive(Debug)]
struct Deferred {
    due: Instant,
    owner: Option<Uuid>,
    task: Task,
}

/// Announcements kept for inspection; older ones are dropped.
pub const ANNOUNCEMENT_HISTORY: usize = 16;

/// The host screen.
#[derive(Debug)]
pub struct Screen {
    elements: BTreeSet<ElementId>,
    focused: Option<ElementId>,
    scroll_lock: ScrollLock,
    key_listeners: KeyListeners,
    mounts: Vec<MountPoint>,
    deferred: Vec<Deferred>,
    announcements: Vec<Announcement>,
    now: Instant,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create an empty screen whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create an empty screen whose clock starts at `now`.
    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self {
            elements: BTreeSet::new(),
            focused: None,
            scroll_lock: ScrollLock::default(),
            key_listeners: KeyListeners::default(),
            mounts: Vec::new(),
            deferred: Vec::new(),
            announcements: Vec::new(),
            now,
        }
    }

    // Elements and focus

    /// Make an element exist on the screen so it can receive focus.
    pub fn register(&mut self, id: ElementId) {
        self.elements.insert(id);
    }

    /// Remove an element. If it had focus, focus falls back to nothing.
    pub fn unregister(&mut self, id: &ElementId) {
        self.elements.remove(id);
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
    }

    /// Whether the element currently exists.
    #[must_use]
    pub fn is_registered(&self, id: &ElementId) -> bool {
        self.elements.contains(id)
    }

    /// Move focus to `id`. Returns `false` (and leaves focus alone) if the
    /// element does not exist.
    pub fn focus(&mut self, id: &ElementId) -> bool {
        if !self.elements.contains(id) {
            debug!("Ignoring focus request for missing element {id}");
            return false;
        }
        if self.focused.as_ref() != Some(id) {
            debug!("Focus moved to {id}");
            self.focused = Some(id.clone());
        }
        true
    }

    /// The focused element, if any.
    #[must_use]
    pub const fn focused(&self) -> Option<&ElementId> {
        self.focused.as_ref()
    }

    /// Whether `id` has focus.
    #[must_use]
    pub fn has_focus(&self, id: &ElementId) -> bool {
        self.focused.as_ref() == Some(id)
    }

    // Scroll lock and listeners

    /// The page scroll lock.
    #[must_use]
    pub const fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    /// Whether page scrolling is locked.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    /// Global keyboard listeners.
    #[must_use]
    pub const fn key_listeners(&self) -> &KeyListeners {
        &self.key_listeners
    }

    // Mount points

    /// Return the mount point called `name`, creating it on first use.
    pub fn ensure_mount(&mut self, name: &str) -> MountId {
        if let Some(index) = self.mounts.iter().position(|m| m.name == name) {
            return MountId(index);
        }
        debug!("Creating mount point {name}");
        self.mounts.push(MountPoint {
            name: name.to_string(),
            occupant: Rc::new(Cell::new(None)),
        });
        MountId(self.mounts.len() - 1)
    }

    /// Number of mount points created so far.
    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.mounts.len()
    }

    /// Session currently occupying a mount point.
    #[must_use]
    pub fn mount_occupant(&self, mount: MountId) -> Option<Uuid> {
        self.mounts.get(mount.0).and_then(|m| m.occupant.get())
    }

    /// Claim a mount point for `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ModalError::MountOccupied`] if another session holds it.
    pub fn occupy(&mut self, mount: MountId, session: Uuid) -> Result<MountGuard, ModalError> {
        let Some(point) = self.mounts.get(mount.0) else {
            return Err(ModalError::MountOccupied(format!("#{}", mount.0)));
        };
        if point.occupant.get().is_some() {
            return Err(ModalError::MountOccupied(point.name.clone()));
        }
        point.occupant.set(Some(session));
        Ok(MountGuard {
            session,
            occupant: Rc::clone(&point.occupant),
        })
    }

    // Scheduler

    /// Current scheduler time (the instant of the last tick).
    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Focus `id` on the next tick, after the current handlers complete.
    pub fn defer_focus(&mut self, id: ElementId) {
        self.defer_focus_after(id, Duration::ZERO);
    }

    /// Focus `id` once `delay` has elapsed, checked on each tick.
    pub fn defer_focus_after(&mut self, id: ElementId, delay: Duration) {
        self.schedule(None, id, delay);
    }

    /// Like [`defer_focus_after`](Self::defer_focus_after), but the task
    /// belongs to `owner` and is dropped by [`cancel_deferred`](Self::cancel_deferred).
    pub fn defer_focus_for(&mut self, owner: Uuid, id: ElementId, delay: Duration) {
        self.schedule(Some(owner), id, delay);
    }

    /// Drop every waiting task that belongs to `owner`. Returns how many
    /// were dropped.
    pub fn cancel_deferred(&mut self, owner: Uuid) -> usize {
        let before = self.deferred.len();
        self.deferred.retain(|task| task.owner != Some(owner));
        let dropped = before - self.deferred.len();
        if dropped > 0 {
            debug!("Dropped {dropped} deferred task(s) of {owner}");
        }
        dropped
    }

    fn schedule(&mut self, owner: Option<Uuid>, id: ElementId, delay: Duration) {
        self.deferred.push(Deferred {
            due: self.now + delay,
            owner,
            task: Task::Focus(id),
        });
    }

    /// Number of deferred tasks still waiting.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// Advance the clock to `now` and run every deferred task that is due,
    /// oldest deadline first. Returns how many tasks ran.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.now = self.now.max(now);
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|task| task.due <= self.now);
        self.deferred = waiting;
        due.sort_by_key(|task| task.due);

        let ran = due.len();
        for deferred in due {
            match deferred.task {
                Task::Focus(id) => {
                    self.focus(&id);
                }
            }
        }
        ran
    }

    // Live announcements

    /// Announce `text` through a live region.
    pub fn announce(&mut self, politeness: Politeness, text: impl Into<String>) {
        let text = text.into();
        debug!("Live announcement ({politeness:?}): {text}");
        self.announcements.push(Announcement { politeness, text });
        let excess = self.announcements.len().saturating_sub(ANNOUNCEMENT_HISTORY);
        self.announcements.drain(..excess);
    }

    /// The most recent announcements, oldest first.
    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }
}
