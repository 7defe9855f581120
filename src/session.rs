//! One-shot completion handles for modal sessions.
//!
//! Every `open` call produces a [`Resolver`] kept by the controller and a
//! [`PendingForm`] handed to the caller. The resolver is consumed when it
//! settles, and settles as [`FormOutcome::Cancelled`] if it is dropped
//! unresolved, so each pending form settles exactly once.

use crate::form::FormData;
use serde::Serialize;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use tracing::debug;
use uuid::Uuid;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "lowercase")]
pub enum FormOutcome {
    /// The form was submitted with valid data.
    Submitted(FormData),
    /// The dialog was closed without submitting.
    Cancelled,
}

impl FormOutcome {
    /// The submitted data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&FormData> {
        match self {
            Self::Submitted(data) => Some(data),
            Self::Cancelled => None,
        }
    }

    /// Consume the outcome, keeping the submitted data.
    #[must_use]
    pub fn into_data(self) -> Option<FormData> {
        match self {
            Self::Submitted(data) => Some(data),
            Self::Cancelled => None,
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    outcome: Option<FormOutcome>,
    waker: Option<Waker>,
}

/// Create a linked resolver / pending pair for a new session.
#[must_use]
pub fn completion() -> (Resolver, PendingForm) {
    let session = Uuid::new_v4();
    let slot = Rc::new(RefCell::new(Slot::default()));
    (
        Resolver {
            session,
            slot: Some(Rc::clone(&slot)),
        },
        PendingForm { session, slot },
    )
}

/// The settling side of a session, held by the controller.
#[derive(Debug)]
pub struct Resolver {
    session: Uuid,
    slot: Option<Rc<RefCell<Slot>>>,
}

impl Resolver {
    /// Session this resolver settles.
    #[must_use]
    pub const fn session(&self) -> Uuid {
        self.session
    }

    /// Settle the session.
    pub fn resolve(mut self, outcome: FormOutcome) {
        if let Some(slot) = self.slot.take() {
            settle(self.session, &slot, outcome);
        }
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            debug!("Session {} dropped unresolved; settling as cancelled", self.session);
            settle(self.session, &slot, FormOutcome::Cancelled);
        }
    }
}

fn settle(session: Uuid, slot: &RefCell<Slot>, outcome: FormOutcome) {
    let waker = {
        let mut slot = slot.borrow_mut();
        if slot.outcome.is_some() {
            return;
        }
        debug!("Session {session} settled: {outcome:?}");
        slot.outcome = Some(outcome);
        slot.waker.take()
    };
    if let Some(waker) = waker {
        waker.wake();
    }
}

/// The caller's side of a session: resolves to the [`FormOutcome`].
///
/// Poll it from an event loop with [`PendingForm::outcome`], or `.await` it.
#[derive(Debug)]
pub struct PendingForm {
    session: Uuid,
    slot: Rc<RefCell<Slot>>,
}

impl PendingForm {
    /// Session this handle waits on.
    #[must_use]
    pub const fn session(&self) -> Uuid {
        self.session
    }

    /// Whether the session has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slot.borrow().outcome.is_some()
    }

    /// The outcome, once settled.
    #[must_use]
    pub fn outcome(&self) -> Option<FormOutcome> {
        self.slot.borrow().outcome.clone()
    }
}

impl Future for PendingForm {
    type Output = FormOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        if let Some(outcome) = slot.outcome.clone() {
            return Poll::Ready(outcome);
        }
        slot.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Experience;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Wake;

    fn sample() -> FormData {
        FormData {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            experience: Experience::UpToThree,
            message: String::new(),
        }
    }

    #[test]
    fn test_pending_until_resolved() {
        let (resolver, pending) = completion();
        assert_eq!(resolver.session(), pending.session());
        assert!(!pending.is_settled());

        resolver.resolve(FormOutcome::Submitted(sample()));

        assert_eq!(pending.outcome(), Some(FormOutcome::Submitted(sample())));
    }

    #[test]
    fn test_dropped_resolver_settles_cancelled() {
        let (resolver, pending) = completion();
        drop(resolver);
        assert_eq!(pending.outcome(), Some(FormOutcome::Cancelled));
    }

    #[test]
    fn test_outcome_is_stable_after_settling() {
        let (resolver, pending) = completion();
        resolver.resolve(FormOutcome::Cancelled);
        assert_eq!(pending.outcome(), Some(FormOutcome::Cancelled));
        assert_eq!(pending.outcome(), Some(FormOutcome::Cancelled));
    }

    #[test]
    fn test_outcome_data_accessors() {
        assert_eq!(FormOutcome::Cancelled.data(), None);
        assert_eq!(FormOutcome::Submitted(sample()).into_data(), Some(sample()));
    }

    struct CountingWaker(AtomicUsize);

    impl Wake for CountingWaker {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_future_wakes_once_on_settle() {
        let counter = Arc::new(CountingWaker(AtomicUsize::new(0)));
        let waker = Waker::from(Arc::clone(&counter));
        let mut cx = Context::from_waker(&waker);
        let (resolver, mut pending) = completion();

        assert_eq!(Pin::new(&mut pending).poll(&mut cx), Poll::Pending);
        resolver.resolve(FormOutcome::Cancelled);

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert_eq!(
            Pin::new(&mut pending).poll(&mut cx),
            Poll::Ready(FormOutcome::Cancelled)
        );
    }

    #[test]
    fn test_outcome_json() -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_value(FormOutcome::Cancelled)?;
        assert_eq!(json, serde_json::json!({ "outcome": "cancelled" }));
        Ok(())
    }
}
