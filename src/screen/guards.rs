//! Reference-counted claims on screen-wide resources.
//!
//! A claim is held for as long as its guard lives. Dropping the guard
//! releases the claim, so a dialog torn down without an orderly close still
//! gives the resource back.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
struct Holders(Rc<Cell<usize>>);

impl Holders {
    fn acquire(&self) -> Rc<Cell<usize>> {
        self.0.set(self.0.get().saturating_add(1));
        Rc::clone(&self.0)
    }

    fn count(&self) -> usize {
        self.0.get()
    }
}

fn release(holders: &Cell<usize>) {
    holders.set(holders.get().saturating_sub(1));
}

/// Page scroll lock. The page must not scroll while any guard is alive.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Holders,
}

impl ScrollLock {
    /// Lock page scrolling until the returned guard is dropped.
    #[must_use = "the scroll lock is released as soon as the guard is dropped"]
    pub fn hold(&self) -> ScrollLockGuard {
        ScrollLockGuard {
            holders: self.holders.acquire(),
        }
    }

    /// Whether page scrolling is currently locked.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holders.count() > 0
    }
}

/// Keeps page scrolling locked while alive.
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        release(&self.holders);
    }
}

/// Screen-wide keyboard listeners (the global `keydown` hooks of open dialogs).
#[derive(Debug, Clone, Default)]
pub struct KeyListeners {
    holders: Holders,
}

impl KeyListeners {
    /// Attach a listener; it stays attached until the guard is dropped.
    #[must_use = "the listener is detached as soon as the guard is dropped"]
    pub fn attach(&self) -> KeyListenerGuard {
        KeyListenerGuard {
            holders: self.holders.acquire(),
        }
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn attached(&self) -> usize {
        self.holders.count()
    }
}

/// An attached keyboard listener.
#[derive(Debug)]
pub struct KeyListenerGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        release(&self.holders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_lock_released_on_drop() {
        let lock = ScrollLock::default();
        assert!(!lock.is_locked());

        let guard = lock.hold();
        assert!(lock.is_locked());

        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_scroll_lock_nested_holders() {
        let lock = ScrollLock::default();
        let outer = lock.hold();
        let inner = lock.clone().hold();

        drop(outer);
        assert!(lock.is_locked());
        drop(inner);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_key_listeners_count() {
        let listeners = KeyListeners::default();
        let first = listeners.attach();
        let second = listeners.attach();
        assert_eq!(listeners.attached(), 2);

        drop(first);
        assert_eq!(listeners.attached(), 1);
        drop(second);
        assert_eq!(listeners.attached(), 0);
    }
}
