//! Focus trap: Tab cycling confined to a dialog's focusable elements.

use crate::screen::ElementId;

/// Direction of a Tab step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
}

/// Where focus goes after a Tab step from `current`.
///
/// Moving past the last element wraps to the first and vice versa. When
/// `current` is not one of `focusables` (for example the heading), Tab enters
/// at the first element and Shift+Tab at the last. Returns `None` when there
/// is nothing to focus.
#[must_use]
pub fn next_focus(
    focusables: &[ElementId],
    current: Option<&ElementId>,
    direction: TabDirection,
) -> Option<ElementId> {
    let first = focusables.first()?;
    let last = focusables.last()?;
    let position = current.and_then(|id| focusables.iter().position(|f| f == id));

    let target = match (position, direction) {
        (None, TabDirection::Forward) => first,
        (None, TabDirection::Backward) => last,
        (Some(index), TabDirection::Forward) => focusables.get(index + 1).unwrap_or(first),
        (Some(0), TabDirection::Backward) => last,
        (Some(index), TabDirection::Backward) => &focusables[index - 1],
    };
    Some(target.clone())
}
