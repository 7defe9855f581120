//! Errors reported by the form modal controllers.

use thiserror::Error;

/// Misuse and resource errors surfaced by the modal controllers.
///
/// Field validation failures are not errors in this sense; they are carried
/// by [`crate::form::FormErrors`] and shown inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    /// `open` was called while a session is still pending.
    #[error("form modal is already open")]
    AlreadyOpen,

    /// The mount point is held by another session.
    #[error("mount point `{0}` is occupied by another session")]
    MountOccupied(String),

    /// In-flight submission work went away without reporting a result.
    #[error("submission work ended without reporting a result")]
    SubmissionDropped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ModalError::AlreadyOpen.to_string(),
            "form modal is already open"
        );
        assert_eq!(
            ModalError::MountOccupied("modal-root".to_string()).to_string(),
            "mount point `modal-root` is occupied by another session"
        );
    }
}
