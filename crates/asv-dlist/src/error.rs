use crate::element::ElementId;

/// Errors produced by linked list operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DListError {
    /// The handle names an element that has since been deleted.
    #[error("stale element handle: {0}")]
    StaleElement(ElementId),
}

/// Convenience alias used throughout the list crate.
pub type Result<T> = std::result::Result<T, DListError>;
