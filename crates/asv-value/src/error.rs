/// Errors from array list growth.
///
/// Whenever one of these is returned, the list is exactly as it was before
/// the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArrayListError {
    /// The slot array could not be (re)allocated.
    #[error("failed to allocate {requested} slots")]
    AllocationFailed { requested: usize },

    /// Growth was requested on a fixed-capacity list (`block_size == 0`).
    #[error("fixed-capacity list cannot grow: capacity {capacity}, needed {needed}")]
    MaxCapacityExceeded { capacity: usize, needed: usize },
}

/// Result alias for array list operations.
pub type Result<T> = std::result::Result<T, ArrayListError>;
