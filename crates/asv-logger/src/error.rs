/// Errors reported by logger operations and sinks.
///
/// Sink failures are surfaced to the caller as values; nothing in the facade
/// panics or aborts because a sink could not write.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LogError {
    /// The sink failed to accept or write a record.
    #[error("sink error: {0}")]
    Sink(String),

    /// A level name could not be parsed.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    /// Logger configuration could not be decoded.
    #[error("config error: {0}")]
    Config(String),

    /// The sink was already torn down by a previous `destroy`.
    #[error("sink already destroyed")]
    AlreadyDestroyed,
}

/// Convenience alias used throughout the logger crate.
pub type Result<T> = std::result::Result<T, LogError>;
