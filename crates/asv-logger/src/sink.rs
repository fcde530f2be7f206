//! The [`LogSink`] trait: the operation table every concrete sink provides.
//!
//! A sink combines the opaque source (whatever state the backend needs) with
//! the hooks that act on it. The facade never formats, buffers, or performs
//! I/O itself; all of that belongs to the sink.

use std::fmt;

use crate::error::Result;
use crate::level::Level;

/// Backend for a [`Logger`](crate::Logger).
pub trait LogSink: Send + Sync {
    /// Release resources owned by the sink.
    ///
    /// Invoked exactly once by [`Logger::destroy`](crate::Logger::destroy).
    /// It must not assume the sink's own storage is about to be freed: a
    /// caller-provided sink outlives the logger bound to it.
    fn destroy(&mut self) -> Result<()> {
        Ok(())
    }

    /// The current threshold level of the sink.
    fn level(&self) -> Level;

    /// Whether records at `level` would be written.
    fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Write one record.
    ///
    /// `file` and `line` identify the call site; `args` carries the
    /// unformatted message.
    fn log(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) -> Result<()>;
}
