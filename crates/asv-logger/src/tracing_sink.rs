//! [`TracingSink`]: forwards facade records into the `tracing` pipeline.

use std::fmt;

use crate::error::{LogError, Result};
use crate::level::Level;
use crate::sink::LogSink;

/// Emit one event at a level chosen at runtime.
///
/// `tracing` callsites need a constant level, so each arm gets its own.
macro_rules! emit {
    ($level:expr, $($field:tt)+) => {
        match $level {
            Level::Trace => tracing::trace!(target: "asv", $($field)+),
            Level::Debug => tracing::debug!(target: "asv", $($field)+),
            Level::Info => tracing::info!(target: "asv", $($field)+),
            Level::Warn => tracing::warn!(target: "asv", $($field)+),
            Level::Error => tracing::error!(target: "asv", $($field)+),
        }
    };
}

/// Sink that turns every record into a `tracing` event under the `asv`
/// target, tagged with the configured source name and the call site.
#[derive(Clone, Debug)]
pub struct TracingSink {
    source: String,
    threshold: Level,
    destroyed: bool,
}

impl TracingSink {
    /// Create a sink for `source` that passes records at `threshold` and up.
    pub fn new(source: impl Into<String>, threshold: Level) -> Self {
        Self {
            source: source.into(),
            threshold,
            destroyed: false,
        }
    }

    /// The source name attached to every event.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Change the threshold.
    pub fn set_level(&mut self, threshold: Level) {
        self.threshold = threshold;
    }

    /// Returns `true` once `destroy` has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl LogSink for TracingSink {
    fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Err(LogError::AlreadyDestroyed);
        }
        self.destroyed = true;
        Ok(())
    }

    fn level(&self) -> Level {
        self.threshold
    }

    fn log(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) -> Result<()> {
        if self.destroyed {
            return Err(LogError::AlreadyDestroyed);
        }
        emit!(level, source = %self.source, file, line, "{}", args);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured<F: FnOnce()>(f: F) -> String {
        let buf = Capture::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn records_become_tracing_events() {
        let output = captured(|| {
            let logger = Logger::new(TracingSink::new("client", Level::Debug));
            crate::log_warn!(logger, "slow reply after {}ms", 250).unwrap();
        });
        assert!(output.contains("WARN"));
        assert!(output.contains("slow reply after 250ms"));
        assert!(output.contains("source=client"));
    }

    #[test]
    fn threshold_filters_before_tracing() {
        let output = captured(|| {
            let logger = Logger::new(TracingSink::new("client", Level::Error));
            crate::log_info!(logger, "should not appear").unwrap();
        });
        assert!(!output.contains("should not appear"));
    }

    #[test]
    fn destroyed_sink_rejects_records() {
        let mut sink = TracingSink::new("client", Level::Trace);
        Logger::init(&mut sink).destroy().unwrap();
        assert!(sink.is_destroyed());

        let logger = Logger::init(&mut sink);
        let err = crate::log_error!(logger, "too late").unwrap_err();
        assert_eq!(err, LogError::AlreadyDestroyed);
        assert_eq!(logger.destroy().unwrap_err(), LogError::AlreadyDestroyed);
    }
}
