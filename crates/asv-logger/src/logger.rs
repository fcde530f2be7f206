use std::fmt;

use crate::error::Result;
use crate::level::Level;
use crate::sink::LogSink;

/// Where the logger's sink lives.
enum Binding<'a> {
    /// Heap-allocated by [`Logger::new`]; freed when the logger goes away.
    Owned(Box<dyn LogSink + 'a>),
    /// Provided by the caller through [`Logger::init`]; never freed here.
    Borrowed(&'a mut (dyn LogSink + 'a)),
}

/// Logger handle: a bound sink plus its ownership flag.
///
/// `Logger::init` and `Logger::new` behave identically apart from what
/// [`destroy`](Logger::destroy) frees.
pub struct Logger<'a> {
    binding: Binding<'a>,
}

impl<'a> Logger<'a> {
    /// Bind a caller-provided sink.
    pub fn init<S: LogSink + 'a>(sink: &'a mut S) -> Self {
        Self {
            binding: Binding::Borrowed(sink),
        }
    }

    /// Bind a sink owned by the logger.
    pub fn new<S: LogSink + 'a>(sink: S) -> Self {
        Self {
            binding: Binding::Owned(Box::new(sink)),
        }
    }

    /// Returns `true` if the logger owns its sink.
    pub fn is_owned(&self) -> bool {
        matches!(self.binding, Binding::Owned(_))
    }

    /// The bound sink.
    pub fn sink(&self) -> &dyn LogSink {
        match &self.binding {
            Binding::Owned(sink) => sink.as_ref(),
            Binding::Borrowed(sink) => &**sink,
        }
    }

    /// Whether records at `level` would be written.
    pub fn is_enabled(&self, level: Level) -> bool {
        self.sink().enabled(level)
    }

    /// The sink's current threshold.
    pub fn get_level(&self) -> Level {
        self.sink().level()
    }

    pub fn trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    pub fn error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    /// Dispatch a record to the sink.
    ///
    /// Records below the sink's threshold are dropped without reaching the
    /// sink's `log` hook. Sink failures come back as `Err` and are never
    /// escalated.
    pub fn log(&self, level: Level, file: &str, line: u32, args: fmt::Arguments<'_>) -> Result<()> {
        let sink = self.sink();
        if !sink.enabled(level) {
            return Ok(());
        }
        sink.log(level, file, line, args)
    }

    /// Run the sink's destroy hook, then release the handle.
    ///
    /// An owned sink is freed along with the logger; a caller-provided one is
    /// handed back to its owner untouched apart from the hook.
    pub fn destroy(self) -> Result<()> {
        match self.binding {
            Binding::Owned(mut sink) => sink.destroy(),
            Binding::Borrowed(sink) => sink.destroy(),
        }
    }
}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("owned", &self.is_owned())
            .field("level", &self.get_level())
            .finish()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, file!(), line!(), format_args!($($arg)+))
    };
}

/// Log at trace level, capturing the call site.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => { $crate::__log_at!($logger, $crate::Level::Trace, $($arg)+) };
}

/// Log at debug level, capturing the call site.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => { $crate::__log_at!($logger, $crate::Level::Debug, $($arg)+) };
}

/// Log at info level, capturing the call site.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => { $crate::__log_at!($logger, $crate::Level::Info, $($arg)+) };
}

/// Log at warn level, capturing the call site.
#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => { $crate::__log_at!($logger, $crate::Level::Warn, $($arg)+) };
}

/// Log at error level, capturing the call site.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => { $crate::__log_at!($logger, $crate::Level::Error, $($arg)+) };
}
