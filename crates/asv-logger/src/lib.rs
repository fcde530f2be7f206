//! Logging facade for the ASV core.
//!
//! Any component may hold a [`Logger`] for diagnostics. The logger itself is
//! a thin handle: it binds a [`LogSink`] (the opaque source together with its
//! operation table) and forwards level queries and records to it. Concrete
//! sinks decide formatting, buffering, and I/O.
//!
//! # Key Types
//!
//! - [`Level`] -- trace < debug < info < warn < error
//! - [`LogSink`] -- the sink operation table (destroy, enabled, level, log)
//! - [`Logger`] -- handle over a caller-provided or owned sink
//! - [`TracingSink`] -- bridge into the `tracing` ecosystem
//! - [`LogConfig`] -- TOML/serde configuration for the tracing bridge
//!
//! # Example
//!
//! ```
//! use asv_logger::{log_info, Level, Logger, TracingSink};
//!
//! let logger = Logger::new(TracingSink::new("client", Level::Info));
//! log_info!(logger, "cluster has {} nodes", 3).unwrap();
//! logger.destroy().unwrap();
//! ```

pub mod config;
pub mod error;
pub mod level;
pub mod logger;
pub mod sink;
pub mod tracing_sink;

pub use config::LogConfig;
pub use error::{LogError, Result};
pub use level::Level;
pub use logger::Logger;
pub use sink::LogSink;
pub use tracing_sink::TracingSink;
