//! Logging setup for the dental supply storefront.
//!
//! Library crates only emit `tracing` events. Binaries call [`init_logging`]
//! once at startup to install a subscriber:
//!
//! ```no_run
//! use dental_observability::{init_logging, LogFormat, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default().with_format(LogFormat::Json)).ok();
//! tracing::info!("storefront started");
//! ```

mod logging;

pub use logging::*;
