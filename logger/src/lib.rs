extern crate env_logger;
extern crate log;

use env_logger::LogBuilder;
use log::LogLevelFilter;
use std::env;

/// Installs the global logger.
///
/// Logs at `info` level unless `RUST_LOG` says otherwise. Calling this more
/// than once is harmless, later calls are no-ops.
pub fn init() {
    let mut builder = LogBuilder::new();
    builder.filter(None, LogLevelFilter::Info);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse(&filters);
    }
    let _ = builder.init();
}
