//! Logging initialization

use log::LevelFilter;

/// Initialize the console logger.
///
/// Defaults to INFO for the whole process; `RUST_LOG` overrides
/// per-module levels as usual.
pub fn init_logger() {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
