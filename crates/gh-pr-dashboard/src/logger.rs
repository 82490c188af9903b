//! Stderr logging using env_logger
//!
//! Level defaults to `info`; `RUST_LOG` overrides it (a `.env` entry works
//! too, since `.env` is loaded before the logger).

use env_logger::{Builder, Env};

/// Initialize the global logger
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
