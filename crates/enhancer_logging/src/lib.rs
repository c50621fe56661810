#![deny(missing_docs)]
//! Shared logging utilities for the enhancer workspace.
//!
//! This crate provides the `enhancer_*` logging macros used across the
//! codebase and a minimal test initializer for the global logger. Every macro
//! logs under the [`TARGET`] target so the app can tune enhancer output
//! separately from reqwest and hyper.

use std::sync::Once;

/// Log target shared by all `enhancer_*` macros.
pub const TARGET: &str = "enhancer";

/// Logs a trace-level message under the enhancer target.
#[macro_export]
macro_rules! enhancer_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the enhancer target.
#[macro_export]
macro_rules! enhancer_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the enhancer target.
#[macro_export]
macro_rules! enhancer_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the enhancer target.
#[macro_export]
macro_rules! enhancer_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the enhancer target.
#[macro_export]
macro_rules! enhancer_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// Safe to call from every test: only the first call installs a logger, and
/// an already-installed logger from elsewhere is left alone.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Use debug level in debug builds, info in release builds.
        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        let _ = CombinedLogger::init(vec![TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )]);
    });
}

#[cfg(test)]
mod tests {
    use super::initialize_for_tests;

    #[test]
    fn repeated_initialization_is_harmless() {
        initialize_for_tests();
        initialize_for_tests();
        enhancer_info!("logger ready");
        enhancer_debug!("value={}", 42);
    }
}
