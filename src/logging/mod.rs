//! # Logging Module
//!
//! This module provides logging utilities for filecense, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Color mode selection for all terminal output
//!
//! Verbose logs go to stderr and info logs go to stdout, so the list of
//! changed files can be piped on its own. Structured diagnostics (timings,
//! counts) go through `tracing`, see [`init_tracing`].
//!
//! ## Example
//!
//! ```rust
//! use filecense::logging::{ColorMode, set_verbose};
//! use filecense::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Skipping directory: {}", "vendor");
//! info_log!("License added to: {}", "src/main.go");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when colors are enabled.
///
/// Used by [`info_log!`].
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
