use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Global output mode shared by [`verbose_log!`] and [`info_log!`].
///
/// Starts as [`OutputMode::Normal`] until [`set_quiet`] or [`set_verbose`]
/// is called.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(OutputMode::Normal as u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => Self::Quiet,
      2 => Self::Verbose,
      _ => Self::Normal,
    }
  }

  fn current() -> Self {
    Self::from_u8(OUTPUT_MODE.load(Ordering::SeqCst))
  }
}

/// When to color terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Color when the stream is a terminal
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode to every `if_supports_color` call in the process.
  pub fn apply(self) {
    match self {
      Self::Auto => owo_colors::unset_override(),
      Self::Never => owo_colors::set_override(false),
      Self::Always => owo_colors::set_override(true),
    }
  }
}

/// Enables verbose output: skip decisions, per-file messages and full file
/// lists.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Suppresses everything but errors.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
  OutputMode::current() == OutputMode::Verbose
}

pub fn is_quiet() -> bool {
  OutputMode::current() == OutputMode::Quiet
}

/// Installs the tracing subscriber that carries timings and counts to stderr.
///
/// `RUST_LOG` always takes precedence. Otherwise `-vv` enables debug and
/// `-vvv` trace events; quiet runs only show errors. Calling this twice is a
/// no-op.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let level = if quiet {
    Level::ERROR
  } else {
    match verbose {
      0 | 1 => Level::WARN,
      2 => Level::DEBUG,
      _ => Level::TRACE,
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();
}
