//! # filecense
//!
//! A tool that prepends copyright license headers to source files by scanning a directory recursively,
//! and writes the full license text at the project root.
//!
//! `filecense` modifies source files in place and never adds a header to a file that already starts with it.
//! The comment syntax for each file is picked from its extension or name, and can be extended or overridden.
//!
//! ## Features
//!
//! * Recursively scan a directory and prepend license headers to source files
//! * Comment syntax chosen per extension, with name-pattern fallbacks for files like `Makefile`
//! * Shebang lines stay on the first line
//! * Built-in skip lists for VCS/build directories and non-source files, extensible by name or regex
//! * Dry-run mode that prints a diff instead of writing
//! * Full license text (EUPL, MIT, GPL, AGPL, MPL, Unlicense, Beerware) written at the project root
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use filecense::ignore::IgnoreSet;
//! use filecense::licenses::LicenseRegistry;
//! use filecense::processor::{FileCollector, Processor, ProcessorConfig};
//! use filecense::templates::{FormatTable, LicenseData, TemplateManager, create_resolver};
//!
//! fn main() -> anyhow::Result<()> {
//!   let license = LicenseRegistry::builtin().get("mit")?;
//!   let data = LicenseData {
//!     year: 2025,
//!     holder: "Jane Doe".to_string(),
//!   };
//!
//!   let resolver = create_resolver(None, FormatTable::builtin()?);
//!   let template_manager = TemplateManager::new(license.top, &data, resolver);
//!
//!   let collector = FileCollector::new(IgnoreSet::default_dirs()?, IgnoreSet::default_files()?);
//!   let files = collector.collect_files(Path::new("src"))?;
//!
//!   let processor = Processor::new(ProcessorConfig::new(template_manager))?;
//!   for report in processor.process_files(&files) {
//!     if let Some(error) = report.error {
//!       eprintln!("{}: {error}", report.path.display());
//!     }
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Collecting candidate files and writing headers
//! * [`templates`] - Comment syntax lookup and header rendering
//! * [`licenses`] - The built-in license texts
//! * [`config`] - `.filecense.toml` loading and merging with CLI flags
//!
//! [`processor`]: crate::processor
//! [`templates`]: crate::templates
//! [`licenses`]: crate::licenses
//! [`config`]: crate::config

pub mod config;
pub mod diff;
pub mod error;
pub mod ignore;
pub mod license_detection;
pub mod licenses;
pub mod logging;
pub mod processor;
pub mod report;
pub mod templates;
pub mod workspace;
