//! Base class discovery for Dart projects.
//!
//! This crate walks a project tree and finds the first Dart file that
//! declares a given class.
//!
//! # Overview
//!
//! - [`FileWalker`]: Directory traversal pruned only by
//!   the configured skip list, in a stable order
//! - [`BaseClassLocator`]: Parallel substring search over the walked files
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use dg_core::SearchConfig;
//! use dg_locator::BaseClassLocator;
//!
//! let locator = BaseClassLocator::new(Utf8Path::new("."), &SearchConfig::default())?;
//! if let Some(base) = locator.locate("UserEntity")? {
//!     println!("{} is declared in {}", base.class_name(), base.path());
//! }
//! # Ok::<(), dg_locator::LocateError>(())
//! ```

pub mod error;
mod locator;
mod walker;

pub use error::LocateError;
pub use locator::BaseClassLocator;
pub use walker::FileWalker;
