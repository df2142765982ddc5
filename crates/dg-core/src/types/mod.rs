//! Domain types for the dartgen tool.
//!
//! # Module Organization
//!
//! - [`field`] - Field declarations extracted from a base class
//! - [`base_class`] - A located base class file
//! - [`model`] - The rendered model file
//!
//! All public types are re-exported at this module level and at the crate root:
//!
//! ```
//! use dg_core::{BaseClassRef, Field, GeneratedModel};
//! ```

pub mod base_class;
pub mod field;
pub mod model;

pub use base_class::{declaration_needle, BaseClassRef};
pub use field::{Field, Fields, FIELD_KEYWORD};
pub use model::GeneratedModel;
