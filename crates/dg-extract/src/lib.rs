//! Field declaration extraction for Dart base classes.
//!
//! This crate finds the immutable (`final`) fields of a class by pattern
//! matching over raw source text:
//!
//! ```
//! use dg_extract::extract_fields;
//!
//! let source = r#"
//! class ProfileEntity {
//!   final String id;
//!   final List<String> tags;
//! }
//! "#;
//!
//! let fields = extract_fields(source, "ProfileEntity")?;
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[1].to_string(), "final List<String> tags;");
//! # Ok::<(), dg_extract::ExtractError>(())
//! ```
//!
//! # Matching Rules
//!
//! | Input | Result |
//! |-------|--------|
//! | `final String id;` | `final String id;` |
//! | `final Map< String , dynamic > m;` | `final Map<String,dynamic> m;` |
//! | `final int \| String v;` | `final int \| String v;` |
//! | `final String? nick;` | not matched |
//! | `final String name = 'x';` | not matched |
//!
//! This is not a parser: there is no tokenizer and no awareness of comments
//! or braces. The patterns live in [`patterns`].

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
mod extractor;
pub mod patterns;

pub use error::ExtractError;
pub use extractor::{extract_fields, normalize_generics};
