//! Dart model generation from extracted base class fields.
//!
//! Given a model name, a located base class and its fields, this crate renders
//! a `json_serializable` model that extends the base class and forwards every
//! field through a `super.` constructor parameter. Rendering is pure: nothing
//! here touches the filesystem.
//!
//! ```
//! use camino::{Utf8Path, Utf8PathBuf};
//! use dg_codegen::{generate_model, ModelRequest};
//! use dg_core::{BaseClassRef, Field};
//!
//! let base = BaseClassRef::new(Utf8PathBuf::from("/app/lib/auth.dart"), "AuthEntity");
//! let fields = [Field::new("Map<String,dynamic>", "tokens")?];
//! let model = generate_model(&ModelRequest::new(
//!     "AuthModel",
//!     &base,
//!     &fields,
//!     Utf8Path::new("/app/lib/models"),
//! ))?;
//!
//! assert_eq!(model.file_stem, "auth_model");
//! assert_eq!(model.import_path, "../auth.dart");
//! assert!(model.contents.contains("required super.tokens,"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod generator;
mod import_path;
mod naming;

pub use error::GenerateError;
pub use generator::{constructor_params, generate_model, parse_fields, ModelRequest};
pub use import_path::relative_import_path;
pub use naming::{file_stem, validate_model_name};
