//! A base class located on disk.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// The file that declares a base class.
///
/// The reference is only known to be valid at the moment the search found it;
/// nothing re-checks the file afterwards.
///
/// # Examples
///
/// ```
/// use dg_core::BaseClassRef;
/// use camino::Utf8PathBuf;
///
/// let base = BaseClassRef::new(Utf8PathBuf::from("lib/domain/user_entity.dart"), "UserEntity");
/// assert_eq!(base.class_name(), "UserEntity");
/// assert_eq!(base.declaration(), "class UserEntity");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseClassRef {
    /// Path of the file containing the declaration.
    path: Utf8PathBuf,

    /// Name of the class.
    class_name: String,
}

impl BaseClassRef {
    /// Creates a new reference.
    #[must_use]
    pub fn new(path: Utf8PathBuf, class_name: impl Into<String>) -> Self {
        Self {
            path,
            class_name: class_name.into(),
        }
    }

    /// Returns the path of the declaring file.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the class name.
    #[inline]
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the literal text searched for in candidate files.
    #[must_use]
    pub fn declaration(&self) -> String {
        declaration_needle(&self.class_name)
    }
}

/// Returns `class <name>`, the substring that marks a class declaration.
///
/// No word boundary is implied: `class User` is also found in
/// `class UserEntity`.
#[inline]
#[must_use]
pub fn declaration_needle(class_name: &str) -> String {
    format!("class {class_name}")
}
