//! The rendered model file.

use serde::{Deserialize, Serialize};

/// Output of the model generator.
///
/// Holds everything the caller needs to place the file: the derived stem,
/// the file name, the import path that was computed for the base class, and
/// the full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedModel {
    /// Derived base name, e.g. `user_model`.
    pub file_stem: String,

    /// File name including the extension, e.g. `user_model.dart`.
    pub file_name: String,

    /// Forward-slash relative path from the output directory to the base class file.
    pub import_path: String,

    /// Full text of the generated file.
    pub contents: String,
}

impl GeneratedModel {
    /// Returns the companion file name expected from the build step,
    /// e.g. `user_model.g.dart`.
    #[must_use]
    pub fn part_file_name(&self) -> String {
        format!("{}.g.dart", self.file_stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_file_name() {
        let model = GeneratedModel {
            file_stem: "user_model".to_owned(),
            file_name: "user_model.dart".to_owned(),
            import_path: "../domain/user_entity.dart".to_owned(),
            contents: String::new(),
        };
        assert_eq!(model.part_file_name(), "user_model.g.dart");
    }
}
