//! Naming rules for generated files and classes.

use crate::error::GenerateError;

/// Suffix that gets an underscore in front of it in the file stem.
const MODEL_SUFFIX: &str = "model";

/// Derives the output file stem from a model class name.
///
/// The name is lower-cased, then a trailing `model` becomes `_model`.
/// Nothing else is split, so `UserProfileModel` becomes `userprofile_model`.
///
/// # Examples
///
/// ```
/// use dg_codegen::file_stem;
///
/// assert_eq!(file_stem("UserModel"), "user_model");
/// assert_eq!(file_stem("Profile"), "profile");
/// ```
#[must_use]
pub fn file_stem(model_name: &str) -> String {
    let lower = model_name.to_lowercase();
    match lower.strip_suffix(MODEL_SUFFIX) {
        Some(prefix) => format!("{prefix}_{MODEL_SUFFIX}"),
        None => lower,
    }
}

/// Checks that `model_name` can be emitted as a Dart class name.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidModelName`] for an empty name, a leading
/// digit, or any character other than ASCII letters, digits, `_` and `$`.
pub fn validate_model_name(model_name: &str) -> Result<(), GenerateError> {
    let valid = model_name
        .chars()
        .next()
        .is_some_and(|first| !first.is_ascii_digit())
        && model_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid {
        Ok(())
    } else {
        Err(GenerateError::InvalidModelName(model_name.to_owned()))
    }
}
