//! Field extraction over raw source text.
//!
//! Extraction is two regex passes and nothing more: generic argument lists
//! are normalized first, then every `final <type> <name>;` match is collected
//! in source order. There is no tokenizer, so comments, initializers and
//! nullable (`?`) types are not understood.

use std::borrow::Cow;

use dg_core::{Field, Fields};
use regex::Captures;
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::patterns;

/// Removes whitespace around commas inside generic argument lists.
///
/// Whitespace just inside the brackets is dropped as well, so
/// `Map< String , dynamic >` and `Map<String, dynamic>` both become
/// `Map<String,dynamic>`. Text without generic lists is returned borrowed.
///
/// # Errors
///
/// Returns [`ExtractError::PatternCompile`] if a built-in pattern fails to compile.
///
/// # Examples
///
/// ```
/// use dg_extract::normalize_generics;
///
/// let text = normalize_generics("final Map< String , dynamic > tokens;")?;
/// assert_eq!(text, "final Map<String,dynamic> tokens;");
/// # Ok::<(), dg_extract::ExtractError>(())
/// ```
pub fn normalize_generics(text: &str) -> Result<Cow<'_, str>, ExtractError> {
    let generic_args = patterns::generic_args()?;
    let comma = patterns::comma()?;

    Ok(generic_args.replace_all(text, |caps: &Captures<'_>| {
        let inner = caps.get(1).map_or("", |m| m.as_str());
        format!("<{}>", comma.replace_all(inner, ",").trim())
    }))
}

/// Extracts the immutable field declarations from a base class source file.
///
/// Fields come back in the order they appear in `text`. An empty list is a
/// normal result; deciding whether that is fatal is up to the caller.
/// `base_class_name` only labels the diagnostics.
///
/// # Errors
///
/// Returns [`ExtractError::PatternCompile`] if a built-in pattern fails to compile.
///
/// # Examples
///
/// ```
/// use dg_extract::extract_fields;
///
/// let source = r#"
/// class UserEntity {
///   final String id;
///   final Map<String, dynamic> tokens;
/// }
/// "#;
///
/// let fields = extract_fields(source, "UserEntity")?;
/// let declarations: Vec<String> = fields.iter().map(ToString::to_string).collect();
/// assert_eq!(
///     declarations,
///     ["final String id;", "final Map<String,dynamic> tokens;"]
/// );
/// # Ok::<(), dg_extract::ExtractError>(())
/// ```
pub fn extract_fields(text: &str, base_class_name: &str) -> Result<Fields, ExtractError> {
    let normalized = normalize_generics(text)?;
    let pattern = patterns::field()?;

    let mut fields = Fields::new();

    for caps in pattern.captures_iter(&normalized) {
        let (Some(type_text), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        // `final int x, y;` captures type `int x,` and name `y`
        match Field::from_declarators(type_text.as_str(), name.as_str()) {
            Ok(declared) => {
                for field in declared {
                    debug!(base_class = base_class_name, field = %field, "Extracted field");
                    fields.push(field);
                }
            }
            Err(error) => {
                warn!(
                    base_class = base_class_name,
                    declaration = &caps[0],
                    %error,
                    "Skipping field declaration"
                );
            }
        }
    }

    if fields.is_empty() {
        debug!(base_class = base_class_name, "No fields found");
    }

    Ok(fields)
}
