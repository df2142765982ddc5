//! Pre-compiled regular expressions for field extraction.
//!
//! Each pattern is compiled once on first use and shared by every caller.
//! `[[:word:]]` is the ASCII identifier class, so identifiers follow the same
//! rules as Dart source rather than Unicode word characters.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExtractError;

/// A generic argument list: `<` then identifiers, nested brackets, commas and
/// spaces, then `>`. Capture 1 is the inner text.
pub const GENERIC_ARGS_PATTERN: &str = r"<\s*([[:word:]<, >]+)\s*>";

/// Whitespace around a comma inside a generic argument list.
pub const COMMA_PATTERN: &str = r"\s*,\s*";

/// An immutable field: `final`, a type expression (identifiers, generics,
/// commas, pipes, whitespace), whitespace, a name, then `;`.
///
/// Capture 1 is the type, capture 2 the name.
pub const FIELD_PATTERN: &str = r"final\s+([[:word:]<>,\s|]+)\s+([[:word:]]+);";

static COMPILED_GENERIC_ARGS: OnceLock<Regex> = OnceLock::new();
static COMPILED_COMMA: OnceLock<Regex> = OnceLock::new();
static COMPILED_FIELD: OnceLock<Regex> = OnceLock::new();

/// Returns the compiled generic argument list pattern.
///
/// # Errors
///
/// Returns [`ExtractError::PatternCompile`] if the pattern fails to compile.
pub fn generic_args() -> Result<&'static Regex, ExtractError> {
    cached(&COMPILED_GENERIC_ARGS, "generic argument", GENERIC_ARGS_PATTERN)
}

/// Returns the compiled comma-with-whitespace pattern.
///
/// # Errors
///
/// Returns [`ExtractError::PatternCompile`] if the pattern fails to compile.
pub fn comma() -> Result<&'static Regex, ExtractError> {
    cached(&COMPILED_COMMA, "comma", COMMA_PATTERN)
}

/// Returns the compiled field declaration pattern.
///
/// # Errors
///
/// Returns [`ExtractError::PatternCompile`] if the pattern fails to compile.
pub fn field() -> Result<&'static Regex, ExtractError> {
    cached(&COMPILED_FIELD, "field", FIELD_PATTERN)
}

fn cached(
    cell: &'static OnceLock<Regex>,
    name: &'static str,
    pattern: &str,
) -> Result<&'static Regex, ExtractError> {
    if let Some(regex) = cell.get() {
        return Ok(regex);
    }

    let regex =
        Regex::new(pattern).map_err(|source| ExtractError::PatternCompile { name, source })?;

    Ok(cell.get_or_init(|| regex))
}
