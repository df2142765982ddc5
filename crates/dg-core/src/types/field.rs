//! Field declarations extracted from a base class.
//!
//! A [`Field`] is the (type, name) pair of an immutable member. Its canonical
//! text form is `final <type> <name>;`, which is what the extractor reports and
//! what [`Field::from_str`](std::str::FromStr::from_str) accepts back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::FieldError;

/// Keyword that marks an immutable field declaration.
pub const FIELD_KEYWORD: &str = "final";

/// Ordered field list as produced by the extractor.
///
/// Base classes rarely declare more than a handful of fields, so the first
/// eight live inline.
pub type Fields = SmallVec<[Field; 8]>;

/// An immutable field declaration.
///
/// # Examples
///
/// ```
/// use dg_core::Field;
///
/// let field: Field = "final Map<String,dynamic> tokens;".parse()?;
/// assert_eq!(field.type_text(), "Map<String,dynamic>");
/// assert_eq!(field.name(), "tokens");
/// assert_eq!(field.to_string(), "final Map<String,dynamic> tokens;");
/// # Ok::<(), dg_core::FieldError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// The declared type, e.g. `String` or `Map<String,dynamic>`.
    type_text: String,

    /// The field identifier.
    name: String,
}

impl Field {
    /// Creates a field from its type and name, trimming both.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::MissingName`] if the type is empty,
    /// [`FieldError::MultipleDeclarators`] if the type has a comma outside
    /// generic brackets, and [`FieldError::InvalidName`] if the name is not an
    /// identifier.
    pub fn new(type_text: &str, name: &str) -> Result<Self, FieldError> {
        let type_text = type_text.trim();
        let name = name.trim();

        if type_text.is_empty() {
            return Err(FieldError::MissingName(format!("{FIELD_KEYWORD} {name};")));
        }
        if split_top_level(type_text).len() > 1 {
            return Err(FieldError::MultipleDeclarators(type_text.to_owned()));
        }
        if !is_identifier(name) {
            return Err(FieldError::InvalidName(name.to_owned()));
        }

        Ok(Self {
            type_text: type_text.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Builds one field per declarator of a `final <type> <a>, <b>, <name>;`
    /// match, where `type_text` is everything before the last name.
    ///
    /// Without a top-level comma this is [`Field::new`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::MissingName`] if the leading declarator has no
    /// type, and any error from [`Field::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dg_core::Field;
    ///
    /// let fields = Field::from_declarators("Map<String,int> a, b,", "c")?;
    /// let names: Vec<&str> = fields.iter().map(Field::name).collect();
    /// assert_eq!(names, ["a", "b", "c"]);
    /// assert_eq!(fields[2].type_text(), "Map<String,int>");
    /// # Ok::<(), dg_core::FieldError>(())
    /// ```
    pub fn from_declarators(type_text: &str, name: &str) -> Result<Vec<Self>, FieldError> {
        let segments = split_top_level(type_text.trim());
        let Some((first, rest)) = segments.split_first().filter(|_| segments.len() > 1) else {
            return Ok(vec![Self::new(type_text, name)?]);
        };

        let (shared_type, first_name) = first
            .trim()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| FieldError::MissingName(format!("{FIELD_KEYWORD} {type_text} {name};")))?;

        let mut fields = vec![Self::new(shared_type, first_name)?];
        for declarator in rest.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            fields.push(Self::new(shared_type, declarator)?);
        }
        fields.push(Self::new(shared_type, name)?);

        Ok(fields)
    }

    /// Returns the declared type.
    #[inline]
    #[must_use]
    pub fn type_text(&self) -> &str {
        &self.type_text
    }

    /// Returns the field name.
    ///
    /// This is also the name of the forwarded constructor parameter.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FIELD_KEYWORD} {} {};", self.type_text, self.name)
    }
}

impl FromStr for Field {
    type Err = FieldError;

    /// Parses a canonical declaration.
    ///
    /// The name is the last whitespace-separated token before `;`; everything
    /// between the keyword and the name is the type, so union types such as
    /// `int | String` survive the round trip.
    fn from_str(declaration: &str) -> Result<Self, Self::Err> {
        let trimmed = declaration.trim();

        let rest = trimmed
            .strip_prefix(FIELD_KEYWORD)
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .ok_or_else(|| FieldError::MissingKeyword(trimmed.to_owned()))?;

        let body = rest
            .strip_suffix(';')
            .ok_or_else(|| FieldError::MissingTerminator(trimmed.to_owned()))?
            .trim();

        let (type_text, name) = body
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| FieldError::MissingName(trimmed.to_owned()))?;

        Self::new(type_text, name)
    }
}

/// Splits `text` at commas that are not inside `<...>`.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Returns `true` for a non-empty run of ASCII letters, digits and `_`.
fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_new_trims() {
        let field = Field::new("  String ", " id ").unwrap();
        assert_eq!(field.type_text(), "String");
        assert_eq!(field.name(), "id");
    }

    #[test]
    fn test_field_display() {
        let field = Field::new("List<int>", "scores").unwrap();
        insta::assert_snapshot!(field.to_string(), @"final List<int> scores;");
    }

    #[test]
    fn test_parse_generic_declaration() {
        let field: Field = "final Map<String,dynamic> tokens;".parse().unwrap();
        assert_eq!(field.type_text(), "Map<String,dynamic>");
        assert_eq!(field.name(), "tokens");
    }

    #[test]
    fn test_parse_union_type_keeps_full_type() {
        let field: Field = "final int | String value;".parse().unwrap();
        assert_eq!(field.type_text(), "int | String");
        assert_eq!(field.name(), "value");
    }

    #[test]
    fn test_parse_rejects_missing_keyword() {
        let err = "String name;".parse::<Field>().unwrap_err();
        assert!(matches!(err, FieldError::MissingKeyword(_)));

        // Keyword must be a separate token
        let err = "finalString name;".parse::<Field>().unwrap_err();
        assert!(matches!(err, FieldError::MissingKeyword(_)));
    }

    #[test]
    fn test_parse_rejects_missing_terminator() {
        let err = "final String name".parse::<Field>().unwrap_err();
        assert!(matches!(err, FieldError::MissingTerminator(_)));
    }

    #[test]
    fn test_parse_rejects_two_token_shape() {
        let err = "final name;".parse::<Field>().unwrap_err();
        assert!(matches!(err, FieldError::MissingName(_)));
    }

    #[test]
    fn test_parse_rejects_non_identifier_name() {
        let err = "final String na-me;".parse::<Field>().unwrap_err();
        assert_eq!(err, FieldError::InvalidName("na-me".to_owned()));
    }

    #[test]
    fn test_new_rejects_trailing_declarator() {
        let err = Field::new("int x,", "y").unwrap_err();
        assert_eq!(err, FieldError::MultipleDeclarators("int x,".to_owned()));

        // Commas inside generics are part of the type
        assert!(Field::new("Map<String,int>", "m").is_ok());
    }

    #[test]
    fn test_parse_rejects_multi_declarator() {
        let err = "final int x, y;".parse::<Field>().unwrap_err();
        assert!(matches!(err, FieldError::MultipleDeclarators(_)));
    }

    #[test]
    fn test_from_declarators_splits_shared_type() {
        let fields = Field::from_declarators("int x,", "y").unwrap();
        let rendered: Vec<String> = fields.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["final int x;", "final int y;"]);
    }

    #[test]
    fn test_from_declarators_single() {
        let fields = Field::from_declarators("List<int>", "scores").unwrap();
        assert_eq!(fields, [Field::new("List<int>", "scores").unwrap()]);
    }

    #[test]
    fn test_from_declarators_without_leading_type() {
        let err = Field::from_declarators("x,", "y").unwrap_err();
        assert!(matches!(err, FieldError::MissingName(_)));
    }

    #[test]
    fn test_display_parses_back() {
        let field = Field::new("Map<String,List<int>>", "data").unwrap();
        let parsed: Field = field.to_string().parse().unwrap();
        assert_eq!(parsed, field);
    }
}
