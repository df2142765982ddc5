//! Error types for the dg-extract crate.

/// Errors that can occur while extracting fields.
///
/// Finding no fields is not an error; it yields an empty list.
///
/// # Examples
///
/// ```
/// use dg_extract::ExtractError;
///
/// fn handle_error(err: ExtractError) {
///     match err {
///         ExtractError::PatternCompile { name, .. } => {
///             eprintln!("pattern {name} failed to compile");
///         }
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// One of the built-in patterns failed to compile.
    #[error("failed to compile {name} pattern: {source}")]
    PatternCompile {
        /// Which pattern failed.
        name: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
