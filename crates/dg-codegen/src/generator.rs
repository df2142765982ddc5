//! Rendering of the derived model class.

use camino::Utf8Path;
use dg_core::{BaseClassRef, Field, GenerateConfig, GeneratedModel};
use tracing::debug;

use crate::error::GenerateError;
use crate::import_path::relative_import_path;
use crate::naming::{file_stem, validate_model_name};

/// Separator between forwarded constructor parameters.
const PARAM_SEPARATOR: &str = "\n    ";

/// Everything the generator needs to render one model file.
///
/// # Examples
///
/// ```
/// use camino::{Utf8Path, Utf8PathBuf};
/// use dg_codegen::{generate_model, ModelRequest};
/// use dg_core::{BaseClassRef, Field};
///
/// let base = BaseClassRef::new(
///     Utf8PathBuf::from("/app/lib/domain/user_entity.dart"),
///     "UserEntity",
/// );
/// let fields = [Field::new("String", "id")?];
///
/// let model = generate_model(&ModelRequest::new(
///     "UserModel",
///     &base,
///     &fields,
///     Utf8Path::new("/app/lib/data"),
/// ))?;
///
/// assert_eq!(model.file_name, "user_model.dart");
/// assert!(model.contents.contains("class UserModel extends UserEntity {"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModelRequest<'a> {
    /// Class name of the new model.
    pub model_name: &'a str,
    /// The located base class.
    pub base: &'a BaseClassRef,
    /// Base class fields, in declaration order.
    pub fields: &'a [Field],
    /// Directory the model file will be written to.
    pub target_dir: &'a Utf8Path,
    /// Extension of the written file.
    pub output_extension: &'a str,
    /// Import of the JSON annotation package.
    pub json_annotation_import: &'a str,
}

impl<'a> ModelRequest<'a> {
    /// Creates a request using the default [`GenerateConfig`] values.
    #[must_use]
    pub fn new(
        model_name: &'a str,
        base: &'a BaseClassRef,
        fields: &'a [Field],
        target_dir: &'a Utf8Path,
    ) -> Self {
        Self {
            model_name,
            base,
            fields,
            target_dir,
            output_extension: "dart",
            json_annotation_import: "package:json_annotation/json_annotation.dart",
        }
    }

    /// Takes the output extension and annotation import from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &'a GenerateConfig) -> Self {
        self.output_extension = &config.output_extension;
        self.json_annotation_import = &config.json_annotation_import;
        self
    }
}

/// Renders the model file for `request`.
///
/// The function has no side effects; the same request always yields the same
/// text.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidModelName`] if the model name is not a Dart
/// identifier and [`GenerateError::NoFields`] if `request.fields` is empty.
pub fn generate_model(request: &ModelRequest<'_>) -> Result<GeneratedModel, GenerateError> {
    validate_model_name(request.model_name)?;
    if request.fields.is_empty() {
        return Err(GenerateError::NoFields(request.model_name.to_owned()));
    }

    let file_stem = file_stem(request.model_name);
    let import_path = relative_import_path(request.target_dir, request.base.path());

    debug!(
        model = request.model_name,
        base_class = request.base.class_name(),
        %import_path,
        fields = request.fields.len(),
        "Rendering model"
    );

    let contents = render(request, &file_stem, &import_path);

    Ok(GeneratedModel {
        file_name: format!("{file_stem}.{}", request.output_extension),
        file_stem,
        import_path,
        contents,
    })
}

/// Parses canonical `final <type> <name>;` declarations into fields.
///
/// # Errors
///
/// Returns [`GenerateError::MalformedField`] for the first declaration that
/// does not have that shape, instead of guessing at a parameter name.
///
/// # Examples
///
/// ```
/// use dg_codegen::parse_fields;
///
/// let fields = parse_fields(["final String id;", "final int | String key;"])?;
/// assert_eq!(fields[1].name(), "key");
///
/// assert!(parse_fields(["final id;"]).is_err());
/// # Ok::<(), dg_codegen::GenerateError>(())
/// ```
pub fn parse_fields<I, S>(declarations: I) -> Result<Vec<Field>, GenerateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    declarations
        .into_iter()
        .map(|declaration| {
            declaration
                .as_ref()
                .parse::<Field>()
                .map_err(GenerateError::from)
        })
        .collect()
}

/// Renders one `required super.<name>,` line per field.
#[must_use]
pub fn constructor_params(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| format!("required super.{},", field.name()))
        .collect::<Vec<_>>()
        .join(PARAM_SEPARATOR)
}

fn render(request: &ModelRequest<'_>, file_stem: &str, import_path: &str) -> String {
    let model = request.model_name;
    let base = request.base.class_name();
    let annotation = request.json_annotation_import;
    let params = constructor_params(request.fields);

    format!(
        r"
import '{annotation}';
import '{import_path}';

part '{file_stem}.g.dart';

@JsonSerializable()
class {model} extends {base} {{
  {model}({{
    {params}
  }});

  factory {model}.fromMap(Map<String, dynamic> json) =>
      _${model}FromJson(json);

  Map<String, dynamic> toMap() => _${model}ToJson(this);
}}
"
    )
}
