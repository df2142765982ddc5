//! The generate-model command.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use dg_codegen::{ModelRequest, generate_model};
use dg_core::{BaseClassRef, Config, Fields, GeneratedModel};
use dg_extract::extract_fields;
use dg_locator::BaseClassLocator;
use tracing::{debug, error, info, warn};

use crate::build::{BuildHandle, BuildTracker};
use crate::error::CommandError;
use crate::host::{Host, Prompt};

/// Why a run stopped before writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The model name prompt was dismissed or left blank.
    MissingModelName,
    /// The base class prompt was dismissed or left blank.
    MissingBaseClassName,
    /// No searched file declares the base class.
    BaseClassNotFound(String),
    /// The base class file has no matching `final` fields.
    NoFields(String),
    /// The directory prompt was dismissed.
    NoTargetDirectory,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingModelName => f.write_str("Model class name is required."),
            Self::MissingBaseClassName => f.write_str("Base class name is required."),
            Self::BaseClassNotFound(name) => write!(f, "Base class \"{name}\" not found."),
            Self::NoFields(name) => write!(f, "No fields found in base class \"{name}\"."),
            Self::NoTargetDirectory => f.write_str("No target directory selected."),
        }
    }
}

/// Switches that trim the tail of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    /// Skip the build step.
    pub no_build: bool,
    /// Don't open the written file.
    pub no_open: bool,
    /// Render only: nothing is written, opened or built.
    pub dry_run: bool,
}

/// A model that was written to disk.
#[derive(Debug)]
pub struct Generated {
    /// Where the model was written.
    pub path: Utf8PathBuf,
    /// The rendered model.
    pub model: GeneratedModel,
    /// The launched build, if the build step ran.
    pub build: Option<BuildHandle>,
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// The model was written (and possibly opened and built).
    Generated(Generated),
    /// The model was rendered but not written.
    DryRun {
        /// Where the model would have been written.
        path: Utf8PathBuf,
        /// The rendered model.
        model: GeneratedModel,
    },
    /// The run stopped early; the user has been told why.
    Aborted(AbortReason),
    /// The run failed; the user has been told why.
    Failed(CommandError),
}

/// A base class together with its extracted fields.
#[derive(Debug, Clone)]
pub struct BaseFields {
    /// The located declaration.
    pub base: BaseClassRef,
    /// Its fields in declaration order.
    pub fields: Fields,
}

/// Locates `class_name` under `root` and extracts its fields.
///
/// The search runs on the blocking pool. Returns `Ok(None)` when the class is
/// not declared anywhere; an empty field list is returned as-is.
///
/// # Errors
///
/// Returns [`CommandError::Locate`] if the search fails,
/// [`CommandError::Io`] if the located file can't be read, and
/// [`CommandError::Extract`] if extraction fails.
pub async fn find_base_fields(
    config: &Config,
    root: &Utf8Path,
    class_name: &str,
) -> Result<Option<BaseFields>, CommandError> {
    let search = config.search.clone();
    let search_root = root.to_owned();
    let name = class_name.to_owned();

    let located = tokio::task::spawn_blocking(move || {
        BaseClassLocator::new(&search_root, &search)?.locate(&name)
    })
    .await??;

    let Some(base) = located else {
        return Ok(None);
    };

    let bytes = tokio::fs::read(base.path())
        .await
        .map_err(|e| CommandError::io(base.path(), e))?;
    let fields = extract_fields(&String::from_utf8_lossy(&bytes), base.class_name())?;

    Ok(Some(BaseFields { base, fields }))
}

/// Generates a model class from an existing base class.
///
/// # Examples
///
/// ```no_run
/// use dg_command::{GenerateCommand, Host, Outcome};
/// use dg_core::Config;
///
/// async fn generate(host: &impl Host) {
///     let command = GenerateCommand::new(Config::default());
///     if let Outcome::Generated(generated) = command.run(host).await {
///         println!("wrote {}", generated.path);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    config: Config,
    options: RunOptions,
    builds: BuildTracker,
}

impl GenerateCommand {
    /// Creates a command with default options.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            options: RunOptions::default(),
            builds: BuildTracker::new(),
        }
    }

    /// Sets the run options.
    #[must_use]
    pub const fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    /// Shares a build tracker with other commands.
    #[must_use]
    pub fn with_tracker(mut self, builds: BuildTracker) -> Self {
        self.builds = builds;
        self
    }

    /// Returns the tracker counting this command's builds.
    #[must_use]
    pub const fn builds(&self) -> &BuildTracker {
        &self.builds
    }

    /// Runs the command against `host`.
    ///
    /// Never returns an error: aborts and failures are shown through the host
    /// and described by the returned [`Outcome`]. A launched build is not
    /// awaited.
    pub async fn run<H: Host>(&self, host: &H) -> Outcome {
        match self.try_run(host).await {
            Ok(Outcome::Aborted(reason)) => {
                info!(%reason, "Generation aborted");
                host.show_error(&reason.to_string());
                Outcome::Aborted(reason)
            }
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Generation failed");
                host.show_error(&format!("Failed to generate Dart model: {e}"));
                Outcome::Failed(e)
            }
        }
    }

    async fn try_run<H: Host>(&self, host: &H) -> Result<Outcome, CommandError> {
        let Some(model_name) = ask(host, Prompt::ModelName).await? else {
            return Ok(Outcome::Aborted(AbortReason::MissingModelName));
        };
        let Some(base_name) = ask(host, Prompt::BaseClassName).await? else {
            return Ok(Outcome::Aborted(AbortReason::MissingBaseClassName));
        };

        let root = host.workspace_root().to_owned();
        let Some(BaseFields { base, fields }) =
            find_base_fields(&self.config, &root, &base_name).await?
        else {
            return Ok(Outcome::Aborted(AbortReason::BaseClassNotFound(base_name)));
        };
        if fields.is_empty() {
            return Ok(Outcome::Aborted(AbortReason::NoFields(base_name)));
        }

        let Some(target_dir) = host.pick_directory().await? else {
            return Ok(Outcome::Aborted(AbortReason::NoTargetDirectory));
        };
        let target_dir = if target_dir.is_relative() {
            root.join(target_dir)
        } else {
            target_dir
        };

        let request = ModelRequest::new(&model_name, &base, &fields, &target_dir)
            .with_config(&self.config.generate);
        let model = generate_model(&request)?;
        let path = target_dir.join(&model.file_name);

        if self.options.dry_run {
            debug!(%path, "Dry run, nothing written");
            return Ok(Outcome::DryRun { path, model });
        }

        tokio::fs::create_dir_all(&target_dir)
            .await
            .map_err(|e| CommandError::io(&target_dir, e))?;
        tokio::fs::write(&path, &model.contents)
            .await
            .map_err(|e| CommandError::io(&path, e))?;
        info!(%path, base = base.class_name(), fields = fields.len(), "Wrote model");

        // The model is on disk, so an editor failure is reported and the run goes on
        if !self.options.no_open && self.config.editor.open_generated {
            if let Err(e) = host.open_document(&path).await {
                warn!(%path, error = %e, "Could not open generated model");
                host.show_error(&format!("Failed to open {path}: {e}"));
            }
        }

        let build = (!self.options.no_build && self.config.build.enabled)
            .then(|| self.builds.launch(host, &self.config.build.command));

        Ok(Outcome::Generated(Generated { path, model, build }))
    }
}

/// Asks `prompt`, treating a blank answer like a dismissed prompt.
async fn ask<H: Host>(host: &H, prompt: Prompt) -> Result<Option<String>, CommandError> {
    let answer = host.input(prompt).await?;
    Ok(answer
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty()))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::build::BUILD_STARTED;

    const USER_ENTITY: &str = "class UserEntity {
  final String id;
  final String name;
  final Map<String, dynamic> tokens;

  const UserEntity({required this.id, required this.name, required this.tokens});
}
";

    #[derive(Debug, Default)]
    struct Recorded {
        answers: VecDeque<Option<String>>,
        directory: Option<Utf8PathBuf>,
        prompts: Vec<Prompt>,
        infos: Vec<String>,
        errors: Vec<String>,
        opened: Vec<Utf8PathBuf>,
        open_fails: bool,
    }

    #[derive(Debug, Clone)]
    struct RecordingHost {
        root: Utf8PathBuf,
        state: Arc<Mutex<Recorded>>,
    }

    impl RecordingHost {
        fn new(root: &Utf8Path, answers: &[Option<&str>], directory: Option<&str>) -> Self {
            let state = Recorded {
                answers: answers.iter().map(|a| a.map(str::to_owned)).collect(),
                directory: directory.map(Utf8PathBuf::from),
                ..Recorded::default()
            };
            Self {
                root: root.to_owned(),
                state: Arc::new(Mutex::new(state)),
            }
        }

        fn errors(&self) -> Vec<String> {
            self.state.lock().errors.clone()
        }
    }

    impl Host for RecordingHost {
        fn workspace_root(&self) -> &Utf8Path {
            &self.root
        }

        async fn input(&self, prompt: Prompt) -> Result<Option<String>, CommandError> {
            let mut state = self.state.lock();
            state.prompts.push(prompt);
            Ok(state.answers.pop_front().flatten())
        }

        async fn pick_directory(&self) -> Result<Option<Utf8PathBuf>, CommandError> {
            Ok(self.state.lock().directory.clone())
        }

        fn show_info(&self, message: &str) {
            self.state.lock().infos.push(message.to_owned());
        }

        fn show_error(&self, message: &str) {
            self.state.lock().errors.push(message.to_owned());
        }

        async fn open_document(&self, path: &Utf8Path) -> Result<(), CommandError> {
            let mut state = self.state.lock();
            if state.open_fails {
                return Err(CommandError::editor("Editor exited with status: exit status: 1"));
            }
            state.opened.push(path.to_owned());
            Ok(())
        }
    }

    fn workspace() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap().to_owned();
        let entity = root.join("lib/domain/entities/user_entity.dart");
        std::fs::create_dir_all(entity.parent().unwrap()).unwrap();
        std::fs::write(entity, USER_ENTITY).unwrap();
        (dir, root)
    }

    fn quiet() -> RunOptions {
        RunOptions {
            no_build: true,
            ..RunOptions::default()
        }
    }

    #[tokio::test]
    async fn test_generates_model_file() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(
            &root,
            &[Some("UserModel"), Some("UserEntity")],
            Some("lib/data/models"),
        );
        let command = GenerateCommand::new(Config::default()).with_options(quiet());

        let Outcome::Generated(generated) = command.run(&host).await else {
            panic!("expected a generated model, errors: {:?}", host.errors());
        };

        let expected = root.join("lib/data/models/user_model.dart");
        assert_eq!(generated.path, expected);
        assert!(generated.build.is_none());

        let written = std::fs::read_to_string(&expected).unwrap();
        assert_eq!(written, generated.model.contents);
        assert!(written.contains("import '../../domain/entities/user_entity.dart';"));
        assert!(written.contains("    required super.tokens,\n"));

        let state = host.state.lock();
        assert_eq!(state.prompts, [Prompt::ModelName, Prompt::BaseClassName]);
        assert_eq!(state.opened, [expected]);
        assert!(state.errors.is_empty());
    }

    #[tokio::test]
    async fn test_rerun_rewrites_identical_content() {
        let (_dir, root) = workspace();
        let command = GenerateCommand::new(Config::default()).with_options(quiet());
        let answers = [Some("UserModel"), Some("UserEntity")];

        let host = RecordingHost::new(&root, &answers, Some("lib/models"));
        assert!(matches!(command.run(&host).await, Outcome::Generated(_)));
        let first = std::fs::read(root.join("lib/models/user_model.dart")).unwrap();

        let host = RecordingHost::new(&root, &answers, Some("lib/models"));
        assert!(matches!(command.run(&host).await, Outcome::Generated(_)));
        let second = std::fs::read(root.join("lib/models/user_model.dart")).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_model_name_stops_before_second_prompt() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(&root, &[Some("   ")], Some("lib"));

        let outcome = GenerateCommand::new(Config::default()).run(&host).await;

        assert!(matches!(
            outcome,
            Outcome::Aborted(AbortReason::MissingModelName)
        ));
        assert_eq!(host.state.lock().prompts, [Prompt::ModelName]);
        assert_eq!(host.errors(), ["Model class name is required."]);
    }

    #[tokio::test]
    async fn test_missing_base_class_name() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(&root, &[Some("UserModel"), None], Some("lib"));

        let outcome = GenerateCommand::new(Config::default()).run(&host).await;

        assert!(matches!(
            outcome,
            Outcome::Aborted(AbortReason::MissingBaseClassName)
        ));
        assert_eq!(host.errors(), ["Base class name is required."]);
    }

    #[tokio::test]
    async fn test_unknown_base_class_writes_nothing() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(
            &root,
            &[Some("OrderModel"), Some("OrderEntity")],
            Some("lib/models"),
        );

        let command = GenerateCommand::new(Config::default());
        let outcome = command.run(&host).await;

        assert!(matches!(
            outcome,
            Outcome::Aborted(AbortReason::BaseClassNotFound(ref name)) if name == "OrderEntity"
        ));
        assert_eq!(host.errors(), ["Base class \"OrderEntity\" not found."]);
        assert!(!root.join("lib/models").exists());
        assert!(!host.state.lock().infos.iter().any(|m| m == BUILD_STARTED));
        assert_eq!(command.builds().in_flight(&root), 0);
    }

    #[tokio::test]
    async fn test_base_class_without_fields() {
        let (_dir, root) = workspace();
        std::fs::write(root.join("lib/empty.dart"), "class EmptyEntity {}\n").unwrap();
        let host = RecordingHost::new(
            &root,
            &[Some("EmptyModel"), Some("EmptyEntity")],
            Some("lib"),
        );

        let outcome = GenerateCommand::new(Config::default()).run(&host).await;

        assert!(matches!(outcome, Outcome::Aborted(AbortReason::NoFields(_))));
        assert_eq!(host.errors(), ["No fields found in base class \"EmptyEntity\"."]);
    }

    #[tokio::test]
    async fn test_no_directory_selected() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(&root, &[Some("UserModel"), Some("UserEntity")], None);

        let outcome = GenerateCommand::new(Config::default()).run(&host).await;

        assert!(matches!(
            outcome,
            Outcome::Aborted(AbortReason::NoTargetDirectory)
        ));
        assert_eq!(host.errors(), ["No target directory selected."]);
    }

    #[tokio::test]
    async fn test_invalid_model_name_is_reported_as_failure() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(
            &root,
            &[Some("User Model"), Some("UserEntity")],
            Some("lib"),
        );

        let outcome = GenerateCommand::new(Config::default()).run(&host).await;

        assert!(matches!(outcome, Outcome::Failed(CommandError::Generate(_))));
        let errors = host.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to generate Dart model: "));
    }

    #[tokio::test]
    async fn test_editor_failure_keeps_written_model() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(
            &root,
            &[Some("UserModel"), Some("UserEntity")],
            Some("lib/models"),
        );
        host.state.lock().open_fails = true;

        let outcome = GenerateCommand::new(Config::default())
            .with_options(quiet())
            .run(&host)
            .await;

        let Outcome::Generated(generated) = outcome else {
            panic!("expected a generated model, errors: {:?}", host.errors());
        };
        assert!(generated.path.exists());
        let errors = host.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to open "));
        assert!(errors[0].contains("Editor exited with status"));
        assert!(host.state.lock().opened.is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(
            &root,
            &[Some("UserModel"), Some("UserEntity")],
            Some("lib/models"),
        );
        let command = GenerateCommand::new(Config::default()).with_options(RunOptions {
            dry_run: true,
            ..RunOptions::default()
        });

        let Outcome::DryRun { path, model } = command.run(&host).await else {
            panic!("expected a dry run");
        };

        assert_eq!(path, root.join("lib/models/user_model.dart"));
        assert!(model.contents.contains("class UserModel extends UserEntity {"));
        assert!(!path.exists());
        assert!(host.state.lock().opened.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_build_failure_is_reported_after_write() {
        let (_dir, root) = workspace();
        let host = RecordingHost::new(
            &root,
            &[Some("UserModel"), Some("UserEntity")],
            Some("lib/models"),
        );
        let mut config = Config::default();
        config.build.command = "echo 'missing build_runner' >&2; exit 1".to_owned();
        let command = GenerateCommand::new(config).with_options(RunOptions {
            no_open: true,
            ..RunOptions::default()
        });

        let Outcome::Generated(generated) = command.run(&host).await else {
            panic!("expected a generated model, errors: {:?}", host.errors());
        };
        assert!(generated.path.exists());

        let report = generated.build.unwrap().wait().await.unwrap();
        assert!(!report.is_success());

        let state = host.state.lock();
        assert!(state.opened.is_empty());
        assert_eq!(state.infos, [BUILD_STARTED]);
        assert_eq!(state.errors, ["Error running build_runner: missing build_runner"]);
    }

    #[tokio::test]
    async fn test_find_base_fields() {
        let (_dir, root) = workspace();

        let found = find_base_fields(&Config::default(), &root, "UserEntity")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.base.path(), root.join("lib/domain/entities/user_entity.dart").as_path());
        let declarations: Vec<String> = found.fields.iter().map(ToString::to_string).collect();
        assert_eq!(
            declarations,
            [
                "final String id;",
                "final String name;",
                "final Map<String,dynamic> tokens;",
            ]
        );
    }
}
