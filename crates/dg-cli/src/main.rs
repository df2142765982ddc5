//! CLI entry point for the dartgen tool.
//!
//! This binary generates `json_serializable` Dart models that extend an
//! existing base class.
//!
//! # Usage
//!
//! ```bash
//! dartgen [OPTIONS] <COMMAND>
//!
//! # Ask for everything interactively
//! dartgen generate
//!
//! # Skip the prompts
//! dartgen generate --model UserModel --base UserEntity --out lib/data/models
//!
//! # Show what the extractor sees in a base class
//! dartgen fields --base UserEntity
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::{self, Write};
use std::process::ExitCode;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use console::style;
use dg_command::{
    CommandError, EditorOutcome, GenerateCommand, Host, Outcome, Prompt, RunOptions,
    find_base_fields, open_in_editor,
};
use dg_core::{Config, EditorConfig};
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Question asked when no `--out` was given.
const DIRECTORY_PROMPT: &str = "Select folder to save the generated model file";

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Generates Dart models with `json_serializable` support from a base class.
///
/// The base class is found by searching the project's `.dart` files, its
/// `final` fields are forwarded through the generated constructor, and
/// `dart run build_runner build` is started to produce the `.g.dart` part.
#[derive(Parser)]
#[command(name = "dartgen", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Project root: the search root and the build's working directory.
    ///
    /// Defaults to the current directory.
    #[arg(short, long, global = true, env = "DARTGEN_ROOT")]
    root: Option<Utf8PathBuf>,

    /// Configuration file (defaults to `<root>/dartgen.json` when present).
    #[arg(short, long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Editor to use for opening files (overrides $VISUAL and $EDITOR).
    #[arg(long, global = true, env = "DARTGEN_EDITOR")]
    editor: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate a model class that extends a base class.
    Generate(GenerateArgs),

    /// Locate a base class and list the fields found in it.
    Fields {
        /// Name of the base class.
        #[arg(short, long)]
        base: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Answers and switches for `generate`. Any answer given here skips its prompt.
#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct GenerateArgs {
    /// Model class name, e.g. `UserModel`.
    #[arg(short, long)]
    model: Option<String>,

    /// Base class name, e.g. `UserEntity`.
    #[arg(short, long)]
    base: Option<String>,

    /// Output directory, relative to the project root unless absolute.
    #[arg(short, long)]
    out: Option<Utf8PathBuf>,

    /// Don't run the build command afterwards.
    #[arg(long)]
    no_build: bool,

    /// Don't open the generated file.
    #[arg(long)]
    no_open: bool,

    /// Print the generated file instead of writing it.
    #[arg(long)]
    dry_run: bool,
}

// =============================================================================
// TERMINAL HOST
// =============================================================================

/// Answers supplied on the command line.
#[derive(Debug, Clone, Default)]
struct Presets {
    model: Option<String>,
    base: Option<String>,
    out: Option<Utf8PathBuf>,
}

/// [`Host`] backed by the terminal.
///
/// Prompts use dialoguer and are skipped when a preset exists. Without a
/// terminal attached, a missing preset counts as a dismissed prompt.
#[derive(Debug, Clone)]
struct TerminalHost {
    root: Utf8PathBuf,
    presets: Presets,
    editor: EditorConfig,
    interactive: bool,
}

impl Host for TerminalHost {
    fn workspace_root(&self) -> &Utf8Path {
        &self.root
    }

    async fn input(&self, prompt: Prompt) -> Result<Option<String>, CommandError> {
        let preset = match prompt {
            Prompt::ModelName => &self.presets.model,
            Prompt::BaseClassName => &self.presets.base,
        };
        if let Some(answer) = preset {
            return Ok(Some(answer.clone()));
        }
        if !self.interactive {
            return Ok(None);
        }
        ask_text(prompt.message()).await
    }

    async fn pick_directory(&self) -> Result<Option<Utf8PathBuf>, CommandError> {
        if let Some(out) = &self.presets.out {
            return Ok(Some(out.clone()));
        }
        if !self.interactive {
            return Ok(None);
        }
        Ok(ask_text(DIRECTORY_PROMPT).await?.map(Utf8PathBuf::from))
    }

    fn show_info(&self, message: &str) {
        let _ = writeln!(
            io::stderr(),
            "{} {message}",
            style("info:").cyan().bold().for_stderr()
        );
    }

    fn show_error(&self, message: &str) {
        let _ = writeln!(
            io::stderr(),
            "{} {message}",
            style("error:").red().bold().for_stderr()
        );
    }

    async fn open_document(&self, path: &Utf8Path) -> Result<(), CommandError> {
        match open_in_editor(path, &self.root, &self.editor).await? {
            EditorOutcome::Opened => {}
            EditorOutcome::NotConfigured => {
                let _ = writeln!(io::stdout(), "{path}");
            }
        }
        Ok(())
    }
}

/// Reads one line from the terminal. Blank answers are `None`.
async fn ask_text(message: &'static str) -> Result<Option<String>, CommandError> {
    let answer = tokio::task::spawn_blocking(move || {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
    })
    .await?
    .map_err(|e| CommandError::prompt(e.to_string()))?;

    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_owned()))
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default so the
/// prompts and messages stay readable. Logs go to stderr; stdout carries
/// only command output.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Resolves the project root to an absolute directory.
fn resolve_root(cli: &Cli) -> color_eyre::Result<Utf8PathBuf> {
    let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;
    let root = match &cli.root {
        Some(root) if root.is_relative() => cwd.join(root),
        Some(root) => root.clone(),
        None => cwd,
    };

    if !root.exists() {
        return Err(color_eyre::eyre::eyre!("Path does not exist: {}", root));
    }
    if !root.is_dir() {
        return Err(color_eyre::eyre::eyre!("Path is not a directory: {}", root));
    }

    Ok(root)
}

/// Builds a [`Config`] from the config file and CLI overrides.
fn load_config(cli: &Cli, root: &Utf8Path) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(root)?,
    };

    if cli.editor.is_some() {
        config.editor.editor.clone_from(&cli.editor);
    }

    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs the generate command and waits for its build, if one was started.
async fn run_generate(
    config: Config,
    root: Utf8PathBuf,
    args: &GenerateArgs,
) -> color_eyre::Result<ExitCode> {
    info!(%root, "Starting generate");

    let host = TerminalHost {
        root,
        presets: Presets {
            model: args.model.clone(),
            base: args.base.clone(),
            out: args.out.clone(),
        },
        editor: config.editor.clone(),
        interactive: console::user_attended_stderr(),
    };
    let options = RunOptions {
        no_build: args.no_build,
        no_open: args.no_open,
        dry_run: args.dry_run,
    };

    match GenerateCommand::new(config).with_options(options).run(&host).await {
        Outcome::Generated(generated) => {
            let _ = writeln!(
                io::stderr(),
                "{} {}",
                style("Generated").green().bold().for_stderr(),
                generated.path
            );
            // The build outlives the command; don't exit underneath it
            if let Some(build) = generated.build {
                let report = build.wait().await?;
                debug!(success = report.is_success(), "Build reported");
            }
            Ok(ExitCode::SUCCESS)
        }
        Outcome::DryRun { path, model } => {
            let _ = writeln!(
                io::stderr(),
                "{} {path}",
                style("Would write").yellow().bold().for_stderr()
            );
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", model.contents)?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Aborted(_) | Outcome::Failed(_) => Ok(ExitCode::FAILURE),
    }
}

/// Prints the located base class and its fields.
async fn run_fields(
    config: &Config,
    root: &Utf8Path,
    base: &str,
    json: bool,
) -> color_eyre::Result<ExitCode> {
    #[derive(serde::Serialize)]
    struct Report<'a> {
        path: &'a Utf8Path,
        class_name: &'a str,
        fields: Vec<String>,
    }

    let Some(found) = find_base_fields(config, root, base).await? else {
        let _ = writeln!(
            io::stderr(),
            "{} Base class \"{base}\" not found.",
            style("error:").red().bold().for_stderr()
        );
        return Ok(ExitCode::FAILURE);
    };

    let mut stdout = io::stdout().lock();
    if json {
        let report = Report {
            path: found.base.path(),
            class_name: found.base.class_name(),
            fields: found.fields.iter().map(ToString::to_string).collect(),
        };
        writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(stdout, "{}", found.base.path())?;
        for field in &found.fields {
            writeln!(stdout, "  {field}")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing and terminal styling
    init_tracing(cli.verbose, cli.no_color);
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    // 4. Resolve the project and its configuration
    let root = resolve_root(&cli)?;
    let config = load_config(&cli, &root)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Generate(args) => run_generate(config, root, args).await,
        Commands::Fields { base, json } => run_fields(&config, &root, base, *json).await,
    }
}
