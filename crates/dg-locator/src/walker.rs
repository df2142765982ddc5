//! Directory traversal for Dart source files.
//!
//! This module provides [`FileWalker`], which uses the `ignore` crate to walk
//! a project. `.gitignore` rules and hidden directories are not consulted:
//! only the configured skip list prunes.
//!
//! # Features
//!
//! - Filters for the configured extensions (`.dart` by default)
//! - Prunes skipped directories (`.dart_tool`, `build`, ...) without descending
//! - Deterministic order: entries are sorted by file name at every level
//! - Converts paths to UTF-8 [`Utf8PathBuf`](camino::Utf8PathBuf)

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use dg_core::SearchConfig;
use ignore::WalkBuilder;
use rustc_hash::FxHashSet;

use crate::error::LocateError;

/// A file walker that discovers source files in a directory tree.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use dg_core::SearchConfig;
/// use dg_locator::FileWalker;
///
/// let walker = FileWalker::new(Utf8Path::new("./my_app"))?
///     .with_search_config(&SearchConfig::default());
/// let paths = walker.collect_paths()?;
///
/// println!("Found {} Dart files", paths.len());
/// # Ok::<(), dg_locator::LocateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Extensions (without the dot) of files to report.
    extensions: Vec<String>,
    /// Directory names pruned anywhere below the root.
    skip_dirs: Arc<FxHashSet<String>>,
    /// Whether to follow symbolic links.
    follow_links: bool,
}

impl FileWalker {
    /// Creates a new file walker for the given root directory.
    ///
    /// Only `.dart` files are reported until [`FileWalker::with_search_config`]
    /// says otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Config`] if the root path doesn't exist or
    /// isn't a directory.
    pub fn new(root: &Utf8Path) -> Result<Self, LocateError> {
        if !root.exists() {
            return Err(LocateError::config(format!(
                "root path does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(LocateError::config(format!(
                "root path is not a directory: {root}"
            )));
        }

        Ok(Self {
            root: root.to_owned(),
            extensions: vec!["dart".to_owned()],
            skip_dirs: Arc::new(FxHashSet::default()),
            follow_links: false,
        })
    }

    /// Applies extensions, skipped directories and link handling from `config`.
    #[must_use]
    pub fn with_search_config(mut self, config: &SearchConfig) -> Self {
        self.extensions.clone_from(&config.file_extensions);
        self.skip_dirs = Arc::new(config.skip_dirs.iter().cloned().collect());
        self.follow_links = config.follow_links;
        self
    }

    /// Configures whether to follow symbolic links.
    #[must_use]
    pub const fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Collects all matching file paths in walk order.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Walk`] if directory traversal fails.
    /// Returns [`LocateError::NonUtf8Path`] if a non-UTF-8 path is encountered.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, LocateError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path = Utf8Path::from_path(path)
                .ok_or_else(|| LocateError::NonUtf8Path(path.to_owned()))?;

            if self.is_source_file(utf8_path) {
                paths.push(utf8_path.to_owned());
            }
        }

        Ok(paths)
    }

    /// Builds the ignore walker with configured settings.
    fn build_walker(&self) -> ignore::Walk {
        let skip_dirs = Arc::clone(&self.skip_dirs);

        WalkBuilder::new(&self.root)
            // No .gitignore, .ignore or hidden-file filtering
            .standard_filters(false)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                // Never prune the root itself
                !(is_dir
                    && entry.depth() > 0
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| skip_dirs.contains(name)))
            })
            .build()
    }

    /// Checks if a path has one of the configured extensions.
    fn is_source_file(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap().to_owned();
        (dir, root)
    }

    fn touch(root: &Utf8Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative_paths(walker: &FileWalker) -> Vec<String> {
        walker
            .collect_paths()
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(walker.root()).unwrap().as_str().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_is_source_file() {
        let (_dir, root) = temp_root();
        let walker = FileWalker::new(&root).unwrap();

        assert!(walker.is_source_file(Utf8Path::new("user.dart")));
        assert!(walker.is_source_file(Utf8Path::new("lib/src/user.dart")));
        assert!(!walker.is_source_file(Utf8Path::new("user.g.json")));
        assert!(!walker.is_source_file(Utf8Path::new("pubspec.yaml")));
        assert!(!walker.is_source_file(Utf8Path::new("dart")));
    }

    #[test]
    fn test_collects_sorted_dart_files() {
        let (_dir, root) = temp_root();
        touch(&root, "lib/b.dart");
        touch(&root, "lib/a.dart");
        touch(&root, "lib/notes.txt");
        touch(&root, "test/a_test.dart");

        let walker = FileWalker::new(&root).unwrap();
        assert_eq!(
            relative_paths(&walker),
            ["lib/a.dart", "lib/b.dart", "test/a_test.dart"]
        );
    }

    #[test]
    fn test_skip_dirs_are_pruned() {
        let (_dir, root) = temp_root();
        touch(&root, "lib/user.dart");
        touch(&root, "build/generated/user.dart");
        touch(&root, "lib/build/nested.dart");

        let walker = FileWalker::new(&root)
            .unwrap()
            .with_search_config(&SearchConfig::default());
        assert_eq!(relative_paths(&walker), ["lib/user.dart"]);
    }

    #[test]
    fn test_gitignored_and_hidden_dirs_are_walked() {
        let (_dir, root) = temp_root();
        fs::write(root.join(".gitignore"), "lib/generated/\n").unwrap();
        touch(&root, "lib/generated/user.dart");
        touch(&root, "packages/.shared/order.dart");

        let walker = FileWalker::new(&root)
            .unwrap()
            .with_search_config(&SearchConfig::default());
        assert_eq!(
            relative_paths(&walker),
            ["lib/generated/user.dart", "packages/.shared/order.dart"]
        );
    }

    #[test]
    fn test_custom_extensions() {
        let (_dir, root) = temp_root();
        touch(&root, "lib/user.dart");
        touch(&root, "lib/user.ts");

        let config = SearchConfig {
            file_extensions: vec!["ts".to_owned()],
            ..SearchConfig::default()
        };
        let walker = FileWalker::new(&root).unwrap().with_search_config(&config);
        assert_eq!(relative_paths(&walker), ["lib/user.ts"]);
    }

    #[test]
    fn test_invalid_root() {
        let result = FileWalker::new(Utf8Path::new("/nonexistent/path/that/does/not/exist"));
        assert!(matches!(result, Err(LocateError::Config(_))));
    }

    #[test]
    fn test_with_follow_links() {
        let (_dir, root) = temp_root();
        let walker = FileWalker::new(&root).unwrap().with_follow_links(true);
        assert!(walker.follow_links);
    }
}
