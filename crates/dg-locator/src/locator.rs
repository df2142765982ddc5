//! Base class lookup across a project.
//!
//! Candidate files are read in parallel with rayon, but the result is always
//! the *first* match in walk order, so repeated searches over an unchanged
//! tree return the same file.

use camino::Utf8Path;
use dg_core::{BaseClassRef, SearchConfig, declaration_needle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::LocateError;
use crate::walker::FileWalker;

/// Finds the file that declares a named class.
///
/// A file matches when its text contains `class <Name>` as a plain substring.
/// That is deliberately loose: `class UserEntityBase` also matches a search
/// for `UserEntity`, and so does the phrase inside a comment.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use dg_core::SearchConfig;
/// use dg_locator::BaseClassLocator;
///
/// let locator = BaseClassLocator::new(Utf8Path::new("./my_app"), &SearchConfig::default())?;
/// match locator.locate("UserEntity")? {
///     Some(base) => println!("declared in {}", base.path()),
///     None => println!("not found"),
/// }
/// # Ok::<(), dg_locator::LocateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BaseClassLocator {
    walker: FileWalker,
}

impl BaseClassLocator {
    /// Creates a locator rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Config`] if `root` is not an existing directory.
    pub fn new(root: &Utf8Path, config: &SearchConfig) -> Result<Self, LocateError> {
        let walker = FileWalker::new(root)?.with_search_config(config);
        Ok(Self { walker })
    }

    /// Returns the search root.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.walker.root()
    }

    /// Searches for the declaration of `class_name`.
    ///
    /// Returns `Ok(None)` when no candidate file contains the declaration.
    /// File contents are decoded as UTF-8 with invalid sequences replaced, so a
    /// stray Latin-1 byte in one file doesn't hide a declaration.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Walk`] if traversal fails and
    /// [`LocateError::Read`] if a file that precedes any match can't be read.
    pub fn locate(&self, class_name: &str) -> Result<Option<BaseClassRef>, LocateError> {
        let paths = self.walker.collect_paths()?;
        let needle = declaration_needle(class_name);

        debug!(
            root = %self.root(),
            candidates = paths.len(),
            %needle,
            "Searching for base class"
        );

        let found = paths
            .par_iter()
            .find_map_first(|path| match declares(path, &needle) {
                Ok(true) => Some(Ok(path.clone())),
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            })
            .transpose()?;

        match found {
            Some(path) => {
                info!(class = class_name, %path, "Located base class");
                Ok(Some(BaseClassRef::new(path, class_name)))
            }
            None => {
                debug!(class = class_name, "Base class not declared in any file");
                Ok(None)
            }
        }
    }
}

/// Checks whether the file at `path` contains `needle`.
fn declares(path: &Utf8Path, needle: &str) -> Result<bool, LocateError> {
    let bytes = std::fs::read(path).map_err(|e| LocateError::read(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap().to_owned();
        (dir, root)
    }

    fn write(root: &Utf8Path, relative: &str, contents: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn locator(root: &Utf8Path) -> BaseClassLocator {
        BaseClassLocator::new(root, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_locates_declaring_file() {
        let (_dir, root) = temp_root();
        write(&root, "lib/main.dart", b"void main() {}\n");
        write(
            &root,
            "lib/domain/entities/user_entity.dart",
            b"class UserEntity {\n  final String id;\n}\n",
        );

        let base = locator(&root).locate("UserEntity").unwrap().unwrap();
        assert_eq!(base.class_name(), "UserEntity");
        assert_eq!(base.path(), root.join("lib/domain/entities/user_entity.dart").as_path());
    }

    #[test]
    fn test_missing_class_is_none() {
        let (_dir, root) = temp_root();
        write(&root, "lib/main.dart", b"void main() {}\n");

        assert!(locator(&root).locate("UserEntity").unwrap().is_none());
    }

    #[test]
    fn test_first_match_in_walk_order_wins() {
        let (_dir, root) = temp_root();
        write(&root, "lib/b/user.dart", b"class UserEntity {}\n");
        write(&root, "lib/a/user.dart", b"class UserEntity {}\n");
        write(&root, "lib/c/user.dart", b"class UserEntity {}\n");

        let locator = locator(&root);
        for _ in 0..5 {
            let base = locator.locate("UserEntity").unwrap().unwrap();
            assert_eq!(base.path(), root.join("lib/a/user.dart").as_path());
        }
    }

    #[test]
    fn test_prefix_of_longer_name_matches() {
        let (_dir, root) = temp_root();
        write(&root, "lib/user.dart", b"class UserEntityBase {}\n");

        let base = locator(&root).locate("UserEntity").unwrap();
        assert!(base.is_some());
    }

    #[test]
    fn test_skipped_dirs_are_not_searched() {
        let (_dir, root) = temp_root();
        write(&root, "build/cache/user.dart", b"class UserEntity {}\n");
        write(&root, ".dart_tool/user.dart", b"class UserEntity {}\n");

        assert!(locator(&root).locate("UserEntity").unwrap().is_none());
    }

    #[test]
    fn test_gitignored_dir_is_searched() {
        let (_dir, root) = temp_root();
        write(&root, ".gitignore", b"lib/generated/\n");
        write(&root, "lib/generated/user.dart", b"class UserEntity {\n  final String id;\n}\n");

        let base = locator(&root).locate("UserEntity").unwrap().unwrap();
        assert_eq!(base.path(), root.join("lib/generated/user.dart").as_path());
    }

    #[test]
    fn test_dot_prefixed_dir_is_searched() {
        let (_dir, root) = temp_root();
        write(&root, "packages/.shared/order.dart", b"class OrderEntity {}\n");

        let base = locator(&root).locate("OrderEntity").unwrap().unwrap();
        assert_eq!(base.path(), root.join("packages/.shared/order.dart").as_path());
    }

    #[test]
    fn test_only_dart_files_are_searched() {
        let (_dir, root) = temp_root();
        write(&root, "docs/notes.md", b"class UserEntity {}\n");

        assert!(locator(&root).locate("UserEntity").unwrap().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let (_dir, root) = temp_root();
        write(&root, "lib/user.dart", b"// caf\xe9\nclass UserEntity {}\n");

        assert!(locator(&root).locate("UserEntity").unwrap().is_some());
    }
}
