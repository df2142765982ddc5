//! Relative import paths between the output directory and the base class.
//!
//! The computation is lexical: `.` and `..` components are folded, but the
//! filesystem is never consulted, so symlinks are not resolved. Both inputs
//! should be absolute (or relative to the same directory).

use camino::{Utf8Component, Utf8Path};

/// Computes the import path of `target_file` as seen from `from_dir`.
///
/// The result always uses `/` separators, whatever the platform. When the two
/// paths share no root (for example different Windows drives) the target is
/// returned as a normalized absolute path.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use dg_codegen::relative_import_path;
///
/// let import = relative_import_path(
///     Utf8Path::new("/app/lib/data/models"),
///     Utf8Path::new("/app/lib/domain/entities/user_entity.dart"),
/// );
/// assert_eq!(import, "../../domain/entities/user_entity.dart");
/// ```
#[must_use]
pub fn relative_import_path(from_dir: &Utf8Path, target_file: &Utf8Path) -> String {
    let from = normalize(from_dir);
    let target = normalize(target_file);

    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let rooted = |components: &[Utf8Component<'_>]| {
        matches!(
            components.first(),
            Some(Utf8Component::RootDir | Utf8Component::Prefix(_))
        )
    };

    if common == 0 && (rooted(&from) || rooted(&target)) {
        return join_forward(target.iter().map(Utf8Component::as_str));
    }

    let ups = std::iter::repeat_n("..", from.len() - common);
    let downs = target[common..].iter().map(Utf8Component::as_str);

    join_forward(ups.chain(downs))
}

/// Folds `.` and `..` components without touching the filesystem.
fn normalize(path: &Utf8Path) -> Vec<Utf8Component<'_>> {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match components.last() {
                Some(Utf8Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    components
}

fn join_forward<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();

    for part in parts {
        let part = part.replace('\\', "/");
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        // A root component is itself a separator
        if part != "/" || !out.ends_with('/') {
            out.push_str(&part);
        }
    }

    out
}
