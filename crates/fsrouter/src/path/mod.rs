//! Path utilities for import synthesis
//!
//! Lexical (no filesystem access) helpers that turn a route file's path into
//! the import specifier used by the generated module. The generated module
//! must only ever reference files inside the project tree.

use std::path::{Component, Path, PathBuf};

use crate::{Result, RouterError};

/// Replaces `\` separators with `/`
///
/// # Examples
///
/// ```
/// use fsrouter::path::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes("src\\routes\\users"), "src/routes/users");
/// assert_eq!(to_forward_slashes("src/routes"), "src/routes");
/// ```
pub fn to_forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Resolves `.` and `..` components without touching the filesystem
///
/// A `..` that would climb above the start of a relative path is kept, and a
/// `..` directly under a root is dropped (the root's parent is itself).
///
/// ```
/// use fsrouter::path::normalize_lexically;
/// use std::path::Path;
///
/// assert_eq!(normalize_lexically(Path::new("/app/./src/../routes")), Path::new("/app/routes"));
/// assert_eq!(normalize_lexically(Path::new("../a/b/..")), Path::new("../a"));
/// ```
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().collect()
}

/// The part of a path that decides which filesystem root it lives under
fn root_of(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}

/// Computes a file's path relative to the project root, `/`-separated
///
/// # Errors
///
/// - [`RouterError::CrossRoot`] when the two paths live under different
///   roots (another drive, or one path absolute and the other relative)
/// - [`RouterError::OutsideRoot`] when the file is not inside `root`
///
/// # Examples
///
/// ```
/// use fsrouter::path::relative_to_root;
/// use std::path::Path;
///
/// let rel = relative_to_root(Path::new("/app"), Path::new("/app/src/routes/users/[id].ts")).unwrap();
/// assert_eq!(rel, "src/routes/users/[id].ts");
///
/// assert!(relative_to_root(Path::new("/app"), Path::new("/elsewhere/users.ts")).is_err());
/// ```
pub fn relative_to_root(root: &Path, file: &Path) -> Result<String> {
    let root_norm = normalize_lexically(root);
    let file_norm = normalize_lexically(file);

    if root_of(&root_norm) != root_of(&file_norm) {
        return Err(RouterError::CrossRoot {
            file: file.to_path_buf(),
            root: root.to_path_buf(),
        });
    }

    match file_norm.strip_prefix(&root_norm) {
        Ok(rel) if !rel.starts_with("..") => Ok(to_forward_slashes(&rel.to_string_lossy())),
        _ => Err(RouterError::OutsideRoot {
            file: file.to_path_buf(),
            root: root.to_path_buf(),
        }),
    }
}

/// Builds the import specifier for a route file: `/` + root-relative path
/// with the file's extension removed
///
/// ```
/// use fsrouter::path::import_specifier;
/// use std::path::Path;
///
/// let specifier = import_specifier(Path::new("/app"), Path::new("/app/src/routes/index.ts")).unwrap();
/// assert_eq!(specifier, "/src/routes/index");
/// ```
pub fn import_specifier(root: &Path, file: &Path) -> Result<String> {
    let rel = relative_to_root(root, file)?;
    let without_ext = match file.extension() {
        Some(ext) => {
            let suffix = format!(".{}", ext.to_string_lossy());
            rel.strip_suffix(suffix.as_str()).map(str::to_string).unwrap_or(rel)
        }
        None => rel,
    };
    Ok(format!("/{without_ext}"))
}
