//! Route discovery: walks the routes directory for route source files.
//!
//! Conventions:
//! - `users/settings.ts` → `/users/settings`
//! - `users/index.ts` → `/users`
//! - `users/[id].ts` → `/users/:id`
//! - `*.test.ts` and `*.d.ts` files are never routes

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::path::to_forward_slashes;
use crate::route::translate;
use crate::{Result, RouteFile, RouterError};

/// Source extensions recognized when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts"];

/// The recognized extension a route file name ends with, if it is eligible
///
/// Test files (`.test.<ext>`) and declaration files (`.d.<ext>`) are not eligible.
///
/// ```
/// use fsrouter::collect::route_extension;
///
/// assert_eq!(route_extension("index.ts", &["ts"]), Some("ts"));
/// assert_eq!(route_extension("index.test.ts", &["ts"]), None);
/// assert_eq!(route_extension("env.d.ts", &["ts"]), None);
/// assert_eq!(route_extension("index.tsx", &["ts"]), None);
/// ```
pub fn route_extension<'a, S: AsRef<str>>(file_name: &str, extensions: &'a [S]) -> Option<&'a str> {
    extensions.iter().map(|ext| ext.as_ref()).find(|ext| {
        let suffix = format!(".{ext}");
        file_name.ends_with(&suffix)
            && !file_name.ends_with(&format!(".test{suffix}"))
            && !file_name.ends_with(&format!(".d{suffix}"))
    })
}

/// Whether a file name is an eligible route file
pub fn is_route_file<S: AsRef<str>>(file_name: &str, extensions: &[S]) -> bool {
    route_extension(file_name, extensions).is_some()
}

/// Collects every route file under `routes_dir` in directory-walk order
///
/// Returns an empty list when `routes_dir` does not exist. Directories are
/// canonicalized and visited at most once, so symlink loops terminate.
/// Entries inside a directory are walked in file-name order. Any other
/// filesystem error is returned to the caller.
pub fn collect_routes<S: AsRef<str>>(routes_dir: &Path, extensions: &[S]) -> Result<Vec<RouteFile>> {
    let mut routes = Vec::new();
    if !routes_dir.exists() {
        debug!("Routes directory {:?} does not exist, no routes", routes_dir);
        return Ok(routes);
    }

    let mut visited = HashSet::new();
    scan_dir(routes_dir, routes_dir, extensions, &mut visited, &mut routes)?;
    Ok(routes)
}

fn scan_dir<S: AsRef<str>>(
    dir: &Path,
    base_dir: &Path,
    extensions: &[S],
    visited: &mut HashSet<PathBuf>,
    routes: &mut Vec<RouteFile>,
) -> Result<()> {
    let real_dir = fs::canonicalize(dir).map_err(|e| RouterError::io(dir, e))?;
    if !visited.insert(real_dir) {
        debug!("Skipping already visited directory {:?}", dir);
        return Ok(());
    }

    let mut entries = fs::read_dir(dir)
        .map_err(|e| RouterError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| RouterError::io(dir, e))?;
    entries.sort();

    for full_path in entries {
        // Follows symlinks, so a linked directory is descended into
        let metadata = fs::metadata(&full_path).map_err(|e| RouterError::io(&full_path, e))?;

        if metadata.is_dir() {
            scan_dir(&full_path, base_dir, extensions, visited, routes)?;
            continue;
        }

        let file_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(ext) = route_extension(&file_name, extensions) else {
            continue;
        };

        let relative = full_path.strip_prefix(base_dir).unwrap_or(&full_path);
        let relative = to_forward_slashes(&relative.to_string_lossy());
        let without_ext = relative
            .strip_suffix(&format!(".{ext}"))
            .unwrap_or(&relative);

        let route = RouteFile::new(full_path.clone(), translate(without_ext));
        debug!("Discovered route {} -> {:?}", route.route_path, route.file_path);
        routes.push(route);
    }

    Ok(())
}
