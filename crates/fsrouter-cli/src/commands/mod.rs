pub mod dev;
pub mod generate;
pub mod routes;

use anyhow::{Context, Result};
use fsrouter::{Config, FileRouter, RouterOptions};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// A project resolved from the command line
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub router: FileRouter,
}

impl Project {
    /// Resolves the root (current directory by default) and loads its config
    pub fn load(root: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root.to_path_buf(),
            None => env::current_dir().context("Failed to read current directory")?,
        };
        let root = fs::canonicalize(&root)
            .with_context(|| format!("Project root {:?} does not exist", root))?;

        let config = Config::load_from_root(&root)?;
        let router = FileRouter::new(&root, RouterOptions::from(&config));

        Ok(Self {
            root,
            config,
            router,
        })
    }

    /// Where the generated module goes, `out` taking precedence over the config
    pub fn output_path(&self, out: Option<&Path>) -> PathBuf {
        match out {
            Some(out) if out.is_absolute() => out.to_path_buf(),
            Some(out) => env::current_dir()
                .map(|cwd| cwd.join(out))
                .unwrap_or_else(|_| out.to_path_buf()),
            None => self.root.join(&self.config.output.file),
        }
    }

    /// Path relative to the root for display
    pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.root).unwrap_or(path).display()
    }
}

/// Writes `code` to `path` unless it already holds exactly that.
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, code: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == code) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(path, code).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_defaults_to_config() {
        let tmp = TempDir::new().unwrap();
        let project = Project::load(Some(tmp.path())).unwrap();
        assert!(project
            .output_path(None)
            .ends_with("src/generated/routes.ts"));
        assert_eq!(
            project.output_path(Some(Path::new("/tmp/out.ts"))),
            PathBuf::from("/tmp/out.ts")
        );
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = Project::load(Some(&tmp.path().join("nope"))).err().unwrap();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_write_if_changed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("src/generated/routes.ts");
        assert!(write_if_changed(&path, "a").unwrap());
        assert!(!write_if_changed(&path, "a").unwrap());
        assert!(write_if_changed(&path, "b").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }
}
