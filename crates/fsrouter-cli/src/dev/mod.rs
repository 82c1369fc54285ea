pub mod watcher;

use anyhow::Result;
use colored::Colorize;
use fsrouter::{FileRouter, ModuleGraph, RESOLVED_VIRTUAL_MODULE_ID};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::commands::write_if_changed;

/// The generated module as a file on disk
///
/// Stands in for a bundler's module graph: "invalidating" marks the file
/// stale, and a full reload rewrites it.
pub struct OutputModule {
    router: FileRouter,
    path: PathBuf,
    loaded: bool,
    reload_pending: bool,
    tracked: HashSet<PathBuf>,
}

impl OutputModule {
    pub fn new(router: FileRouter, path: PathBuf) -> Self {
        Self {
            router,
            path,
            loaded: false,
            reload_pending: false,
            tracked: HashSet::new(),
        }
    }

    /// Loads the virtual module and writes it to the output file
    ///
    /// The module counts as loaded even when this fails, so the next route
    /// add or unlink invalidates it and generation is retried.
    pub fn regenerate(&mut self) -> Result<()> {
        self.loaded = true;
        self.reload_pending = false;

        let module = match self.router.load(RESOLVED_VIRTUAL_MODULE_ID)? {
            Some(module) => module,
            None => return Ok(()),
        };

        let written = write_if_changed(&self.path, &module.code)?;
        self.tracked = module.watch_files.into_iter().collect();

        if written {
            println!(
                "{} Wrote {} ({} routes)",
                "✓".green(),
                self.path.display(),
                module.table.len()
            );
        }
        Ok(())
    }

    /// Whether the last generation imported `path`
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.tracked.contains(path)
    }

    /// Takes the reload flag set by [`ModuleGraph::send_full_reload`]
    pub fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }
}

impl ModuleGraph for OutputModule {
    fn invalidate_module(&mut self, id: &str) -> bool {
        if id != RESOLVED_VIRTUAL_MODULE_ID || !self.loaded {
            return false;
        }
        self.loaded = false;
        true
    }

    fn send_full_reload(&mut self) {
        println!("{} Route files changed - full reload", "🔄".yellow());
        self.reload_pending = true;
    }
}
