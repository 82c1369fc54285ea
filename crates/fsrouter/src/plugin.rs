//! Build-pipeline hooks for the `virtual:file-routes` module
//!
//! A host (bundler, dev server, CLI) drives one [`FileRouter`] per project:
//! it resolves the virtual import id, loads the generated module, tracks the
//! returned watch files, and forwards filesystem events.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codegen::{self, RouteTable};
use crate::collect::collect_routes;
use crate::config::Config;
use crate::path::normalize_lexically;
use crate::route::sort_by_specificity;
use crate::watch::{ModuleGraph, RouteSubscription, WatchEvent};
use crate::Result;

/// Import id application code uses for the generated routes
pub const VIRTUAL_MODULE_ID: &str = "virtual:file-routes";

/// Id the virtual module resolves to inside the pipeline (`\0` keeps other
/// resolvers away from it)
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:file-routes";

/// User-facing options
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Routes directory relative to the project root; `src/routes` when unset
    pub routes_dir: Option<String>,
    /// Recognized source extensions
    pub extensions: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            routes_dir: None,
            extensions: crate::DEFAULT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl From<&Config> for RouterOptions {
    fn from(config: &Config) -> Self {
        Self {
            routes_dir: Some(config.routing.routes_dir.clone()),
            extensions: config.routing.extensions.clone(),
        }
    }
}

/// Result of loading the virtual module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    /// Generated module text
    pub code: String,
    /// Route files the module depends on; edits to these are the host's to track
    pub watch_files: Vec<PathBuf>,
    /// The table the code was generated from
    pub table: RouteTable,
}

/// File-based router bound to one resolved project root
#[derive(Debug, Clone)]
pub struct FileRouter {
    root: PathBuf,
    routes_dir: PathBuf,
    extensions: Vec<String>,
    subscription: RouteSubscription,
}

impl FileRouter {
    /// Binds the router to a project root once the host's config is resolved
    pub fn new(root: impl Into<PathBuf>, options: RouterOptions) -> Self {
        let root = root.into();
        let routes_dir = match &options.routes_dir {
            Some(dir) => normalize_lexically(&root.join(dir)),
            None => root.join("src").join("routes"),
        };
        let subscription = RouteSubscription::new(&routes_dir, &options.extensions);
        Self {
            root,
            routes_dir,
            extensions: options.extensions,
            subscription,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn routes_dir(&self) -> &Path {
        &self.routes_dir
    }

    /// Directories the host's watcher must observe
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        vec![self.routes_dir.clone()]
    }

    /// Claims the virtual module id
    pub fn resolve_id(&self, id: &str) -> Option<&'static str> {
        (id == VIRTUAL_MODULE_ID).then_some(RESOLVED_VIRTUAL_MODULE_ID)
    }

    /// Loads the generated module; `Ok(None)` for ids this router does not own
    pub fn load(&self, id: &str) -> Result<Option<LoadedModule>> {
        if id != RESOLVED_VIRTUAL_MODULE_ID {
            return Ok(None);
        }
        self.generate().map(Some)
    }

    /// Recomputes the whole table from the directory tree and renders it
    pub fn generate(&self) -> Result<LoadedModule> {
        let table = self.scan()?;
        let code = codegen::render(&self.root, &table)?;
        Ok(LoadedModule {
            code,
            watch_files: codegen::watch_files(&table),
            table,
        })
    }

    /// Collects, sorts, and scans exports without rendering
    pub fn scan(&self) -> Result<RouteTable> {
        let routes = collect_routes(&self.routes_dir, self.extensions.as_slice())?;
        debug!("Collected {} route files from {:?}", routes.len(), self.routes_dir);
        RouteTable::scan(sort_by_specificity(routes))
    }

    /// Handles a watcher event; returns whether a full reload was signaled
    pub fn handle_event(&self, event: &WatchEvent, graph: &mut dyn ModuleGraph) -> bool {
        self.subscription
            .dispatch(event, graph, RESOLVED_VIRTUAL_MODULE_ID)
    }
}
