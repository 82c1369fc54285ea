//! Change watching as a subscription
//!
//! The host owns the event loop and the module graph. It forwards filesystem
//! events here; events that add or remove a route file under the routes
//! directory invalidate the generated module and trigger a full reload.
//! Edits to existing route files are the host's business: it tracks them
//! through the module's watch files.

use std::path::{Path, PathBuf};

use crate::collect::is_route_file;
use crate::path::{normalize_lexically, to_forward_slashes};

/// Kind of filesystem change reported by the host's watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    Add,
    Unlink,
    Change,
    AddDir,
    UnlinkDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    pub path: PathBuf,
}

impl WatchEvent {
    pub fn new(kind: WatchEventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// The host's module system, as far as invalidation is concerned
pub trait ModuleGraph {
    /// Drops a loaded module so the next import reloads it.
    /// Returns `false` if the module was never loaded.
    fn invalidate_module(&mut self, id: &str) -> bool;

    /// Tells connected clients to reload everything
    fn send_full_reload(&mut self);
}

/// Interest in route-file creation and deletion under one directory
#[derive(Debug, Clone)]
pub struct RouteSubscription {
    prefix: String,
    extensions: Vec<String>,
}

impl RouteSubscription {
    pub fn new(routes_dir: &Path, extensions: &[String]) -> Self {
        let routes_dir = normalize_lexically(routes_dir);
        let mut prefix = to_forward_slashes(&routes_dir.to_string_lossy());
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self {
            prefix,
            extensions: extensions.to_vec(),
        }
    }

    /// Whether `event` adds or removes a route file under the routes directory
    pub fn is_relevant(&self, event: &WatchEvent) -> bool {
        if !matches!(event.kind, WatchEventKind::Add | WatchEventKind::Unlink) {
            return false;
        }

        let path = to_forward_slashes(&normalize_lexically(&event.path).to_string_lossy());
        if !path.starts_with(&self.prefix) {
            return false;
        }

        path.rsplit('/')
            .next()
            .is_some_and(|name| is_route_file(name, self.extensions.as_slice()))
    }

    /// Invalidates `module_id` and signals a full reload for relevant events
    ///
    /// Returns whether a reload was sent.
    pub fn dispatch(&self, event: &WatchEvent, graph: &mut dyn ModuleGraph, module_id: &str) -> bool {
        if !self.is_relevant(event) {
            return false;
        }
        if !graph.invalidate_module(module_id) {
            return false;
        }
        graph.send_full_reload();
        true
    }
}
