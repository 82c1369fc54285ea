//! # fsrouter
//!
//! File-system-based route discovery that generates a Hono routing module:
//! - Directory nesting maps to path segments (`users/settings.ts` → `/users/settings`)
//! - Index files collapse onto their directory (`users/index.ts` → `/users`)
//! - Dynamic segments (`users/[id].ts` → `/users/:id`)
//! - Static routes are registered before parameterized ones
//!
//! ## Pipeline
//!
//! Every load recomputes the whole table from the current directory tree:
//!
//! 1. [`collect_routes`] walks the routes directory (symlink cycles are skipped)
//! 2. [`sort_by_specificity`] orders static routes ahead of dynamic ones
//! 3. [`ExportSet::scan_file`] finds the handler names each file exports
//! 4. [`codegen::render`] emits the module text
//!
//! ## Example
//!
//! ```
//! use fsrouter::{sort_by_specificity, translate, RouteFile};
//!
//! assert_eq!(translate("users/index"), "/users");
//! assert_eq!(translate("users/[id]"), "/users/:id");
//!
//! let routes = sort_by_specificity(vec![
//!     RouteFile::new("/app/src/routes/users/[id].ts", "/users/:id"),
//!     RouteFile::new("/app/src/routes/users/settings.ts", "/users/settings"),
//! ]);
//! assert_eq!(routes[0].route_path, "/users/settings");
//! ```

use std::path::PathBuf;

// ============================================================================
// Module Declarations
// ============================================================================

pub mod codegen;
pub mod collect;
pub mod config;
mod error;
pub mod exports;
pub mod path;
pub mod plugin;
pub mod route;
pub mod watch;

pub use codegen::{RouteEntry, RouteTable};
pub use collect::{collect_routes, is_route_file, DEFAULT_EXTENSIONS};
pub use config::Config;
pub use error::{Result, RouterError};
pub use exports::{ExportSet, HttpMethod};
pub use plugin::{
    FileRouter, LoadedModule, RouterOptions, RESOLVED_VIRTUAL_MODULE_ID, VIRTUAL_MODULE_ID,
};
pub use route::specificity::{dynamic_segment_count, sort_by_specificity};
pub use route::translate::translate;
pub use watch::{ModuleGraph, RouteSubscription, WatchEvent, WatchEventKind};

// ============================================================================
// Core Types
// ============================================================================

/// A route source file paired with the route path it serves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    /// Path of the source file as walked (routes dir joined with the entry path)
    pub file_path: PathBuf,
    /// Route pattern like "/users/:id"; always starts with `/`
    pub route_path: String,
}

impl RouteFile {
    pub fn new(file_path: impl Into<PathBuf>, route_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            route_path: route_path.into(),
        }
    }

    /// Number of `:name` parameters in the route path
    pub fn dynamic_segments(&self) -> usize {
        dynamic_segment_count(&self.route_path)
    }
}
