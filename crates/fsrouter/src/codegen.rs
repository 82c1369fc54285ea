//! Routing module generation
//!
//! Turns a sorted route list into the text of a module whose default export
//! is a fully wired Hono application:
//!
//! ```text
//! import { Hono } from "hono";
//! import * as route0 from "/src/routes/users/index";
//!
//! const app = new Hono();
//!
//! if (route0.GET) app.get("/users", route0.GET);
//!
//! export default app;
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::path::import_specifier;
use crate::{ExportSet, Result, RouteFile};

/// One route file with the handler names it exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub route: RouteFile,
    pub exports: ExportSet,
}

/// Ordered routes ready for generation; order is registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Scans every (already sorted) route file for its exports
    ///
    /// Fails on the first file that cannot be read.
    pub fn scan(routes: Vec<RouteFile>) -> Result<Self> {
        let entries = routes
            .into_iter()
            .map(|route| {
                let exports = ExportSet::scan_file(&route.file_path)?;
                Ok(RouteEntry { route, exports })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files whose modules the generated code imports
    pub fn files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.entries.iter().map(|e| e.route.file_path.as_path())
    }

    /// Route paths served by more than one file, with the files in table order
    ///
    /// Only the first file registered for a path ever answers requests; the
    /// rest are shadowed.
    pub fn collisions(&self) -> BTreeMap<&str, Vec<&Path>> {
        let mut by_path: BTreeMap<&str, Vec<&Path>> = BTreeMap::new();
        for entry in &self.entries {
            by_path
                .entry(entry.route.route_path.as_str())
                .or_default()
                .push(entry.route.file_path.as_path());
        }
        by_path.retain(|_, files| files.len() > 1);
        by_path
    }
}

/// JSON string literal, which is also a valid JS string literal
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Renders the routing module for `table`
///
/// Import specifiers are computed relative to `root` before anything is
/// emitted, so a single route file outside the project fails the whole
/// generation and no partial module is produced.
pub fn render(root: &Path, table: &RouteTable) -> Result<String> {
    let specifiers = table
        .entries()
        .iter()
        .map(|entry| import_specifier(root, &entry.route.file_path))
        .collect::<Result<Vec<_>>>()?;

    for (route_path, files) in table.collisions() {
        warn!(
            "Route {} is served by {} files, only {:?} will match",
            route_path,
            files.len(),
            files[0]
        );
    }

    let mut imports = Vec::with_capacity(table.len());
    let mut registrations = Vec::new();

    for (index, (entry, specifier)) in table.entries().iter().zip(&specifiers).enumerate() {
        let binding = format!("route{index}");
        imports.push(format!("import * as {binding} from {};", js_string(specifier)));

        let route_path = js_string(&entry.route.route_path);
        for method in entry.exports.methods() {
            let name = method.export_name();
            registrations.push(format!(
                "if ({binding}.{name}) app.{}({route_path}, {binding}.{name});",
                method.registrar()
            ));
        }
        // A default export is mounted only if it looks like an app at runtime
        if entry.exports.has_default() {
            registrations.push(format!(
                "if ({binding}.default?.fetch) app.route({route_path}, {binding}.default);"
            ));
        }
    }

    info!(
        "Generated routing module: {} routes, {} registrations",
        table.len(),
        registrations.len()
    );

    Ok(format!(
        "import {{ Hono }} from \"hono\";\n{}\n\nconst app = new Hono();\n\n{}\n\nexport default app;\n",
        imports.join("\n"),
        registrations.join("\n")
    ))
}

/// Paths of every file in `table` (for the host's dependency tracking)
pub fn watch_files(table: &RouteTable) -> Vec<PathBuf> {
    table.files().map(Path::to_path_buf).collect()
}
