//! Export detection for route modules
//!
//! Finds the handler names a route file exports by matching export
//! declarations in its text. The file is never parsed or executed, which
//! keeps scanning cheap and accepts these false negatives:
//!
//! - re-exports (`export { GET } from "./shared"`, `export * from ...`)
//! - computed or assigned exports (`module.exports.GET = ...`)
//!
//! Comments and string literals are not stripped, so a commented-out
//! `export function GET` still counts.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Result, RouterError};

static EXPORT_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bexport\s+(?:async\s+)?function\s+(\w+)").expect("export function pattern is valid")
});

static EXPORT_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bexport\s+(?:const|let|var)\s+(\w+)").expect("export binding pattern is valid")
});

static EXPORT_DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bexport\s+default\b").expect("export default pattern is valid"));

// Group 2 is set when the list is a re-export (`... } from "x"`)
static EXPORT_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bexport\s*\{([^}]*)\}(\s*from\b)?").expect("export list pattern is valid")
});

/// HTTP verbs a route module may export, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Export name the handler must use (`GET`, `POST`, ...)
    pub fn export_name(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Method name on the application object (`app.get`, `app.post`, ...)
    pub fn registrar(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Exact, case-sensitive lookup by export name
    pub fn from_export_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.export_name() == name)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.export_name())
    }
}

/// Recognized names exported by one route file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSet {
    methods: BTreeSet<HttpMethod>,
    has_default: bool,
}

impl ExportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from exported names, keeping only recognized ones
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().fold(Self::new(), |mut set, name| {
            set.insert_name(name);
            set
        })
    }

    /// Scans source text for export declarations
    ///
    /// # Examples
    ///
    /// ```
    /// use fsrouter::{ExportSet, HttpMethod};
    ///
    /// let set = ExportSet::scan("export const GET = (c) => c.text('ok');");
    /// assert!(set.contains(HttpMethod::Get));
    /// assert!(!set.has_default());
    ///
    /// assert!(ExportSet::scan("const GET = 1;").is_empty());
    /// ```
    pub fn scan(source: &str) -> Self {
        let mut set = Self::new();

        let declared = EXPORT_FUNCTION
            .captures_iter(source)
            .chain(EXPORT_BINDING.captures_iter(source))
            .filter_map(|caps| caps.get(1));
        for name in declared {
            set.insert_name(name.as_str());
        }

        for caps in EXPORT_LIST.captures_iter(source) {
            if caps.get(2).is_some() {
                continue;
            }
            if let Some(list) = caps.get(1) {
                list.as_str()
                    .split(',')
                    .filter_map(exported_alias)
                    .for_each(|name| set.insert_name(name));
            }
        }

        if EXPORT_DEFAULT.is_match(source) {
            set.has_default = true;
        }

        set
    }

    /// Reads a file and scans it
    pub fn scan_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| RouterError::io(path, e))?;
        Ok(Self::scan(&source))
    }

    fn insert_name(&mut self, name: &str) {
        if name == "default" {
            self.has_default = true;
        } else if let Some(method) = HttpMethod::from_export_name(name) {
            self.methods.insert(method);
        }
    }

    pub fn contains(&self, method: HttpMethod) -> bool {
        self.methods.contains(&method)
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Exported verbs in registration order
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.methods.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && !self.has_default
    }
}

/// Name a specifier of `export { ... }` exports under (`a as B` → `B`)
fn exported_alias(specifier: &str) -> Option<&str> {
    let tokens: Vec<&str> = specifier.split_whitespace().collect();
    match tokens.as_slice() {
        [name] => Some(*name),
        // `type X` and `type X as Y` export types only
        ["type", name, ..] if *name != "as" => None,
        [_, "as", alias] => Some(*alias),
        _ => None,
    }
}
