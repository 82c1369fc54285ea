//! Filename-to-route translation
//!
//! Maps a file's path (relative to the routes root, `/`-separated, extension
//! removed) to the route path it serves.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[name]` → captures `name`; brackets never nest
static DYNAMIC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("dynamic segment pattern is valid"));

const INDEX_SUFFIX: &str = "/index";

/// Translates a relative file path into a route path (pure function)
///
/// # Rules (evaluated in order)
///
/// 1. Prefix with `/`
/// 2. Strip a trailing `/index` segment (`/index` alone becomes `/`)
/// 3. Rewrite every `[name]` to `:name`
///
/// Index stripping runs before bracket rewriting, so a file literally named
/// `[index]` stays a parameter.
///
/// # Examples
///
/// ```
/// use fsrouter::translate;
///
/// assert_eq!(translate("index"), "/");
/// assert_eq!(translate("users/index"), "/users");
/// assert_eq!(translate("users/[id]"), "/users/:id");
/// assert_eq!(translate("a/[x]/b/[y]"), "/a/:x/b/:y");
/// assert_eq!(translate("[index]"), "/:index");
/// ```
pub fn translate(relative: &str) -> String {
    let mut route_path = format!("/{relative}");

    if route_path.ends_with(INDEX_SUFFIX) {
        route_path.truncate(route_path.len() - INDEX_SUFFIX.len());
        if route_path.is_empty() {
            route_path.push('/');
        }
    }

    DYNAMIC_SEGMENT
        .replace_all(&route_path, ":$1")
        .into_owned()
}
