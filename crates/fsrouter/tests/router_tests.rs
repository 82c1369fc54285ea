//! Integration tests for fsrouter
//!
//! Tests build real directory trees and cover:
//! - Route collection (exclusions, nesting, missing directories)
//! - Symlink cycles
//! - Generation end to end (ordering, idempotence, path safety)
//! - The watcher subscription through `FileRouter`
//! - The `demos/hono-app` fixture

use fsrouter::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn route_paths(routes: &[RouteFile]) -> Vec<&str> {
    routes.iter().map(|r| r.route_path.as_str()).collect()
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "src/routes/index.ts", "export default new Hono();\n");
    write(root, "src/routes/users/index.ts", "export function GET() {}\nexport function POST() {}\n");
    write(root, "src/routes/users/[id].ts", "export function GET() {}\nexport async function DELETE() {}\n");
    write(root, "src/routes/users/settings.ts", "export const GET = () => null;\n");
    write(root, "src/routes/posts/[id]/[tag].ts", "export const GET = () => null;\n");
    tmp
}

// ============================================================================
// Translation
// ============================================================================

#[rstest]
#[case("index", "/")]
#[case("users/index", "/users")]
#[case("users/[id]", "/users/:id")]
#[case("a/[x]/b/[y]", "/a/:x/b/:y")]
#[case("[index]", "/:index")]
#[case("docs/getting-started", "/docs/getting-started")]
fn test_translate(#[case] relative: &str, #[case] expected: &str) {
    assert_eq!(translate(relative), expected);
}

// ============================================================================
// Collection
// ============================================================================

#[test]
fn test_collect_excludes_tests_and_declarations() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "users.ts", "");
    write(tmp.path(), "users.test.ts", "");
    write(tmp.path(), "env.d.ts", "");
    write(tmp.path(), "readme.md", "");
    write(tmp.path(), "component.tsx", "");

    let routes = collect_routes(tmp.path(), DEFAULT_EXTENSIONS).unwrap();
    assert_eq!(route_paths(&routes), vec!["/users"]);
}

#[test]
fn test_collect_custom_extensions() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.ts", "");
    write(tmp.path(), "b.tsx", "");
    write(tmp.path(), "b.test.tsx", "");

    let routes = collect_routes(tmp.path(), &["ts", "tsx"]).unwrap();
    assert_eq!(route_paths(&routes), vec!["/a", "/b"]);
}

#[test]
fn test_collect_visits_every_file_once() {
    let tmp = TempDir::new().unwrap();
    let mut expected = HashSet::new();
    for rel in [
        "index.ts",
        "a/index.ts",
        "a/b.ts",
        "a/b/c/d.ts",
        "a/b/c/[e].ts",
        "x/y/z/index.ts",
    ] {
        expected.insert(write(tmp.path(), rel, ""));
    }

    let routes = collect_routes(tmp.path(), DEFAULT_EXTENSIONS).unwrap();
    let found: HashSet<_> = routes.iter().map(|r| r.file_path.clone()).collect();
    assert_eq!(routes.len(), expected.len());
    assert_eq!(found, expected);
}

#[test]
fn test_collect_every_route_starts_with_slash_and_has_no_brackets() {
    let tmp = project();
    let routes = collect_routes(&tmp.path().join("src/routes"), DEFAULT_EXTENSIONS).unwrap();
    assert!(!routes.is_empty());
    for route in &routes {
        assert!(route.route_path.starts_with('/'), "{}", route.route_path);
        assert!(!route.route_path.contains('['), "{}", route.route_path);
    }
}

#[test]
fn test_collect_missing_root_is_empty() {
    let tmp = TempDir::new().unwrap();
    let routes = collect_routes(&tmp.path().join("src/routes"), DEFAULT_EXTENSIONS).unwrap();
    assert!(routes.is_empty());
}

#[cfg(unix)]
#[test]
fn test_collect_terminates_on_symlink_cycle() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "users/index.ts", "");
    write(tmp.path(), "users/nested/deep.ts", "");
    // users/nested/loop -> users
    symlink(tmp.path().join("users"), tmp.path().join("users/nested/loop")).unwrap();

    let routes = collect_routes(tmp.path(), DEFAULT_EXTENSIONS).unwrap();
    assert_eq!(route_paths(&routes), vec!["/users", "/users/nested/deep"]);
}

#[cfg(unix)]
#[test]
fn test_collect_visits_linked_directory_once() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "admin/panel.ts", "");
    // `backoffice` and `admin` resolve to the same directory
    symlink(tmp.path().join("admin"), tmp.path().join("backoffice")).unwrap();

    let routes = collect_routes(tmp.path(), DEFAULT_EXTENSIONS).unwrap();
    assert_eq!(route_paths(&routes), vec!["/admin/panel"]);
}

#[cfg(unix)]
#[test]
fn test_collect_follows_symlinked_directory_outside_tree() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    let shared = TempDir::new().unwrap();
    write(shared.path(), "health.ts", "");
    write(tmp.path(), "index.ts", "");
    symlink(shared.path(), tmp.path().join("shared")).unwrap();

    let routes = collect_routes(tmp.path(), DEFAULT_EXTENSIONS).unwrap();
    assert_eq!(route_paths(&routes), vec!["/", "/shared/health"]);
    // The walked path is kept, not the link target
    assert_eq!(routes[1].file_path, tmp.path().join("shared").join("health.ts"));
}

#[cfg(unix)]
#[test]
fn test_collect_propagates_broken_symlink() {
    use std::os::unix::fs::symlink;

    let tmp = TempDir::new().unwrap();
    symlink(tmp.path().join("missing.ts"), tmp.path().join("dangling.ts")).unwrap();

    let err = collect_routes(tmp.path(), DEFAULT_EXTENSIONS).unwrap_err();
    match err {
        RouterError::Io { path, .. } => assert!(path.ends_with("dangling.ts")),
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generate_orders_by_specificity() {
    let tmp = project();
    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let table = router.scan().unwrap();
    let paths: Vec<_> = table
        .entries()
        .iter()
        .map(|e| e.route.route_path.as_str())
        .collect();
    assert_eq!(
        paths,
        vec!["/users/settings", "/users", "/", "/users/:id", "/posts/:id/:tag"]
    );
}

#[test]
fn test_generate_is_idempotent() {
    let tmp = project();
    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let first = router.generate().unwrap();
    let second = router.generate().unwrap();
    assert_eq!(first.code, second.code);
    assert_eq!(first.watch_files, second.watch_files);
}

#[test]
fn test_generate_tracks_every_route_file() {
    let tmp = project();
    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let module = router.generate().unwrap();
    assert_eq!(module.watch_files.len(), 5);
    assert!(module
        .watch_files
        .contains(&tmp.path().join("src/routes/users/settings.ts")));
}

#[test]
fn test_generate_file_without_exports_registers_nothing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/routes/helpers.ts", "const GET = () => null;\n");
    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let module = router.generate().unwrap();
    assert!(module.code.contains("import * as route0 from \"/src/routes/helpers\";"));
    assert!(!module.code.contains("if (route0"));
    assert!(module.table.entries()[0].exports.is_empty());
}

#[test]
fn test_generate_rejects_routes_outside_root() {
    let outer = TempDir::new().unwrap();
    let root = outer.path().join("app");
    fs::create_dir_all(&root).unwrap();
    write(outer.path(), "shared/routes/ok.ts", "export function GET() {}\n");
    write(outer.path(), "shared/routes/also.ts", "export function GET() {}\n");

    let options = RouterOptions {
        routes_dir: Some("../shared/routes".to_string()),
        ..Default::default()
    };
    let router = FileRouter::new(&root, options);
    let err = router.load(RESOLVED_VIRTUAL_MODULE_ID).unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, RouterError::OutsideRoot { .. }));
    assert!(message.contains(&root.display().to_string()));
    assert!(message.contains("also.ts"));
}

#[test]
fn test_generate_reports_collisions_without_rejecting() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/routes/users.ts", "export function GET() {}\n");
    write(tmp.path(), "src/routes/users/index.ts", "export function GET() {}\n");

    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let module = router.generate().unwrap();
    assert_eq!(module.table.collisions().len(), 1);
    assert!(module.code.contains("app.get(\"/users\", route0.GET)"));
    assert!(module.code.contains("app.get(\"/users\", route1.GET)"));
}

// ============================================================================
// Watching
// ============================================================================

#[derive(Default)]
struct RecordingGraph {
    loaded: HashSet<String>,
    reloads: usize,
}

impl ModuleGraph for RecordingGraph {
    fn invalidate_module(&mut self, id: &str) -> bool {
        self.loaded.remove(id)
    }

    fn send_full_reload(&mut self) {
        self.reloads += 1;
    }
}

#[test]
fn test_watch_add_after_load_reloads_once() {
    let tmp = project();
    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let mut graph = RecordingGraph::default();

    let id = router.resolve_id(VIRTUAL_MODULE_ID).unwrap();
    let before = router.load(id).unwrap().unwrap();
    graph.loaded.insert(id.to_string());

    let added = write(tmp.path(), "src/routes/about.ts", "export function GET() {}\n");
    assert!(router.handle_event(&WatchEvent::new(WatchEventKind::Add, &added), &mut graph));
    assert_eq!(graph.reloads, 1);

    // Already invalidated: nothing left to reload until the next load
    assert!(!router.handle_event(&WatchEvent::new(WatchEventKind::Add, &added), &mut graph));

    let after = router.load(id).unwrap().unwrap();
    assert_ne!(before.code, after.code);
    assert!(after.code.contains("app.get(\"/about\""));
}

#[rstest]
#[case("./src/routes")]
#[case("src/routes/")]
#[case("lib/../src/routes")]
#[case("./src/./routes/")]
fn test_watch_with_unnormalized_routes_dir(#[case] routes_dir: &str) {
    let tmp = project();
    let options = RouterOptions {
        routes_dir: Some(routes_dir.to_string()),
        ..Default::default()
    };
    let router = FileRouter::new(tmp.path(), options);
    assert_eq!(router.routes_dir(), tmp.path().join("src").join("routes"));

    let mut graph = RecordingGraph::default();
    graph.loaded.insert(RESOLVED_VIRTUAL_MODULE_ID.to_string());

    let added = write(tmp.path(), "src/routes/about.ts", "export function GET() {}\n");
    assert!(router.handle_event(&WatchEvent::new(WatchEventKind::Add, &added), &mut graph));
    assert_eq!(graph.reloads, 1);
}

#[rstest]
#[case("./src/routes")]
#[case("lib/../src/routes/")]
fn test_generate_with_unnormalized_routes_dir(#[case] routes_dir: &str) {
    let tmp = project();
    let options = RouterOptions {
        routes_dir: Some(routes_dir.to_string()),
        ..Default::default()
    };
    let module = FileRouter::new(tmp.path(), options).generate().unwrap();
    let baseline = FileRouter::new(tmp.path(), RouterOptions::default())
        .generate()
        .unwrap();
    assert_eq!(module.code, baseline.code);
    assert!(module
        .code
        .contains("import * as route0 from \"/src/routes/users/settings\";"));
}

#[test]
fn test_watch_ignores_edits_and_test_files() {
    let tmp = project();
    let router = FileRouter::new(tmp.path(), RouterOptions::default());
    let mut graph = RecordingGraph::default();
    graph.loaded.insert(RESOLVED_VIRTUAL_MODULE_ID.to_string());

    let edited = tmp.path().join("src/routes/users/index.ts");
    let test_file = tmp.path().join("src/routes/users/index.test.ts");
    assert!(!router.handle_event(&WatchEvent::new(WatchEventKind::Change, &edited), &mut graph));
    assert!(!router.handle_event(&WatchEvent::new(WatchEventKind::Add, &test_file), &mut graph));
    assert_eq!(graph.reloads, 0);
}

// ============================================================================
// Fixture project
// ============================================================================

#[test]
fn test_demo_project_module() {
    let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/hono-app");
    let root = fs::canonicalize(demo).unwrap();
    let config = Config::load_from_root(&root).unwrap();
    let router = FileRouter::new(&root, RouterOptions::from(&config));

    let module = router.generate().unwrap();
    assert_eq!(
        module.code,
        r#"import { Hono } from "hono";
import * as route0 from "/src/routes/users/settings";
import * as route1 from "/src/routes/users/index";
import * as route2 from "/src/routes/index";
import * as route3 from "/src/routes/users/[id]";

const app = new Hono();

if (route0.GET) app.get("/users/settings", route0.GET);
if (route1.GET) app.get("/users", route1.GET);
if (route1.POST) app.post("/users", route1.POST);
if (route2.default?.fetch) app.route("/", route2.default);
if (route3.GET) app.get("/users/:id", route3.GET);
if (route3.DELETE) app.delete("/users/:id", route3.DELETE);

export default app;
"#
    );
}
