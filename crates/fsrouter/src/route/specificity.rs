//! Specificity ordering for collected routes
//!
//! An external dispatcher matches routes in registration order, so static
//! routes have to be registered before parameterized routes that would
//! otherwise swallow them (`/users/settings` ahead of `/users/:id`).

use std::cmp::Ordering;

use crate::RouteFile;

/// Counts `:` markers in a route path
pub fn dynamic_segment_count(route_path: &str) -> usize {
    route_path.matches(':').count()
}

fn compare(a: &RouteFile, b: &RouteFile) -> Ordering {
    dynamic_segment_count(&a.route_path)
        .cmp(&dynamic_segment_count(&b.route_path))
        .then_with(|| {
            b.route_path
                .chars()
                .count()
                .cmp(&a.route_path.chars().count())
        })
}

/// Orders routes from most to least specific
///
/// # Keys
///
/// 1. Dynamic segment count, ascending
/// 2. Route path length, descending
///
/// The sort is stable: remaining ties keep collector order.
///
/// # Examples
///
/// ```
/// use fsrouter::{sort_by_specificity, RouteFile};
///
/// let sorted = sort_by_specificity(vec![
///     RouteFile::new("a.ts", "/users/:id"),
///     RouteFile::new("b.ts", "/users/settings"),
///     RouteFile::new("c.ts", "/posts/:id/:tag"),
/// ]);
/// let paths: Vec<_> = sorted.iter().map(|r| r.route_path.as_str()).collect();
/// assert_eq!(paths, ["/users/settings", "/users/:id", "/posts/:id/:tag"]);
/// ```
pub fn sort_by_specificity(mut routes: Vec<RouteFile>) -> Vec<RouteFile> {
    routes.sort_by(compare);
    routes
}
