/// Route module for file-based routing
///
/// Pure functions that turn walked file paths into route paths and order them.
/// Same input → same output, no filesystem access.

pub mod specificity;
pub mod translate;

// Re-export commonly used functions
pub use specificity::{dynamic_segment_count, sort_by_specificity};
pub use translate::translate;
