pub mod application;
/// Git Log Reader Feature
///
/// Streams commit history out of a `git log` subprocess.
///
/// ## Features
/// - **Parents reader**: whole history in bounded blocks, paged by committer timestamp
/// - **Data reader**: full metadata for selected commits
///
/// ## Note
/// This feature requires the git command-line tool at runtime.
pub mod domain;
pub mod infrastructure;

// Re-export application layer (primary interface)
pub use application::*;

// Re-export domain types
pub use domain::*;

pub use infrastructure::*;
