pub mod application;
/// Commit Graph Feature
///
/// Rows of nodes and edges built from the commit history, with straight
/// stretches ("fragments") that can be collapsed into one edge and expanded
/// again. Every structural change reports a [`Replace`] so a view can patch
/// its rows instead of re-rendering.
pub mod domain;
pub mod infrastructure;

pub use application::*;
pub use domain::*;
pub use infrastructure::*;
