//! Shared models
//!
//! Value types that both the reader and the graph speak in.

pub mod commit_hash;

pub use commit_hash::{CommitHash, InvalidCommitHash};
