//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure data types
//! - infrastructure/ - Subprocess access, algorithms with state
//! - application/ - Use cases composed from infrastructure

// Incremental git log reading (paged by timestamp)
pub mod git_reader;

// Collapsible commit graph (rows, fragments, Replace descriptors)
pub mod graph;
