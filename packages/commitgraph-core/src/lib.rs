/*
 * Commitgraph Core - Incremental Git Log Reader + Collapsible Commit Graph
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common value types (CommitHash)
 * - features/    : Vertical slices (git_reader → graph)
 * - config/      : Layered configuration (YAML + env)
 *
 * Data flow:
 *   git log (subprocess) → CommitParentsReader (paged, lookahead-trimmed)
 *     → GraphBuilder (rows of nodes/edges) → GraphModel (hide/show fragments)
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared value types
pub mod shared;

/// Feature modules (reader, graph)
pub mod features;

/// Configuration system
pub mod config;

/// Crate-level error type
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{CommitGraphConfig, GraphConfig, ReaderConfig};
pub use errors::{CommitGraphError, Result};
pub use shared::models::CommitHash;

pub use features::git_reader::{
    CommitData, CommitDataReader, CommitParents, CommitParentsReader, GitProcessFactory,
    GitProcessRunner, GitReaderError, HistoryLoader, ProcessRunner, ReadPosition,
    TimestampCommitParents, COMMIT_BLOCK_SIZE,
};
pub use features::graph::{
    Branch, BranchId, BranchIdAllocator, Edge, EdgeId, EdgeKind, EdgeState, Graph, GraphBuilder,
    GraphElement, GraphError, GraphFragment, GraphFragmentController, GraphModel, GraphSnapshot,
    Node, NodeId, NodeKind, NodeRow, NodeType, Replace,
};
