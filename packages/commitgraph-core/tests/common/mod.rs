//! Common test utilities for commitgraph-core
//!
//! In-memory git log plus builders for synthetic histories.

#![allow(dead_code)]

mod builders;
mod fixtures;

pub use builders::*;
pub use fixtures::*;
