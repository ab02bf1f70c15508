/// Lightweight history records
use serde::{Deserialize, Serialize};

use crate::shared::models::CommitHash;

/// Anything that names a commit and its ordered parents
///
/// The graph builder only needs this much of a commit.
pub trait CommitParents {
    fn hash(&self) -> &CommitHash;
    fn parents(&self) -> &[CommitHash];
}

/// (commit, timestamp, parents) record used during bulk history loading
///
/// Within one block records arrive in non-increasing timestamp order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampCommitParents {
    pub hash: CommitHash,
    /// Committer timestamp, seconds since the epoch
    pub timestamp: i64,
    pub parents: Vec<CommitHash>,
}

impl TimestampCommitParents {
    pub fn new(hash: CommitHash, timestamp: i64, parents: Vec<CommitHash>) -> Self {
        Self {
            hash,
            timestamp,
            parents,
        }
    }
}

impl CommitParents for TimestampCommitParents {
    fn hash(&self) -> &CommitHash {
        &self.hash
    }

    fn parents(&self) -> &[CommitHash] {
        &self.parents
    }
}
