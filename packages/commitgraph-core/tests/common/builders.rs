//! Synthetic histories
//!
//! Hashes are hex so they pass `CommitHash` parsing; records come out
//! newest first, like `git log`.

use commitgraph_core::{CommitHash, TimestampCommitParents};

/// Hex hash for commit number `n`
pub fn hash(n: usize) -> CommitHash {
    CommitHash::new(format!("{:040x}", n + 1))
}

/// Linear history with the given (non-increasing) timestamps
pub fn linear_history(timestamps: &[i64]) -> Vec<TimestampCommitParents> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, &ts)| {
            let parents = if i + 1 < timestamps.len() {
                vec![hash(i + 1)]
            } else {
                Vec::new()
            };
            TimestampCommitParents::new(hash(i), ts, parents)
        })
        .collect()
}

/// `n` commits with strictly decreasing timestamps
pub fn distinct_history(n: usize) -> Vec<TimestampCommitParents> {
    let timestamps: Vec<i64> = (0..n as i64).map(|i| 1_700_000_000 - i).collect();
    linear_history(&timestamps)
}

/// Commit with named hash and parents; names must be hex to survive parsing
pub fn commit(name: &str, parents: &[&str]) -> TimestampCommitParents {
    TimestampCommitParents::new(
        CommitHash::new(name),
        0,
        parents.iter().map(|p| CommitHash::new(*p)).collect(),
    )
}

/// Builder for hand-written histories, newest first
#[derive(Debug, Default)]
pub struct HistoryBuilder {
    records: Vec<TimestampCommitParents>,
    next_timestamp: i64,
}

impl HistoryBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_timestamp: 1_700_000_000,
        }
    }

    /// Append an older commit
    pub fn with_commit(mut self, name: &str, parents: &[&str]) -> Self {
        let mut record = commit(name, parents);
        record.timestamp = self.next_timestamp;
        self.next_timestamp -= 1;
        self.records.push(record);
        self
    }

    /// Append an older commit sharing the previous commit's timestamp
    pub fn with_same_time_commit(mut self, name: &str, parents: &[&str]) -> Self {
        let mut record = commit(name, parents);
        record.timestamp = self.next_timestamp + 1;
        self.records.push(record);
        self
    }

    pub fn build(self) -> Vec<TimestampCommitParents> {
        self.records
    }
}
