/// Full commit metadata
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::models::CommitHash;

use super::commit_parents::CommitParents;

/// One commit's metadata, parsed from a single log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitData {
    pub hash: CommitHash,
    pub parents: Vec<CommitHash>,
    pub author: String,
    pub author_email: String,
    /// Committer timestamp, seconds since the epoch
    pub timestamp: i64,
    pub subject: String,
}

impl CommitData {
    /// Committer time as UTC (epoch if the timestamp is out of range)
    pub fn time(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or_default()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

impl CommitParents for CommitData {
    fn hash(&self) -> &CommitHash {
        &self.hash
    }

    fn parents(&self) -> &[CommitHash] {
        &self.parents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(parents: &[&str]) -> CommitData {
        CommitData {
            hash: CommitHash::new("aaaa"),
            parents: parents.iter().map(|p| CommitHash::new(*p)).collect(),
            author: "Ann".to_string(),
            author_email: "ann@example.com".to_string(),
            timestamp: 1_700_000_000,
            subject: "Initial".to_string(),
        }
    }

    #[test]
    fn test_time_conversion() {
        let data = sample(&[]);
        assert_eq!(data.time().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_merge_and_root() {
        assert!(sample(&[]).is_root());
        assert!(!sample(&["bbbb"]).is_merge());
        assert!(sample(&["bbbb", "cccc"]).is_merge());
    }
}
