//! History loading use case
//!
//! Drives a [`CommitParentsReader`] to the end and fetches details on demand.

use crate::config::ReaderConfig;
use crate::features::git_reader::domain::{CommitData, TimestampCommitParents};
use crate::features::git_reader::infrastructure::{
    CommitDataReader, CommitParentsReader, GitProcessFactory, ProcessRunner, Result,
};
use crate::shared::models::CommitHash;
use tracing::info;

/// Loads a repository's history through one runner
pub struct HistoryLoader<R: ProcessRunner + Clone> {
    runner: R,
    config: ReaderConfig,
}

impl<R: ProcessRunner + Clone> HistoryLoader<R> {
    pub fn new(runner: R, config: ReaderConfig) -> Self {
        Self { runner, config }
    }

    /// Fresh reader for one loading session
    pub fn parents_reader(&self) -> CommitParentsReader<R> {
        CommitParentsReader::from_config(self.runner.clone(), &self.config)
    }

    /// Whole history, newest first
    pub fn load_history(
        &self,
        status: &mut dyn FnMut(&str),
    ) -> Result<Vec<TimestampCommitParents>> {
        let mut reader = self.parents_reader();
        let history = reader.read_all(status)?;
        info!("loaded {} commits", history.len());
        Ok(history)
    }

    /// Metadata for the given commits
    pub fn load_commit_details(&self, hashes: &[CommitHash]) -> Result<Vec<CommitData>> {
        let reader =
            CommitDataReader::new(self.runner.clone(), GitProcessFactory::new(&self.config));
        reader.read_commits_data(hashes)
    }
}
