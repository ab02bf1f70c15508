/// Paged reading of the whole commit-parent history
///
/// Git paginates with `-n`, which can cut a group of commits sharing one
/// committer timestamp in half. Every request therefore asks for one record
/// more than a block holds. When that lookahead record arrives, the trailing
/// records sharing its timestamp are dropped and re-requested by the next
/// (inclusive `--until`) request, so no record is lost or duplicated.
///
/// ```text
/// request n = block + 1        ts: 9 8 8 7 7 | 7      (lookahead = 7)
/// returned                         9 8 8
/// next request --until=7           7 7 7 6 ...
/// ```
use super::error::{GitReaderError, Result};
use super::parser::parse_timestamp_commit_parents;
use super::process::{GitCommand, GitProcessFactory};
use super::runner::ProcessRunner;
use crate::config::ReaderConfig;
use crate::features::git_reader::domain::TimestampCommitParents;
use crate::shared::models::CommitHash;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

/// Default number of records per block
pub const COMMIT_BLOCK_SIZE: usize = 100;

/// First progress message of a loading session
pub const BEGIN_LOAD_MESSAGE: &str = "Begin load git repository";

/// Where the next block starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPosition {
    /// Nothing read yet
    Start,
    /// Next block holds records with timestamp `<=` this watermark
    Until(i64),
    /// History fully consumed
    Finished,
}

/// Reads history in bounded blocks; one instance per loading session
pub struct CommitParentsReader<R: ProcessRunner> {
    runner: R,
    factory: GitProcessFactory,
    block_size: usize,
    progress_step: usize,
    position: ReadPosition,
    total_read: usize,
    seen: FxHashSet<CommitHash>,
}

impl<R: ProcessRunner> CommitParentsReader<R> {
    pub fn new(runner: R, factory: GitProcessFactory) -> Self {
        Self {
            runner,
            factory,
            block_size: COMMIT_BLOCK_SIZE,
            progress_step: COMMIT_BLOCK_SIZE,
            position: ReadPosition::Start,
            total_read: 0,
            seen: FxHashSet::default(),
        }
    }

    pub fn from_config(runner: R, config: &ReaderConfig) -> Self {
        Self::new(runner, GitProcessFactory::new(config))
            .with_block_size(config.block_size)
            .with_progress_step(config.progress_step)
    }

    /// Builder: records per block (at least 1)
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Builder: lines between in-block progress reports (at least 1)
    pub fn with_progress_step(mut self, progress_step: usize) -> Self {
        self.progress_step = progress_step.max(1);
        self
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn position(&self) -> ReadPosition {
        self.position
    }

    /// Records returned so far
    pub fn total_read(&self) -> usize {
        self.total_read
    }

    pub fn is_finished(&self) -> bool {
        self.position == ReadPosition::Finished
    }

    /// Next block of history, newest first
    ///
    /// Returns an empty `Vec` exactly when the whole history has been read.
    /// On error the watermark is unchanged, so the call can be repeated.
    pub fn read_next_block(
        &mut self,
        status: &mut dyn FnMut(&str),
    ) -> Result<Vec<TimestampCommitParents>> {
        loop {
            let (block, next_position) = match self.position {
                ReadPosition::Finished => {
                    debug!("history finished after {} commits", self.total_read);
                    return Ok(Vec::new());
                }
                ReadPosition::Start => {
                    status(BEGIN_LOAD_MESSAGE);
                    let command = self.factory.first_part(self.block_size + 1);
                    self.read_block(&command, status)?
                }
                ReadPosition::Until(until) => {
                    status(&format!("Read {} commits", self.total_read));
                    let command = self.factory.log_part(until, self.block_size + 1);
                    self.read_block(&command, status)?
                }
            };

            let block = self.drop_already_seen(block);
            if block.is_empty() && next_position != ReadPosition::Finished {
                if next_position == self.position {
                    return Err(GitReaderError::Protocol(format!(
                        "no new commits at {:?} after {} commits",
                        self.position, self.total_read
                    )));
                }
                // Everything in this window was returned before; move on.
                self.position = next_position;
                continue;
            }
            self.position = next_position;

            self.total_read += block.len();
            self.seen.extend(block.iter().map(|r| r.hash.clone()));
            info!(
                "read block of {} commits ({} total, next: {:?})",
                block.len(),
                self.total_read,
                next_position
            );
            return Ok(block);
        }
    }

    /// Read blocks until the empty block
    pub fn read_all(
        &mut self,
        status: &mut dyn FnMut(&str),
    ) -> Result<Vec<TimestampCommitParents>> {
        let mut all = Vec::new();
        loop {
            let block = self.read_next_block(status)?;
            if block.is_empty() {
                return Ok(all);
            }
            all.extend(block);
        }
    }

    /// One raw request plus trimming; returns the block and the position after it
    fn read_block(
        &self,
        command: &GitCommand,
        status: &mut dyn FnMut(&str),
    ) -> Result<(Vec<TimestampCommitParents>, ReadPosition)> {
        let limit = self.block_size + 1;
        let mut raw = self.read_records(command, status)?;

        if raw.len() > limit {
            return Err(GitReaderError::Protocol(format!(
                "asked for {} commits, got {}",
                limit,
                raw.len()
            )));
        }

        if raw.len() < limit {
            return Ok((raw, ReadPosition::Finished));
        }

        let last_timestamp = match raw.last() {
            Some(last) => last.timestamp,
            None => return Ok((raw, ReadPosition::Finished)),
        };
        let keep = raw
            .iter()
            .rposition(|r| r.timestamp != last_timestamp)
            .map_or(0, |i| i + 1);

        if keep == 0 {
            // The whole window is one timestamp group: fetch it whole.
            warn!(
                "{} commits share timestamp {}; reading the group in one piece",
                raw.len(),
                last_timestamp
            );
            let group = self.read_timestamp_group(last_timestamp, status)?;
            return Ok((group, ReadPosition::Until(last_timestamp.saturating_sub(1))));
        }

        debug!(
            "trimmed {} trailing commits at timestamp {}",
            raw.len() - keep,
            last_timestamp
        );
        raw.truncate(keep);
        Ok((raw, ReadPosition::Until(last_timestamp)))
    }

    fn read_timestamp_group(
        &self,
        timestamp: i64,
        status: &mut dyn FnMut(&str),
    ) -> Result<Vec<TimestampCommitParents>> {
        let command = self.factory.timestamp_group(timestamp);
        let group = self.read_records(&command, status)?;
        if let Some(stray) = group.iter().find(|r| r.timestamp != timestamp) {
            return Err(GitReaderError::Protocol(format!(
                "commit {} at {} in group for timestamp {}",
                stray.hash.short(),
                stray.timestamp,
                timestamp
            )));
        }
        Ok(group)
    }

    fn read_records(
        &self,
        command: &GitCommand,
        status: &mut dyn FnMut(&str),
    ) -> Result<Vec<TimestampCommitParents>> {
        let already_read = self.total_read;
        let step = self.progress_step;
        let mut records: Vec<TimestampCommitParents> = Vec::new();

        // Trimming relies on non-increasing timestamps; a skewed clock breaks it.
        self.runner.run_lines(command, &mut |line| {
            if line.trim().is_empty() {
                return Ok(());
            }
            let record = parse_timestamp_commit_parents(line)?;
            if let Some(prev) = records.last() {
                if record.timestamp > prev.timestamp {
                    return Err(GitReaderError::Protocol(format!(
                        "commit {} at {} follows {} at {}",
                        record.hash.short(),
                        record.timestamp,
                        prev.hash.short(),
                        prev.timestamp
                    )));
                }
            }
            records.push(record);
            if records.len() % step == 0 {
                status(&format!("Read {} commits", already_read + records.len()));
            }
            Ok(())
        })?;

        Ok(records)
    }

    fn drop_already_seen(
        &self,
        block: Vec<TimestampCommitParents>,
    ) -> Vec<TimestampCommitParents> {
        let before = block.len();
        let block: Vec<_> = block
            .into_iter()
            .filter(|r| !self.seen.contains(&r.hash))
            .collect();
        if block.len() != before {
            warn!("skipped {} commits already returned", before - block.len());
        }
        block
    }
}
