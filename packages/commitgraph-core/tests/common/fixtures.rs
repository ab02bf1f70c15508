//! In-memory `git log`
//!
//! Answers the reader's commands from a newest-first record list, the way
//! `git log --date-order` would.

use std::cell::RefCell;
use std::rc::Rc;

use commitgraph_core::features::git_reader::{
    format_timestamp_commit_parents, GitCommand, GitCommandKind, GitReaderError, ProcessRunner,
};
use commitgraph_core::TimestampCommitParents;

#[derive(Debug, Clone)]
pub struct FakeLog {
    records: Rc<Vec<TimestampCommitParents>>,
    commands: Rc<RefCell<Vec<GitCommandKind>>>,
}

impl FakeLog {
    pub fn new(records: Vec<TimestampCommitParents>) -> Self {
        Self {
            records: Rc::new(records),
            commands: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn records(&self) -> &[TimestampCommitParents] {
        &self.records
    }

    /// Commands issued so far, across clones
    pub fn commands(&self) -> Vec<GitCommandKind> {
        self.commands.borrow().clone()
    }

    fn data_line(record: &TimestampCommitParents) -> String {
        let parents: Vec<&str> = record.parents.iter().map(|p| p.as_str()).collect();
        format!(
            "{}|-{}|-Dev {}|-dev@example.com|-{}|-Subject of {}",
            record.hash,
            parents.join(" "),
            record.hash.short(),
            record.timestamp,
            record.hash
        )
    }
}

impl ProcessRunner for FakeLog {
    fn run_lines(
        &self,
        command: &GitCommand,
        on_line: &mut dyn FnMut(&str) -> Result<(), GitReaderError>,
    ) -> Result<(), GitReaderError> {
        self.commands.borrow_mut().push(command.kind.clone());
        let lines: Vec<String> = match &command.kind {
            GitCommandKind::FirstPart { limit } => self
                .records
                .iter()
                .take(*limit)
                .map(format_timestamp_commit_parents)
                .collect(),
            GitCommandKind::LogPart { until, limit } => self
                .records
                .iter()
                .filter(|r| r.timestamp <= *until)
                .take(*limit)
                .map(format_timestamp_commit_parents)
                .collect(),
            GitCommandKind::TimestampGroup { timestamp } => self
                .records
                .iter()
                .filter(|r| r.timestamp == *timestamp)
                .map(format_timestamp_commit_parents)
                .collect(),
            GitCommandKind::CommitData { hashes } => {
                let mut lines = Vec::with_capacity(hashes.len());
                for hash in hashes {
                    let record = self
                        .records
                        .iter()
                        .find(|r| &r.hash == hash)
                        .ok_or_else(|| {
                            GitReaderError::CommandFailed(format!("bad object {}", hash))
                        })?;
                    lines.push(Self::data_line(record));
                }
                lines
            }
        };
        for line in &lines {
            on_line(line)?;
        }
        Ok(())
    }
}
