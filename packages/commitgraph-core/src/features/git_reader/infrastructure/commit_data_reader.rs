/// Full metadata for selected commits
use super::error::{GitReaderError, Result};
use super::parser::parse_commit_data;
use super::process::GitProcessFactory;
use super::runner::ProcessRunner;
use crate::features::git_reader::domain::CommitData;
use crate::shared::models::CommitHash;
use tracing::debug;

/// Hashes per `git log --no-walk` invocation; keeps argv well under ARG_MAX
pub const COMMIT_DATA_CHUNK_SIZE: usize = 500;

/// Reads [`CommitData`] records; keeps no state between calls
pub struct CommitDataReader<R: ProcessRunner> {
    runner: R,
    factory: GitProcessFactory,
    chunk_size: usize,
}

impl<R: ProcessRunner> CommitDataReader<R> {
    pub fn new(runner: R, factory: GitProcessFactory) -> Self {
        Self {
            runner,
            factory,
            chunk_size: COMMIT_DATA_CHUNK_SIZE,
        }
    }

    /// Builder: hashes per git invocation (at least 1)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Metadata of exactly one commit
    pub fn read_commit_data(&self, hash: &CommitHash) -> Result<CommitData> {
        let command = self.factory.commit_data(std::slice::from_ref(hash));
        let mut found: Option<CommitData> = None;

        self.runner.run_lines(&command, &mut |line| {
            if found.is_some() {
                return Err(GitReaderError::Protocol(format!(
                    "second line received for single commit {}",
                    hash.short()
                )));
            }
            found = Some(parse_commit_data(line)?);
            Ok(())
        })?;

        found.ok_or_else(|| {
            GitReaderError::Protocol(format!("no output for commit {}", hash.short()))
        })
    }

    /// Metadata of several commits, in output order
    ///
    /// Long lists are split over several git invocations.
    pub fn read_commits_data(&self, hashes: &[CommitHash]) -> Result<Vec<CommitData>> {
        let mut commits = Vec::with_capacity(hashes.len());
        for chunk in hashes.chunks(self.chunk_size) {
            let command = self.factory.commit_data(chunk);
            self.runner.run_lines(&command, &mut |line| {
                commits.push(parse_commit_data(line)?);
                Ok(())
            })?;
        }

        debug!("read metadata for {} commits", commits.len());
        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::features::git_reader::infrastructure::process::{GitCommand, GitCommandKind};
    use std::cell::{Cell, RefCell};

    /// Replays fixed lines and counts invocations
    struct ScriptedRunner {
        lines: Vec<&'static str>,
        calls: Cell<usize>,
    }

    impl ScriptedRunner {
        fn new(lines: Vec<&'static str>) -> Self {
            Self {
                lines,
                calls: Cell::new(0),
            }
        }
    }

    impl ProcessRunner for ScriptedRunner {
        fn run_lines(
            &self,
            _command: &GitCommand,
            on_line: &mut dyn FnMut(&str) -> Result<()>,
        ) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            for line in &self.lines {
                on_line(line)?;
            }
            Ok(())
        }
    }

    fn reader(lines: Vec<&'static str>) -> CommitDataReader<ScriptedRunner> {
        CommitDataReader::new(
            ScriptedRunner::new(lines),
            GitProcessFactory::new(&ReaderConfig::default()),
        )
    }

    #[test]
    fn test_read_single_commit() {
        let reader = reader(vec!["a1|-b2|-Ann|-ann@x|-10|-subject"]);
        let data = reader.read_commit_data(&CommitHash::new("a1")).unwrap();
        assert_eq!(data.subject, "subject");
    }

    #[test]
    fn test_read_single_commit_extra_line_is_protocol_error() {
        let reader = reader(vec!["a1|-|-Ann|-ann@x|-10|-one", "b2|-|-Bob|-bob@x|-9|-two"]);
        let err = reader.read_commit_data(&CommitHash::new("a1")).unwrap_err();
        assert!(matches!(err, GitReaderError::Protocol(_)));
    }

    #[test]
    fn test_read_single_commit_no_output() {
        let reader = reader(vec![]);
        let err = reader.read_commit_data(&CommitHash::new("a1")).unwrap_err();
        assert!(matches!(err, GitReaderError::Protocol(_)));
    }

    #[test]
    fn test_read_many_keeps_order() {
        let reader = reader(vec!["b2|-|-Bob|-bob@x|-9|-two", "a1|-b2|-Ann|-ann@x|-10|-one"]);
        let hashes = vec![CommitHash::new("b2"), CommitHash::new("a1")];
        let data = reader.read_commits_data(&hashes).unwrap();
        let got: Vec<&str> = data.iter().map(|d| d.hash.as_str()).collect();
        assert_eq!(got, vec!["b2", "a1"]);
    }

    #[test]
    fn test_read_many_empty_input_skips_process() {
        let reader = reader(vec!["a1|-|-Ann|-ann@x|-10|-one"]);
        assert!(reader.read_commits_data(&[]).unwrap().is_empty());
        assert_eq!(reader.runner.calls.get(), 0);
    }

    /// Answers each hash with a synthetic line, remembering chunk sizes
    #[derive(Default)]
    struct EchoRunner {
        chunks: RefCell<Vec<usize>>,
    }

    impl ProcessRunner for EchoRunner {
        fn run_lines(
            &self,
            command: &GitCommand,
            on_line: &mut dyn FnMut(&str) -> Result<()>,
        ) -> Result<()> {
            let hashes = match &command.kind {
                GitCommandKind::CommitData { hashes } => hashes,
                other => panic!("unexpected command {:?}", other),
            };
            self.chunks.borrow_mut().push(hashes.len());
            for hash in hashes {
                on_line(&format!("{}|-|-Ann|-ann@x|-10|-subject", hash))?;
            }
            Ok(())
        }
    }

    #[test]
    fn test_read_many_splits_long_lists() {
        let runner = EchoRunner::default();
        let reader =
            CommitDataReader::new(&runner, GitProcessFactory::new(&ReaderConfig::default()));
        let hashes: Vec<CommitHash> = (0..1201)
            .map(|i| CommitHash::new(format!("{:x}", i + 1)))
            .collect();

        let data = reader.read_commits_data(&hashes).unwrap();

        assert_eq!(*runner.chunks.borrow(), vec![500, 500, 201]);
        let got: Vec<&CommitHash> = data.iter().map(|d| &d.hash).collect();
        let expected: Vec<&CommitHash> = hashes.iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_parse_failure_aborts() {
        let reader = reader(vec!["a1|-|-Ann|-ann@x|-10|-one", "broken"]);
        let hashes = vec![CommitHash::new("a1"), CommitHash::new("b2")];
        assert!(reader.read_commits_data(&hashes).is_err());
    }
}
