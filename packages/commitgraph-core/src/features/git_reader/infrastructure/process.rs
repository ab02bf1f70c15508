/// Git log command construction
///
/// The reader never formats arguments itself: it asks the factory for a
/// [`GitCommand`] and hands it to a [`super::runner::ProcessRunner`].
use crate::config::ReaderConfig;
use crate::shared::models::CommitHash;

/// Field separator inside one log line
pub const FIELD_SEPARATOR: &str = "|-";

/// `--format` for (hash, committer timestamp, parents)
pub const PARENTS_FORMAT: &str = "%H|-%ct|-%P";

/// `--format` for full commit metadata; subject stays last so it may contain the separator
pub const DATA_FORMAT: &str = "%H|-%P|-%an|-%ae|-%ct|-%s";

/// What a command asks for, independent of its argument spelling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCommandKind {
    /// Newest `limit` commits
    FirstPart { limit: usize },
    /// Newest `limit` commits with timestamp `<= until`
    LogPart { until: i64, limit: usize },
    /// Every commit whose timestamp is exactly `timestamp`
    TimestampGroup { timestamp: i64 },
    /// Metadata for the listed commits, in the given order
    CommitData { hashes: Vec<CommitHash> },
}

/// A git invocation: intent plus argv (without the executable)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub kind: GitCommandKind,
    pub args: Vec<String>,
}

impl GitCommand {
    /// Command line for logs
    pub fn display_line(&self) -> String {
        format!("git {}", self.args.join(" "))
    }
}

/// Builds git log commands for the reader
#[derive(Debug, Clone)]
pub struct GitProcessFactory {
    all_refs: bool,
}

impl GitProcessFactory {
    pub fn new(config: &ReaderConfig) -> Self {
        Self {
            all_refs: config.all_refs,
        }
    }

    pub fn first_part(&self, limit: usize) -> GitCommand {
        let mut args = self.parents_log_args();
        args.push("-n".to_string());
        args.push(limit.to_string());
        GitCommand {
            kind: GitCommandKind::FirstPart { limit },
            args,
        }
    }

    pub fn log_part(&self, until: i64, limit: usize) -> GitCommand {
        let mut args = self.parents_log_args();
        args.push(format!("--until={}", until));
        args.push("-n".to_string());
        args.push(limit.to_string());
        GitCommand {
            kind: GitCommandKind::LogPart { until, limit },
            args,
        }
    }

    pub fn timestamp_group(&self, timestamp: i64) -> GitCommand {
        let mut args = self.parents_log_args();
        args.push(format!("--since={}", timestamp));
        args.push(format!("--until={}", timestamp));
        GitCommand {
            kind: GitCommandKind::TimestampGroup { timestamp },
            args,
        }
    }

    pub fn commit_data(&self, hashes: &[CommitHash]) -> GitCommand {
        let mut args = vec![
            "log".to_string(),
            "--no-walk=unsorted".to_string(),
            format!("--format={}", DATA_FORMAT),
        ];
        args.extend(hashes.iter().map(|h| h.to_string()));
        GitCommand {
            kind: GitCommandKind::CommitData {
                hashes: hashes.to_vec(),
            },
            args,
        }
    }

    fn parents_log_args(&self) -> Vec<String> {
        let mut args = vec!["log".to_string()];
        if self.all_refs {
            args.push("--all".to_string());
        }
        args.push("--date-order".to_string());
        args.push(format!("--format={}", PARENTS_FORMAT));
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> GitProcessFactory {
        GitProcessFactory::new(&ReaderConfig::default())
    }

    #[test]
    fn test_first_part_args() {
        let cmd = factory().first_part(101);
        assert_eq!(cmd.kind, GitCommandKind::FirstPart { limit: 101 });
        assert_eq!(
            cmd.args,
            vec!["log", "--all", "--date-order", "--format=%H|-%ct|-%P", "-n", "101"]
        );
    }

    #[test]
    fn test_log_part_is_inclusive_until() {
        let cmd = factory().log_part(1_700_000_000, 11);
        assert!(cmd.args.contains(&"--until=1700000000".to_string()));
        assert!(cmd.display_line().starts_with("git log"));
    }

    #[test]
    fn test_head_only_when_all_refs_disabled() {
        let factory = GitProcessFactory::new(&ReaderConfig::default().all_refs(false));
        assert!(!factory.first_part(5).args.contains(&"--all".to_string()));
    }

    #[test]
    fn test_timestamp_group_bounds() {
        let cmd = factory().timestamp_group(42);
        assert!(cmd.args.contains(&"--since=42".to_string()));
        assert!(cmd.args.contains(&"--until=42".to_string()));
        assert!(!cmd.args.contains(&"-n".to_string()));
    }

    #[test]
    fn test_commit_data_lists_hashes() {
        let hashes = vec![CommitHash::new("abc1"), CommitHash::new("def2")];
        let cmd = factory().commit_data(&hashes);
        assert_eq!(&cmd.args[cmd.args.len() - 2..], &["abc1", "def2"]);
    }
}
