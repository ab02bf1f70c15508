//! Log line parsing
//!
//! Pure functions; one line in, one record (or a parse error) out.

use super::error::{GitReaderError, Result};
use super::process::FIELD_SEPARATOR;
use crate::features::git_reader::domain::{CommitData, TimestampCommitParents};
use crate::shared::models::CommitHash;

/// Parse `<hash>|-<timestamp>|-<parent> <parent>...`
pub fn parse_timestamp_commit_parents(line: &str) -> Result<TimestampCommitParents> {
    let fields: Vec<&str> = line.splitn(3, FIELD_SEPARATOR).collect();
    if fields.len() != 3 {
        return Err(GitReaderError::parse(line, "expected 3 fields"));
    }

    let hash = parse_hash(line, fields[0])?;
    let timestamp = parse_timestamp(line, fields[1])?;
    let parents = parse_parents(line, fields[2])?;

    Ok(TimestampCommitParents::new(hash, timestamp, parents))
}

/// Parse `<hash>|-<parents>|-<author>|-<email>|-<timestamp>|-<subject>`
pub fn parse_commit_data(line: &str) -> Result<CommitData> {
    let fields: Vec<&str> = line.splitn(6, FIELD_SEPARATOR).collect();
    if fields.len() != 6 {
        return Err(GitReaderError::parse(line, "expected 6 fields"));
    }

    Ok(CommitData {
        hash: parse_hash(line, fields[0])?,
        parents: parse_parents(line, fields[1])?,
        author: fields[2].to_string(),
        author_email: fields[3].to_string(),
        timestamp: parse_timestamp(line, fields[4])?,
        subject: fields[5].to_string(),
    })
}

/// Render a record in the `PARENTS_FORMAT` line shape
pub fn format_timestamp_commit_parents(record: &TimestampCommitParents) -> String {
    let parents: Vec<&str> = record.parents.iter().map(|p| p.as_str()).collect();
    format!(
        "{}{sep}{}{sep}{}",
        record.hash,
        record.timestamp,
        parents.join(" "),
        sep = FIELD_SEPARATOR
    )
}

fn parse_hash(line: &str, field: &str) -> Result<CommitHash> {
    field
        .parse()
        .map_err(|e: crate::shared::models::InvalidCommitHash| {
            GitReaderError::parse(line, e.to_string())
        })
}

fn parse_timestamp(line: &str, field: &str) -> Result<i64> {
    field
        .trim()
        .parse()
        .map_err(|_| GitReaderError::parse(line, format!("bad timestamp '{}'", field)))
}

fn parse_parents(line: &str, field: &str) -> Result<Vec<CommitHash>> {
    field
        .split_whitespace()
        .map(|p| parse_hash(line, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_parents_line() {
        let record = parse_timestamp_commit_parents("a1|-1700000000|-b2 c3").unwrap();
        assert_eq!(record.hash, CommitHash::new("a1"));
        assert_eq!(record.timestamp, 1_700_000_000);
        assert_eq!(record.parents, vec![CommitHash::new("b2"), CommitHash::new("c3")]);
    }

    #[test]
    fn test_parse_root_commit() {
        let record = parse_timestamp_commit_parents("a1|-5|-").unwrap();
        assert!(record.parents.is_empty());
    }

    #[test]
    fn test_parse_parents_malformed() {
        assert!(parse_timestamp_commit_parents("a1 5 b2").is_err());
        assert!(parse_timestamp_commit_parents("a1|-soon|-b2").is_err());
        assert!(parse_timestamp_commit_parents("zz|-5|-b2").is_err());
        assert!(parse_timestamp_commit_parents("a1|-5|-b2 nothex").is_err());
    }

    #[test]
    fn test_format_matches_parse() {
        let record = TimestampCommitParents::new(
            CommitHash::new("a1"),
            7,
            vec![CommitHash::new("b2"), CommitHash::new("c3")],
        );
        let line = format_timestamp_commit_parents(&record);
        assert_eq!(line, "a1|-7|-b2 c3");
        assert_eq!(parse_timestamp_commit_parents(&line).unwrap(), record);
    }

    #[test]
    fn test_parse_commit_data_subject_with_separator() {
        let data =
            parse_commit_data("a1|-b2|-Ann Smith|-ann@example.com|-1700000000|-fix: a|-b parsing")
                .unwrap();
        assert_eq!(data.author, "Ann Smith");
        assert_eq!(data.author_email, "ann@example.com");
        assert_eq!(data.timestamp, 1_700_000_000);
        assert_eq!(data.subject, "fix: a|-b parsing");
        assert_eq!(data.parents, vec![CommitHash::new("b2")]);
    }

    #[test]
    fn test_parse_commit_data_too_few_fields() {
        let err = parse_commit_data("a1|-b2|-Ann").unwrap_err();
        assert!(matches!(err, GitReaderError::Parse { .. }));
    }
}
