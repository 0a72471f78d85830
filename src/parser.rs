//! Commit log parsing.
//!
//! Turns the text produced by the configured log query into
//! [`CommitRecord`]s. The expected layout is
//!
//! ```text
//! <delim><hash> <date>
//!
//! <stat line>
//! <stat line>
//!
//! <delim><hash> <date>
//! ...
//! ```
//!
//! Parsing is pure: aggregation happens afterwards in
//! [`crate::aggregate`].

use memchr::memmem;
use serde::Serialize;

use crate::error::{AuthorstatError, FormatViolation, Result};
use crate::numstat::{FileChange, parse_stat_line};

/// One parsed commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Abbreviated commit hash.
    pub hash: String,
    /// Author date as `YYYY-MM-DD`, kept as text.
    pub date: String,
    /// Changed files, in the order git listed them.
    pub files: Vec<FileChange>,
}

/// How structural deviations in the log layout are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeparatorPolicy {
    /// Log a warning and keep parsing.
    #[default]
    Warn,
    /// Abort the parse with [`AuthorstatError::Format`].
    Strict,
}

impl SeparatorPolicy {
    fn check(self, violation: FormatViolation) -> Result<()> {
        match self {
            Self::Warn => {
                log::warn!("{violation}");
                Ok(())
            }
            Self::Strict => Err(violation.into()),
        }
    }
}

/// Parses the full output of a log query.
///
/// Records are returned in the order their blocks appear in `text`. The
/// first failing block aborts the whole parse; no partial result is
/// returned.
///
/// # Errors
///
/// - [`AuthorstatError::EmptyDelimiter`] if `delimiter` is empty
/// - [`AuthorstatError::MalformedHeader`] for a header that is not
///   exactly `<hash> <date>`
/// - [`AuthorstatError::MalformedFileLine`] for an unreadable stat line
/// - [`AuthorstatError::Format`] for layout violations under
///   [`SeparatorPolicy::Strict`]
///
/// # Example
///
/// ```
/// use authorstat::parser::{parse_log, SeparatorPolicy};
///
/// let text = "---88a3f98 2014-04-30\n\n3\t3\tREADME.md\n\n";
/// let commits = parse_log(text, "---", SeparatorPolicy::Strict).unwrap();
/// assert_eq!(commits.len(), 1);
/// assert_eq!(commits[0].files[0].filename, "README.md");
/// ```
pub fn parse_log(text: &str, delimiter: &str, policy: SeparatorPolicy) -> Result<Vec<CommitRecord>> {
    if delimiter.is_empty() {
        return Err(AuthorstatError::EmptyDelimiter);
    }

    let mut blocks = split_blocks(text, delimiter).into_iter();
    let leading = blocks.next().unwrap_or_default();
    if !leading.trim().is_empty() {
        policy.check(FormatViolation::LeadingText {
            text: leading.trim().to_string(),
        })?;
    }

    let commits = blocks
        .map(|block| parse_block(block, policy))
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Parsed {} commits", commits.len());
    Ok(commits)
}

/// Splits `text` at every occurrence of `delimiter`.
///
/// The returned vector always holds at least one element: the text before
/// the first delimiter.
fn split_blocks<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    for pos in memmem::find_iter(text.as_bytes(), delimiter.as_bytes()) {
        blocks.push(&text[start..pos]);
        start = pos + delimiter.len();
    }
    blocks.push(&text[start..]);
    blocks
}

/// Parses one commit block: header, blank separator, stat lines.
fn parse_block(block: &str, policy: SeparatorPolicy) -> Result<CommitRecord> {
    let mut lines = block.lines();
    let (hash, date) = parse_header(lines.next().unwrap_or_default())?;

    let mut body: Vec<&str> = lines.collect();
    while body.last().is_some_and(|line| line.trim().is_empty()) {
        body.pop();
    }

    let stat_lines: &[&str] = match body.split_first() {
        Some((first, rest)) if first.trim().is_empty() => rest,
        Some((first, _)) => {
            policy.check(FormatViolation::MissingSeparator {
                hash: hash.clone(),
                line: first.to_string(),
            })?;
            &body[..]
        }
        None => &[],
    };

    let files = stat_lines
        .iter()
        .map(|line| parse_stat_line(line))
        .collect::<Result<Vec<_>>>()?;

    Ok(CommitRecord { hash, date, files })
}

/// Splits a header line into its hash and date.
fn parse_header(header: &str) -> Result<(String, String)> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    match tokens.as_slice() {
        [hash, date] => Ok((hash.to_string(), date.to_string())),
        _ => Err(AuthorstatError::malformed_header(header)),
    }
}
