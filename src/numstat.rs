//! Stat line parsing.
//!
//! A stat line is one row of `git log --numstat` output:
//! `<additions>\t<deletions>\t<filename>`. Binary files report `-` in place
//! of both counts.

use memchr::memrchr;
use serde::Serialize;

use crate::error::{AuthorstatError, Result};

/// The value of a single count field on a stat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatValue {
    /// The field held a line count.
    Numeric(u64),
    /// The field held no digits at all, e.g. the `-` binary marker.
    NonNumeric,
}

impl StatValue {
    /// Reads a count field.
    ///
    /// Non-digit characters are stripped first, so `"12"` and `" 12 "` both
    /// read as `Numeric(12)` and `"-"` reads as `NonNumeric`. Returns `None`
    /// only when the digits do not fit in a `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use authorstat::numstat::StatValue;
    ///
    /// assert_eq!(StatValue::parse("42"), Some(StatValue::Numeric(42)));
    /// assert_eq!(StatValue::parse("-"), Some(StatValue::NonNumeric));
    /// ```
    pub fn parse(field: &str) -> Option<Self> {
        let digits: String = field.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Some(Self::NonNumeric);
        }
        digits.parse().ok().map(Self::Numeric)
    }

    /// Returns the count, substituting 0 for a non-numeric field.
    ///
    /// Binary files are counted as contributing no lines rather than an
    /// unknown amount.
    pub fn or_zero(self) -> u64 {
        match self {
            Self::Numeric(n) => n,
            Self::NonNumeric => 0,
        }
    }

    /// Returns `true` for [`StatValue::NonNumeric`].
    pub fn is_non_numeric(self) -> bool {
        matches!(self, Self::NonNumeric)
    }
}

/// One file's entry within a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Lines added, 0 for binary files.
    pub additions: u64,
    /// Lines removed, 0 for binary files. `None` when the line carried
    /// only an addition count.
    pub deletions: Option<u64>,
    /// Whether any count on the line was the binary marker.
    pub binary: bool,
    /// Path of the file as reported by git.
    pub filename: String,
    /// Extension used for aggregation, if one can be inferred.
    pub filetype: Option<String>,
}

impl FileChange {
    /// Builds a file change, inferring its filetype from `filename`.
    pub fn new(filename: impl Into<String>, additions: u64, deletions: Option<u64>) -> Self {
        let filename = filename.into();
        let filetype = classify(&filename).map(String::from);
        Self {
            additions,
            deletions,
            binary: false,
            filename,
            filetype,
        }
    }
}

/// Infers the filetype of a reported path.
///
/// The whole path is split on `.`. Returns the last piece, or `None` if the
/// path has no `.`, starts with one (dotfiles and dot-directories), or ends
/// with one.
///
/// # Example
///
/// ```
/// use authorstat::numstat::classify;
///
/// assert_eq!(classify("README.md"), Some("md"));
/// assert_eq!(classify("sources/aliases.source"), Some("source"));
/// assert_eq!(classify("archive.tar.gz"), Some("gz"));
/// assert_eq!(classify("configs/vimrc"), None);
/// assert_eq!(classify(".bashrc"), None);
/// assert_eq!(classify(".github/workflows/ci.yml"), None);
/// ```
pub fn classify(filename: &str) -> Option<&str> {
    let mut pieces = filename.split('.');
    let first = pieces.next()?;
    let last = pieces.last()?;
    if first.is_empty() || last.is_empty() {
        return None;
    }
    Some(last)
}

/// Parses a single stat line into a [`FileChange`].
///
/// The last tab-separated field is the filename. The first field is the
/// addition count and, when at least three fields are present, the second
/// is the deletion count.
///
/// # Errors
///
/// Returns [`AuthorstatError::MalformedFileLine`] if the line has no tab,
/// the filename is empty, or a count overflows.
///
/// # Example
///
/// ```
/// use authorstat::numstat::parse_stat_line;
///
/// let change = parse_stat_line("-\t-\tlogo.png").unwrap();
/// assert_eq!(change.additions, 0);
/// assert_eq!(change.deletions, Some(0));
/// assert!(change.binary);
/// ```
pub fn parse_stat_line(line: &str) -> Result<FileChange> {
    let malformed = || AuthorstatError::malformed_file_line(line);

    let last_tab = memrchr(b'\t', line.as_bytes()).ok_or_else(malformed)?;
    let filename = &line[last_tab + 1..];
    if filename.is_empty() {
        return Err(malformed());
    }

    let mut fields = line[..last_tab].split('\t');
    let additions = fields
        .next()
        .and_then(StatValue::parse)
        .ok_or_else(malformed)?;
    let deletions = match fields.next() {
        Some(field) => Some(StatValue::parse(field).ok_or_else(malformed)?),
        None => None,
    };

    let binary = additions.is_non_numeric() || deletions.is_some_and(StatValue::is_non_numeric);

    Ok(FileChange {
        binary,
        ..FileChange::new(filename, additions.or_zero(), deletions.map(StatValue::or_zero))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("vimrc"), None);
        assert_eq!(classify(".bashrc"), None);
        assert_eq!(classify("a.b.c"), Some("c"));
        assert_eq!(classify("README.md"), Some("md"));
    }

    #[test]
    fn test_classify_splits_full_path() {
        assert_eq!(classify("configs/vimrc"), None);
        assert_eq!(classify("configs/.bashrc"), Some("bashrc"));
        assert_eq!(classify("v1.2/Makefile"), Some("2/Makefile"));
        assert_eq!(classify("src/lib.rs"), Some("rs"));
    }

    #[test]
    fn test_classify_path_under_dot_directory() {
        assert_eq!(classify(".github/workflows/ci.yml"), None);
        assert_eq!(classify(".config/nvim/init.lua"), None);
    }

    #[test]
    fn test_dot_directory_contributes_nothing() {
        let change = parse_stat_line("4\t0\t.github/workflows/ci.yml").unwrap();
        assert_eq!(change.filetype, None);

        let mut counts = crate::aggregate::FiletypeCounts::new();
        counts.record(&change);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_classify_keeps_case_and_last_extension_only() {
        assert_eq!(classify("Photo.JPG"), Some("JPG"));
        assert_eq!(classify("archive.tar.gz"), Some("gz"));
        assert_eq!(classify(".eslintrc.json"), None);
        assert_eq!(classify("trailing."), None);
    }

    #[test]
    fn test_stat_value_parse() {
        assert_eq!(StatValue::parse("0"), Some(StatValue::Numeric(0)));
        assert_eq!(StatValue::parse("65"), Some(StatValue::Numeric(65)));
        assert_eq!(StatValue::parse("-"), Some(StatValue::NonNumeric));
        assert_eq!(StatValue::parse(""), Some(StatValue::NonNumeric));
        assert_eq!(StatValue::parse(" 7\r"), Some(StatValue::Numeric(7)));
        assert_eq!(StatValue::parse("99999999999999999999999"), None);
    }

    #[test]
    fn test_stat_value_or_zero() {
        assert_eq!(StatValue::Numeric(12).or_zero(), 12);
        assert_eq!(StatValue::NonNumeric.or_zero(), 0);
    }

    #[test]
    fn test_parse_stat_line_text_file() {
        let change = parse_stat_line("3\t1\tREADME.md").unwrap();
        assert_eq!(change.additions, 3);
        assert_eq!(change.deletions, Some(1));
        assert!(!change.binary);
        assert_eq!(change.filename, "README.md");
        assert_eq!(change.filetype.as_deref(), Some("md"));
    }

    #[test]
    fn test_parse_stat_line_binary_marker() {
        let change = parse_stat_line("-\t-\tbinary.png").unwrap();
        assert_eq!(change.additions, 0);
        assert_eq!(change.deletions, Some(0));
        assert!(change.binary);
        assert_eq!(change.filetype.as_deref(), Some("png"));
    }

    #[test]
    fn test_parse_stat_line_without_deletions() {
        let change = parse_stat_line("5\tsrc/main.rs").unwrap();
        assert_eq!(change.additions, 5);
        assert_eq!(change.deletions, None);
        assert_eq!(change.filename, "src/main.rs");
    }

    #[test]
    fn test_parse_stat_line_filename_is_last_field() {
        let change = parse_stat_line("1\t2\textra\tdocs/guide.md").unwrap();
        assert_eq!(change.additions, 1);
        assert_eq!(change.deletions, Some(2));
        assert_eq!(change.filename, "docs/guide.md");
    }

    #[test]
    fn test_parse_stat_line_unclassified() {
        let change = parse_stat_line("0\t65\tvimrc").unwrap();
        assert_eq!(change.filetype, None);
    }

    #[test]
    fn test_parse_stat_line_missing_filename() {
        assert!(matches!(
            parse_stat_line("3"),
            Err(AuthorstatError::MalformedFileLine { .. })
        ));
        assert!(matches!(
            parse_stat_line("3\t3\t"),
            Err(AuthorstatError::MalformedFileLine { .. })
        ));
        assert!(matches!(
            parse_stat_line(""),
            Err(AuthorstatError::MalformedFileLine { .. })
        ));
    }
}
