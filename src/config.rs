//! Query configuration.
//!
//! A [`QueryConfig`] describes one log query: which commits to select,
//! how commit blocks are framed in the output, and how strictly that
//! output is parsed.

use crate::filter::FiletypeFilter;
use crate::parser::SeparatorPolicy;

/// ASCII record separator, the default commit delimiter.
///
/// Git C-quotes paths containing control characters, so it never occurs
/// inside stat lines, hashes or dates.
pub const DEFAULT_DELIMITER: &str = "\x1e";

/// Options for one log query and its parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    author: Option<String>,
    delimiter: String,
    all_refs: bool,
    no_merges: bool,
    separator_policy: SeparatorPolicy,
    filter: FiletypeFilter,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            author: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            all_refs: true,
            no_merges: true,
            separator_policy: SeparatorPolicy::Warn,
            filter: FiletypeFilter::new(),
        }
    }
}

impl QueryConfig {
    /// Creates the default configuration: every author, all refs, no merge
    /// commits.
    ///
    /// # Example
    ///
    /// ```
    /// use authorstat::config::QueryConfig;
    ///
    /// let config = QueryConfig::new().author("jane|jdoe").strict();
    /// assert_eq!(config.author_pattern(), Some("jane|jdoe"));
    /// assert!(config.all_refs());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the query to authors matching `pattern`.
    ///
    /// The pattern is a git regular expression matched case-insensitively,
    /// so alternations like `"jane doe|jdoe"` select several name variants.
    pub fn author(mut self, pattern: impl Into<String>) -> Self {
        self.author = Some(pattern.into());
        self
    }

    /// Uses `delimiter` to frame commit blocks instead of the record separator.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Walks only the history reachable from `HEAD`.
    pub fn current_branch_only(mut self) -> Self {
        self.all_refs = false;
        self
    }

    /// Keeps merge commits in the query.
    pub fn include_merges(mut self) -> Self {
        self.no_merges = false;
        self
    }

    /// Fails the parse on layout violations instead of warning.
    pub fn strict(mut self) -> Self {
        self.separator_policy = SeparatorPolicy::Strict;
        self
    }

    /// Leaves `filetype` out of the aggregated totals.
    pub fn exclude_filetype(mut self, filetype: impl AsRef<str>) -> Self {
        self.filter = self.filter.exclude(filetype);
        self
    }

    pub fn author_pattern(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn commit_delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn all_refs(&self) -> bool {
        self.all_refs
    }

    pub fn no_merges(&self) -> bool {
        self.no_merges
    }

    pub fn separator_policy(&self) -> SeparatorPolicy {
        self.separator_policy
    }

    pub fn filter(&self) -> &FiletypeFilter {
        &self.filter
    }
}
