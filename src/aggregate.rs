//! Per-filetype aggregation of added lines.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::FiletypeFilter;
use crate::numstat::FileChange;
use crate::parser::CommitRecord;

/// Added lines keyed by filetype.
///
/// Only filetypes that were actually observed appear as keys. Files
/// without an inferable filetype never contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FiletypeCounts(BTreeMap<String, u64>);

impl FiletypeCounts {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the additions of `change` to its filetype's total.
    ///
    /// Changes without a filetype are ignored.
    pub fn record(&mut self, change: &FileChange) {
        if let Some(filetype) = &change.filetype {
            let total = self.0.entry(filetype.clone()).or_insert(0);
            *total = total.saturating_add(change.additions);
        }
    }

    /// Folds every file change of `commits` into a fresh mapping.
    ///
    /// Filetypes rejected by `filter` are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use authorstat::aggregate::FiletypeCounts;
    /// use authorstat::filter::FiletypeFilter;
    /// use authorstat::parser::{parse_log, SeparatorPolicy};
    ///
    /// let text = "---88a3f98 2014-04-30\n\n3\t3\tREADME.md\n5\t0\tvimrc\n\n";
    /// let commits = parse_log(text, "---", SeparatorPolicy::Strict).unwrap();
    /// let counts = FiletypeCounts::from_commits(&commits, &FiletypeFilter::new());
    ///
    /// assert_eq!(counts.get("md"), Some(3));
    /// assert_eq!(counts.len(), 1);
    /// ```
    pub fn from_commits<'a, I>(commits: I, filter: &FiletypeFilter) -> Self
    where
        I: IntoIterator<Item = &'a CommitRecord>,
    {
        commits
            .into_iter()
            .flat_map(|commit| &commit.files)
            .filter(|change| {
                change
                    .filetype
                    .as_deref()
                    .is_some_and(|filetype| filter.accepts(filetype))
            })
            .fold(Self::new(), |mut counts, change| {
                counts.record(change);
                counts
            })
    }

    /// The total for `filetype`, if it was observed.
    pub fn get(&self, filetype: &str) -> Option<u64> {
        self.0.get(filetype).copied()
    }

    /// Number of distinct filetypes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no filetype was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(filetype, additions)` in filetype order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(filetype, total)| (filetype.as_str(), *total))
    }

    /// Sum of all totals.
    pub fn total(&self) -> u64 {
        self.0.values().fold(0, |acc, n| acc.saturating_add(*n))
    }

    /// Entries sorted by additions, largest first, ties broken by name.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(files: Vec<FileChange>) -> CommitRecord {
        CommitRecord {
            hash: "88a3f98".to_string(),
            date: "2014-04-30".to_string(),
            files,
        }
    }

    #[test]
    fn test_record_skips_unclassified() {
        let mut counts = FiletypeCounts::new();
        counts.record(&FileChange::new("README.md", 3, None));
        counts.record(&FileChange::new("vimrc", 5, None));

        assert_eq!(counts.get("md"), Some(3));
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_record_accumulates() {
        let mut counts = FiletypeCounts::new();
        counts.record(&FileChange::new("a.rs", 10, Some(1)));
        counts.record(&FileChange::new("src/b.rs", 7, Some(0)));
        counts.record(&FileChange::new("logo.png", 0, Some(0)));

        assert_eq!(counts.get("rs"), Some(17));
        assert_eq!(counts.get("png"), Some(0));
        assert_eq!(counts.get("md"), None);
    }

    #[test]
    fn test_from_commits_spans_all_commits() {
        let commits = vec![
            commit(vec![
                FileChange::new("README.md", 3, Some(3)),
                FileChange::new("aliases.source", 0, Some(2)),
            ]),
            commit(vec![
                FileChange::new("vimrc", 0, Some(65)),
                FileChange::new("docs/guide.md", 4, Some(0)),
            ]),
        ];

        let counts = FiletypeCounts::from_commits(&commits, &FiletypeFilter::new());

        assert_eq!(counts.get("md"), Some(7));
        assert_eq!(counts.get("source"), Some(0));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_from_commits_respects_filter() {
        let commits = vec![commit(vec![
            FileChange::new("Cargo.lock", 400, Some(0)),
            FileChange::new("src/main.rs", 12, Some(0)),
        ])];
        let filter = FiletypeFilter::new().exclude("lock");

        let counts = FiletypeCounts::from_commits(&commits, &filter);

        assert_eq!(counts.get("lock"), None);
        assert_eq!(counts.get("rs"), Some(12));
    }

    #[test]
    fn test_ranked_orders_by_additions_then_name() {
        let mut counts = FiletypeCounts::new();
        counts.record(&FileChange::new("a.md", 3, None));
        counts.record(&FileChange::new("b.rs", 10, None));
        counts.record(&FileChange::new("c.go", 3, None));

        assert_eq!(counts.ranked(), vec![("rs", 10), ("go", 3), ("md", 3)]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut counts = FiletypeCounts::new();
        counts.record(&FileChange::new("README.md", 3, None));

        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"md":3}"#);
    }
}
