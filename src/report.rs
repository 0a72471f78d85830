//! The report produced by one log query.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::aggregate::FiletypeCounts;
use crate::config::QueryConfig;
use crate::error::Result;
use crate::git::LogSource;
use crate::parser::{self, CommitRecord};

/// Commit records and per-filetype totals for one repository and query.
///
/// A report starts empty. Each successful [`Report::refresh`] or
/// [`Report::run`] replaces all of its state at once; a failed one leaves
/// it as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    repository: PathBuf,
    #[serde(skip)]
    config: QueryConfig,
    commit_count: usize,
    results: Vec<CommitRecord>,
    filetype_counts: FiletypeCounts,
}

impl Report {
    /// Creates an empty report for `repository`.
    pub fn new(repository: impl Into<PathBuf>, config: QueryConfig) -> Self {
        Self {
            repository: repository.into(),
            config,
            commit_count: 0,
            results: Vec::new(),
            filetype_counts: FiletypeCounts::new(),
        }
    }

    /// Fetches the log from `source`, parses it and aggregates it.
    ///
    /// # Errors
    ///
    /// Returns the producer's error if the query fails, or a parse error
    /// if the log text is malformed. The report is unchanged in both cases.
    pub fn refresh<S>(&mut self, source: &S) -> Result<()>
    where
        S: LogSource + ?Sized,
    {
        let text = source.fetch(&self.repository, &self.config)?;
        let results = parser::parse_log(
            &text,
            self.config.commit_delimiter(),
            self.config.separator_policy(),
        )?;
        let filetype_counts = FiletypeCounts::from_commits(&results, self.config.filter());

        log::info!(
            "{}: {} commits, {} filetypes",
            self.repository.display(),
            results.len(),
            filetype_counts.len()
        );

        self.commit_count = results.len();
        self.results = results;
        self.filetype_counts = filetype_counts;
        Ok(())
    }

    /// Refreshes the report and hands the outcome to `on_complete`.
    ///
    /// `on_complete` is called exactly once, with the finished report on
    /// success or the error on failure.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use authorstat::{GitCli, QueryConfig, Report};
    ///
    /// let mut report = Report::new(".", QueryConfig::new().author("jane"));
    /// report.run(&GitCli, |outcome| match outcome {
    ///     Ok(report) => println!("{} commits", report.commit_count()),
    ///     Err(e) => eprintln!("error: {e}"),
    /// });
    /// ```
    pub fn run<S, F>(&mut self, source: &S, on_complete: F)
    where
        S: LogSource + ?Sized,
        F: FnOnce(Result<&Self>),
    {
        match self.refresh(source) {
            Ok(()) => on_complete(Ok(&*self)),
            Err(e) => on_complete(Err(e)),
        }
    }

    pub fn repository(&self) -> &Path {
        &self.repository
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Number of commits parsed by the last successful run.
    pub fn commit_count(&self) -> usize {
        self.commit_count
    }

    /// Parsed commits, in the order the log listed them.
    pub fn results(&self) -> &[CommitRecord] {
        &self.results
    }

    pub fn filetype_counts(&self) -> &FiletypeCounts {
        &self.filetype_counts
    }

    /// Additions summed over every aggregated filetype.
    pub fn total_additions(&self) -> u64 {
        self.filetype_counts.total()
    }
}
