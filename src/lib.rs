//! # authorstat - Per-filetype contribution statistics
//!
//! `authorstat` reads the history of a Git repository with `git log
//! --numstat`, keeps the commits whose author matches a pattern, and sums
//! the added lines of each commit by file extension.
//!
//! ## Features
//!
//! - Case-insensitive author matching with alternation (`"jane|jdoe"`)
//! - Per-commit records with per-file addition and deletion counts
//! - Totals keyed by filetype, skipping extensionless files and dotfiles
//! - Several repositories analyzed in parallel using rayon
//!
//! ## Example Usage
//!
//! ```no_run
//! use authorstat::{analyze_repository, QueryConfig};
//!
//! let config = QueryConfig::new().author("jane doe|jdoe");
//! let report = analyze_repository(".", config).unwrap();
//!
//! println!("Commits: {}", report.commit_count());
//! for (filetype, additions) in report.filetype_counts().ranked() {
//!     println!("{additions:>8} {filetype}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types for the crate
//! - [`config`] - Query configuration
//! - [`git`] - Log text producers
//! - [`parser`] - Commit log parsing
//! - [`numstat`] - Stat line parsing and filetype inference
//! - [`filter`] - Filetype exclusions
//! - [`aggregate`] - Per-filetype totals
//! - [`report`] - The report for one repository

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod numstat;
pub mod parser;
pub mod report;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use aggregate::FiletypeCounts;
pub use config::QueryConfig;
pub use error::{AuthorstatError, Result};
pub use filter::FiletypeFilter;
pub use git::{GitCli, LogFile, LogSource};
pub use numstat::FileChange;
pub use parser::{CommitRecord, SeparatorPolicy};
pub use report::Report;

/// Analyzes a Git repository.
///
/// Runs `git log` in `path` with the options of `config` and returns the
/// finished report.
///
/// # Errors
///
/// Returns an error if:
/// - The path is not within a Git repository
/// - The `git` command fails to execute
/// - The log output cannot be parsed
///
/// # Example
///
/// ```no_run
/// use authorstat::{analyze_repository, QueryConfig};
///
/// let report = analyze_repository(".", QueryConfig::new()).unwrap();
/// println!("{} commits, {} lines added", report.commit_count(), report.total_additions());
/// ```
pub fn analyze_repository(path: impl AsRef<Path>, config: QueryConfig) -> Result<Report> {
    analyze_with(path, config, &GitCli)
}

/// Analyzes a repository using an arbitrary log source.
pub fn analyze_with<S>(path: impl AsRef<Path>, config: QueryConfig, source: &S) -> Result<Report>
where
    S: LogSource + ?Sized,
{
    let mut report = Report::new(path.as_ref(), config);
    report.refresh(source)?;
    Ok(report)
}

/// Analyzes several repositories in parallel.
///
/// Each repository gets its own [`Report`]. Results are returned in the
/// order of `paths`, and a failure in one repository does not affect the
/// others.
///
/// # Example
///
/// ```no_run
/// use authorstat::{analyze_repositories, QueryConfig};
///
/// for (path, outcome) in analyze_repositories(["dotfiles", "website"], &QueryConfig::new()) {
///     match outcome {
///         Ok(report) => println!("{}: {}", path.display(), report.total_additions()),
///         Err(e) => eprintln!("{}: {e}", path.display()),
///     }
/// }
/// ```
pub fn analyze_repositories<I, P>(paths: I, config: &QueryConfig) -> Vec<(PathBuf, Result<Report>)>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let paths: Vec<PathBuf> = paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();

    paths
        .into_par_iter()
        .map(|path| {
            let outcome = analyze_repository(&path, config.clone());
            (path, outcome)
        })
        .collect()
}
