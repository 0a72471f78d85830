//! Log text producers.
//!
//! This module runs the history query behind a [`QueryConfig`]. The usual
//! producer is [`GitCli`], which shells out to `git log`; [`LogFile`]
//! replays log text captured earlier with the same format.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use memmap2::Mmap;

use crate::config::QueryConfig;
use crate::error::{AuthorstatError, Result};

/// Saved logs larger than this are memory-mapped instead of read (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Something that can produce the raw text of a log query.
///
/// Implementations return either the complete text or an error. They never
/// hand error output back as if it were log text.
pub trait LogSource {
    /// Runs the query described by `config` against `repository`.
    fn fetch(&self, repository: &Path, config: &QueryConfig) -> Result<String>;
}

/// Runs `git log` as a subprocess.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    /// Builds the `git` arguments for `config`.
    ///
    /// # Example
    ///
    /// ```
    /// use authorstat::config::QueryConfig;
    /// use authorstat::git::GitCli;
    ///
    /// let args = GitCli::log_args(&QueryConfig::new().author("jane"));
    /// assert!(args.contains(&"--author=jane".to_string()));
    /// assert!(args.contains(&"--format=%x1e%h %ad".to_string()));
    /// ```
    pub fn log_args(config: &QueryConfig) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--regexp-ignore-case".to_string(),
            "--extended-regexp".to_string(),
        ];
        if let Some(pattern) = config.author_pattern() {
            args.push(format!("--author={pattern}"));
        }
        if config.all_refs() {
            args.push("--all".to_string());
        }
        args.push("--date=short".to_string());
        if config.no_merges() {
            args.push("--no-merges".to_string());
        }
        args.extend(
            ["--no-renames", "--no-color", "--numstat"]
                .into_iter()
                .map(String::from),
        );
        args.push(format!(
            "--format={}%h %ad",
            format_escape(config.commit_delimiter())
        ));
        args
    }
}

impl LogSource for GitCli {
    fn fetch(&self, repository: &Path, config: &QueryConfig) -> Result<String> {
        let args = Self::log_args(config);
        log::debug!("Running git {} in {}", args.join(" "), repository.display());

        let output = Command::new("git")
            .args(&args)
            .current_dir(repository)
            .output()
            .map_err(|e| AuthorstatError::git_with_source("Failed to execute git log", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not a git repository") {
                return Err(AuthorstatError::NotAGitRepository);
            }
            if stderr.contains("does not have any commits yet") {
                log::info!("{} has no commits", repository.display());
                return Ok(String::new());
            }
            return Err(AuthorstatError::git(format!(
                "git log failed: {}",
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| AuthorstatError::utf8("git log output", e.utf8_error()))
    }
}

/// Replays log text saved to a file.
///
/// The repository path passed to [`LogSource::fetch`] is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for LogFile {
    fn fetch(&self, _repository: &Path, _config: &QueryConfig) -> Result<String> {
        let mut file = File::open(&self.path).map_err(|e| AuthorstatError::io(&self.path, e))?;
        let size = file
            .metadata()
            .map_err(|e| AuthorstatError::io(&self.path, e))?
            .len();

        if size > MMAP_THRESHOLD {
            // SAFETY: the mapping is only read and is dropped before returning
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| AuthorstatError::io(&self.path, e))?;
            let text = std::str::from_utf8(&mmap)
                .map_err(|e| AuthorstatError::utf8(self.path.display().to_string(), e))?;
            return Ok(text.to_owned());
        }

        let mut bytes = Vec::with_capacity(size as usize);
        file.read_to_end(&mut bytes)
            .map_err(|e| AuthorstatError::io(&self.path, e))?;
        String::from_utf8(bytes)
            .map_err(|e| AuthorstatError::utf8(self.path.display().to_string(), e.utf8_error()))
    }
}

/// Escapes `text` for use as a literal in a git `--format` string.
///
/// `%` is doubled and control characters become `%xNN`.
fn format_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '%' => escaped.push_str("%%"),
            c if c.is_ascii_control() => escaped.push_str(&format!("%x{:02x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}
