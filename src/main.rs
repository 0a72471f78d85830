//! authorstat - Per-filetype contribution statistics from Git history.
//!
//! This is the CLI entry point for the authorstat tool.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use authorstat::{AuthorstatError, LogFile, QueryConfig, Report, analyze_repositories, analyze_with};

/// Per-filetype contribution statistics from Git history.
///
/// Sums the lines added by matching authors across the history of one or
/// more Git repositories, grouped by file extension.
#[derive(Parser, Debug)]
#[command(name = "authorstat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Paths to Git repositories (defaults to current directory)
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Only count commits whose author matches this pattern (case-insensitive, `|` for alternatives)
    #[arg(short, long, value_name = "PATTERN")]
    author: Option<String>,

    /// Exclude a filetype from the totals (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "FILETYPE")]
    excludes: Vec<String>,

    /// Only walk history reachable from HEAD instead of all refs
    #[arg(long)]
    current_branch: bool,

    /// Include merge commits
    #[arg(long)]
    include_merges: bool,

    /// Fail on unexpected blank-line layout instead of warning
    #[arg(long)]
    strict: bool,

    /// String separating commits in the log output
    #[arg(long, value_name = "STRING")]
    delimiter: Option<String>,

    /// Read a saved log instead of running git
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Verbose mode - show each filetype with its added lines (default)
    #[arg(short, long, conflicts_with_all = ["quiet", "summary", "json"])]
    verbose: bool,

    /// Quiet mode - only show the total added lines
    #[arg(short, long, conflicts_with_all = ["verbose", "summary", "json"])]
    quiet: bool,

    /// Summary mode - show commit, line and filetype counts
    #[arg(short, long, conflicts_with_all = ["verbose", "quiet", "json"])]
    summary: bool,

    /// Print the full report as JSON
    #[arg(long, conflicts_with_all = ["verbose", "quiet", "summary"])]
    json: bool,
}

/// Output mode for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Show each filetype with its added lines.
    Verbose,
    /// Only show the total added lines.
    Quiet,
    /// Show commit, line and filetype counts.
    Summary,
    /// Serialize the whole report.
    Json,
}

impl Args {
    /// Determines the output mode based on the command-line arguments.
    fn output_mode(&self) -> OutputMode {
        if self.quiet {
            OutputMode::Quiet
        } else if self.summary {
            OutputMode::Summary
        } else if self.json {
            OutputMode::Json
        } else {
            // Default to verbose (including when -v is explicitly passed)
            OutputMode::Verbose
        }
    }

    /// Builds the query configuration from the command-line arguments.
    fn query_config(&self) -> QueryConfig {
        let mut config = QueryConfig::new();
        if let Some(author) = &self.author {
            config = config.author(author);
        }
        if let Some(delimiter) = &self.delimiter {
            config = config.delimiter(delimiter);
        }
        if self.current_branch {
            config = config.current_branch_only();
        }
        if self.include_merges {
            config = config.include_merges();
        }
        if self.strict {
            config = config.strict();
        }
        self.excludes
            .iter()
            .fold(config, |config, filetype| config.exclude_filetype(filetype))
    }
}

/// Renders one report according to the output mode.
fn render(report: &Report, mode: OutputMode) -> Result<String, serde_json::Error> {
    let out = match mode {
        OutputMode::Verbose => {
            let ranked = report.filetype_counts().ranked();
            let total = report.total_additions();

            // Calculate the width needed for line numbers
            let width = total.to_string().len().max(4);

            let mut out = String::new();
            for (filetype, additions) in ranked {
                out.push_str(&format!("{additions:>width$} {filetype}\n"));
            }
            out.push_str(&format!("{total:>width$} total\n"));
            out.push_str(&format!("Commits: {}\n", report.commit_count()));
            out
        }
        OutputMode::Quiet => format!("{}\n", report.total_additions()),
        OutputMode::Summary => format!(
            "Commits: {}\nAdditions: {}\nFiletypes: {}\n",
            report.commit_count(),
            report.total_additions(),
            report.filetype_counts().len()
        ),
        OutputMode::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
    };
    Ok(out)
}

/// Prints the reports according to the specified output mode.
fn print_results(reports: &[Report], mode: OutputMode) -> Result<(), serde_json::Error> {
    if mode == OutputMode::Json && reports.len() > 1 {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }

    for report in reports {
        if reports.len() > 1 {
            println!("{}:", report.repository().display());
        }
        print!("{}", render(report, mode)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mode = args.output_mode();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = args.query_config();
    let outcomes: Vec<(PathBuf, Result<Report, AuthorstatError>)> = match &args.log_file {
        Some(log_file) => {
            let outcome = analyze_with(log_file, config, &LogFile::new(log_file));
            vec![(log_file.clone(), outcome)]
        }
        None => analyze_repositories(&args.paths, &config),
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut failed = false;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("error: {}: {e}", path.display());
                failed = true;
            }
        }
    }

    if let Err(e) = print_results(&reports, mode) {
        eprintln!("error: {e}");
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
