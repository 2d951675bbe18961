//! # Errors
//!
//! Every failure in a run falls into one of three kinds: invalid configuration
//! (detected before any repository is opened), repository access, or chart
//! rendering. All of them are fail-fast; nothing is retried.

use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid user input, rejected before analysis begins.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid date '{value}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("start date {start} is after end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("invalid format '{0}', supported formats are 'png' and 'svg'")]
    UnsupportedFormat(String),

    #[error("invalid mode '{0}', supported modes are 'commits' and 'lines'")]
    UnsupportedMode(String),

    #[error("invalid bars mode '{0}', supported modes are 'flat', 'repo' and 'dev'")]
    UnsupportedGrouping(String),

    #[error("could not read people file {path}: {source}")]
    AliasFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("at least one repository path is required")]
    NoRepositories,
}

/// The repository step that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepoOperation {
    Open,
    ResolveHead,
    TraverseHistory,
    ReadCommit,
    DiffStats,
    FileHistory,
    RunTask,
}

impl fmt::Display for RepoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RepoOperation::Open => "open repository",
            RepoOperation::ResolveHead => "resolve repository head",
            RepoOperation::TraverseHistory => "traverse commit history",
            RepoOperation::ReadCommit => "read commit",
            RepoOperation::DiffStats => "read diff statistics",
            RepoOperation::FileHistory => "query file history",
            RepoOperation::RunTask => "run analysis task",
        };
        f.write_str(text)
    }
}

/// The underlying failure behind a [`RepositoryAccessError`].
#[derive(Error, Debug)]
pub enum AccessFailure {
    #[error(transparent)]
    Git(#[from] git2::Error),

    /// The blocking analysis task panicked or was cancelled.
    #[error("{0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("task limiter closed: {0}")]
    Acquire(#[from] tokio::sync::AcquireError),
}

/// A repository could not be opened or its history could not be read.
#[derive(Error, Debug)]
#[error("could not {operation} for {}: {source}", path.display())]
pub struct RepositoryAccessError {
    pub path: PathBuf,
    pub operation: RepoOperation,
    #[source]
    pub source: AccessFailure,
}

impl RepositoryAccessError {
    pub fn new(
        path: impl Into<PathBuf>,
        operation: RepoOperation,
        source: impl Into<AccessFailure>,
    ) -> Self {
        Self {
            path: path.into(),
            operation,
            source: source.into(),
        }
    }

    /// Whether the analysis task itself failed rather than a Git operation.
    pub fn is_task_failure(&self) -> bool {
        !matches!(self.source, AccessFailure::Git(_))
    }
}

/// A chart or export file could not be produced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unsupported chart file suffix for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("series '{series}' has {found} values but the chart has {expected} categories")]
    MismatchedCategories {
        series: String,
        expected: usize,
        found: usize,
    },

    #[error("could not draw {}: {message}", path.display())]
    Backend { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize activity: {0}")]
    Export(#[from] serde_json::Error),
}

/// Any error a full run can produce.
#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryAccessError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
