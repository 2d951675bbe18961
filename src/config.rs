//! Validated configuration for one run.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::types::{AnalysisMode, AnalysisOptions, DateRange, GroupBy, OutputFormat};

/// Raw, unvalidated settings as they arrive from the command line.
#[derive(Clone, Debug, Default)]
pub struct RawConfig {
    pub repos: Vec<PathBuf>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub format: String,
    pub mode: String,
    pub bars: String,
    pub people: Option<PathBuf>,
    pub normalize: bool,
    pub output_dir: PathBuf,
    pub json: Option<PathBuf>,
    pub jobs: usize,
}

/// Everything a run needs, with every selector already parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzeConfig {
    pub repos: Vec<PathBuf>,
    pub options: AnalysisOptions,
    pub format: OutputFormat,
    pub group_by: GroupBy,
    pub normalize: bool,
    pub aliases_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub json: Option<PathBuf>,
    pub jobs: usize,
}

impl AnalyzeConfig {
    /// Parse and check raw settings. No repository is touched here.
    pub fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.repos.is_empty() {
            return Err(ConfigError::NoRepositories);
        }
        let range = DateRange::parse(raw.start.as_deref(), raw.end.as_deref())?;
        let mode: AnalysisMode = raw.mode.parse()?;
        let format: OutputFormat = raw.format.parse()?;
        let group_by: GroupBy = raw.bars.parse()?;

        Ok(Self {
            repos: raw.repos,
            options: AnalysisOptions { mode, range },
            format,
            group_by,
            normalize: raw.normalize,
            aliases_path: raw.people,
            output_dir: raw.output_dir,
            json: raw.json,
            jobs: raw.jobs.max(1),
        })
    }

    /// More than one job runs the repositories concurrently.
    pub fn is_parallel(&self) -> bool {
        self.jobs > 1 && self.repos.len() > 1
    }
}
