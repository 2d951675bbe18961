use clap::Parser;
use std::path::PathBuf;

use crate::config::{AnalyzeConfig, RawConfig};
use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "git-activity")]
#[command(about = "Chart when commits and line changes happen across one or more Git repositories")]
#[command(version)]
pub struct Cli {
    #[arg(required = true, help = "Paths to the repositories to analyze")]
    pub repos: Vec<PathBuf>,

    #[arg(long, help = "Ignore activity before this date (YYYY-MM-DD)")]
    pub start: Option<String>,

    #[arg(long, help = "Ignore activity after this date (YYYY-MM-DD)")]
    pub end: Option<String>,

    #[arg(long, env = "GIT_ACTIVITY_FORMAT", default_value = "png", help = "Chart format: png or svg")]
    pub format: String,

    #[arg(long, env = "GIT_ACTIVITY_MODE", default_value = "commits", help = "Count commits or changed lines: commits or lines")]
    pub mode: String,

    #[arg(long, default_value = "flat", help = "Bar grouping: flat, repo or dev")]
    pub bars: String,

    #[arg(long, env = "GIT_ACTIVITY_PEOPLE", help = "File of 'Name|email|email...' lines mapping emails to developers")]
    pub people: Option<PathBuf>,

    #[arg(long, help = "Show each series as proportions of its own total")]
    pub normalize: bool,

    #[arg(long, default_value = ".", help = "Directory the charts are written to")]
    pub output_dir: PathBuf,

    #[arg(long, help = "Also write the grouped counts as JSON to this path")]
    pub json: Option<PathBuf>,

    #[arg(long, default_value_t = 1, help = "Repositories analyzed at the same time")]
    pub jobs: usize,

    #[arg(long, default_value = "info", help = "Log level when RUST_LOG is unset")]
    pub log_level: String,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn into_config(self) -> Result<AnalyzeConfig, ConfigError> {
        AnalyzeConfig::validate(RawConfig {
            repos: self.repos,
            start: self.start,
            end: self.end,
            format: self.format,
            mode: self.mode,
            bars: self.bars,
            people: self.people,
            normalize: self.normalize,
            output_dir: self.output_dir,
            json: self.json,
            jobs: self.jobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisMode, GroupBy, OutputFormat};

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["git-activity", "/repos/foo"]).unwrap();
        assert_eq!(cli.jobs, 1);
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert_eq!(cli.log_level, "info");
        assert!(!cli.normalize);
    }

    #[test]
    fn test_full_command_line() {
        let cli = Cli::try_parse_from([
            "git-activity",
            "/repos/foo",
            "/repos/bar.git",
            "--start",
            "2024-01-01",
            "--end",
            "2024-03-31",
            "--format",
            "svg",
            "--mode",
            "lines",
            "--bars",
            "repo",
            "--normalize",
            "--jobs",
            "2",
        ])
        .unwrap();

        let config = cli.into_config().unwrap();
        assert_eq!(config.repos.len(), 2);
        assert_eq!(config.options.mode, AnalysisMode::Lines);
        assert_eq!(config.format, OutputFormat::Svg);
        assert_eq!(config.group_by, GroupBy::ByRepository);
        assert!(config.normalize);
        assert!(config.is_parallel());
    }

    #[test]
    fn test_repositories_required() {
        assert!(Cli::try_parse_from(["git-activity"]).is_err());
    }

    #[test]
    fn test_invalid_date_is_config_error() {
        let cli = Cli::try_parse_from(["git-activity", "/repos/foo", "--start", "yesterday"]).unwrap();
        assert!(matches!(
            cli.into_config(),
            Err(ConfigError::InvalidDate { .. })
        ));
    }
}
