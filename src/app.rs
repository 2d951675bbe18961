//! End-to-end run: load aliases, analyze every repository, draw the charts
//! and optionally export the grouped counts.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::analysis::{analyze_all, analyze_all_async, AliasTable, CombinedCommitActivity};
use crate::config::AnalyzeConfig;
use crate::error::{ActivityError, RenderError};
use crate::plotting::{generate_charts, ChartRequest};
use crate::types::{Dimension, GroupBy};
use crate::utils::group_activity;

/// Grouped counts of every dimension: `{dimension: {series: {label: value}}}`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ActivityExport {
    dimensions: BTreeMap<&'static str, BTreeMap<String, BTreeMap<String, u64>>>,
}

impl ActivityExport {
    pub fn new(combined: &CombinedCommitActivity, group_by: GroupBy) -> Self {
        let dimensions = Dimension::ALL
            .into_iter()
            .map(|dimension| {
                let stacked = group_activity(combined, dimension, group_by);
                (dimension.as_str(), stacked.to_label_map())
            })
            .collect();
        Self { dimensions }
    }

    pub fn get(&self, dimension: Dimension) -> Option<&BTreeMap<String, BTreeMap<String, u64>>> {
        self.dimensions.get(dimension.as_str())
    }

    /// Write pretty-printed JSON to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), RenderError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Load the alias table, or an empty one when no file was given.
pub fn load_aliases(path: Option<&Path>) -> Result<AliasTable, ActivityError> {
    match path {
        Some(path) => {
            let aliases = AliasTable::load(path)?;
            info!(path = %path.display(), developers = aliases.len(), "Loaded people file");
            Ok(aliases)
        }
        None => Ok(AliasTable::empty()),
    }
}

/// Analyze the configured repositories, sequentially or in parallel.
pub async fn analyze(
    config: &AnalyzeConfig,
    aliases: AliasTable,
) -> Result<(String, CombinedCommitActivity), ActivityError> {
    let result = if config.is_parallel() {
        analyze_all_async(
            config.repos.clone(),
            config.options,
            Arc::new(aliases),
            config.jobs,
        )
        .await?
    } else {
        analyze_all(&config.repos, &config.options, &aliases)?
    };
    Ok(result)
}

/// Run a whole analysis and return the files written.
pub async fn run(config: &AnalyzeConfig) -> Result<Vec<PathBuf>, ActivityError> {
    let aliases = load_aliases(config.aliases_path.as_deref())?;
    let (label, combined) = analyze(config, aliases).await?;

    let request = ChartRequest {
        output_dir: config.output_dir.clone(),
        output_prefix: label,
        format: config.format,
        mode: config.options.mode,
        group_by: config.group_by,
        normalize: config.normalize,
    };
    let mut written = generate_charts(&combined, &request)?;

    if let Some(json_path) = &config.json {
        ActivityExport::new(&combined, config.group_by).write_to(json_path)?;
        info!(path = %json_path.display(), "Saved JSON export");
        written.push(json_path.clone());
    }
    Ok(written)
}
