//! Runs the repository analyzer over several repositories and keeps their
//! results side by side.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::info;

use super::activity::CombinedCommitActivity;
use super::aliases::AliasTable;
use super::git::{analyze_repository, analyze_repository_async};
use crate::error::{RepoOperation, RepositoryAccessError};
use crate::types::AnalysisOptions;

/// Separator between repository names in the output label.
pub const LABEL_SEPARATOR: &str = "_and_";
/// Label used when the joined repository names are empty or too long.
pub const FALLBACK_LABEL: &str = "combined";
const MAX_LABEL_LEN: usize = 128;

/// Display name of a repository: the last path component without `.git`.
pub fn repo_display_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.strip_suffix(".git").map(str::to_string).unwrap_or(base)
}

/// Output file prefix for a set of repositories.
pub fn output_label<P: AsRef<Path>>(paths: &[P]) -> String {
    let label = paths
        .iter()
        .map(|path| repo_display_name(path.as_ref()))
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR);
    if label.is_empty() || label.chars().count() > MAX_LABEL_LEN {
        FALLBACK_LABEL.to_string()
    } else {
        label
    }
}

/// Analyze every repository in order, one at a time.
///
/// The first failing repository fails the whole run.
pub fn analyze_all<P: AsRef<Path>>(
    paths: &[P],
    options: &AnalysisOptions,
    aliases: &AliasTable,
) -> Result<(String, CombinedCommitActivity), RepositoryAccessError> {
    let start_time = Instant::now();
    info!(repos = paths.len(), mode = %options.mode, "Analyzing repositories");

    let mut combined = CombinedCommitActivity::new();
    for path in paths {
        let path = path.as_ref();
        let activity = analyze_repository(path, options, aliases)?;
        combined.add(repo_display_name(path), activity);
    }

    info!(
        repos = combined.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Analysis complete"
    );
    Ok((output_label(paths), combined))
}

/// Analyze repositories concurrently with at most `max_tasks` running at once.
///
/// Each repository gets its own blocking task, cache and accumulator; results
/// are combined in input order once all have finished.
pub async fn analyze_all_async(
    paths: Vec<PathBuf>,
    options: AnalysisOptions,
    aliases: Arc<AliasTable>,
    max_tasks: usize,
) -> Result<(String, CombinedCommitActivity), RepositoryAccessError> {
    let start_time = Instant::now();
    let max_tasks = max_tasks.clamp(1, get_optimal_task_count().max(1));
    info!(repos = paths.len(), mode = %options.mode, tasks = max_tasks, "Analyzing repositories");

    let semaphore = Arc::new(Semaphore::new(max_tasks));
    let tasks = paths.iter().cloned().map(|path| {
        let semaphore = Arc::clone(&semaphore);
        let aliases = Arc::clone(&aliases);
        async move {
            let _permit = semaphore.acquire_owned().await.map_err(|e| {
                RepositoryAccessError::new(path.clone(), RepoOperation::RunTask, e)
            })?;
            let name = repo_display_name(&path);
            analyze_repository_async(path, options, aliases)
                .await
                .map(|activity| (name, activity))
        }
    });

    let results = try_join_all(tasks).await?;

    let mut combined = CombinedCommitActivity::new();
    for (name, activity) in results {
        combined.add(name, activity);
    }

    info!(
        repos = combined.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Analysis complete"
    );
    Ok((output_label(&paths), combined))
}

/// Get optimal number of parallel tasks based on system resources
fn get_optimal_task_count() -> usize {
    let cpu_count = num_cpus::get();
    // Use 75% of available CPUs to leave room for other system processes
    (cpu_count * 3 / 4).max(1)
}
