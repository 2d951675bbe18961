use chrono::{DateTime, FixedOffset, Utc};
use git2::{Commit, DiffOptions, ErrorCode, Oid, Patch, Repository, Sort, Tree};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::spawn_blocking;
use tracing::{debug, error, info};

use super::activity::CommitActivity;
use super::aliases::AliasTable;
use super::cache::ModificationCache;
use crate::error::{RepoOperation, RepositoryAccessError};
use crate::types::{AnalysisMode, AnalysisOptions, DateRange};

/// Analyze a Git repository on a blocking task
pub async fn analyze_repository_async(
    path: PathBuf,
    options: AnalysisOptions,
    aliases: Arc<AliasTable>,
) -> Result<CommitActivity, RepositoryAccessError> {
    let error_path = path.clone();
    spawn_blocking(move || analyze_repository(&path, &options, &aliases))
        .await
        .map_err(|e| {
            error!(repo = %error_path.display(), error = %e, panicked = e.is_panic(), "Analysis task failed");
            RepositoryAccessError::new(error_path, RepoOperation::RunTask, e)
        })?
}

/// Walk a repository's history from HEAD and bucket its activity.
///
/// Any failure aborts the whole repository; partial counts are never returned.
pub fn analyze_repository(
    path: &Path,
    options: &AnalysisOptions,
    aliases: &AliasTable,
) -> Result<CommitActivity, RepositoryAccessError> {
    let start_time = Instant::now();
    let repo = Repository::open(path).map_err(access(path, RepoOperation::Open))?;

    let mut revwalk = repo
        .revwalk()
        .map_err(access(path, RepoOperation::TraverseHistory))?;
    revwalk
        .push_head()
        .map_err(access(path, RepoOperation::ResolveHead))?;
    revwalk
        .set_sorting(Sort::TIME)
        .map_err(access(path, RepoOperation::TraverseHistory))?;

    let mut walker = HistoryWalker {
        repo: &repo,
        path,
        aliases,
        range: options.range,
        cache: ModificationCache::new(),
        activity: CommitActivity::new(),
    };

    let mut commit_count = 0usize;
    for oid in revwalk {
        let oid = oid.map_err(access(path, RepoOperation::TraverseHistory))?;
        let commit = repo
            .find_commit(oid)
            .map_err(access(path, RepoOperation::ReadCommit))?;
        match options.mode {
            AnalysisMode::Commits => walker.count_commit(&commit)?,
            AnalysisMode::Lines => walker.attribute_lines(&commit)?,
        }
        commit_count += 1;
    }

    if options.mode == AnalysisMode::Lines {
        debug!(
            repo = %path.display(),
            entries = walker.cache.len(),
            hits = walker.cache.hits(),
            misses = walker.cache.misses(),
            "Modification cache statistics"
        );
    }

    info!(
        repo = %path.display(),
        mode = %options.mode,
        commits = commit_count,
        developers = walker.activity.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Repository analyzed"
    );

    Ok(walker.activity)
}

struct HistoryWalker<'a> {
    repo: &'a Repository,
    path: &'a Path,
    aliases: &'a AliasTable,
    range: DateRange,
    cache: ModificationCache,
    activity: CommitActivity,
}

impl HistoryWalker<'_> {
    fn author(&self, commit: &Commit) -> Result<(String, DateTime<FixedOffset>), RepositoryAccessError> {
        let author = commit.author();
        let timestamp =
            signature_time(&author.when()).map_err(access(self.path, RepoOperation::ReadCommit))?;
        let developer = self.aliases.resolve(author.email().unwrap_or("")).to_string();
        Ok((developer, timestamp))
    }

    fn count_commit(&mut self, commit: &Commit) -> Result<(), RepositoryAccessError> {
        let (developer, timestamp) = self.author(commit)?;
        if self.range.contains(&timestamp) {
            self.activity.record_event(&developer, &timestamp, 1);
        }
        Ok(())
    }

    /// Attribute each touched file's churn to that file's last modification
    /// time, credited to the visiting commit's author.
    fn attribute_lines(&mut self, commit: &Commit) -> Result<(), RepositoryAccessError> {
        let (developer, timestamp) = self.author(commit)?;
        // A file's last modification can only precede the visiting commit.
        if self.range.is_before_start(&timestamp) {
            return Ok(());
        }

        let changes = file_changes(self.repo, commit)
            .map_err(access(self.path, RepoOperation::DiffStats))?;

        for change in changes {
            let repo = self.repo;
            let modified = self
                .cache
                .get_or_resolve(&change.path, commit.id(), || {
                    last_modification(repo, &change.path, commit.id()).map(|found| {
                        found.unwrap_or_else(|| {
                            debug!(file = %change.path, commit = %commit.id(), "No modifying commit found, using commit time");
                            timestamp
                        })
                    })
                })
                .map_err(access(self.path, RepoOperation::FileHistory))?;

            if !self.range.contains(&modified) {
                continue;
            }
            self.activity
                .record_event(&developer, &modified, change.added + change.deleted);
        }
        Ok(())
    }
}

/// Lines added and deleted in one file by one commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub added: u64,
    pub deleted: u64,
}

/// Per-file line statistics of `commit` against its first parent (or against
/// the empty tree for a root commit).
pub fn file_changes(repo: &Repository, commit: &Commit) -> Result<Vec<FileChange>, git2::Error> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let mut diff_opts = DiffOptions::new();
    diff_opts.include_untracked(false).context_lines(0);
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut diff_opts))?;

    let mut changes = Vec::new();
    for (idx, delta) in diff.deltas().enumerate() {
        let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
            continue;
        };
        // Binary files have no patch and carry no line counts.
        let (added, deleted) = match Patch::from_diff(&diff, idx)? {
            Some(patch) => {
                let (_, added, deleted) = patch.line_stats()?;
                (added as u64, deleted as u64)
            }
            None => (0, 0),
        };
        changes.push(FileChange {
            path: path.to_string_lossy().into_owned(),
            added,
            deleted,
        });
    }
    Ok(changes)
}

/// Author time of the most recent commit reachable from `from` (inclusive)
/// that modified `path`.
pub fn last_modification(
    repo: &Repository,
    path: &str,
    from: Oid,
) -> Result<Option<DateTime<FixedOffset>>, git2::Error> {
    let mut walk = repo.revwalk()?;
    walk.push(from)?;
    walk.set_sorting(Sort::TIME)?;

    for oid in walk {
        let commit = repo.find_commit(oid?)?;
        if modifies_path(&commit, path)? {
            return signature_time(&commit.author().when()).map(Some);
        }
    }
    Ok(None)
}

/// A commit modifies `path` when the path's entry differs from every parent.
/// Matching any parent means the change came in from elsewhere.
fn modifies_path(commit: &Commit, path: &str) -> Result<bool, git2::Error> {
    let current = entry_id(&commit.tree()?, path)?;
    if commit.parent_count() == 0 {
        return Ok(current.is_some());
    }
    for parent in commit.parents() {
        if entry_id(&parent.tree()?, path)? == current {
            return Ok(false);
        }
    }
    Ok(true)
}

fn entry_id(tree: &Tree, path: &str) -> Result<Option<Oid>, git2::Error> {
    match tree.get_path(Path::new(path)) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Convert a signature time into an instant in the signer's own offset.
pub fn signature_time(time: &git2::Time) -> Result<DateTime<FixedOffset>, git2::Error> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .ok_or_else(|| git2::Error::from_str("invalid timezone offset"))?;
    DateTime::<Utc>::from_timestamp(time.seconds(), 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| git2::Error::from_str("commit timestamp out of range"))
}

fn access(path: &Path, operation: RepoOperation) -> impl FnOnce(git2::Error) -> RepositoryAccessError + '_ {
    move |source| RepositoryAccessError::new(path, operation, source)
}
