pub mod activity;
pub mod aliases;
mod cache;
pub mod combine;
pub mod git;


pub use activity::{
    BucketIndex, CombinedCommitActivity, CommitActivity, RepoCommitActivity, TimeBucketSet,
};
pub use aliases::{AliasTable, UNKNOWN_DEVELOPER};
pub use cache::ModificationCache;
pub use combine::{analyze_all, analyze_all_async, output_label, repo_display_name};
pub use git::{analyze_repository, analyze_repository_async};
