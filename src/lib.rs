//! # Git Activity Charts
//!
//! `gitactivity` analyzes the history of one or more Git repositories and
//! buckets commits, or changed lines, by the weekday, hour, month and ISO week
//! in which they happened.
//!
//! ## Features
//!
//! - Commit counting or line attribution to each file's last modification
//! - Author identities merged through a people file
//! - Inclusive date ranges
//! - Flat, per-repository or per-developer stacked bar charts (PNG or SVG)
//! - Normalized proportion charts and JSON export
//! - Bounded parallel analysis of several repositories
//!
//! ## Example
//!
//! ```no_run
//! use gitactivity::analysis::{analyze_all, AliasTable};
//! use gitactivity::types::{AnalysisOptions, Dimension, GroupBy};
//! use gitactivity::utils::group_activity;
//!
//! let aliases = AliasTable::from_lines(["Alice|alice@example.com"]);
//! let (label, combined) =
//!     analyze_all(&["/path/to/repo"], &AnalysisOptions::default(), &aliases)?;
//!
//! let by_weekday = group_activity(&combined, Dimension::Weekday, GroupBy::ByDeveloper);
//! println!("{}: {} commits", label, by_weekday.total());
//! # Ok::<(), gitactivity::error::RepositoryAccessError>(())
//! ```

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::run;
pub use config::AnalyzeConfig;
pub use error::ActivityError;
pub use types::{AnalysisMode, AnalysisOptions, DateRange};
