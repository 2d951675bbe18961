pub mod aggregation;
pub mod labels;

pub use aggregation::{group_activity, normalize, StackedSeries};
