//! Turns combined activity into one bar chart per time dimension.

mod chart;
pub mod styles;

#[cfg(test)]
mod tests;

pub use chart::{draw_bar_chart, render_bar_chart, BarChart, BarLayout};

use std::path::PathBuf;
use tracing::info;

use crate::analysis::CombinedCommitActivity;
use crate::error::RenderError;
use crate::types::{AnalysisMode, Dimension, GroupBy, OutputFormat};
use crate::utils::{group_activity, normalize, StackedSeries};

/// Where and how the chart set of a run is written.
#[derive(Clone, Debug)]
pub struct ChartRequest {
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub format: OutputFormat,
    pub mode: AnalysisMode,
    pub group_by: GroupBy,
    pub normalize: bool,
}

impl ChartRequest {
    /// `{prefix}_by_{dimension}[_{grouping}][_normalized].{format}`
    pub fn file_name(&self, dimension: Dimension) -> String {
        let mut name = format!("{}_by_{}", self.output_prefix, dimension);
        if let Some(suffix) = self.group_by.suffix() {
            name.push('_');
            name.push_str(suffix);
        }
        if self.normalize {
            name.push_str("_normalized");
        }
        format!("{}.{}", name, self.format.extension())
    }

    pub fn title(&self, dimension: Dimension) -> String {
        let mut title = if self.normalize {
            format!("Normalized {}", dimension.title())
        } else {
            dimension.title().to_string()
        };
        if let Some(suffix) = self.group_by.suffix() {
            title = format!("{} ({})", title, suffix);
        }
        title
    }

    pub fn y_label(&self) -> &'static str {
        if self.normalize {
            "Proportion"
        } else {
            self.mode.unit_label()
        }
    }
}

/// Build the bar chart description for one grouped dimension.
pub fn bar_chart_for<'a>(stacked: &'a StackedSeries, request: &ChartRequest) -> BarChart<'a> {
    let dimension = stacked.dimension();
    let (series, layout) = if request.normalize {
        (normalize(stacked).into_iter().collect(), BarLayout::Clustered)
    } else {
        let series = stacked
            .series()
            .iter()
            .map(|(key, values)| (key.clone(), values.iter().map(|v| *v as f64).collect()))
            .collect();
        (series, BarLayout::Stacked)
    };

    BarChart {
        title: request.title(dimension),
        x_label: dimension.axis_label(),
        y_label: request.y_label(),
        labels: stacked.labels(),
        series,
        layout,
    }
}

/// Render every dimension's chart; stops at the first chart that fails.
pub fn generate_charts(
    combined: &CombinedCommitActivity,
    request: &ChartRequest,
) -> Result<Vec<PathBuf>, RenderError> {
    info!(
        output_prefix = %request.output_prefix,
        format = request.format.extension(),
        mode = %request.mode,
        grouping = request.group_by.suffix().unwrap_or("flat"),
        "Generating charts"
    );

    let mut written = Vec::with_capacity(Dimension::ALL.len());
    for dimension in Dimension::ALL {
        let stacked = group_activity(combined, dimension, request.group_by);
        let chart = bar_chart_for(&stacked, request);
        let path = request.output_dir.join(request.file_name(dimension));
        render_bar_chart(&chart, &path)?;
        info!(path = %path.display(), "Saved chart");
        written.push(path);
    }
    Ok(written)
}
