use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

use super::styles::{series_color, ChartStyle, ChartTheme};
use crate::error::RenderError;

type PlotError = Box<dyn Error + Send + Sync>;

/// How several series share a category slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarLayout {
    /// Series are stacked on top of each other.
    Stacked,
    /// Series stand side by side within the slot.
    Clustered,
}

/// Everything needed to draw one bar chart.
#[derive(Clone, Debug, PartialEq)]
pub struct BarChart<'a> {
    pub title: String,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub labels: &'a [String],
    /// Series in legend order, each with one value per label.
    pub series: Vec<(String, Vec<f64>)>,
    pub layout: BarLayout,
}

impl BarChart<'_> {
    /// Every series must have exactly one value per category.
    pub fn validate(&self) -> Result<(), RenderError> {
        for (key, values) in &self.series {
            if values.len() != self.labels.len() {
                return Err(RenderError::MismatchedCategories {
                    series: key.clone(),
                    expected: self.labels.len(),
                    found: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Upper bound of the y axis: the tallest stack or bar, with headroom.
    fn y_max(&self) -> f64 {
        let peak = match self.layout {
            BarLayout::Stacked => (0..self.labels.len())
                .map(|i| self.series.iter().map(|(_, values)| values[i]).sum::<f64>())
                .fold(0.0, f64::max),
            BarLayout::Clustered => self
                .series
                .iter()
                .flat_map(|(_, values)| values.iter().copied())
                .fold(0.0, f64::max),
        };
        if peak > 0.0 {
            peak * 1.1
        } else {
            1.0
        }
    }
}

/// Render `chart` to `path`; the file suffix (`.png` or `.svg`) picks the backend.
pub fn render_bar_chart(chart: &BarChart, path: &Path) -> Result<(), RenderError> {
    chart.validate()?;
    let style = ChartStyle::default();
    let theme = ChartTheme::default();
    let size = (style.width, style.height);

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let result = match extension.as_deref() {
        Some("png") => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_bar_chart(&root, chart, &theme, &style).and_then(|_| Ok(root.present()?))
        }
        Some("svg") => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_bar_chart(&root, chart, &theme, &style).and_then(|_| Ok(root.present()?))
        }
        _ => return Err(RenderError::UnsupportedFormat(path.to_path_buf())),
    };

    result.map_err(|e| RenderError::Backend {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Draw the chart onto any plotters drawing area
pub fn draw_bar_chart<DB>(
    root_area: &DrawingArea<DB, Shift>,
    chart: &BarChart,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root_area.fill(&theme.background_color)?;

    let categories = chart.labels.len();
    let mut chart_builder = ChartBuilder::on(root_area)
        .caption(
            &chart.title,
            ("sans-serif", style.title_font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(-0.5f64..(categories as f64 - 0.5), 0f64..chart.y_max())?;

    let labels = chart.labels;
    let x_label_formatter = move |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };

    let mut mesh = chart_builder.configure_mesh();
    mesh.disable_x_mesh()
        .bold_line_style(&theme.grid_color)
        .light_line_style(TRANSPARENT)
        .axis_style(&theme.axis_color)
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .x_labels(categories)
        .x_label_formatter(&x_label_formatter)
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        );

    // Long label sets are rotated so they don't overlap
    if categories > 12 {
        mesh.x_label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        );
    }
    mesh.draw()?;

    let half = style.bar_fill / 2.0;
    let mut stack_base = vec![0.0; categories];
    let series_count = chart.series.len().max(1);
    let bar_width = style.bar_fill / series_count as f64;

    for (j, (key, values)) in chart.series.iter().enumerate() {
        let color = series_color(j);
        let bars: Vec<Rectangle<(f64, f64)>> = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let center = i as f64;
                let corners = match chart.layout {
                    BarLayout::Stacked => [
                        (center - half, stack_base[i]),
                        (center + half, stack_base[i] + value),
                    ],
                    BarLayout::Clustered => {
                        let x0 = center - half + j as f64 * bar_width;
                        [(x0, 0.0), (x0 + bar_width, *value)]
                    }
                };
                Rectangle::new(corners, color.filled())
            })
            .collect();

        if chart.layout == BarLayout::Stacked {
            for (base, value) in stack_base.iter_mut().zip(values) {
                *base += value;
            }
        }

        chart_builder
            .draw_series(bars)?
            .label(key.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    if !chart.series.is_empty() {
        chart_builder
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&theme.background_color.mix(0.8))
            .border_style(&theme.axis_color)
            .label_font(
                ("sans-serif", style.font_size)
                    .into_font()
                    .color(&theme.text_color),
            )
            .draw()?;
    }

    Ok(())
}
