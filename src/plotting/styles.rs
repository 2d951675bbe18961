use plotters::style::{HSLColor, RGBAColor};

/// Number of distinct hues before series colours repeat.
pub const PALETTE_SIZE: usize = 16;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(20, 20, 20, 0.9),
            grid_color: RGBAColor(0, 0, 0, 0.12),
            axis_color: RGBAColor(0, 0, 0, 0.8),
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub title_font_size: u32,
    pub font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Fraction of a category slot covered by its bars.
    pub bar_fill: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 600,
            title_font_size: 30,
            font_size: 15,
            margin: 10,
            label_area_size: 60,
            bar_fill: 0.8,
        }
    }
}

/// Colour of the `index`-th series: evenly spaced hues, cycling after
/// [`PALETTE_SIZE`] series.
pub fn series_color(index: usize) -> HSLColor {
    let hue = (index % PALETTE_SIZE) as f64 / PALETTE_SIZE as f64;
    HSLColor(hue, 0.7, 0.55)
}
