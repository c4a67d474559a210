use serde::{Deserialize, Serialize};

use super::day_range::DayRange;

/// Everything a frontend needs to draw the price chart for one coin.
///
/// The core computes labels, series and formatted strings; the frontend
/// only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    /// Heading, e.g. "Bitcoin/BTC"
    pub title: String,

    /// Current price formatted for display, e.g. "$50,000.00"
    pub price_label: String,

    /// Range the labels were formatted for
    pub days: DayRange,

    /// X-axis labels, one per price
    pub labels: Vec<String>,

    /// Y values in USD, oldest first
    pub prices: Vec<f64>,

    /// Drawing configuration
    pub options: ChartOptions,
}

/// Line-chart configuration in the shape most JS/WASM charting
/// front-ends expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Dataset label shown in tooltips
    pub series_label: String,
    pub line: LineStyle,
    pub legend_visible: bool,
    pub tooltip: TooltipStyle,
    pub x_axis: AxisStyle,
    pub y_axis: AxisStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub border_color: String,
    /// Vertical fill under the line, top colour first
    pub fill_gradient: Vec<GradientStop>,
    pub tension: f64,
    pub point_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// 0.0 = top of the plot, 1.0 = bottom
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipMode {
    /// All datasets at the hovered x index
    Index,
    /// Only the nearest point
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipStyle {
    pub mode: TooltipMode,
    pub intersect: bool,
    pub background_color: String,
    pub title_color: String,
    pub body_color: String,
    pub border_color: String,
    pub border_width: u32,
    pub padding: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    /// Use the label text as-is
    Plain,
    /// "$" followed by the value to two decimals
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub tick_color: String,
    pub tick_format: TickFormat,
    pub grid_color: String,
    pub min_rotation: u32,
    pub max_rotation: u32,
}
