use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::models::chart::{
    AxisStyle, ChartOptions, ChartView, GradientStop, LineStyle, TickFormat, TooltipMode,
    TooltipStyle,
};
use crate::models::day_range::DayRange;
use crate::models::record::{CryptoRecord, HistoryPoint};

const ACCENT: &str = "#facc15";
const TICK_COLOR: &str = "#9ca3af";
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.05)";

/// Turns a fetched record into chart-ready data.
///
/// Pure: the output depends only on the arguments and the label offset
/// chosen at construction. Nothing is retained between renders.
#[derive(Debug, Clone)]
pub struct ChartService {
    label_offset: FixedOffset,
}

impl ChartService {
    /// Labels in UTC.
    pub fn new() -> Self {
        Self::with_offset(Utc.fix())
    }

    pub fn with_offset(label_offset: FixedOffset) -> Self {
        Self { label_offset }
    }

    /// Build the chart for one coin.
    ///
    /// - Intraday ranges label each point "hh:mm AM/PM".
    /// - Longer ranges label each point "Mon D".
    pub fn render(
        &self,
        history: &[HistoryPoint],
        name: &str,
        symbol: &str,
        current_price: f64,
        days: DayRange,
    ) -> ChartView {
        let labels = history
            .iter()
            .map(|p| self.format_label(p.timestamp_ms, days))
            .collect();
        let prices = history.iter().map(|p| p.price_usd).collect();

        ChartView {
            title: format!("{name}/{}", symbol.to_uppercase()),
            price_label: format_usd(current_price),
            days,
            labels,
            prices,
            options: default_options(),
        }
    }

    pub fn render_record(&self, record: &CryptoRecord, days: DayRange) -> ChartView {
        self.render(
            &record.history,
            &record.name,
            &record.symbol,
            record.price_usd,
            days,
        )
    }

    /// X-axis label for a millisecond timestamp.
    /// Timestamps chrono cannot represent yield an empty label.
    pub fn format_label(&self, timestamp_ms: i64, days: DayRange) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp_millis(timestamp_ms) else {
            return String::new();
        };
        let local = utc.with_timezone(&self.label_offset);
        if days.is_intraday() {
            local.format("%I:%M %p").to_string()
        } else {
            local.format("%b %-d").to_string()
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

// ── Formatting ──────────────────────────────────────────────────────

/// Display price: "$" + thousands separators + 2 or 3 fraction digits.
///
/// `50000.0` → `"$50,000.00"`, `0.1234` → `"$0.123"`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "000"));
    let frac = frac.strip_suffix('0').unwrap_or(frac);
    format!("{sign}${}.{frac}", group_thousands(int_part))
}

/// Y-axis tick: "$" + value to two decimals, no separators.
pub fn format_tick(value: f64) -> String {
    format!("${value:.2}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The dashboard's line-chart look: yellow line over a fading fill,
/// no legend, dark index tooltip, currency y axis.
pub fn default_options() -> ChartOptions {
    ChartOptions {
        series_label: "Price (USD)".to_string(),
        line: LineStyle {
            border_color: ACCENT.to_string(),
            fill_gradient: vec![
                GradientStop {
                    offset: 0.0,
                    color: "rgba(250, 204, 21, 0.3)".to_string(),
                },
                GradientStop {
                    offset: 1.0,
                    color: "rgba(250, 204, 21, 0)".to_string(),
                },
            ],
            tension: 0.4,
            point_radius: 0.0,
        },
        legend_visible: false,
        tooltip: TooltipStyle {
            mode: TooltipMode::Index,
            intersect: false,
            background_color: "#1f2937".to_string(),
            title_color: ACCENT.to_string(),
            body_color: "#e5e7eb".to_string(),
            border_color: ACCENT.to_string(),
            border_width: 1,
            padding: 10,
        },
        x_axis: AxisStyle {
            tick_color: TICK_COLOR.to_string(),
            tick_format: TickFormat::Plain,
            grid_color: GRID_COLOR.to_string(),
            min_rotation: 45,
            max_rotation: 60,
        },
        y_axis: AxisStyle {
            tick_color: TICK_COLOR.to_string(),
            tick_format: TickFormat::Currency,
            grid_color: GRID_COLOR.to_string(),
            min_rotation: 0,
            max_rotation: 0,
        },
    }
}

// ── Text plot ───────────────────────────────────────────────────────

impl ChartView {
    /// Plain-text line plot for terminals.
    ///
    /// Layout: a header line, `height` plot rows with the max/min price on
    /// the y axis, an axis rule, and the first/last x labels.
    pub fn render_text(&self, width: usize, height: usize) -> String {
        let header = format!("{}  {} ({})", self.title, self.price_label, self.days);
        if self.prices.is_empty() {
            return format!("{header}\nNo price data");
        }

        let width = width.max(2);
        let height = height.max(2);
        let (lo, hi) = self
            .prices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });
        let span = hi - lo;

        let row_of = |price: f64| -> usize {
            if span <= 0.0 {
                return (height - 1) / 2;
            }
            let scaled = ((price - lo) / span * (height - 1) as f64).round() as usize;
            scaled.min(height - 1)
        };

        // rows[0] is the top line of the plot.
        let mut rows = vec![vec![' '; width]; height];
        let last_index = self.prices.len() - 1;
        let mut prev_row: Option<usize> = None;
        for col in 0..width {
            let idx = col * last_index / (width - 1);
            let row = row_of(self.prices[idx]);
            if let Some(prev) = prev_row {
                let (a, b) = if prev < row { (prev, row) } else { (row, prev) };
                for r in (a + 1)..b {
                    rows[height - 1 - r][col] = '|';
                }
            }
            rows[height - 1 - row][col] = '*';
            prev_row = Some(row);
        }

        let top = format_tick(hi);
        let bottom = format_tick(lo);
        let gutter = top.len().max(bottom.len());

        let mut out = vec![header];
        for (i, cells) in rows.iter().enumerate() {
            let axis_label = match i {
                0 => top.as_str(),
                i if i == height - 1 => bottom.as_str(),
                _ => "",
            };
            let line: String = cells.iter().collect();
            out.push(format!("{axis_label:>gutter$} |{}", line.trim_end()));
        }
        out.push(format!("{:>gutter$} +{}", "", "-".repeat(width)));

        let first = self.labels.first().map(String::as_str).unwrap_or("");
        let last = self.labels.last().map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(first.len() + last.len()).max(1);
        out.push(format!("{:>gutter$}  {first}{}{last}", "", " ".repeat(pad)));

        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn format_usd_keeps_two_to_three_decimals() {
        assert_eq!(format_usd(50000.0), "$50,000.00");
        assert_eq!(format_usd(0.1234), "$0.123");
        assert_eq!(format_usd(1.5), "$1.50");
        assert_eq!(format_usd(-1234.5), "-$1,234.50");
    }

    #[test]
    fn format_tick_uses_two_decimals() {
        assert_eq!(format_tick(49000.0), "$49000.00");
        assert_eq!(format_tick(1234.5), "$1234.50");
    }
}
