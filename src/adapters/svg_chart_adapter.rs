//! SVG chart adapter implementing ChartPort.
//!
//! Draws closing price and rolling mean lines, peak/trough markers, and a
//! callout on the highest close, then writes the document to disk.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::analysis::{AnalyzedPoint, AnalyzedSeries};
use crate::domain::chart::{format_date_tick, ChartLayout};
use crate::domain::error::StockvizError;
use crate::ports::chart_port::ChartPort;

pub const DEFAULT_OUTPUT_PATH: &str = "assets/stock_analysis.svg";

pub const CHART_TITLE: &str = "Stock Price Analysis";
const CLOSE_COLOR: &str = "#1f77b4";
const MEAN_COLOR: &str = "#ff7f0e";
const PEAK_COLOR: &str = "red";
const TROUGH_COLOR: &str = "green";
const GRID_COLOR: &str = "#b0b0b0";
const TEXT_COLOR: &str = "#333";

const MARKER_RADIUS: f64 = 5.0;
const CALLOUT_OFFSET: f64 = 14.0;
const CALLOUT_PADDING: f64 = 8.0;
const CALLOUT_FONT_SIZE: f64 = 14.0;

pub struct SvgChartAdapter;

impl SvgChartAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgChartAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPort for SvgChartAdapter {
    fn render(&self, series: &AnalyzedSeries, output_path: &Path) -> Result<(), StockvizError> {
        let svg = generate_chart_svg(series);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output_path, svg)?;

        info!(path = %output_path.display(), "chart written");
        Ok(())
    }
}

fn line_path<'a>(
    layout: &ChartLayout,
    points: impl Iterator<Item = (usize, &'a AnalyzedPoint)>,
    value: impl Fn(&AnalyzedPoint) -> Option<f64>,
) -> String {
    let mut path_data = String::new();
    for (i, point) in points {
        let Some(v) = value(point) else { continue };
        let cmd = if path_data.is_empty() { "M" } else { " L" };
        path_data.push_str(&format!("{} {:.1} {:.1}", cmd, layout.x(i), layout.y(v)));
    }
    path_data
}

fn markers(
    svg: &mut String,
    layout: &ChartLayout,
    series: &AnalyzedSeries,
    class: &str,
    color: &str,
    flagged: impl Fn(&AnalyzedPoint) -> bool,
) {
    for (i, point) in series.points().iter().enumerate() {
        if flagged(point) {
            svg.push_str(&format!(
                "  <circle class=\"{}\" cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\"/>\n",
                class,
                layout.x(i),
                layout.y(point.close),
                MARKER_RADIUS,
                color
            ));
        }
    }
}

fn grid_and_axes(svg: &mut String, layout: &ChartLayout, series: &AnalyzedSeries) {
    let left = layout.plot_left;
    let right = layout.plot_right();
    let top = layout.plot_top;
    let bottom = layout.plot_bottom();

    for tick in layout.y_ticks() {
        let y = layout.y(tick);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-opacity=\"0.6\"/>\n",
            left, y, right, y, GRID_COLOR
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" fill=\"{}\">{:.2}</text>\n",
            left - 8.0,
            y + 4.0,
            TEXT_COLOR,
            tick
        ));
    }

    for row in layout.x_tick_rows() {
        let x = layout.x(row);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-dasharray=\"6 4\" stroke-opacity=\"0.6\"/>\n",
            x, top, x, bottom, GRID_COLOR
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"{}\">{}</text>\n",
            x,
            bottom + 20.0,
            TEXT_COLOR,
            format_date_tick(series.points()[row].date)
        ));
    }

    svg.push_str(&format!(
        "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        left, top, layout.plot_width, layout.plot_height, TEXT_COLOR
    ));

    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"16\" fill=\"{}\">Date</text>\n",
        left + layout.plot_width / 2.0,
        layout.height - 15.0,
        TEXT_COLOR
    ));
    let label_y = top + layout.plot_height / 2.0;
    svg.push_str(&format!(
        "  <text x=\"20\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"16\" fill=\"{}\" transform=\"rotate(-90 20 {:.1})\">Price ($)</text>\n",
        label_y, TEXT_COLOR, label_y
    ));
}

/// Label up-right of the point, flipped left or down when it would leave the plot.
fn max_callout(svg: &mut String, layout: &ChartLayout, series: &AnalyzedSeries) {
    let max = series.global_max();
    let index = series
        .points()
        .iter()
        .position(|p| p.date == max.date)
        .unwrap_or(0);
    let px = layout.x(index);
    let py = layout.y(max.close);

    let label = format!("Max: {:.2}", max.close);
    // rough glyph width for a sans-serif face
    let box_w = label.len() as f64 * CALLOUT_FONT_SIZE * 0.6 + 2.0 * CALLOUT_PADDING;
    let box_h = CALLOUT_FONT_SIZE + 2.0 * CALLOUT_PADDING;

    let mut bx = px + CALLOUT_OFFSET;
    if bx + box_w > layout.plot_right() {
        bx = px - CALLOUT_OFFSET - box_w;
    }
    let mut by = py - CALLOUT_OFFSET - box_h;
    if by < layout.plot_top {
        by = py + CALLOUT_OFFSET;
    }

    let anchor_x = if bx > px { bx } else { bx + box_w };
    let anchor_y = if by < py { by + box_h } else { by };

    svg.push_str(&format!(
        "  <line class=\"callout-arrow\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\" stroke-width=\"1.2\" marker-end=\"url(#arrowhead)\"/>\n",
        anchor_x, anchor_y, px, py
    ));
    svg.push_str(&format!(
        "  <rect class=\"callout\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"6\" ry=\"6\" fill=\"yellow\" fill-opacity=\"0.5\" stroke=\"black\" stroke-width=\"1\"/>\n",
        bx, by, box_w, box_h
    ));
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{}\" fill=\"black\">{}</text>\n",
        bx + CALLOUT_PADDING,
        by + CALLOUT_PADDING + CALLOUT_FONT_SIZE * 0.85,
        CALLOUT_FONT_SIZE,
        label
    ));
}

fn legend(svg: &mut String, layout: &ChartLayout, rolling_window: usize) {
    let x = layout.plot_left + 12.0;
    let y = layout.plot_top + 12.0;
    let row_h = 22.0;

    svg.push_str(&format!(
        "  <rect class=\"legend\" x=\"{:.1}\" y=\"{:.1}\" width=\"150\" height=\"{:.1}\" fill=\"white\" fill-opacity=\"0.8\" stroke=\"#ccc\" rx=\"4\"/>\n",
        x,
        y,
        row_h * 4.0 + 10.0
    ));

    let mean_label = format!("{}-Day Avg", rolling_window);
    let entries: [(&str, &str, &str); 4] = [
        ("Closing Price", CLOSE_COLOR, "line"),
        (&mean_label, MEAN_COLOR, "dashed"),
        ("Peaks", PEAK_COLOR, "marker"),
        ("Troughs", TROUGH_COLOR, "marker"),
    ];
    for (i, (name, color, kind)) in entries.iter().enumerate() {
        let cy = y + 5.0 + row_h * (i as f64 + 0.5);
        let sx = x + 10.0;
        match *kind {
            "marker" => svg.push_str(&format!(
                "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\"/>\n",
                sx + 14.0,
                cy,
                MARKER_RADIUS,
                color
            )),
            _ => svg.push_str(&format!(
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\"{}/>\n",
                sx,
                cy,
                sx + 28.0,
                cy,
                color,
                if *kind == "dashed" { " stroke-dasharray=\"8 5\"" } else { "" }
            )),
        }
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"13\" fill=\"{}\">{}</text>\n",
            sx + 38.0,
            cy + 4.5,
            TEXT_COLOR,
            name
        ));
    }
}

/// Render the full chart document for `series`.
pub fn generate_chart_svg(series: &AnalyzedSeries) -> String {
    let layout = ChartLayout::for_series(series);

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg" font-family="sans-serif">"##,
        layout.width, layout.height, layout.width, layout.height
    ));
    svg.push_str("\n  <defs>\n    <marker id=\"arrowhead\" markerWidth=\"10\" markerHeight=\"7\" refX=\"10\" refY=\"3.5\" orient=\"auto\">\n      <polygon points=\"0 0, 10 3.5, 0 7\" fill=\"black\"/>\n    </marker>\n  </defs>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"40\" text-anchor=\"middle\" font-size=\"22\" fill=\"black\">{}</text>\n",
        layout.width / 2.0,
        CHART_TITLE
    ));

    grid_and_axes(&mut svg, &layout, series);

    let close_path = line_path(&layout, series.points().iter().enumerate(), |p| Some(p.close));
    svg.push_str(&format!(
        "  <path class=\"close\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
        close_path, CLOSE_COLOR
    ));

    let mean_path = line_path(&layout, series.points().iter().enumerate(), |p| p.rolling_mean);
    if !mean_path.is_empty() {
        svg.push_str(&format!(
            "  <path class=\"rolling-mean\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" stroke-dasharray=\"8 5\"/>\n",
            mean_path, MEAN_COLOR
        ));
    }

    markers(&mut svg, &layout, series, "peak", PEAK_COLOR, |p| p.is_peak);
    markers(&mut svg, &layout, series, "trough", TROUGH_COLOR, |p| p.is_trough);

    max_callout(&mut svg, &layout, series);
    legend(&mut svg, &layout, series.config.rolling_window);

    svg.push_str("</svg>\n");
    svg
}
