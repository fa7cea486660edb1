//! SVG rendering of a [`Chart`].
//!
//! Produces a standalone SVG document: a title, a zero guide, monthly date
//! ticks, percentage y labels, one polyline per series and a legend.

use chrono::{Datelike, NaiveDate};

use basket_analytics::{Chart, LineStyle};

const WIDTH: f64 = 576.0;
const HEIGHT: f64 = 288.0;
const PADDING: f64 = 36.0;
const Y_TICKS: usize = 5;
const PORTFOLIO_COLOR: &str = "#000000";
const PALETTE: &[&str] = &[
    "#348dc1", "#ff9933", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// Renders `chart` to an SVG document.
pub fn render_svg(chart: &Chart) -> String {
    let mut svg = svg_header();
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="13" fill="#333">{title}</text>"##,
        x = WIDTH / 2.0,
        y = PADDING / 2.0 + 4.0,
        title = escape(&chart.title)
    ));

    let Some((min_v, max_v)) = padded_extent(chart) else {
        svg.push_str(svg_footer());
        return svg;
    };

    let xs = x_positions(chart.dates.len());
    add_y_axis(&mut svg, min_v, max_v);

    let zero = scale_value(0.0, min_v, max_v);
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#8c8c8c" stroke-width="1" stroke-dasharray="4 3" />"##,
        x1 = PADDING,
        x2 = WIDTH - PADDING,
        y = zero
    ));

    add_time_axis(&mut svg, &chart.dates, &xs);

    let mut palette = PALETTE.iter().cycle();
    let mut legend = Vec::with_capacity(chart.series.len());
    for series in &chart.series {
        let (color, stroke_width) = match series.style {
            LineStyle::Bold => (PORTFOLIO_COLOR, 3.0),
            LineStyle::Normal => (*palette.next().unwrap_or(&PALETTE[0]), 1.5),
        };
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(&series.values)
            .filter(|(_, v)| v.is_finite())
            .map(|(x, v)| (*x, scale_value(*v, min_v, max_v)))
            .collect();
        svg.push_str(&polyline(&points, color, stroke_width));
        legend.push((series.label.as_str(), color, stroke_width));
    }

    draw_legend(&mut svg, &legend);
    svg.push_str(svg_footer());
    svg
}

fn svg_header() -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style><rect width="100%" height="100%" fill="#ffffff" />"##,
        w = WIDTH,
        h = HEIGHT
    )
}

fn svg_footer() -> &'static str {
    "</svg>\n"
}

/// Y range covering every finite value and zero, widened when flat.
fn padded_extent(chart: &Chart) -> Option<(f64, f64)> {
    if chart.is_empty() {
        return None;
    }
    let (lo, hi) = chart.y_extent()?;
    let (mut lo, mut hi) = (lo.min(0.0), hi.max(0.0));
    if lo == hi {
        lo -= 0.01;
        hi += 0.01;
    }
    Some((lo, hi))
}

fn scale_value(value: f64, min_v: f64, max_v: f64) -> f64 {
    let inner_height = HEIGHT - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

fn x_positions(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![WIDTH / 2.0],
        _ => {
            let inner_width = WIDTH - 2.0 * PADDING;
            (0..len)
                .map(|i| PADDING + inner_width * (i as f64 / (len - 1) as f64))
                .collect()
        }
    }
}

fn format_percentage(value: f64) -> String {
    let pct = value * 100.0;
    if pct.abs() >= 1000.0 {
        format!("{:.0}K%", pct / 1000.0)
    } else {
        format!("{:.0}%", pct)
    }
}

fn add_y_axis(svg: &mut String, min_v: f64, max_v: f64) {
    for i in 0..Y_TICKS {
        let value = min_v + (max_v - min_v) * i as f64 / (Y_TICKS - 1) as f64;
        let y = scale_value(value, min_v, max_v);
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#eeeeee" stroke-width="0.5" />"##,
            x1 = PADDING,
            x2 = WIDTH - PADDING,
            y = y
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = PADDING - 4.0,
            y = y + 3.0,
            label = format_percentage(value)
        ));
    }
}

/// One tick per month, labelled `YYYY-MM`; at most one label every `step` months.
fn add_time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64]) {
    let axis_y = HEIGHT - PADDING + 5.0;
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = PADDING,
        x2 = WIDTH - PADDING,
        y = axis_y
    ));

    let mut month_starts = Vec::new();
    let mut last_month: Option<(i32, u32)> = None;
    for (idx, date) in dates.iter().enumerate() {
        let key = (date.year(), date.month());
        if last_month != Some(key) {
            last_month = Some(key);
            month_starts.push(idx);
        }
    }
    let step = month_starts.len().div_ceil(8).max(1);

    for &idx in month_starts.iter().step_by(step) {
        let (Some(x), Some(date)) = (xs.get(idx), dates.get(idx)) else {
            continue;
        };
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#ccc" stroke-width="1" />"##,
            x = x,
            y1 = axis_y,
            y2 = axis_y + 4.0
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            x = x,
            y = axis_y + 16.0,
            label = date.format("%Y-%m")
        ));
    }
}

fn polyline(points: &[(f64, f64)], stroke: &str, stroke_width: f64) -> String {
    if points.is_empty() {
        return String::new();
    }

    let coords = points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<polyline fill="none" stroke="{stroke}" stroke-width="{stroke_width}" points="{coords}" />"#
    )
}

fn draw_legend(svg: &mut String, entries: &[(&str, &str, f64)]) {
    let x = PADDING + 10.0;
    let mut y = PADDING + 14.0;
    for (label, color, stroke_width) in entries {
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="{stroke_width}" />"##,
            x1 = x,
            x2 = x + 20.0,
            y = y - 4.0
        ));
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            x = x + 26.0,
            y = y,
            label = escape(label)
        ));
        y += 16.0;
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
