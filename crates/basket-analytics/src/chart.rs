//! Chart description for cumulative return curves.
//!
//! The analytics layer only describes what to draw. Rendering (SVG, terminal,
//! anything else) belongs to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::performance::PerformanceReport;

/// Label used for the weighted basket's series.
pub const PORTFOLIO_LABEL: &str = "Portfolio";

/// Visual weight of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStyle {
    /// Regular line.
    #[default]
    Normal,
    /// Emphasized line.
    Bold,
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Legend label.
    pub label: String,
    /// One y value per x date.
    pub values: Vec<f64>,
    /// Line weight.
    pub style: LineStyle,
}

/// Self-contained line chart: shared date axis, one or more series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Chart title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// X axis dates.
    pub dates: Vec<NaiveDate>,
    /// Lines, drawn in order.
    pub series: Vec<ChartSeries>,
}

impl Chart {
    /// Smallest and largest finite y value across all series.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.series.is_empty()
    }
}

/// Cumulative return chart: one line per symbol plus a bold portfolio line.
///
/// Y values are fractions (0.1 = 10%).
#[must_use]
pub fn cumulative_return_chart(report: &PerformanceReport) -> Chart {
    let mut series: Vec<ChartSeries> = report
        .cumulative
        .holdings
        .iter()
        .map(|(symbol, values)| ChartSeries {
            label: symbol.to_string(),
            values: values.clone(),
            style: LineStyle::Normal,
        })
        .collect();

    series.push(ChartSeries {
        label: PORTFOLIO_LABEL.to_string(),
        values: report.cumulative.portfolio.clone(),
        style: LineStyle::Bold,
    });

    Chart {
        title: "Cumulative Returns".to_string(),
        x_label: "Date".to_string(),
        y_label: "Cumulative Return".to_string(),
        dates: report.cumulative.dates.clone(),
        series,
    }
}
