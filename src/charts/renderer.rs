//! Static Chart Renderer
//! Draws the EDA charts to PNG files with plotters.
//!
//! Each chart mirrors its interactive counterpart:
//! - Histogram: count bars with the density curve on top
//! - Scatter: one dot per row
//! - Box plot: quartile box, median line, whiskers and outlier rings

use crate::charts::ChartData;
use crate::stats::{BoxStats, HistogramData};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

// Colors
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const KDE_COLOR: RGBColor = RGBColor(23, 84, 128);
const OUTLIER_COLOR: RGBColor = RGBColor(90, 90, 90);

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render")]
    Empty,
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart to a PNG file of `size` pixels.
    pub fn render_png(chart: &ChartData, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
        if chart.is_empty() {
            return Err(RenderError::Empty);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let title = chart.title();
        match chart {
            ChartData::Histogram {
                column, hist, kde, ..
            } => Self::draw_histogram(&root, &title, column, hist, kde.as_deref())?,
            ChartData::Scatter {
                x_col,
                y_col,
                points,
            } => Self::draw_scatter(&root, &title, x_col, y_col, points)?,
            ChartData::Box { column, stats } => {
                let stats = stats.as_ref().ok_or(RenderError::Empty)?;
                Self::draw_boxplot(&root, &title, column, stats)?
            }
        }

        root.present().map_err(draw_err)?;
        log::info!("Saved chart '{}' to {}", title, path.display());
        Ok(())
    }

    /// Axis range with 5% padding; a zero-width range is widened by one unit each side.
    pub fn padded(lo: f64, hi: f64) -> (f64, f64) {
        let span = hi - lo;
        if span <= 0.0 || !span.is_finite() {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo - span * 0.05, hi + span * 0.05)
        }
    }

    fn draw_histogram(
        root: &Area,
        title: &str,
        column: &str,
        hist: &HistogramData,
        kde: Option<&[[f64; 2]]>,
    ) -> Result<(), RenderError> {
        let tallest = hist.counts.iter().copied().max().unwrap_or(0) as f64;
        let kde_peak = kde
            .map(|curve| curve.iter().map(|p| p[1]).fold(0.0, f64::max))
            .unwrap_or(0.0);
        let y_max = tallest.max(kde_peak).max(1.0) * 1.1;
        let x_min = hist.edges.first().copied().unwrap_or(0.0);
        let x_max = hist.edges.last().copied().unwrap_or(1.0);

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(column)
            .y_desc("Count")
            .draw()
            .map_err(draw_err)?;

        let bins = || {
            hist.counts
                .iter()
                .enumerate()
                .map(|(i, &count)| [(hist.edges[i], 0.0), (hist.edges[i + 1], count as f64)])
        };
        chart
            .draw_series(bins().map(|corners| Rectangle::new(corners, BAR_COLOR.mix(0.5).filled())))
            .map_err(draw_err)?;
        chart
            .draw_series(bins().map(|corners| Rectangle::new(corners, BAR_COLOR.stroke_width(1))))
            .map_err(draw_err)?;

        if let Some(curve) = kde {
            chart
                .draw_series(LineSeries::new(
                    curve.iter().map(|p| (p[0], p[1])),
                    KDE_COLOR.stroke_width(2),
                ))
                .map_err(draw_err)?;
        }

        Ok(())
    }

    fn draw_scatter(
        root: &Area,
        title: &str,
        x_col: &str,
        y_col: &str,
        points: &[[f64; 2]],
    ) -> Result<(), RenderError> {
        let extent = |axis: usize| {
            points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            })
        };
        let (x_min, x_max) = extent(0);
        let (y_min, y_max) = extent(1);
        let (x_min, x_max) = Self::padded(x_min, x_max);
        let (y_min, y_max) = Self::padded(y_min, y_max);

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(x_col)
            .y_desc(y_col)
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p[0], p[1]), 3, BAR_COLOR.mix(0.8).filled())),
            )
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_boxplot(
        root: &Area,
        title: &str,
        column: &str,
        stats: &BoxStats,
    ) -> Result<(), RenderError> {
        let lowest = stats
            .outliers
            .iter()
            .copied()
            .fold(stats.whisker_low, f64::min);
        let highest = stats
            .outliers
            .iter()
            .copied()
            .fold(stats.whisker_high, f64::max);
        let (y_min, y_max) = Self::padded(lowest, highest);

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 22))
            .margin(15)
            .x_label_area_size(20)
            .y_label_area_size(50)
            .build_cartesian_2d(-1f64..1f64, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_desc(column)
            .draw()
            .map_err(draw_err)?;

        let half = 0.25;
        let cap = 0.125;
        let quartiles = [(-half, stats.q1), (half, stats.q3)];
        chart
            .draw_series([
                Rectangle::new(quartiles, BAR_COLOR.mix(0.4).filled()),
                Rectangle::new(quartiles, BAR_COLOR.stroke_width(2)),
            ])
            .map_err(draw_err)?;

        let segments = [
            vec![(-half, stats.median), (half, stats.median)],
            vec![(0.0, stats.q3), (0.0, stats.whisker_high)],
            vec![(0.0, stats.q1), (0.0, stats.whisker_low)],
            vec![(-cap, stats.whisker_high), (cap, stats.whisker_high)],
            vec![(-cap, stats.whisker_low), (cap, stats.whisker_low)],
        ];
        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|segment| PathElement::new(segment, BLACK.stroke_width(2))),
            )
            .map_err(draw_err)?;

        chart
            .draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|&y| Circle::new((0.0, y), 4, OUTLIER_COLOR.stroke_width(1))),
            )
            .map_err(draw_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chart_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let chart = ChartData::Scatter {
            x_col: "Calories".to_string(),
            y_col: "Sodium (mg)".to_string(),
            points: Vec::new(),
        };
        let path = dir.path().join("empty.png");
        let err = StaticChartRenderer::render_png(&chart, &path, (640, 480)).unwrap_err();
        assert!(matches!(err, RenderError::Empty));
        assert!(!path.exists());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(StaticChartRenderer::padded(0.0, 100.0), (-5.0, 105.0));
        assert_eq!(StaticChartRenderer::padded(3.0, 3.0), (2.0, 4.0));
    }
}
