//! Chart Plotter Module
//! Creates interactive histogram, scatter and box plot visualizations using egui_plot.

use crate::stats::{BoxStats, HistogramData, StatsCalculator, SummaryStats};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};
use polars::prelude::DataFrame;

/// Seaborn's default blue
pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
pub const KDE_COLOR: Color32 = Color32::from_rgb(23, 84, 128);
pub const OUTLIER_COLOR: Color32 = Color32::from_rgb(90, 90, 90);

const CHART_HEIGHT: f32 = 300.0;

/// Precomputed data for one chart.
#[derive(Debug, Clone)]
pub enum ChartData {
    Histogram {
        column: String,
        hist: HistogramData,
        kde: Option<Vec<[f64; 2]>>,
        summary: SummaryStats,
    },
    Scatter {
        x_col: String,
        y_col: String,
        points: Vec<[f64; 2]>,
    },
    Box {
        column: String,
        stats: Option<BoxStats>,
    },
}

impl ChartData {
    /// Histogram of a column with a density curve scaled to the bin counts.
    pub fn histogram(df: &DataFrame, column: &str, kde_points: usize) -> Self {
        let values = StatsCalculator::numeric_values(df, column);
        let hist = StatsCalculator::histogram(&values);
        let scale = values.len() as f64 * hist.bin_width;
        let kde = StatsCalculator::kde(&values, kde_points, scale);
        ChartData::Histogram {
            column: column.to_string(),
            hist,
            kde,
            summary: StatsCalculator::compute_summary(&values),
        }
    }

    pub fn scatter(df: &DataFrame, x_col: &str, y_col: &str) -> Self {
        ChartData::Scatter {
            x_col: x_col.to_string(),
            y_col: y_col.to_string(),
            points: StatsCalculator::scatter_pairs(df, x_col, y_col),
        }
    }

    pub fn boxplot(df: &DataFrame, column: &str) -> Self {
        let values = StatsCalculator::numeric_values(df, column);
        ChartData::Box {
            column: column.to_string(),
            stats: StatsCalculator::box_stats(&values),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ChartData::Histogram { column, .. } => format!("Distribution of {}", column),
            ChartData::Scatter { x_col, y_col, .. } => format!("{} vs {}", y_col, x_col),
            ChartData::Box { column, .. } => format!("Box plot of {}", column),
        }
    }

    /// Default file name for exports.
    pub fn file_stem(&self) -> String {
        let raw = match self {
            ChartData::Histogram { column, .. } => format!("histogram_{}", column),
            ChartData::Scatter { x_col, y_col, .. } => format!("scatter_{}_{}", x_col, y_col),
            ChartData::Box { column, .. } => format!("boxplot_{}", column),
        };
        raw.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect::<String>()
            .split('_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Histogram { hist, .. } => hist.bin_count() == 0,
            ChartData::Scatter { points, .. } => points.is_empty(),
            ChartData::Box { stats, .. } => stats.is_none(),
        }
    }
}

/// Draws charts into egui panels.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn draw(ui: &mut egui::Ui, chart: &ChartData) {
        if chart.is_empty() {
            ui.label(RichText::new("No values to plot").color(Color32::GRAY));
            return;
        }

        match chart {
            ChartData::Histogram {
                column, hist, kde, ..
            } => Self::draw_histogram(ui, column, hist, kde.as_deref()),
            ChartData::Scatter {
                x_col,
                y_col,
                points,
            } => Self::draw_scatter(ui, x_col, y_col, points),
            ChartData::Box { column, stats } => {
                if let Some(stats) = stats {
                    Self::draw_boxplot(ui, column, stats);
                }
            }
        }
    }

    /// Count histogram with the density curve overlaid
    pub fn draw_histogram(
        ui: &mut egui::Ui,
        column: &str,
        hist: &HistogramData,
        kde: Option<&[[f64; 2]]>,
    ) {
        let bars: Vec<Bar> = hist
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(hist.center(i), count as f64)
                    .width(hist.bin_width)
                    .fill(PRIMARY_COLOR.gamma_multiply(0.5))
                    .stroke(egui::Stroke::new(1.0, PRIMARY_COLOR))
            })
            .collect();

        Plot::new(format!("histogram_{}", column))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(column)
            .y_axis_label("Count")
            .include_y(0.0)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(PRIMARY_COLOR)
                        .name(format!("Count (n = {})", hist.total())),
                );

                if let Some(curve) = kde {
                    plot_ui.line(
                        Line::new(curve.iter().copied().collect::<PlotPoints>())
                            .color(KDE_COLOR)
                            .width(2.0)
                            .name("KDE"),
                    );
                }
            });
    }

    pub fn draw_scatter(ui: &mut egui::Ui, x_col: &str, y_col: &str, points: &[[f64; 2]]) {
        Plot::new(format!("scatter_{}_{}", x_col, y_col))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_col)
            .y_axis_label(y_col)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(points.iter().copied().collect::<PlotPoints>())
                        .radius(3.0)
                        .filled(true)
                        .color(PRIMARY_COLOR.gamma_multiply(0.8)),
                );
            });
    }

    /// Vertical box with Tukey whiskers; outliers drawn as separate points
    pub fn draw_boxplot(ui: &mut egui::Ui, column: &str, stats: &BoxStats) {
        let box_elem = BoxElem::new(
            0.0,
            BoxSpread::new(
                stats.whisker_low,
                stats.q1,
                stats.median,
                stats.q3,
                stats.whisker_high,
            ),
        )
        .box_width(0.5)
        .whisker_width(0.25)
        .fill(PRIMARY_COLOR.gamma_multiply(0.4))
        .stroke(egui::Stroke::new(1.5, PRIMARY_COLOR));

        let outliers: PlotPoints = stats.outliers.iter().map(|&y| [0.0, y]).collect();

        Plot::new(format!("boxplot_{}", column))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .show_axes([false, true])
            .include_x(-1.0)
            .include_x(1.0)
            .y_axis_label(column)
            .show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(vec![box_elem]).name(column));
                plot_ui.points(
                    Points::new(outliers)
                        .radius(3.5)
                        .filled(false)
                        .color(OUTLIER_COLOR)
                        .name("Outliers"),
                );
            });
    }

    /// Draw descriptive statistics table
    pub fn draw_summary_table(ui: &mut egui::Ui, id: &str, summary: &SummaryStats) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("summary_table_{}", id)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        ui.label(RichText::new(summary.count.to_string()).size(11.0));
                        for value in [
                            summary.mean,
                            summary.std,
                            summary.min,
                            summary.p25,
                            summary.median,
                            summary.p75,
                            summary.max,
                        ] {
                            ui.label(RichText::new(format!("{:.3}", value)).size(11.0));
                        }
                        ui.end_row();
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::sample_loader;

    #[test]
    fn test_chart_data_for_each_kind() {
        let loader = sample_loader();
        let df = loader.get_dataframe().expect("frame");

        for column in loader.get_numeric_columns() {
            let hist = ChartData::histogram(df, &column, 200);
            assert!(!hist.is_empty());
            let boxed = ChartData::boxplot(df, &column);
            assert!(!boxed.is_empty());
            let scatter = ChartData::scatter(df, "Calories", &column);
            assert!(!scatter.is_empty());
        }
    }

    #[test]
    fn test_histogram_kde_matches_counts_scale() {
        let loader = sample_loader();
        let df = loader.get_dataframe().expect("frame");
        let ChartData::Histogram { hist, kde, .. } = ChartData::histogram(df, "Calories", 50) else {
            panic!("expected histogram");
        };
        let curve = kde.expect("kde");
        assert_eq!(curve.len(), 50);
        let peak = curve.iter().map(|p| p[1]).fold(0.0, f64::max);
        let tallest = *hist.counts.iter().max().expect("bins") as f64;
        assert!(peak > 0.0 && peak < tallest * 2.0);
    }

    #[test]
    fn test_empty_frame_gives_empty_charts() {
        let loader = sample_loader();
        let df = loader.get_dataframe().expect("frame").head(Some(0));
        assert!(ChartData::histogram(&df, "Calories", 200).is_empty());
        assert!(ChartData::scatter(&df, "Calories", "Sodium (mg)").is_empty());
        assert!(ChartData::boxplot(&df, "Calories").is_empty());
    }

    #[test]
    fn test_file_stem_is_filesystem_safe() {
        let chart = ChartData::Box {
            column: "Total Fat (g)".to_string(),
            stats: None,
        };
        assert_eq!(chart.file_stem(), "boxplot_total_fat_g");
        assert_eq!(chart.title(), "Box plot of Total Fat (g)");
    }
}
