//! EDA Page
//! Category and calorie filters driving a histogram, a scatter plot and a box plot.

use crate::charts::{ChartData, ChartPlotter, StaticChartRenderer};
use crate::config::AppConfig;
use crate::data::{DataFilter, DataLoader, FilterState, FilteredView};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use polars::prelude::DataFrame;
use std::path::PathBuf;

const EXPORT_SIZE: (u32, u32) = (800, 600);

/// Chart data tagged with the inputs it was computed from.
#[derive(Default)]
struct ChartSlot {
    key: Option<(u64, String, String)>,
    data: Option<ChartData>,
}

impl ChartSlot {
    fn refresh(&mut self, key: (u64, String, String), compute: impl FnOnce() -> ChartData) {
        if self.key.as_ref() != Some(&key) {
            self.data = Some(compute());
            self.key = Some(key);
        }
    }
}

/// Interactive exploration page state.
pub struct EdaPage {
    pub numeric_cols: Vec<String>,
    pub categories: Vec<String>,
    pub selected_categories: Vec<bool>,
    pub calorie_range: Option<(i64, i64)>,
    pub hist_col: String,
    pub scatter_x: String,
    pub scatter_y: String,
    pub box_col: String,

    has_category: bool,
    has_calories: bool,
    view: Option<FilteredView>,
    applied: Option<FilterState>,
    generation: u64,
    histogram: ChartSlot,
    scatter: ChartSlot,
    boxplot: ChartSlot,
    pub error: Option<String>,
    export_status: Option<String>,
    last_export: Option<PathBuf>,
}

impl EdaPage {
    pub fn new(loader: &DataLoader, config: &AppConfig) -> Self {
        let numeric_cols = loader.get_numeric_columns();
        let first = numeric_cols.first().cloned().unwrap_or_default();

        let has_category = loader.has_column(&config.category_column);
        let has_calories = loader.has_column(&config.calorie_column);
        if !has_category {
            log::warn!("Column '{}' not found, category filter disabled", config.category_column);
        }
        if !has_calories {
            log::warn!("Column '{}' not found, calorie filter disabled", config.calorie_column);
        }

        let categories = if has_category {
            loader.get_unique_values(&config.category_column)
        } else {
            Vec::new()
        };

        Self {
            selected_categories: vec![false; categories.len()],
            categories,
            calorie_range: None,
            hist_col: first.clone(),
            scatter_x: first.clone(),
            scatter_y: first.clone(),
            box_col: first,
            numeric_cols,
            has_category,
            has_calories,
            view: None,
            applied: None,
            generation: 0,
            histogram: ChartSlot::default(),
            scatter: ChartSlot::default(),
            boxplot: ChartSlot::default(),
            error: None,
            export_status: None,
            last_export: None,
        }
    }

    pub fn filter_state(&self) -> FilterState {
        FilterState {
            categories: self
                .categories
                .iter()
                .zip(self.selected_categories.iter())
                .filter(|(_, &selected)| selected)
                .map(|(category, _)| category.clone())
                .collect(),
            calorie_range: self.calorie_range,
        }
    }

    /// Select exactly the given categories. Resets the calorie range to the new bounds.
    pub fn set_categories<S: AsRef<str>>(&mut self, wanted: &[S]) {
        for (category, selected) in self.categories.iter().zip(self.selected_categories.iter_mut()) {
            *selected = wanted.iter().any(|w| w.as_ref() == category);
        }
        self.calorie_range = None;
    }

    pub fn view(&self) -> Option<&FilteredView> {
        self.view.as_ref()
    }

    /// Recompute the filtered view when the filter state changed.
    pub fn refresh_view(&mut self, df: &DataFrame, config: &AppConfig) {
        let state = self.filter_state();
        if self.applied.as_ref() == Some(&state) {
            return;
        }

        match DataFilter::apply(df, config, &state) {
            Ok(view) => {
                self.calorie_range = self.calorie_range.and(view.calorie_range);
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                log::error!("Filter failed: {}", e);
                self.view = None;
                self.error = Some(e.to_string());
            }
        }
        self.generation += 1;
        self.applied = Some(self.filter_state());
    }

    /// Recompute chart data whose inputs changed.
    pub fn refresh_charts(&mut self, config: &AppConfig) {
        let Some(view) = &self.view else {
            return;
        };
        let frame = &view.frame;
        let generation = self.generation;

        let hist_col = self.hist_col.clone();
        self.histogram.refresh((generation, hist_col.clone(), String::new()), || {
            ChartData::histogram(frame, &hist_col, config.kde_points)
        });

        let (x, y) = (self.scatter_x.clone(), self.scatter_y.clone());
        self.scatter
            .refresh((generation, x.clone(), y.clone()), || ChartData::scatter(frame, &x, &y));

        let box_col = self.box_col.clone();
        self.boxplot.refresh((generation, box_col.clone(), String::new()), || {
            ChartData::boxplot(frame, &box_col)
        });
    }

    pub fn charts(&self) -> [Option<&ChartData>; 3] {
        [
            self.histogram.data.as_ref(),
            self.scatter.data.as_ref(),
            self.boxplot.data.as_ref(),
        ]
    }

    fn column_combo(ui: &mut egui::Ui, id: &str, label: &str, value: &mut String, cols: &[String]) {
        ui.horizontal(|ui| {
            ui.add_sized([220.0, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(200.0)
                .selected_text(value.as_str())
                .show_ui(ui, |ui| {
                    for col in cols {
                        ui.selectable_value(value, col.clone(), col);
                    }
                });
        });
    }

    fn draw_category_filter(&mut self, ui: &mut egui::Ui) {
        let selected = self.selected_categories.iter().filter(|s| **s).count();
        let header = if selected == 0 {
            "Filter by Beverage Category (optional)".to_string()
        } else {
            format!("Filter by Beverage Category (optional): {} selected", selected)
        };

        let mut changed = false;
        egui::CollapsingHeader::new(header)
            .id_salt("category_filter")
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(5.0)
                    .inner_margin(5.0)
                    .show(ui, |ui| {
                        ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                            for (category, selected) in
                                self.categories.iter().zip(self.selected_categories.iter_mut())
                            {
                                changed |= ui.checkbox(selected, category).changed();
                            }
                        });
                    });

                ui.horizontal(|ui| {
                    if ui.small_button("Select All").clicked() {
                        let all = self.categories.clone();
                        self.set_categories(&all[..]);
                        changed = true;
                    }
                    if ui.small_button("Clear All").clicked() {
                        self.set_categories::<&str>(&[]);
                        changed = true;
                    }
                });
            });

        if changed {
            // New categories mean new bounds; start from the full range again
            self.calorie_range = None;
        }
    }

    fn draw_calorie_filter(&mut self, ui: &mut egui::Ui) {
        let Some((lo_bound, hi_bound)) = self.view().and_then(|v| v.calorie_bounds) else {
            return;
        };

        let current = self
            .calorie_range
            .map(|r| DataFilter::clamp_range(r, (lo_bound, hi_bound)))
            .unwrap_or((lo_bound, hi_bound));
        let (mut lo, mut hi) = current;

        ui.label("Select Calorie Range (optional)");
        let lo_changed = ui
            .add(egui::Slider::new(&mut lo, lo_bound..=hi_bound).text("min"))
            .changed();
        let hi_changed = ui
            .add(egui::Slider::new(&mut hi, lo_bound..=hi_bound).text("max"))
            .changed();

        if lo > hi {
            if lo_changed {
                hi = lo;
            } else if hi_changed {
                lo = hi;
            }
        }
        if (lo, hi) != current {
            self.calorie_range = Some((lo, hi));
        }
    }

    fn draw_chart(&mut self, ui: &mut egui::Ui, index: usize) {
        let Some(chart) = self.charts()[index].cloned() else {
            return;
        };

        ChartPlotter::draw(ui, &chart);
        if let ChartData::Histogram { summary, column, .. } = &chart {
            if summary.count > 0 {
                ui.add_space(5.0);
                ChartPlotter::draw_summary_table(ui, column, summary);
            }
        }

        ui.add_enabled_ui(!chart.is_empty(), |ui| {
            if ui.small_button("💾 Save PNG").clicked() {
                self.export_chart(&chart);
            }
        });
    }

    fn export_chart(&mut self, chart: &ChartData) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", chart.file_stem()))
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::render_png(chart, &path, EXPORT_SIZE) {
            Ok(()) => {
                self.export_status = Some(format!("Saved {}", path.display()));
                self.last_export = Some(path);
            }
            Err(e) => {
                log::error!("Chart export failed: {}", e);
                self.export_status = Some(format!("Error: {}", e));
            }
        }
    }

    fn draw_export_status(&mut self, ui: &mut egui::Ui) {
        let Some(status) = &self.export_status else {
            return;
        };
        ui.horizontal(|ui| {
            let color = if status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::from_rgb(40, 167, 69)
            };
            ui.label(RichText::new(status).size(11.0).color(color));
            if let Some(path) = &self.last_export {
                if ui.small_button("Open").clicked() {
                    if let Err(e) = open::that(path) {
                        log::warn!("Failed to open {}: {}", path.display(), e);
                    }
                }
            }
        });
    }

    pub fn show(&mut self, ui: &mut egui::Ui, df: &DataFrame, config: &AppConfig) {
        self.refresh_view(df, config);

        ScrollArea::vertical().show(ui, |ui| {
            ui.heading(RichText::new("📈 Exploratory Data Analysis (EDA)").size(26.0));
            ui.label(
                "Welcome to the Exploratory Data Analysis page! This is the FUN part of this app!! \
                 Here, you can interactively explore the Starbucks dataset to uncover insights \
                 about beverage nutrition.",
            );
            ui.label(
                "Use the filters to narrow down the data by beverage category or calorie range. \
                 Visualize patterns, compare variables, and better understand what's behind your \
                 favorite Starbucks drinks.",
            );
            ui.label("You can explore:");
            ui.label("  • Histograms to see how data is distributed.");
            ui.label("  • Scatter Plots to explore relationships between variables.");
            ui.label("  • Box Plots to check for outliers and variability.");
            ui.label("Scroll down and play with the plots! ☕📊");
            ui.add_space(10.0);
            ui.separator();

            if self.has_category {
                self.draw_category_filter(ui);
                self.refresh_view(df, config);
            }
            if self.has_calories {
                self.draw_calorie_filter(ui);
                self.refresh_view(df, config);
            }

            if let Some(error) = &self.error {
                ui.label(
                    RichText::new(format!("Error: {}", error))
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                return;
            }

            let rows = self.view().map_or(0, FilteredView::row_count);
            ui.label(RichText::new(format!("{} beverages match the filters", rows)).weak());

            if self.numeric_cols.is_empty() {
                ui.label("The dataset has no numeric columns to plot.");
                return;
            }
            if self.view().map_or(true, FilteredView::is_empty) {
                ui.label(
                    RichText::new("No beverages match the current filters.")
                        .color(Color32::from_rgb(243, 156, 18)),
                );
                return;
            }

            let cols = self.numeric_cols.clone();

            ui.add_space(10.0);
            ui.label(RichText::new("📊 Histogram").size(18.0).strong());
            Self::column_combo(ui, "hist_col", "Choose a column for histogram", &mut self.hist_col, &cols);
            self.refresh_charts(config);
            self.draw_chart(ui, 0);

            ui.add_space(15.0);
            ui.label(RichText::new("🟢 Scatter Plot").size(18.0).strong());
            Self::column_combo(ui, "x_axis", "X-axis", &mut self.scatter_x, &cols);
            Self::column_combo(ui, "y_axis", "Y-axis", &mut self.scatter_y, &cols);
            self.refresh_charts(config);
            self.draw_chart(ui, 1);

            ui.add_space(15.0);
            ui.label(RichText::new("📦 Box Plot").size(18.0).strong());
            Self::column_combo(ui, "box_col", "Choose a column for box plot", &mut self.box_col, &cols);
            self.refresh_charts(config);
            self.draw_chart(ui, 2);

            ui.add_space(10.0);
            self.draw_export_status(ui);
        });
    }
}
