//! Data Overview Page
//! Dataset sample, feature descriptions and per-column metadata.

use crate::config::AppConfig;
use crate::data::{ColumnInfo, DataLoader};
use egui::{RichText, ScrollArea};

pub const DATASET_SOURCE_URL: &str = "https://www.kaggle.com/datasets/starbucks/starbucks-menu";

const FEATURES: [(&str, &str); 8] = [
    ("Beverage_category", "Broad classification of drinks (e.g., coffee, tea, smoothie)."),
    ("Beverage", "Specific drink names (e.g., Caramel Macchiato, Green Tea Latte)."),
    ("Beverage_prep", "Preparation method (e.g., hot, iced, with whipped cream, etc.)."),
    ("Calories", "Total energy in each beverage."),
    (
        "Total Fat (g), Trans Fat (g), Saturated Fat (g)",
        "Breakdown of fat content, important for dietary and heart health considerations.",
    ),
    ("Sodium (mg)", "Sodium levels, crucial for low-sodium diets."),
    (
        "Total Carbohydrates (g)",
        "Includes sugars and starches, especially useful for people with diabetes or low-carb diets.",
    ),
    ("Cholesterol (mg)", "Amount of cholesterol, relevant for heart health monitoring."),
];

/// Snapshot of the dataset metadata, built once per load.
pub struct OverviewPage {
    pub columns: Vec<String>,
    pub sample: Vec<Vec<String>>,
    pub column_info: Vec<ColumnInfo>,
    pub entries: usize,
    pub unique_beverages: Option<usize>,
    name_column: String,
}

impl OverviewPage {
    pub fn from_loader(loader: &DataLoader, config: &AppConfig) -> Self {
        Self {
            columns: loader.get_columns(),
            sample: loader.head(config.sample_rows),
            column_info: loader.column_info(),
            entries: loader.get_row_count(),
            unique_beverages: loader.n_unique(&config.name_column),
            name_column: config.name_column.clone(),
        }
    }

    fn draw_sample_table(&self, ui: &mut egui::Ui) {
        ScrollArea::horizontal()
            .id_salt("sample_scroll")
            .show(ui, |ui| {
                egui::Grid::new("sample_table")
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        for col in &self.columns {
                            ui.label(RichText::new(col).strong().size(12.0));
                        }
                        ui.end_row();

                        for (i, row) in self.sample.iter().enumerate() {
                            ui.label(RichText::new(i.to_string()).weak());
                            for cell in row {
                                ui.label(RichText::new(cell).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_column_info(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("column_info_table")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column Name").strong());
                        ui.label(RichText::new("Non-Null Count").strong());
                        ui.label(RichText::new("Data Type").strong());
                        ui.end_row();

                        for info in &self.column_info {
                            ui.label(&info.name);
                            ui.label(info.non_null_count.to_string());
                            ui.label(&info.dtype);
                            ui.end_row();
                        }
                    });
            });
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ScrollArea::vertical().show(ui, |ui| {
            ui.heading(RichText::new("📋 Starbucks Dataset Overview").size(24.0));
            ui.add_space(5.0);
            ui.label("Below is a sample of the dataset:");
            ui.add_space(5.0);
            self.draw_sample_table(ui);

            ui.add_space(15.0);
            ui.label(RichText::new("🔍 Feature Info:").size(18.0).strong());
            ui.label(
                "This dataset contains the nutritional information for various Starbucks menu \
                 items. It's a clean and structured dataset designed to help analyze the \
                 health-related aspects of Starbucks beverages.",
            );
            ui.add_space(5.0);
            for (name, description) in FEATURES {
                ui.horizontal_wrapped(|ui| {
                    ui.label("  •");
                    ui.label(RichText::new(name).monospace().strong());
                    ui.label(description);
                });
            }

            ui.add_space(8.0);
            ui.label("This dataset is especially valuable for:");
            for line in [
                "🧪 Researchers looking at trends in food and nutrition",
                "🥗 Dietitians analyzing intake patterns",
                "💪 Health-conscious consumers tracking their dietary choices",
            ] {
                ui.label(format!("  • {}", line));
            }

            ui.add_space(15.0);
            ui.label(RichText::new("Columnal Information").size(18.0).strong());
            ui.add_space(5.0);
            self.draw_column_info(ui);

            ui.add_space(10.0);
            ui.label(RichText::new(format!("Number of Entries: {}", self.entries)).strong());
            let unique = self
                .unique_beverages
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("n/a (no '{}' column)", self.name_column));
            ui.label(RichText::new(format!("Number of Unique Beverages: {}", unique)).strong());

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                ui.label("📂 For more info on the dataset:");
                ui.hyperlink_to("View Dataset Source", DATASET_SOURCE_URL);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::tests::sample_loader;

    #[test]
    fn test_overview_snapshot() {
        let loader = sample_loader();
        let page = OverviewPage::from_loader(&loader, &AppConfig::default());

        assert_eq!(page.entries, 10);
        assert_eq!(page.sample.len(), 5);
        assert_eq!(page.column_info.len(), page.columns.len());
        assert_eq!(page.unique_beverages, Some(8));
        assert!(page
            .column_info
            .iter()
            .all(|info| info.non_null_count == 10));
    }

    #[test]
    fn test_missing_name_column() {
        let loader = sample_loader();
        let config = AppConfig {
            name_column: "Drink".to_string(),
            ..AppConfig::default()
        };
        let page = OverviewPage::from_loader(&loader, &config);
        assert_eq!(page.unique_beverages, None);
    }
}
