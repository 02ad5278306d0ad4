//! Sidebar Widget
//! Left side panel with page navigation and dataset status.

use egui::{Color32, RichText};
use std::path::PathBuf;

/// Dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Overview,
    Eda,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Overview, Page::Eda];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Overview => "📊 Data Overview",
            Page::Eda => "📈 EDA",
        }
    }
}

/// Navigation and status panel.
pub struct Sidebar {
    pub page: Page,
    pub data_path: Option<PathBuf>,
    pub status: String,
    pub is_loading: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            page: Page::default(),
            data_path: None,
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("☕ The Starbucks EDA App")
                    .size(20.0)
                    .color(Color32::from_rgb(0, 112, 74)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Navigation =====
        ui.label(RichText::new("🌟 Go to:").size(14.0).strong());
        ui.add_space(5.0);

        for page in Page::ALL {
            if ui
                .radio_value(&mut self.page, page, page.label())
                .changed()
            {
                action = SidebarAction::PageChanged(page);
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .data_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file loaded".to_string());
                ui.label(RichText::new(&path_text).size(12.0));

                ui.add_space(5.0);
                ui.add_enabled_ui(!self.is_loading, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("📂 Open CSV").clicked() {
                            action = SidebarAction::OpenCsv;
                        }
                        if ui.button("⟳ Reload").clicked() {
                            action = SidebarAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Loaded") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    None,
    PageChanged(Page),
    OpenCsv,
    Reload,
}
