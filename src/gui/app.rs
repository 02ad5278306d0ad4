//! Brew Explorer Main Application
//! Main window with navigation sidebar and the Home, Data Overview and EDA pages.

use crate::config::AppConfig;
use crate::data::DataLoader;
use crate::gui::{EdaPage, HomePage, OverviewPage, Page, Sidebar, SidebarAction};
use egui::{Color32, RichText, SidePanel};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(DataLoader),
    Error(String),
}

/// Main application window.
pub struct ExplorerApp {
    config: AppConfig,
    loader: DataLoader,
    sidebar: Sidebar,
    home: HomePage,
    overview: Option<OverviewPage>,
    eda: Option<EdaPage>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
    load_error: Option<String>,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            config,
            loader: DataLoader::new(),
            sidebar: Sidebar::new(),
            home: HomePage::new(),
            overview: None,
            eda: None,
            load_rx: None,
            is_loading: false,
            load_error: None,
        };
        let path = app.config.data_path.clone();
        app.start_loading(path);
        app
    }

    /// Read the CSV in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        log::info!("Loading dataset from {}", path.display());
        self.sidebar.data_path = Some(path.clone());
        self.sidebar.set_status("Loading CSV file...");
        self.is_loading = true;
        self.load_error = None;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let mut loader = DataLoader::new();
            match loader.load_csv(&path).map(|_| ()) {
                Ok(()) => {
                    let _ = tx.send(LoadResult::Complete(loader));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.sidebar.set_status(&status);
                    }
                    LoadResult::Complete(loader) => {
                        self.on_loaded(loader);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("Dataset load failed: {}", error);
                        self.sidebar.set_status(&format!("Error: {}", error));
                        self.load_error = Some(error);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn on_loaded(&mut self, loader: DataLoader) {
        self.loader = loader;
        let (rows, cols) = (self.loader.get_row_count(), self.loader.get_columns().len());

        if !self.loader.has_column(&self.config.name_column) {
            log::warn!("Column '{}' not found in dataset", self.config.name_column);
        }

        self.overview = Some(OverviewPage::from_loader(&self.loader, &self.config));
        self.eda = Some(EdaPage::new(&self.loader, &self.config));

        log::info!("Loaded {} rows, {} columns", rows, cols);
        self.sidebar
            .set_status(&format!("Loaded {} rows, {} columns", rows, cols));
    }

    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    fn handle_reload(&mut self) {
        let path = self
            .loader
            .get_file_path()
            .cloned()
            .unwrap_or_else(|| self.config.data_path.clone());
        self.start_loading(path);
    }

    fn show_load_error(&mut self, ui: &mut egui::Ui, error: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(
                RichText::new("⚠ Could not load the dataset")
                    .size(20.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
            ui.add_space(8.0);
            ui.label(error);
            ui.add_space(12.0);
            if ui.button("⟳ Retry").clicked() {
                self.handle_reload();
            }
        });
    }

    fn show_page(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        if self.sidebar.page == Page::Home {
            self.home
                .show(ctx, ui, &self.config.logo_path, self.config.logo_width);
            return;
        }

        if self.is_loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }
        if let Some(error) = self.load_error.clone() {
            self.show_load_error(ui, &error);
            return;
        }

        match self.sidebar.page {
            Page::Overview => {
                if let Some(overview) = &self.overview {
                    overview.show(ui);
                }
            }
            Page::Eda => {
                if let (Some(eda), Some(df)) = (&mut self.eda, self.loader.get_dataframe()) {
                    eda.show(ui, df, &self.config);
                }
            }
            Page::Home => {}
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        self.sidebar.is_loading = self.is_loading;

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Navigation
        SidePanel::left("sidebar")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                let action = self.sidebar.show(ui);

                match action {
                    SidebarAction::PageChanged(Page::Home) => self.home.celebrate(),
                    SidebarAction::PageChanged(page) => log::debug!("Switched to {:?}", page),
                    SidebarAction::OpenCsv => self.handle_open_csv(),
                    SidebarAction::Reload => self.handle_reload(),
                    SidebarAction::None => {}
                }
            });

        // Central panel - Current page
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_page(ctx, ui);
        });
    }
}
