//! BI Network Dashboard Application
//!
//! Layout:
//! ┌──────────────────────────────────────────────┐
//! │  Header + toolbar                            │
//! ├──────────────────────────────────────────────┤
//! │  Metric cards                                │
//! ├──────────────────────────────┬───────────────┤
//! │  Legend                      │  Charts       │
//! │  Network graph               │  (scrolling)  │
//! └──────────────────────────────┴───────────────┘

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use eframe::egui;
use egui::{Align2, RichText};
use tracing::{info, warn};

use crate::charts::ChartSlot;
use crate::config::DashboardConfig;
use crate::controller::{LoadStatus, ViewController};
use crate::dataset::{DataSource, DatasetStore};
use crate::error::{DashboardError, Result};
use crate::panels::{self, ToolbarAction, ToolbarData};

/// Fonts tried when no font is configured. egui's bundled fonts have no
/// Arabic glyphs.
const SYSTEM_ARABIC_FONTS: [&str; 4] = [
    "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

type PendingLoad = Arc<Mutex<Option<Result<DatasetStore>>>>;

/// Main application state
pub struct DashboardApp {
    controller: ViewController,
    data_source: DataSource,
    title: String,

    // Async dataset load
    runtime: Arc<tokio::runtime::Runtime>,
    pending_load: Option<PendingLoad>,

    // Messages
    last_error: Option<String>,
    last_export: Option<PathBuf>,
    /// Modal alert text
    alert: Option<String>,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        runtime: Arc<tokio::runtime::Runtime>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        configure_fonts(&cc.egui_ctx, config.font_path.as_deref());

        let mut app = Self {
            controller: ViewController::new(config.graph.clone(), config.export_dir.clone()),
            data_source: DataSource::parse(&config.data_source),
            title: config.window.title.clone(),
            runtime,
            pending_load: None,
            last_error: None,
            last_export: None,
            alert: None,
        };
        app.load_dataset();
        app
    }

    // =========================================================================
    // DATASET LOAD
    // =========================================================================

    fn load_dataset(&mut self) {
        info!(source = %self.data_source, "Loading dataset");
        self.controller.begin_loading();
        self.last_error = None;

        let source = self.data_source.clone();
        let result: PendingLoad = Arc::new(Mutex::new(None));
        let result_clone = Arc::clone(&result);

        self.runtime.spawn(async move {
            let res = DatasetStore::load(&source).await;
            if let Ok(mut slot) = result_clone.lock() {
                *slot = Some(res);
            }
        });

        self.pending_load = Some(result);
    }

    fn check_pending_load(&mut self) {
        let Some(pending) = self.pending_load.as_ref() else {
            return;
        };
        let result = pending.lock().ok().and_then(|mut g| g.take());
        if let Some(result) = result {
            self.pending_load = None;
            if let Err(ref e) = result {
                self.last_error = Some(e.to_string());
            }
            self.controller.on_dataset_loaded(result);
        }
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    fn toolbar_data(&self) -> ToolbarData {
        let state = self.controller.state();
        let regions = self
            .controller
            .dataset()
            .map(|d| {
                d.list_regions()
                    .into_iter()
                    .map(|name| (name.to_string(), d.region_label(name)))
                    .collect()
            })
            .unwrap_or_default();
        ToolbarData {
            regions,
            selected_region: state.selected_region.clone(),
            view_mode: state.view_mode,
            bi_years: self
                .controller
                .selected_record()
                .and_then(|r| r.metrics.bi_years.clone()),
            is_loading: self.pending_load.is_some(),
            last_error: self.last_error.clone(),
            last_export: self.last_export.as_ref().map(|p| p.display().to_string()),
        }
    }

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        if let Some(name) = action.select_region {
            if let Err(e) = self.controller.select_region(&name) {
                warn!(error = %e, "Region selection rejected");
                self.last_error = Some(e.to_string());
            }
        }
        if let Some(mode) = action.change_view_mode {
            self.controller.set_view_mode(mode);
        }
        if action.reset_layout {
            self.controller.reset_layout();
        }
        if action.reset_zoom {
            self.controller.reset_zoom();
        }
        if action.export {
            match self.controller.export_current_region() {
                Ok(path) => {
                    self.last_error = None;
                    self.last_export = Some(path);
                }
                Err(e @ DashboardError::NoSelection) => self.alert = Some(e.user_message()),
                Err(e) => {
                    warn!(error = %e, "Export failed");
                    self.last_error = Some(e.to_string());
                }
            }
        }
        if action.dismiss_message {
            self.last_error = None;
            self.last_export = None;
        }
    }

    fn alert_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("تنبيه")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("حسناً").clicked() {
                    self.alert = None;
                }
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_pending_load();

        // Request repaint while the load is in flight
        if self.pending_load.is_some() {
            ctx.request_repaint();
        }

        self.alert_window(ctx);

        // =====================================================================
        // HEADER - title, toolbar
        // =====================================================================
        let toolbar_data = self.toolbar_data();
        let mut action = ToolbarAction::default();
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(RichText::new(&self.title).strong());
            action = panels::toolbar(ui, &toolbar_data);
            ui.add_space(4.0);
        });

        // =====================================================================
        // METRIC CARDS
        // =====================================================================
        let state = self.controller.state();
        if !state.metrics.is_empty() || state.projection_error.is_some() {
            egui::TopBottomPanel::top("metrics").show(ctx, |ui| {
                ui.add_space(4.0);
                match state.projection_error {
                    Some(ref error) => panels::projection_placeholder(ui, error),
                    None => panels::metric_cards(ui, &state.metrics),
                }
                ui.add_space(4.0);
            });
        }

        // =====================================================================
        // CHARTS (right)
        // =====================================================================
        if !state.charts.is_empty() {
            egui::SidePanel::right("charts")
                .resizable(true)
                .default_width(460.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for slot in ChartSlot::all() {
                            panels::chart_card(ui, &state.charts, slot);
                            ui.add_space(8.0);
                        }
                    });
                });
        }

        // =====================================================================
        // NETWORK (center)
        // =====================================================================
        let failed = matches!(self.controller.status(), LoadStatus::Failed(_));
        let mut resized = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            if !failed {
                panels::legend(ui);
                ui.separator();
            }
            resized = self.controller.graph_mut().ui(ui);
        });

        if let Some(size) = resized {
            self.controller.on_viewport_resize(size);
        }
        self.handle_toolbar_action(action);
    }
}

/// Add an Arabic-capable font as fallback for the proportional and
/// monospace families
fn configure_fonts(ctx: &egui::Context, configured: Option<&Path>) {
    let candidates: Vec<PathBuf> = match configured {
        Some(path) => vec![path.to_path_buf()],
        None => SYSTEM_ARABIC_FONTS.iter().map(PathBuf::from).collect(),
    };

    let Some((path, bytes)) = candidates
        .into_iter()
        .find_map(|p| std::fs::read(&p).ok().map(|bytes| (p, bytes)))
    else {
        warn!("No Arabic font found; Arabic text will not render. Set font_path in the config");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("arabic".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("arabic".to_owned());
    }
    ctx.set_fonts(fonts);
    info!(path = %path.display(), "Loaded Arabic font");
}
