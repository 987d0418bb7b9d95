//! View Controller - owns the view state and turns UI events into rebuilds
//!
//! Every region or mode change re-runs both projectors and rebuilds the graph
//! scene and all four charts. There is no partial update path.

use std::path::{Path, PathBuf};

use bi_network_graph::{project_network, GraphSettings, NetworkGraphWidget};
use bi_network_types::{RegionRecord, ViewMode};
use egui::Vec2;
use tracing::{debug, info, warn};

use crate::charts::ChartRegistry;
use crate::dataset::DatasetStore;
use crate::error::{DashboardError, ProjectionError, Result};
use crate::export::export_region;
use crate::metrics::{project_charts, project_metrics, DisplayMetric};

const LOADING_MESSAGE: &str = "جاري تحميل البيانات...";
const EMPTY_MESSAGE: &str = "لا توجد محافظات في البيانات";

/// Where the dataset load stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Load failed; the message replaces the graph
    Failed(String),
}

/// Everything the dashboard currently shows. Single owner: the controller.
pub struct ViewState {
    pub selected_region: Option<String>,
    pub view_mode: ViewMode,
    pub graph: NetworkGraphWidget,
    pub charts: ChartRegistry,
    /// Summary cards of the selected region
    pub metrics: Vec<DisplayMetric>,
    /// Set when the selected region's metrics could not be projected
    pub projection_error: Option<ProjectionError>,
}

impl ViewState {
    fn new(settings: GraphSettings) -> Self {
        Self {
            selected_region: None,
            view_mode: ViewMode::default(),
            graph: NetworkGraphWidget::new(settings),
            charts: ChartRegistry::new(),
            metrics: Vec::new(),
            projection_error: None,
        }
    }
}

pub struct ViewController {
    dataset: Option<DatasetStore>,
    state: ViewState,
    status: LoadStatus,
    export_dir: PathBuf,
}

impl ViewController {
    pub fn new(settings: GraphSettings, export_dir: impl Into<PathBuf>) -> Self {
        let mut state = ViewState::new(settings);
        state.graph.clear(LOADING_MESSAGE);
        Self {
            dataset: None,
            state,
            status: LoadStatus::Loading,
            export_dir: export_dir.into(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn graph_mut(&mut self) -> &mut NetworkGraphWidget {
        &mut self.state.graph
    }

    pub fn dataset(&self) -> Option<&DatasetStore> {
        self.dataset.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn selected_record(&self) -> Option<&RegionRecord> {
        let name = self.state.selected_region.as_deref()?;
        self.dataset.as_ref()?.get(name)
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Back to the loading state (a reload was requested)
    pub fn begin_loading(&mut self) {
        self.status = LoadStatus::Loading;
        self.state.graph.clear(LOADING_MESSAGE);
    }

    /// Handle the result of the dataset load. On success the first region in
    /// name order is selected.
    pub fn on_dataset_loaded(&mut self, result: Result<DatasetStore>) {
        match result {
            Ok(store) => {
                info!(regions = store.len(), "Dataset ready");
                let first = store.first_region().map(str::to_string);
                self.dataset = Some(store);
                self.status = LoadStatus::Ready;
                self.state.selected_region = None;
                match first {
                    Some(name) => {
                        self.state.selected_region = Some(name);
                        self.rebuild();
                    }
                    None => self.clear_view(EMPTY_MESSAGE),
                }
            }
            Err(e) => {
                warn!(error = %e, "Dataset load failed");
                let message = e.user_message();
                self.dataset = None;
                self.state.selected_region = None;
                self.clear_view(&message);
                self.status = LoadStatus::Failed(message);
            }
        }
    }

    /// Switch region. Unknown names are rejected without touching the view.
    pub fn select_region(&mut self, name: &str) -> Result<()> {
        let known = self
            .dataset
            .as_ref()
            .is_some_and(|d| d.get(name).is_some());
        if !known {
            return Err(DashboardError::UnknownRegion(name.to_string()));
        }
        info!(region = name, "Region selected");
        self.state.selected_region = Some(name.to_string());
        self.rebuild();
        Ok(())
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.state.view_mode == mode {
            return;
        }
        info!(mode = mode.as_str(), "View mode changed");
        self.state.view_mode = mode;
        self.rebuild();
    }

    /// Reheat the layout; data and zoom stay as they are
    pub fn reset_layout(&mut self) {
        self.state.graph.reset_layout();
    }

    /// Animate the zoom back to identity
    pub fn reset_zoom(&mut self) {
        self.state.graph.reset_zoom();
    }

    /// Write the selected region's record into the export directory
    pub fn export_current_region(&self) -> Result<PathBuf> {
        let name = self
            .state
            .selected_region
            .as_deref()
            .ok_or(DashboardError::NoSelection)?;
        let record = self
            .dataset
            .as_ref()
            .and_then(|d| d.get(name))
            .ok_or(DashboardError::NoSelection)?;
        export_region(&self.export_dir, name, record)
    }

    /// The graph area changed size: rebuild everything for the new viewport
    pub fn on_viewport_resize(&mut self, size: Vec2) {
        debug!(width = size.x, height = size.y, "Viewport resized");
        self.state.graph.set_viewport(size);
        self.rebuild();
    }

    // =========================================================================
    // REBUILD
    // =========================================================================

    fn rebuild(&mut self) {
        let Some(name) = self.state.selected_region.as_deref() else {
            return;
        };
        let Some(record) = self.dataset.as_ref().and_then(|d| d.get(name)) else {
            return;
        };
        let mode = self.state.view_mode;
        debug!(region = name, mode = mode.as_str(), "Rebuilding view");

        let projected = project_metrics(&record.metrics)
            .and_then(|cards| project_charts(&record.metrics).map(|charts| (cards, charts)));
        match projected {
            Ok((cards, series)) => {
                self.state.metrics = cards;
                self.state.projection_error = None;
                for (slot, series) in series {
                    if let Err(e) = self.state.charts.update(slot, series) {
                        warn!(?slot, error = %e, "Chart construction failed");
                    }
                }
            }
            Err(e) => {
                warn!(region = name, error = %e, "Metrics projection failed");
                self.state.metrics.clear();
                self.state.charts.clear();
                self.state.projection_error = Some(e);
            }
        }

        let (graph, params) = project_network(record, mode);
        let viewport = self.state.graph.viewport();
        self.state.graph.set_scene(graph, params, viewport);
    }

    fn clear_view(&mut self, message: &str) {
        self.state.metrics.clear();
        self.state.charts.clear();
        self.state.projection_error = None;
        self.state.graph.clear(message);
    }
}
