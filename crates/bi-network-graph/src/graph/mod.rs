//! Network Graph Visualization Module
//!
//! Force-directed view of one region's organisational network.
//!
//! # Architecture
//!
//! ```text
//! RegionRecord (from the dataset)
//!        │
//!        ▼
//! project_network (pick snapshot + layout parameters for the view mode)
//!        │
//!        ▼
//! Scene (node copies, bodies, resolved links, LayoutEngine)
//!        │
//!        ├──► GraphRenderer (draws to egui::Painter)
//!        │
//!        └──► InputHandler (hover, drag-pin, pan, zoom)
//!                    │
//!                    ▼
//!              Camera2D (zoom transform)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut widget = NetworkGraphWidget::new(GraphSettings::default());
//! let (graph, params) = project_network(&record, ViewMode::Post);
//! widget.set_scene(graph, params, viewport);
//! widget.ui(ui);
//! ```

pub mod animation;
pub mod camera;
pub mod colors;
pub mod force_sim;
pub mod input;
pub mod projection;
pub mod render;
pub mod scene;
pub mod tooltip;

pub use camera::{Camera2D, ZoomConfig, ZoomTransform};
pub use force_sim::{Body, ForceConfig, ForceSimulation, LayoutEngine, Spring};
pub use input::{InputHandler, InputState};
pub use projection::{project_network, LayoutParams};
pub use render::GraphRenderer;
pub use scene::{should_label, Scene, SceneLink, LABEL_SIZE_THRESHOLD};
pub use tooltip::tooltip_lines;

use bi_network_types::Graph;
use egui::{Sense, Vec2};
use serde::Deserialize;

/// Viewport assumed until the widget has been laid out once
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

/// Settings for the network view, loaded from the `graph` config section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub simulation: ForceConfig,
    pub zoom: ZoomConfig,
    /// Companies at or below this size stay unlabeled
    pub label_threshold: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            simulation: ForceConfig::default(),
            zoom: ZoomConfig::default(),
            label_threshold: LABEL_SIZE_THRESHOLD,
        }
    }
}

// =============================================================================
// WIDGET
// =============================================================================

/// Main network graph widget
pub struct NetworkGraphWidget {
    camera: Camera2D,
    scene: Option<Scene>,
    input_state: InputState,
    renderer: GraphRenderer,
    settings: GraphSettings,
    /// Viewport size the current scene was built for
    viewport: Vec2,
    /// Shown when there is no scene
    placeholder: String,
}

impl Default for NetworkGraphWidget {
    fn default() -> Self {
        Self::new(GraphSettings::default())
    }
}

impl NetworkGraphWidget {
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            camera: Camera2D::new(settings.zoom.clone()),
            scene: None,
            input_state: InputState::new(),
            renderer: GraphRenderer::new(),
            settings,
            viewport: DEFAULT_VIEWPORT,
            placeholder: String::new(),
        }
    }

    /// Replace the scene. The previous scene (and its layout engine) is
    /// dropped before the new one starts, and the zoom resets to identity.
    pub fn set_scene(&mut self, graph: &Graph, params: LayoutParams, viewport: Vec2) {
        self.scene = None;
        self.input_state.clear();
        self.camera.snap_identity();
        self.viewport = viewport;
        self.scene = Some(Scene::build(
            graph,
            params,
            viewport,
            &self.settings.simulation,
            self.settings.label_threshold,
        ));
    }

    /// Remove the scene and show `message` instead
    pub fn clear(&mut self, message: impl Into<String>) {
        self.scene = None;
        self.input_state.clear();
        self.camera.snap_identity();
        self.placeholder = message.into();
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn transform(&self) -> ZoomTransform {
        self.camera.transform()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Reheat the layout with the current data
    pub fn reset_layout(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.reheat();
        }
    }

    /// Animate the zoom back to identity
    pub fn reset_zoom(&mut self) {
        self.camera.reset_animated();
    }

    /// Advance camera animation and layout by one frame.
    /// Returns true while anything is still moving.
    pub fn step(&mut self, dt: f32) -> bool {
        let mut active = self.camera.update(dt);
        if let Some(scene) = self.scene.as_mut() {
            scene.tick();
            active |= scene.is_active();
        }
        active
    }

    /// Main UI function. Returns the new viewport size when the available
    /// area differs from the one the scene was built for.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Vec2> {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
        let screen_rect = response.rect;

        let resized = ((screen_rect.size() - self.viewport).length() > 1.0
            && screen_rect.width() > 0.0
            && screen_rect.height() > 0.0)
            .then(|| screen_rect.size());

        let Some(scene) = self.scene.as_mut() else {
            self.renderer
                .render_message(&painter, screen_rect, &self.placeholder);
            return resized;
        };

        painter.rect_filled(screen_rect, 0.0, self.renderer.background);

        let dt = ui.input(|i| i.stable_dt).min(0.1);
        let mut needs_repaint = self.camera.update(dt);
        needs_repaint |= InputHandler::handle_input(
            &response,
            &mut self.camera,
            &mut self.input_state,
            scene,
            screen_rect,
        );
        needs_repaint |= scene.tick();

        ui.ctx()
            .set_cursor_icon(input::cursor_for_state(&self.input_state, scene));

        self.renderer.render(
            &painter,
            scene,
            &self.camera,
            screen_rect,
            self.input_state.hovered_node,
        );

        if let (Some(index), Some(pointer)) =
            (self.input_state.hovered_node, self.input_state.pointer_pos)
        {
            if let Some(node) = scene.nodes().get(index) {
                tooltip::show_node_tooltip(ui.ctx(), pointer, node);
            }
        }

        if needs_repaint || scene.is_active() || self.camera.is_animating() {
            ui.ctx().request_repaint();
        }

        resized
    }
}
