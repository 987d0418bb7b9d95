//! Rendering - draws links, nodes and labels using egui::Painter
//!
//! All rendering uses scene coordinates transformed by the camera. Link and
//! node sizes scale with zoom so the whole scene behaves like one transformed
//! group.

use super::camera::Camera2D;
use super::colors::{
    label_font_size, link_color, link_width, node_fill, node_stroke, node_stroke_width,
    LABEL_COLOR,
};
use super::scene::Scene;
use bi_network_types::NodeType;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke};

// =============================================================================
// RENDER CONSTANTS
// =============================================================================

/// Gap between a node's edge and its label, scene units
const LABEL_OFFSET: f32 = 15.0;

const HOVER_RING: Color32 = Color32::from_rgb(255, 235, 59);

// =============================================================================
// GRAPH RENDERER
// =============================================================================

pub struct GraphRenderer {
    /// Background fill behind the scene
    pub background: Color32,
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(250, 250, 250),
        }
    }
}

impl GraphRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the complete scene
    ///
    /// # Arguments
    /// * `painter` - painter clipped to the graph viewport
    /// * `scene` - live scene
    /// * `camera` - scene-to-screen transform
    /// * `screen_rect` - viewport rectangle
    /// * `hovered` - index of the node under the pointer
    pub fn render(
        &self,
        painter: &egui::Painter,
        scene: &Scene,
        camera: &Camera2D,
        screen_rect: Rect,
        hovered: Option<usize>,
    ) {
        let zoom = camera.zoom();
        let to_screen = |pos: Pos2| camera.world_to_screen(pos, screen_rect);

        // Links first (below nodes)
        for link in scene.links() {
            let (Some(a), Some(b)) = (scene.position(link.source), scene.position(link.target))
            else {
                continue;
            };
            painter.line_segment(
                [to_screen(a), to_screen(b)],
                Stroke::new(
                    link_width(link.strength) * zoom,
                    link_color(&link.link_type),
                ),
            );
        }

        // Nodes
        for (i, (node, body)) in scene.nodes().iter().zip(scene.bodies()).enumerate() {
            let center = to_screen(body.position);
            let radius = node.size as f32 * zoom;
            painter.circle(
                center,
                radius,
                node_fill(node.node_type),
                Stroke::new(
                    node_stroke_width(node.node_type) * zoom,
                    node_stroke(node.node_type),
                ),
            );
            if hovered == Some(i) {
                painter.circle_stroke(center, radius + 3.0, Stroke::new(2.0, HOVER_RING));
            }
        }

        // Labels last (on top), scaled with the scene at every zoom level
        for (i, (node, body)) in scene.nodes().iter().zip(scene.bodies()).enumerate() {
            if !scene.is_labeled(i) {
                continue;
            }
            let anchor = Pos2::new(
                body.position.x,
                body.position.y + node.size as f32 + LABEL_OFFSET,
            );
            let font = FontId::proportional(label_font_size(node.node_type) * zoom);
            let color = match node.node_type {
                NodeType::DecisionMaker => Color32::BLACK,
                NodeType::Process | NodeType::DataSource => LABEL_COLOR,
            };
            painter.text(
                to_screen(anchor),
                Align2::CENTER_CENTER,
                node.display_label(),
                font,
                color,
            );
        }
    }

    /// Message shown instead of the scene (loading, errors, empty selection)
    pub fn render_message(&self, painter: &egui::Painter, screen_rect: Rect, message: &str) {
        painter.rect_filled(screen_rect, 0.0, self.background);
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            message,
            FontId::proportional(16.0),
            Color32::from_rgb(102, 102, 102),
        );
    }
}
