//! Input handling - pointer interaction with the network view
//!
//! Drag on a node pins it and moves it, drag on empty space pans, scroll
//! zooms around the pointer.

use super::camera::Camera2D;
use super::scene::Scene;
use egui::{Pos2, Rect, Response};

// =============================================================================
// INPUT STATE
// =============================================================================

/// Tracks input state for the graph view
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Index of the node under the pointer
    pub hovered_node: Option<usize>,
    /// Screen position of the pointer while it is over the view
    pub pointer_pos: Option<Pos2>,
    /// Is the user currently dragging empty space?
    pub is_panning: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Cursor for the current interaction
pub fn cursor_for_state(state: &InputState, scene: &Scene) -> egui::CursorIcon {
    if scene.dragging().is_some() || state.is_panning {
        egui::CursorIcon::Grabbing
    } else if state.hovered_node.is_some() {
        egui::CursorIcon::Grab
    } else {
        egui::CursorIcon::Default
    }
}

// =============================================================================
// INPUT HANDLER
// =============================================================================

/// Handles all input for the graph view
pub struct InputHandler;

impl InputHandler {
    /// Process input and update camera/scene/state.
    /// Returns true if the view needs to be repainted.
    pub fn handle_input(
        response: &Response,
        camera: &mut Camera2D,
        state: &mut InputState,
        scene: &mut Scene,
        screen_rect: Rect,
    ) -> bool {
        let mut needs_repaint = false;

        // Hover
        state.pointer_pos = response.hover_pos();
        let previous_hover = state.hovered_node;
        state.hovered_node = match scene.dragging() {
            Some(index) => Some(index),
            None => state
                .pointer_pos
                .and_then(|pos| scene.node_at(camera.screen_to_world(pos, screen_rect))),
        };
        needs_repaint |= previous_hover != state.hovered_node;

        // Drag start: hit test where the press began, not where the drag
        // threshold was crossed
        if response.drag_started() {
            let origin = response
                .ctx
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = origin {
                match scene.node_at(camera.screen_to_world(pos, screen_rect)) {
                    Some(index) => {
                        scene.begin_drag(index);
                        tracing::trace!(index, "node drag started");
                    }
                    None => state.is_panning = true,
                }
            }
        }

        if response.dragged() {
            if scene.dragging().is_some() {
                if let Some(pos) = response.interact_pointer_pos() {
                    scene.drag_to(camera.screen_to_world(pos, screen_rect));
                }
            } else {
                let delta = response.drag_delta();
                if delta.length() > 0.0 {
                    camera.pan(delta);
                    state.is_panning = true;
                }
            }
            needs_repaint = true;
        }

        if response.drag_stopped() {
            scene.end_drag();
            state.is_panning = false;
            needs_repaint = true;
        }

        // Scroll zoom around the pointer
        if let Some(pos) = state.pointer_pos {
            let (scroll, pinch) = response
                .ctx
                .input(|i| (i.smooth_scroll_delta.y, i.zoom_delta()));
            let factor = (scroll * camera.config.scroll_sensitivity).exp() * pinch;
            if (factor - 1.0).abs() > f32::EPSILON {
                camera.zoom_at(factor, pos, screen_rect);
                needs_repaint = true;
            }
        }

        needs_repaint
    }
}
