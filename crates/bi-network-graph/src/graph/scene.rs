//! Scene - renderer-private copy of one network snapshot plus its layout state
//!
//! A scene is built from a projected graph and thrown away on every region or
//! view switch. Runtime layout data (positions, velocities, pins) lives in the
//! scene's bodies, never on the shared dataset nodes.

use super::force_sim::{Body, ForceConfig, ForceSimulation, LayoutEngine, Spring};
use super::projection::LayoutParams;
use bi_network_types::{Graph, Node, NodeType};
use egui::{Pos2, Vec2};
use std::collections::HashMap;

/// `data_source` nodes at or below this size are not labeled
pub const LABEL_SIZE_THRESHOLD: f64 = 15.0;

/// Whether a node gets a text label. Small companies stay unlabeled to keep
/// large graphs readable; the threshold is exclusive.
pub fn should_label(node: &Node, threshold: f64) -> bool {
    match node.node_type {
        NodeType::DecisionMaker | NodeType::Process => true,
        NodeType::DataSource => node.size > threshold,
    }
}

// =============================================================================
// SCENE TYPES
// =============================================================================

/// A link whose endpoints both resolved to scene nodes
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLink {
    pub source: usize,
    pub target: usize,
    pub link_type: String,
    pub strength: f64,
}

/// Live scene: nodes, resolved links, bodies and the layout engine
pub struct Scene {
    nodes: Vec<Node>,
    bodies: Vec<Body>,
    links: Vec<SceneLink>,
    labeled: Vec<bool>,
    engine: Box<dyn LayoutEngine>,
    dropped_links: usize,
    drag_alpha_target: f32,
    dragging: Option<usize>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("links", &self.links.len())
            .field("dropped_links", &self.dropped_links)
            .field("alpha", &self.engine.alpha())
            .field("dragging", &self.dragging)
            .finish()
    }
}

impl Scene {
    /// Build a scene laid out around the center of a `viewport` sized area.
    ///
    /// Links that reference unknown node ids are dropped with a warning.
    pub fn build(
        graph: &Graph,
        params: LayoutParams,
        viewport: Vec2,
        config: &ForceConfig,
        label_threshold: f64,
    ) -> Self {
        let center = (viewport / 2.0).to_pos2();
        let (links, springs, dropped) = resolve_links(graph, &params);

        let mut simulation = ForceSimulation::new(
            config.clone(),
            params.repulsion,
            center,
            graph.nodes.len(),
            springs,
        );

        let mut bodies: Vec<Body> = graph
            .nodes
            .iter()
            .map(|n| Body::new(n.size as f32 + config.collide_margin))
            .collect();
        simulation.seed_positions(&mut bodies);

        Self::with_engine(
            graph,
            links,
            bodies,
            Box::new(simulation),
            dropped,
            config,
            label_threshold,
        )
    }

    /// Build a scene around a caller-supplied layout engine.
    /// Bodies start at the origin unless the engine moves them.
    pub fn build_with_engine(
        graph: &Graph,
        params: LayoutParams,
        engine: Box<dyn LayoutEngine>,
        config: &ForceConfig,
        label_threshold: f64,
    ) -> Self {
        let (links, _, dropped) = resolve_links(graph, &params);
        let bodies = graph
            .nodes
            .iter()
            .map(|n| Body::new(n.size as f32 + config.collide_margin))
            .collect();
        Self::with_engine(
            graph,
            links,
            bodies,
            engine,
            dropped,
            config,
            label_threshold,
        )
    }

    fn with_engine(
        graph: &Graph,
        links: Vec<SceneLink>,
        bodies: Vec<Body>,
        engine: Box<dyn LayoutEngine>,
        dropped_links: usize,
        config: &ForceConfig,
        label_threshold: f64,
    ) -> Self {
        let labeled = graph
            .nodes
            .iter()
            .map(|n| should_label(n, label_threshold))
            .collect();

        tracing::debug!(
            nodes = graph.nodes.len(),
            links = links.len(),
            dropped_links,
            "built network scene"
        );

        Self {
            nodes: graph.nodes.clone(),
            bodies,
            links,
            labeled,
            engine,
            dropped_links,
            drag_alpha_target: config.drag_alpha_target,
            dragging: None,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn links(&self) -> &[SceneLink] {
        &self.links
    }

    /// Number of links skipped because an endpoint was missing
    pub fn dropped_links(&self) -> usize {
        self.dropped_links
    }

    pub fn is_labeled(&self, index: usize) -> bool {
        self.labeled.get(index).copied().unwrap_or(false)
    }

    pub fn position(&self, index: usize) -> Option<Pos2> {
        self.bodies.get(index).map(|b| b.position)
    }

    pub fn engine(&self) -> &dyn LayoutEngine {
        self.engine.as_ref()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.dragging
    }

    // =========================================================================
    // SIMULATION
    // =========================================================================

    /// Run one layout tick if the engine is still hot. Returns true if
    /// positions changed.
    pub fn tick(&mut self) -> bool {
        if !self.engine.is_active() {
            return false;
        }
        self.engine.tick(&mut self.bodies);
        true
    }

    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Reheat the layout without touching the data
    pub fn reheat(&mut self) {
        self.engine.set_alpha(1.0);
    }

    // =========================================================================
    // HIT TESTING
    // =========================================================================

    /// Topmost node whose circle contains `pos` (scene coordinates)
    pub fn node_at(&self, pos: Pos2) -> Option<usize> {
        self.nodes
            .iter()
            .zip(&self.bodies)
            .enumerate()
            .rev()
            .find(|(_, (node, body))| (pos - body.position).length() <= node.size as f32)
            .map(|(i, _)| i)
    }

    // =========================================================================
    // DRAG (pin while dragging)
    // =========================================================================

    /// Pin a node where it is and keep the rest of the layout moving
    pub fn begin_drag(&mut self, index: usize) {
        let Some(body) = self.bodies.get_mut(index) else {
            return;
        };
        body.fixed = Some(body.position);
        self.dragging = Some(index);
        self.engine.set_alpha_target(self.drag_alpha_target);
    }

    /// Move the pinned node
    pub fn drag_to(&mut self, pos: Pos2) {
        let Some(index) = self.dragging else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(index) {
            body.fixed = Some(pos);
            body.position = pos;
        }
    }

    /// Release the pin and let the layout cool down again
    pub fn end_drag(&mut self) {
        let Some(index) = self.dragging.take() else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(index) {
            body.fixed = None;
        }
        self.engine.set_alpha_target(0.0);
    }
}

/// Resolve link endpoints to node indices
fn resolve_links(graph: &Graph, params: &LayoutParams) -> (Vec<SceneLink>, Vec<Spring>, usize) {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
    for (i, node) in graph.nodes.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(i);
    }

    let mut links = Vec::with_capacity(graph.links.len());
    let mut springs = Vec::with_capacity(graph.links.len());
    let mut dropped = 0;

    for link in &graph.links {
        let (Some(&source), Some(&target)) = (
            index.get(link.source.as_str()),
            index.get(link.target.as_str()),
        ) else {
            tracing::warn!(
                source = %link.source,
                target = %link.target,
                "dropping link with unknown endpoint"
            );
            dropped += 1;
            continue;
        };

        springs.push(Spring {
            source,
            target,
            distance: params.link_distance(link),
        });
        links.push(SceneLink {
            source,
            target,
            link_type: link.link_type.clone(),
            strength: link.strength,
        });
    }

    (links, springs, dropped)
}

// =============================================================================
// TESTS
// =============================================================================
