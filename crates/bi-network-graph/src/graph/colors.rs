//! Color palettes for the network visualization
//!
//! Exhaustive over `NodeType` so a new node type cannot ship unstyled.

use bi_network_types::NodeType;
use egui::Color32;

// =============================================================================
// NODE COLORS
// =============================================================================

/// Fill color for a node type
pub fn node_fill(node_type: NodeType) -> Color32 {
    match node_type {
        NodeType::DecisionMaker => Color32::from_rgb(76, 175, 80), // #4CAF50
        NodeType::Process => Color32::from_rgb(255, 152, 0),       // #FF9800
        NodeType::DataSource => Color32::from_rgb(33, 150, 243),   // #2196F3
    }
}

/// Border color for a node type
pub fn node_stroke(node_type: NodeType) -> Color32 {
    match node_type {
        NodeType::DecisionMaker => Color32::from_rgb(46, 125, 50), // #2E7D32
        NodeType::Process => Color32::from_rgb(230, 81, 0),        // #E65100
        NodeType::DataSource => Color32::from_rgb(21, 101, 192),   // #1565C0
    }
}

/// Border width for a node type
pub fn node_stroke_width(node_type: NodeType) -> f32 {
    match node_type {
        NodeType::DecisionMaker => 3.0,
        NodeType::Process => 2.0,
        NodeType::DataSource => 1.5,
    }
}

// =============================================================================
// LABELS
// =============================================================================

pub const LABEL_COLOR: Color32 = Color32::from_rgb(51, 51, 51);

/// Font size for a node label
pub fn label_font_size(node_type: NodeType) -> f32 {
    match node_type {
        NodeType::DecisionMaker => 14.0,
        NodeType::Process | NodeType::DataSource => 10.0,
    }
}

// =============================================================================
// LINK COLORS
// =============================================================================

/// Stroke color for a link category
pub fn link_color(link_type: &str) -> Color32 {
    match link_type {
        "governance" => Color32::from_rgba_unmultiplied(76, 175, 80, 150),
        "belongs_to" => Color32::from_rgba_unmultiplied(255, 152, 0, 120),
        "data_flow" => Color32::from_rgba_unmultiplied(33, 150, 243, 120),
        _ => Color32::from_rgba_unmultiplied(153, 153, 153, 110),
    }
}

/// Stroke width for a link: `sqrt(strength) * 2`
pub fn link_width(strength: f64) -> f32 {
    (strength.max(0.0).sqrt() * 2.0) as f32
}
