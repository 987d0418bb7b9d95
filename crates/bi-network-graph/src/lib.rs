//! BI Network Graph Widget
//!
//! This crate contains ONLY the network widget and its projector - no dataset
//! loading, no charts, no app shell. The widget is used by the dashboard
//! crate, which owns the dataset and the app lifecycle.

pub mod graph;

pub use graph::{
    // Projection
    project_network,
    should_label,
    tooltip_lines,
    // Layout engine
    Body,
    // Camera
    Camera2D,
    ForceConfig,
    ForceSimulation,
    GraphSettings,
    LayoutEngine,
    LayoutParams,
    // Core widget
    NetworkGraphWidget,
    Scene,
    ZoomConfig,
    ZoomTransform,
};
