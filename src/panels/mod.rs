//! UI panels around the network view

mod legend;
mod metric_cards;
mod toolbar;

pub use legend::{legend, LINK_LEGEND};
pub use metric_cards::{chart_card, metric_cards, projection_placeholder};
pub use toolbar::{toolbar, ToolbarAction, ToolbarData};
