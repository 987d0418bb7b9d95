//! Network projection - picks the snapshot and layout parameters for a view
//!
//! The post-adoption network is laid out denser (stronger repulsion, shorter
//! links) than the pre-adoption one.

use bi_network_types::{Graph, Link, RegionRecord, ViewMode};

/// Per-view force parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Many-body strength (negative = repulsion)
    pub repulsion: f32,
    /// Link distance before the strength term is added
    pub base_link_distance: f32,
}

impl LayoutParams {
    pub const PRE: LayoutParams = LayoutParams {
        repulsion: -200.0,
        base_link_distance: 80.0,
    };

    pub const POST: LayoutParams = LayoutParams {
        repulsion: -300.0,
        base_link_distance: 50.0,
    };

    pub fn for_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Pre => Self::PRE,
            ViewMode::Post => Self::POST,
        }
    }

    /// Target distance for one link: `base + strength * 30`
    pub fn link_distance(&self, link: &Link) -> f32 {
        self.base_link_distance + link.strength as f32 * 30.0
    }
}

/// Select the network snapshot and layout parameters for `mode`
pub fn project_network(record: &RegionRecord, mode: ViewMode) -> (&Graph, LayoutParams) {
    (record.graph_for(mode), LayoutParams::for_mode(mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bi_network_types::{MetricsBlock, Node, NodeType};

    fn record() -> RegionRecord {
        let post = Graph {
            nodes: vec![Node::new("post_hub", NodeType::DecisionMaker, 50.0)],
            links: Vec::new(),
        };
        let pre = Graph {
            nodes: vec![Node::new("pre_hub", NodeType::DecisionMaker, 40.0)],
            links: Vec::new(),
        };
        RegionRecord {
            metrics: MetricsBlock::default(),
            network: post,
            pre_bi_network: pre,
        }
    }

    #[test]
    fn test_pre_mode_selects_pre_network() {
        let record = record();
        let (graph, params) = project_network(&record, ViewMode::Pre);
        assert_eq!(graph.nodes[0].id, "pre_hub");
        assert_eq!(params.repulsion, -200.0);
        assert_eq!(params.base_link_distance, 80.0);
    }

    #[test]
    fn test_post_mode_selects_post_network() {
        let record = record();
        let (graph, params) = project_network(&record, ViewMode::Post);
        assert_eq!(graph.nodes[0].id, "post_hub");
        assert_eq!(params.repulsion, -300.0);
        assert_eq!(params.base_link_distance, 50.0);
    }

    #[test]
    fn test_link_distance_adds_strength_term() {
        let link = Link::new("a", "b", "governance", 1.5);
        assert_eq!(LayoutParams::POST.link_distance(&link), 95.0);
        assert_eq!(LayoutParams::PRE.link_distance(&link), 125.0);
    }
}
