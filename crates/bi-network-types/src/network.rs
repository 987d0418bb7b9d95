//! Network snapshots: nodes and links of one organisational graph

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// NODE TYPE
// ============================================================================

/// Category of a graph vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Regional hub that takes decisions
    DecisionMaker,
    /// Industry / department silo
    Process,
    /// Individual company feeding data
    DataSource,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::DecisionMaker => "decision_maker",
            NodeType::Process => "process",
            NodeType::DataSource => "data_source",
        }
    }

    /// Localized (Arabic) type name shown in tooltips and the legend
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeType::DecisionMaker => "صانع القرار",
            NodeType::Process => "عملية/قسم",
            NodeType::DataSource => "مصدر بيانات",
        }
    }

    pub fn all() -> &'static [NodeType] {
        &[
            NodeType::DecisionMaker,
            NodeType::Process,
            NodeType::DataSource,
        ]
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// One network snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// A vertex. Optional fields depend on the node type: companies carry
/// industry/agility/efficiency, industry silos carry `company_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Radius hint in scene units
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: NodeType, size: f64) -> Self {
        Self {
            id: id.into(),
            label: None,
            node_type,
            size,
            industry: None,
            agility: None,
            efficiency: None,
            company_count: None,
            extra: Map::new(),
        }
    }

    /// Builder: set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text shown for the node: its label, falling back to the id
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// An edge between two node ids of the same graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    /// Category label (governance, belongs_to, data_flow, ...)
    #[serde(rename = "type")]
    pub link_type: String,
    /// Drives stroke width and target distance
    pub strength: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Link {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        link_type: impl Into<String>,
        strength: f64,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            link_type: link_type.into(),
            strength,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_parses_company_fields() {
        let node: Node = serde_json::from_value(json!({
            "id": "company_7",
            "type": "data_source",
            "label": "Company 7",
            "size": 17.4,
            "group": 3,
            "industry": "Retail",
            "agility": 6.1,
            "efficiency": 73.0
        }))
        .unwrap();

        assert_eq!(node.node_type, NodeType::DataSource);
        assert_eq!(node.industry.as_deref(), Some("Retail"));
        assert_eq!(node.company_count, None);
        assert_eq!(node.extra.get("group"), Some(&json!(3)));
    }

    #[test]
    fn test_unknown_node_type_rejected() {
        let result: Result<Node, _> = serde_json::from_value(json!({
            "id": "x", "type": "robot", "size": 10
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        let node = Node::new("hub", NodeType::DecisionMaker, 50.0);
        assert_eq!(node.display_label(), "hub");
        assert_eq!(node.with_label("Hub").display_label(), "Hub");
    }
}
