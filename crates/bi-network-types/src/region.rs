//! Region records and their aggregated metrics

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::network::Graph;
use crate::ViewMode;

// ============================================================================
// REGION RECORD
// ============================================================================

/// Everything the dashboard knows about one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub metrics: MetricsBlock,
    /// Network after BI adoption
    pub network: Graph,
    /// Network before BI adoption
    pub pre_bi_network: Graph,
}

impl RegionRecord {
    /// Network snapshot for a view mode
    pub fn graph_for(&self, mode: ViewMode) -> &Graph {
        match mode {
            ViewMode::Pre => &self.pre_bi_network,
            ViewMode::Post => &self.network,
        }
    }
}

// ============================================================================
// METRICS BLOCK
// ============================================================================

/// Aggregated before/after metrics for a region.
///
/// Numeric fields are optional at the type level: a record missing one still
/// loads, and the gap is reported when the metrics are projected for display.
/// The improvement fields are computed upstream and shown as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_companies: Option<u64>,

    /// Industry name -> company count, in document order
    pub industries: IndexMap<String, u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pre_bi_agility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_post_bi_agility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pre_bi_efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_post_bi_efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_pre_bi_data_driven: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_post_bi_data_driven: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_revenue_growth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_cost_reduction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_customer_satisfaction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_market_share: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_agility_improvement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_efficiency_improvement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_data_driven_improvement: Option<f64>,

    /// Years in which the region's companies adopted BI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bi_years: Option<Vec<i64>>,

    /// Fields not read by the dashboard, kept for export
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metrics_keep_industry_order() {
        let metrics: MetricsBlock = serde_json::from_str(
            r#"{
                "total_companies": 3,
                "industries": { "Retail": 2, "Finance": 1 },
                "avg_pre_bi_agility": 4.2
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = metrics.industries.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Retail", "Finance"]);
        assert_eq!(metrics.avg_pre_bi_agility, Some(4.2));
        assert_eq!(metrics.avg_post_bi_agility, None);
    }

    #[test]
    fn test_unknown_fields_survive_reserialization() {
        let value = json!({
            "total_companies": 1,
            "industries": {},
            "source_note": "synthetic"
        });
        let metrics: MetricsBlock = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(metrics.extra.get("source_note"), Some(&json!("synthetic")));
        assert_eq!(serde_json::to_value(&metrics).unwrap(), value);
    }
}
