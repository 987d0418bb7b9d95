//! Dataset Store - the region dataset loaded once at startup

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use bi_network_types::RegionRecord;
use tracing::info;

use crate::error::{DashboardError, Result};

// ============================================================================
// SOURCE
// ============================================================================

/// Where the dataset document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` strings are URLs, anything else is a path
    pub fn parse(source: &str) -> Self {
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(source.to_string())
        } else {
            DataSource::File(PathBuf::from(source))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Region name -> record. Immutable after load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    regions: BTreeMap<String, RegionRecord>,
}

impl DatasetStore {
    /// Fetch and parse the document at `source`
    pub async fn load(source: &DataSource) -> Result<Self> {
        let body = match source {
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DashboardError::load(source.to_string(), e))?,
            DataSource::Url(url) => fetch_text(url)
                .await
                .map_err(|e| DashboardError::load(source.to_string(), e))?,
        };
        let store = Self::from_json(&body).map_err(|e| match e {
            DashboardError::Load { message, .. } => {
                DashboardError::load(source.to_string(), message)
            }
            other => other,
        })?;
        info!(
            source = %source,
            regions = store.len(),
            "Loaded region dataset"
        );
        Ok(store)
    }

    /// Parse a `{ region: RegionRecord }` document
    pub fn from_json(json: &str) -> Result<Self> {
        let regions: BTreeMap<String, RegionRecord> =
            serde_json::from_str(json).map_err(|e| DashboardError::load("<inline>", e))?;
        Ok(Self { regions })
    }

    pub fn from_regions(regions: impl IntoIterator<Item = (String, RegionRecord)>) -> Self {
        Self {
            regions: regions.into_iter().collect(),
        }
    }

    /// Region names in ascending order
    pub fn list_regions(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    pub fn first_region(&self) -> Option<&str> {
        self.regions.keys().next().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&RegionRecord> {
        self.regions.get(name)
    }

    /// Selector label: `"<name> (<count> شركة)"`, or the bare name when the
    /// record has no company count
    pub fn region_label(&self, name: &str) -> String {
        match self
            .regions
            .get(name)
            .and_then(|r| r.metrics.total_companies)
        {
            Some(count) => format!("{} ({} شركة)", name, count),
            None => name.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

async fn fetch_text(url: &str) -> std::result::Result<String, reqwest::Error> {
    reqwest::get(url).await?.error_for_status()?.text().await
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "Giza": {
            "metrics": {"total_companies": 12, "industries": {}},
            "network": {"nodes": [], "links": []},
            "pre_bi_network": {"nodes": [], "links": []}
        },
        "Alexandria": {
            "metrics": {"industries": {"Tourism": 3}},
            "network": {"nodes": [], "links": []},
            "pre_bi_network": {"nodes": [], "links": []}
        }
    }"#;

    #[test]
    fn test_regions_sorted() {
        let store = DatasetStore::from_json(DOC).unwrap();
        assert_eq!(store.list_regions(), vec!["Alexandria", "Giza"]);
        assert_eq!(store.first_region(), Some("Alexandria"));
        assert!(store.get("Giza").is_some());
        assert!(store.get("Luxor").is_none());
    }

    #[test]
    fn test_region_label() {
        let store = DatasetStore::from_json(DOC).unwrap();
        assert_eq!(store.region_label("Giza"), "Giza (12 شركة)");
        assert_eq!(store.region_label("Alexandria"), "Alexandria");
    }

    #[test]
    fn test_industries_keep_document_order() {
        let doc = r#"{
            "Cairo": {
                "metrics": {"industries": {"Retail": 2, "Finance": 1, "Agriculture": 4}},
                "network": {"nodes": [], "links": []},
                "pre_bi_network": {"nodes": [], "links": []}
            }
        }"#;
        let store = DatasetStore::from_json(doc).unwrap();
        let industries = &store.get("Cairo").unwrap().metrics.industries;
        let names: Vec<&str> = industries.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Retail", "Finance", "Agriculture"]);
    }

    #[test]
    fn test_malformed_document_is_load_error() {
        let err = DatasetStore::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DashboardError::Load { .. }));
    }

    #[test]
    fn test_unknown_node_type_is_load_error() {
        let doc = r#"{
            "X": {
                "metrics": {},
                "network": {"nodes": [{"id": "a", "type": "robot", "size": 1}], "links": []},
                "pre_bi_network": {}
            }
        }"#;
        assert!(DatasetStore::from_json(doc).is_err());
    }

    #[test]
    fn test_data_source_parse() {
        assert_eq!(
            DataSource::parse("https://example.org/g.json"),
            DataSource::Url("https://example.org/g.json".into())
        );
        assert_eq!(
            DataSource::parse("data/g.json"),
            DataSource::File(PathBuf::from("data/g.json"))
        );
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = DataSource::File(PathBuf::from("/nonexistent/governorate_networks.json"));
        let err = DatasetStore::load(&source).await.unwrap_err();
        match err {
            DashboardError::Load { source_name, .. } => {
                assert!(source_name.contains("governorate_networks.json"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
