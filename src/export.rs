//! Export of the selected region's record as pretty-printed JSON

use std::path::{Path, PathBuf};

use bi_network_types::RegionRecord;
use tracing::info;

use crate::error::{DashboardError, Result};

/// `<region>_network_data.json`, with path separators in the name replaced
pub fn export_file_name(region: &str) -> String {
    let safe: String = region
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect();
    format!("{}_network_data.json", safe)
}

/// Write `record` into `dir` and return the file path
pub fn export_region(dir: &Path, region: &str, record: &RegionRecord) -> Result<PathBuf> {
    let path = dir.join(export_file_name(region));
    let export_err = |message: String| DashboardError::Export {
        path: path.clone(),
        message,
    };

    let json = serde_json::to_string_pretty(record).map_err(|e| export_err(e.to_string()))?;
    std::fs::create_dir_all(dir).map_err(|e| export_err(e.to_string()))?;
    std::fs::write(&path, json).map_err(|e| export_err(e.to_string()))?;

    info!(region, path = %path.display(), "Exported region network data");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name("Cairo"), "Cairo_network_data.json");
        assert_eq!(export_file_name("القاهرة"), "القاهرة_network_data.json");
        assert_eq!(export_file_name("a/b"), "a_b_network_data.json");
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let record: RegionRecord = serde_json::from_str(
            r#"{"metrics": {"total_companies": 1}, "network": {}, "pre_bi_network": {}}"#,
        )
        .unwrap();

        let path = export_region(dir.path(), "Giza", &record).unwrap();
        assert_eq!(path.file_name().unwrap(), "Giza_network_data.json");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"metrics\": {"));
        let back: RegionRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
