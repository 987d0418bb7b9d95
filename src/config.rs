//! Dashboard configuration
//!
//! Defaults live in `config/dashboard.yaml` and are compiled in. An override
//! file is deep-merged on top, then CLI flags win over both.

use std::path::{Path, PathBuf};

use bi_network_graph::GraphSettings;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::info;

use crate::error::{DashboardError, Result};

const EMBEDDED_DEFAULTS: &str = include_str!("../config/dashboard.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Local path or http(s) URL of the dataset document
    pub data_source: String,
    pub export_dir: PathBuf,
    pub window: WindowConfig,
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default)]
    pub graph: GraphSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl DashboardConfig {
    /// Compiled-in defaults
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_DEFAULTS, None)
    }

    /// Defaults merged with an optional override file
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let Some(path) = override_path else {
            return Self::embedded();
        };
        info!("Loading dashboard configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(EMBEDDED_DEFAULTS, Some(&content))
    }

    /// Parse `base`, deep-merge `overlay` into it, then deserialize
    pub fn from_yaml(base: &str, overlay: Option<&str>) -> Result<Self> {
        let mut merged: Value = serde_yaml::from_str(base)
            .map_err(|e| DashboardError::Config(format!("defaults: {}", e)))?;
        if let Some(overlay) = overlay {
            let overlay: Value = serde_yaml::from_str(overlay)
                .map_err(|e| DashboardError::Config(format!("override: {}", e)))?;
            merge_yaml(&mut merged, overlay);
        }
        let config: Self =
            serde_yaml::from_value(merged).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let zoom = &self.graph.zoom;
        if !(zoom.min_scale > 0.0 && zoom.min_scale <= zoom.max_scale) {
            return Err(DashboardError::Config(format!(
                "zoom bounds [{}, {}] are not a valid range",
                zoom.min_scale, zoom.max_scale
            )));
        }
        let sim = &self.graph.simulation;
        if !(0.0..1.0).contains(&sim.alpha_decay) || !(0.0..=1.0).contains(&sim.velocity_decay) {
            return Err(DashboardError::Config(
                "alpha_decay must be in [0, 1) and velocity_decay in [0, 1]".to_string(),
            ));
        }
        if self.data_source.trim().is_empty() {
            return Err(DashboardError::Config("data_source is empty".to_string()));
        }
        Ok(())
    }

    /// Apply CLI flags, which win over file values
    pub fn with_overrides(mut self, data: Option<String>, export_dir: Option<PathBuf>) -> Self {
        if let Some(data) = data {
            self.data_source = data;
        }
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }
        self
    }
}

/// Recursive mapping merge; non-mapping values in `overlay` replace `base`
fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
