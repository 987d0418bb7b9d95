//! Shared Dataset Types for the BI Network Dashboard
//!
//! This crate is the SINGLE SOURCE OF TRUTH for the shape of the region
//! dataset document (`governorate_networks.json`).
//!
//! ## Document shape
//!
//! ```text
//! {
//!   "<region>": {
//!     "metrics":        MetricsBlock,
//!     "network":        Graph,   // after BI adoption
//!     "pre_bi_network": Graph    // before BI adoption
//!   },
//!   ...
//! }
//! ```
//!
//! ## Rules
//!
//! 1. Records are immutable after load - renderers copy what they mutate
//! 2. Fields the dashboard does not read are retained in `extra` so that an
//!    exported record parses back equal to the loaded one
//! 3. Node type is a closed enum - adding a variant is a compile-time change

pub mod network;
pub mod region;

pub use network::{Graph, Link, Node, NodeType};
pub use region::{MetricsBlock, RegionRecord};

use serde::{Deserialize, Serialize};

// ============================================================================
// VIEW MODE
// ============================================================================

/// Which network snapshot is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Organisation before BI adoption (`pre_bi_network`)
    Pre,
    /// Organisation after BI adoption (`network`)
    #[default]
    Post,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Pre => "pre",
            ViewMode::Post => "post",
        }
    }

    /// Label used by the view selector and toggle buttons
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewMode::Pre => "قبل تطبيق BI",
            ViewMode::Post => "بعد تطبيق BI",
        }
    }

    pub fn all() -> &'static [ViewMode] {
        &[ViewMode::Post, ViewMode::Pre]
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            other => Err(format!("unknown view mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("pre".parse::<ViewMode>().unwrap(), ViewMode::Pre);
        assert_eq!("POST".parse::<ViewMode>().unwrap(), ViewMode::Post);
        assert!("sideways".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default(), ViewMode::Post);
    }
}
