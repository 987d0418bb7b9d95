//! Error types for the dashboard

use std::path::PathBuf;
use thiserror::Error;

/// Top-level dashboard error
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Dataset source unreachable or not a `{ region: record }` document
    #[error("failed to load dataset from '{source_name}': {message}")]
    Load {
        source_name: String,
        message: String,
    },

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// An action that needs a selected region was triggered without one
    #[error("no region selected")]
    NoSelection,

    #[error("unknown region '{0}'")]
    UnknownRegion(String),

    #[error("failed to export to {path}: {message}")]
    Export { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn load(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Load {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Message shown to the user, in the dashboard's display language
    pub fn user_message(&self) -> String {
        match self {
            Self::Load { .. } => {
                "خطأ في تحميل البيانات. تأكد من وجود ملف governorate_networks.json".to_string()
            }
            Self::NoSelection => "يرجى اختيار محافظة أولاً".to_string(),
            other => other.to_string(),
        }
    }
}

/// A metrics block is missing a value needed for display
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("metrics field '{0}' is missing")]
    MissingField(&'static str),
}

/// A chart could not be constructed from its series
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("series '{series}' has {actual} values for {expected} labels")]
    LengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("value {value} in series '{series}' is not finite")]
    NonFinite { series: String, value: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            DashboardError::NoSelection.user_message(),
            "يرجى اختيار محافظة أولاً"
        );
        let err = DashboardError::load("missing.json", "No such file");
        assert!(err.user_message().contains("governorate_networks.json"));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_projection_error_converts() {
        let err: DashboardError = ProjectionError::MissingField("avg_revenue_growth").into();
        assert!(matches!(err, DashboardError::Projection(_)));
        assert_eq!(
            err.to_string(),
            "metrics field 'avg_revenue_growth' is missing"
        );
    }
}
