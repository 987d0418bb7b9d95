//! BI Network Dashboard
//!
//! Desktop dashboard over a precomputed per-governorate dataset: a
//! force-directed network of decision makers, industries and companies, and
//! four charts comparing metrics before and after BI adoption.
//!
//! ```text
//! DatasetStore ──► ViewController ──► project_metrics / project_charts ──► ChartRegistry
//!                        │
//!                        └──────────► project_network ──► NetworkGraphWidget
//! ```

pub mod app;
pub mod charts;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod export;
pub mod metrics;
pub mod panels;

pub use app::DashboardApp;
pub use charts::{ChartRegistry, ChartSeries, ChartSlot};
pub use config::DashboardConfig;
pub use controller::{LoadStatus, ViewController, ViewState};
pub use dataset::{DataSource, DatasetStore};
pub use error::{ChartError, DashboardError, ProjectionError, Result};
pub use metrics::{project_charts, project_metrics, DisplayMetric};
