//! Chart Renderer - the four summary charts and the registry that owns them
//!
//! Chart widgets are owned by [`ChartRegistry`], one per [`ChartSlot`]. An
//! update drops the previous widget for the slot before the replacement is
//! built, so a slot never holds two instances. Every widget carries a
//! [`LiveHandle`] so tests can count the instances that are alive.

pub mod doughnut;
pub mod plots;
pub mod radar;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use egui::Color32;
use tracing::debug;

use crate::error::ChartError;

pub use doughnut::DoughnutChart;
pub use plots::{GroupedBarChart, LineChart};
pub use radar::RadarChart;

/// Color of the "before BI" series
pub const BEFORE_COLOR: Color32 = Color32::from_rgb(255, 99, 132);
/// Color of the "after BI" series
pub const AFTER_COLOR: Color32 = Color32::from_rgb(54, 162, 235);
/// Color of the growth series
pub const GROWTH_COLOR: Color32 = Color32::from_rgb(75, 192, 192);

/// Slice colors, reused in order when there are more slices than entries
pub const INDUSTRY_PALETTE: [Color32; 7] = [
    Color32::from_rgb(255, 99, 132),
    Color32::from_rgb(54, 162, 235),
    Color32::from_rgb(255, 206, 86),
    Color32::from_rgb(75, 192, 192),
    Color32::from_rgb(153, 102, 255),
    Color32::from_rgb(255, 159, 64),
    Color32::from_rgb(199, 199, 199),
];

pub fn palette_color(index: usize) -> Color32 {
    INDUSTRY_PALETTE[index % INDUSTRY_PALETTE.len()]
}

// =============================================================================
// SLOTS
// =============================================================================

/// Fixed position of a chart on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartSlot {
    /// Radar: before/after on five axes
    Performance,
    /// Doughnut: companies per industry
    Industry,
    /// Grouped bars: before/after on three axes
    Comparison,
    /// Line: growth indicators
    Growth,
}

impl ChartSlot {
    pub fn all() -> [ChartSlot; 4] {
        [
            ChartSlot::Performance,
            ChartSlot::Industry,
            ChartSlot::Comparison,
            ChartSlot::Growth,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::Performance => "مؤشرات الأداء",
            ChartSlot::Industry => "توزيع الصناعات",
            ChartSlot::Comparison => "مقارنة قبل وبعد BI",
            ChartSlot::Growth => "مؤشرات النمو",
        }
    }
}

// =============================================================================
// SERIES
// =============================================================================

/// One named, colored series of values
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Color32,
}

impl Dataset {
    pub fn new(label: impl Into<String>, values: Vec<f64>, color: Color32) -> Self {
        Self {
            label: label.into(),
            values,
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub axes: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Fixed top of the radial scale
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoughnutSeries {
    pub slices: Vec<Slice>,
}

impl DoughnutSeries {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value.max(0.0)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBarSeries {
    pub categories: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Fixed top of the value axis
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub categories: Vec<String>,
    pub dataset: Dataset,
    /// Curve smoothing, 0 = straight segments
    pub tension: f64,
}

/// Input for a chart constructor
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    Radar(RadarSeries),
    Doughnut(DoughnutSeries),
    GroupedBar(GroupedBarSeries),
    Line(LineSeries),
}

impl ChartSeries {
    /// Check lengths and finiteness before a widget is built
    pub fn validate(&self) -> Result<(), ChartError> {
        match self {
            ChartSeries::Radar(s) => check_datasets(s.axes.len(), &s.datasets),
            ChartSeries::GroupedBar(s) => check_datasets(s.categories.len(), &s.datasets),
            ChartSeries::Line(s) => {
                check_datasets(s.categories.len(), std::slice::from_ref(&s.dataset))
            }
            ChartSeries::Doughnut(s) => s
                .slices
                .iter()
                .try_for_each(|slice| check_finite(&slice.label, slice.value)),
        }
    }
}

fn check_datasets(expected: usize, datasets: &[Dataset]) -> Result<(), ChartError> {
    for dataset in datasets {
        if dataset.values.len() != expected {
            return Err(ChartError::LengthMismatch {
                series: dataset.label.clone(),
                expected,
                actual: dataset.values.len(),
            });
        }
        for &value in &dataset.values {
            check_finite(&dataset.label, value)?;
        }
    }
    Ok(())
}

fn check_finite(series: &str, value: f64) -> Result<(), ChartError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChartError::NonFinite {
            series: series.to_string(),
            value: value.to_string(),
        })
    }
}

// =============================================================================
// INSTANCES
// =============================================================================

/// Counts one live chart instance until dropped
#[derive(Debug)]
pub struct LiveHandle {
    counter: Rc<Cell<usize>>,
}

impl LiveHandle {
    fn new(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self {
            counter: Rc::clone(counter),
        }
    }
}

impl Drop for LiveHandle {
    fn drop(&mut self) {
        self.counter.set(self.counter.get().saturating_sub(1));
    }
}

#[derive(Debug)]
enum ChartKind {
    Radar(RadarChart),
    Doughnut(DoughnutChart),
    GroupedBar(GroupedBarChart),
    Line(LineChart),
}

/// A constructed chart bound to its slot
#[derive(Debug)]
pub struct ChartWidget {
    slot: ChartSlot,
    kind: ChartKind,
    _live: LiveHandle,
}

impl ChartWidget {
    fn build(slot: ChartSlot, series: ChartSeries, live: LiveHandle) -> Self {
        let kind = match series {
            ChartSeries::Radar(s) => ChartKind::Radar(RadarChart::new(slot, s)),
            ChartSeries::Doughnut(s) => ChartKind::Doughnut(DoughnutChart::new(slot, s)),
            ChartSeries::GroupedBar(s) => ChartKind::GroupedBar(GroupedBarChart::new(slot, s)),
            ChartSeries::Line(s) => ChartKind::Line(LineChart::new(slot, s)),
        };
        Self {
            slot,
            kind,
            _live: live,
        }
    }

    pub fn slot(&self) -> ChartSlot {
        self.slot
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        match &self.kind {
            ChartKind::Radar(chart) => chart.ui(ui),
            ChartKind::Doughnut(chart) => chart.ui(ui),
            ChartKind::GroupedBar(chart) => chart.ui(ui),
            ChartKind::Line(chart) => chart.ui(ui),
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Owns the live chart instances, at most one per slot
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<ChartSlot, ChartWidget>,
    live: Rc<Cell<usize>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chart in `slot`. The previous instance is dropped first;
    /// if the new series is invalid the slot stays empty.
    pub fn update(&mut self, slot: ChartSlot, series: ChartSeries) -> Result<(), ChartError> {
        if self.charts.remove(&slot).is_some() {
            debug!(?slot, "disposed chart");
        }
        series.validate()?;
        let widget = ChartWidget::build(slot, series, LiveHandle::new(&self.live));
        self.charts.insert(slot, widget);
        Ok(())
    }

    /// Drop every chart
    pub fn clear(&mut self) {
        self.charts.clear();
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartWidget> {
        self.charts.get(&slot)
    }

    /// Number of chart instances alive, including any held outside the map
    pub fn live_count(&self) -> usize {
        self.live.get()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(values: Vec<f64>) -> ChartSeries {
        ChartSeries::Line(LineSeries {
            categories: vec!["a".into(), "b".into()],
            dataset: Dataset::new("growth", values, GROWTH_COLOR),
            tension: 0.4,
        })
    }

    #[test]
    fn test_repeated_update_keeps_one_instance() {
        let mut registry = ChartRegistry::new();
        registry
            .update(ChartSlot::Growth, line(vec![1.0, 2.0]))
            .unwrap();
        registry
            .update(ChartSlot::Growth, line(vec![1.0, 2.0]))
            .unwrap();
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_update_leaves_slot_empty() {
        let mut registry = ChartRegistry::new();
        registry
            .update(ChartSlot::Growth, line(vec![1.0, 2.0]))
            .unwrap();

        let err = registry
            .update(ChartSlot::Growth, line(vec![1.0]))
            .unwrap_err();
        assert_eq!(
            err,
            ChartError::LengthMismatch {
                series: "growth".into(),
                expected: 2,
                actual: 1,
            }
        );
        assert!(registry.get(ChartSlot::Growth).is_none());
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn test_non_finite_rejected() {
        let series = ChartSeries::Doughnut(DoughnutSeries {
            slices: vec![Slice {
                label: "Retail".into(),
                value: f64::NAN,
            }],
        });
        assert!(matches!(
            series.validate(),
            Err(ChartError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut registry = ChartRegistry::new();
        registry
            .update(ChartSlot::Growth, line(vec![1.0, 2.0]))
            .unwrap();
        registry
            .update(
                ChartSlot::Industry,
                ChartSeries::Doughnut(DoughnutSeries::default()),
            )
            .unwrap();
        assert_eq!(registry.live_count(), 2);
        registry.clear();
        assert_eq!(registry.live_count(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), palette_color(7));
        assert_eq!(palette_color(6), Color32::from_rgb(199, 199, 199));
    }
}
