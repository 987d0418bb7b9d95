//! Metric Projector - turns a region's metrics block into display values
//! and chart series
//!
//! Improvement deltas are shown as stored in the dataset, never re-derived
//! from the before/after pair.

use bi_network_types::MetricsBlock;

use crate::charts::{
    ChartSeries, ChartSlot, Dataset, DoughnutSeries, GroupedBarSeries, LineSeries, RadarSeries,
    Slice, AFTER_COLOR, BEFORE_COLOR, GROWTH_COLOR,
};
use crate::error::ProjectionError;

/// Top of the radar and bar scales
pub const SCALE_MAX: f64 = 100.0;

const BEFORE_LABEL: &str = "قبل BI";
const AFTER_LABEL: &str = "بعد BI";
const GROWTH_LABEL: &str = "النمو (%)";

const AXIS_AGILITY: &str = "المرونة";
const AXIS_EFFICIENCY: &str = "الكفاءة";
const AXIS_DATA_DRIVEN: &str = "القرارات المبنية على البيانات";
const AXIS_REVENUE: &str = "نمو الإيرادات";
const AXIS_COST: &str = "تقليل التكاليف";
const AXIS_SATISFACTION: &str = "رضا العملاء";
const AXIS_MARKET_SHARE: &str = "الحصة السوقية";

/// One summary card
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMetric {
    pub title: &'static str,
    pub value: String,
    pub delta: Option<String>,
}

impl DisplayMetric {
    fn new(title: &'static str, value: String) -> Self {
        Self {
            title,
            value,
            delta: None,
        }
    }

    fn with_delta(mut self, delta: String) -> Self {
        self.delta = Some(delta);
        self
    }
}

/// Field accessor that reports the field name when the value is absent
macro_rules! field {
    ($metrics:expr, $name:ident) => {
        $metrics
            .$name
            .ok_or(ProjectionError::MissingField(stringify!($name)))
    };
}

/// The nine summary cards, in display order
pub fn project_metrics(metrics: &MetricsBlock) -> Result<Vec<DisplayMetric>, ProjectionError> {
    Ok(vec![
        DisplayMetric::new(
            "إجمالي الشركات",
            field!(metrics, total_companies)?.to_string(),
        ),
        DisplayMetric::new(
            "المرونة في اتخاذ القرار (قبل)",
            fixed1(field!(metrics, avg_pre_bi_agility)?),
        ),
        DisplayMetric::new(
            "المرونة في اتخاذ القرار (بعد)",
            fixed1(field!(metrics, avg_post_bi_agility)?),
        )
        .with_delta(signed1(field!(metrics, avg_agility_improvement)?)),
        DisplayMetric::new(
            "الكفاءة التشغيلية (قبل)",
            fixed1(field!(metrics, avg_pre_bi_efficiency)?),
        ),
        DisplayMetric::new(
            "الكفاءة التشغيلية (بعد)",
            fixed1(field!(metrics, avg_post_bi_efficiency)?),
        )
        .with_delta(signed1(field!(metrics, avg_efficiency_improvement)?)),
        DisplayMetric::new(
            "القرارات المبنية على البيانات (قبل)",
            percent(field!(metrics, avg_pre_bi_data_driven)?),
        ),
        DisplayMetric::new(
            "القرارات المبنية على البيانات (بعد)",
            percent(field!(metrics, avg_post_bi_data_driven)?),
        )
        .with_delta(format!(
            "{}%",
            signed1(field!(metrics, avg_data_driven_improvement)?)
        )),
        DisplayMetric::new(
            "نمو الإيرادات",
            format!("{}%", signed1(field!(metrics, avg_revenue_growth)?)),
        ),
        DisplayMetric::new(
            "تقليل التكاليف",
            format!("{}%", signed1(-field!(metrics, avg_cost_reduction)?)),
        ),
    ])
}

/// All four chart series, keyed by the slot they belong in
pub fn project_charts(
    metrics: &MetricsBlock,
) -> Result<Vec<(ChartSlot, ChartSeries)>, ProjectionError> {
    Ok(vec![
        (
            ChartSlot::Performance,
            ChartSeries::Radar(radar_series(metrics)?),
        ),
        (
            ChartSlot::Industry,
            ChartSeries::Doughnut(doughnut_series(metrics)),
        ),
        (
            ChartSlot::Comparison,
            ChartSeries::GroupedBar(bar_series(metrics)?),
        ),
        (ChartSlot::Growth, ChartSeries::Line(line_series(metrics)?)),
    ])
}

/// Five axes on a 0-100 scale: agility is a 0-10 score and growth/cost are
/// small percentages, so they are stretched to be comparable.
pub fn radar_series(metrics: &MetricsBlock) -> Result<RadarSeries, ProjectionError> {
    let revenue = field!(metrics, avg_revenue_growth)? * 2.0;
    let cost = field!(metrics, avg_cost_reduction)? * 2.0;
    Ok(RadarSeries {
        axes: labels(&[
            AXIS_AGILITY,
            AXIS_EFFICIENCY,
            AXIS_DATA_DRIVEN,
            AXIS_REVENUE,
            AXIS_COST,
        ]),
        datasets: vec![
            Dataset::new(
                BEFORE_LABEL,
                vec![
                    field!(metrics, avg_pre_bi_agility)? * 10.0,
                    field!(metrics, avg_pre_bi_efficiency)?,
                    field!(metrics, avg_pre_bi_data_driven)?,
                    revenue,
                    cost,
                ],
                BEFORE_COLOR,
            ),
            Dataset::new(
                AFTER_LABEL,
                vec![
                    field!(metrics, avg_post_bi_agility)? * 10.0,
                    field!(metrics, avg_post_bi_efficiency)?,
                    field!(metrics, avg_post_bi_data_driven)?,
                    revenue,
                    cost,
                ],
                AFTER_COLOR,
            ),
        ],
        max: SCALE_MAX,
    })
}

/// Industry counts in document order; empty when the region has none
pub fn doughnut_series(metrics: &MetricsBlock) -> DoughnutSeries {
    DoughnutSeries {
        slices: metrics
            .industries
            .iter()
            .map(|(label, &count)| Slice {
                label: label.clone(),
                value: count as f64,
            })
            .collect(),
    }
}

pub fn bar_series(metrics: &MetricsBlock) -> Result<GroupedBarSeries, ProjectionError> {
    Ok(GroupedBarSeries {
        categories: labels(&[AXIS_AGILITY, AXIS_EFFICIENCY, AXIS_DATA_DRIVEN]),
        datasets: vec![
            Dataset::new(
                BEFORE_LABEL,
                vec![
                    field!(metrics, avg_pre_bi_agility)?,
                    field!(metrics, avg_pre_bi_efficiency)?,
                    field!(metrics, avg_pre_bi_data_driven)?,
                ],
                BEFORE_COLOR,
            ),
            Dataset::new(
                AFTER_LABEL,
                vec![
                    field!(metrics, avg_post_bi_agility)?,
                    field!(metrics, avg_post_bi_efficiency)?,
                    field!(metrics, avg_post_bi_data_driven)?,
                ],
                AFTER_COLOR,
            ),
        ],
        max: SCALE_MAX,
    })
}

pub fn line_series(metrics: &MetricsBlock) -> Result<LineSeries, ProjectionError> {
    Ok(LineSeries {
        categories: labels(&[
            AXIS_REVENUE,
            AXIS_COST,
            AXIS_SATISFACTION,
            AXIS_MARKET_SHARE,
        ]),
        dataset: Dataset::new(
            GROWTH_LABEL,
            vec![
                field!(metrics, avg_revenue_growth)?,
                field!(metrics, avg_cost_reduction)?,
                field!(metrics, avg_customer_satisfaction)?,
                field!(metrics, avg_market_share)?,
            ],
            GROWTH_COLOR,
        ),
        tension: 0.4,
    })
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn fixed1(value: f64) -> String {
    format!("{:.1}", value)
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn signed1(value: f64) -> String {
    format!("{:+.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn cairo() -> MetricsBlock {
        let mut industries = IndexMap::new();
        industries.insert("Retail".to_string(), 5);
        industries.insert("Finance".to_string(), 3);
        MetricsBlock {
            total_companies: Some(50),
            industries,
            avg_pre_bi_agility: Some(5.0),
            avg_post_bi_agility: Some(7.5),
            avg_pre_bi_efficiency: Some(60.0),
            avg_post_bi_efficiency: Some(75.0),
            avg_pre_bi_data_driven: Some(40.0),
            avg_post_bi_data_driven: Some(65.0),
            avg_revenue_growth: Some(12.0),
            avg_cost_reduction: Some(8.0),
            avg_customer_satisfaction: Some(20.0),
            avg_market_share: Some(5.5),
            avg_agility_improvement: Some(2.5),
            avg_efficiency_improvement: Some(15.0),
            avg_data_driven_improvement: Some(25.0),
            ..MetricsBlock::default()
        }
    }

    #[test]
    fn test_nine_cards_in_order() {
        let cards = project_metrics(&cairo()).unwrap();
        let rendered: Vec<(&str, &str, Option<&str>)> = cards
            .iter()
            .map(|c| (c.title, c.value.as_str(), c.delta.as_deref()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("إجمالي الشركات", "50", None),
                ("المرونة في اتخاذ القرار (قبل)", "5.0", None),
                ("المرونة في اتخاذ القرار (بعد)", "7.5", Some("+2.5")),
                ("الكفاءة التشغيلية (قبل)", "60.0", None),
                ("الكفاءة التشغيلية (بعد)", "75.0", Some("+15.0")),
                ("القرارات المبنية على البيانات (قبل)", "40.0%", None),
                ("القرارات المبنية على البيانات (بعد)", "65.0%", Some("+25.0%")),
                ("نمو الإيرادات", "+12.0%", None),
                ("تقليل التكاليف", "-8.0%", None),
            ]
        );
    }

    #[test]
    fn test_negative_delta_keeps_sign() {
        let mut metrics = cairo();
        metrics.avg_agility_improvement = Some(-1.0);
        let cards = project_metrics(&metrics).unwrap();
        assert_eq!(cards[2].delta.as_deref(), Some("-1.0"));
    }

    #[test]
    fn test_missing_field_names_it() {
        let mut metrics = cairo();
        metrics.avg_market_share = None;
        assert!(project_metrics(&metrics).is_ok());
        assert_eq!(
            line_series(&metrics).unwrap_err(),
            ProjectionError::MissingField("avg_market_share")
        );

        metrics.total_companies = None;
        assert_eq!(
            project_metrics(&metrics).unwrap_err(),
            ProjectionError::MissingField("total_companies")
        );
    }

    #[test]
    fn test_radar_scaling() {
        let radar = radar_series(&cairo()).unwrap();
        assert_eq!(radar.axes.len(), 5);
        assert_eq!(radar.max, 100.0);
        assert_eq!(radar.datasets[0].values, vec![50.0, 60.0, 40.0, 24.0, 16.0]);
        assert_eq!(radar.datasets[1].values, vec![75.0, 75.0, 65.0, 24.0, 16.0]);
    }

    #[test]
    fn test_bar_uses_raw_agility() {
        let bars = bar_series(&cairo()).unwrap();
        assert_eq!(bars.categories.len(), 3);
        assert_eq!(bars.datasets[0].values, vec![5.0, 60.0, 40.0]);
        assert_eq!(bars.datasets[1].values, vec![7.5, 75.0, 65.0]);
    }

    #[test]
    fn test_doughnut_keeps_document_order() {
        let doughnut = doughnut_series(&cairo());
        let labels: Vec<&str> = doughnut.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Retail", "Finance"]);
        assert_eq!(doughnut.total(), 8.0);
    }

    #[test]
    fn test_empty_industries() {
        let mut metrics = cairo();
        metrics.industries.clear();
        assert!(doughnut_series(&metrics).slices.is_empty());
        assert_eq!(project_charts(&metrics).unwrap().len(), 4);
    }

    #[test]
    fn test_line_series() {
        let line = line_series(&cairo()).unwrap();
        assert_eq!(line.dataset.values, vec![12.0, 8.0, 20.0, 5.5]);
        assert_eq!(line.categories.len(), 4);
        assert_eq!(line.dataset.label, "النمو (%)");
    }
}
