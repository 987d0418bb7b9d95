//! Bar and line charts on egui_plot, plus the shared legend row

use egui::{Color32, RichText, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};

use super::{ChartSlot, GroupedBarSeries, LineSeries};

const PLOT_HEIGHT: f32 = 240.0;
/// Total width of one category's bar group, in x units
const GROUP_WIDTH: f64 = 0.8;
/// Interpolated points per segment of a smoothed line
const CURVE_SAMPLES: usize = 16;

// =============================================================================
// GROUPED BAR
// =============================================================================

#[derive(Debug)]
pub struct GroupedBarChart {
    slot: ChartSlot,
    series: GroupedBarSeries,
}

impl GroupedBarChart {
    pub fn new(slot: ChartSlot, series: GroupedBarSeries) -> Self {
        Self { slot, series }
    }

    pub fn series(&self) -> &GroupedBarSeries {
        &self.series
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        let groups = self.series.datasets.len().max(1) as f64;
        let bar_width = GROUP_WIDTH / groups;
        let categories = self.series.categories.clone();

        Plot::new(("chart", self.slot))
            .height(PLOT_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .include_y(self.series.max)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
            .show(ui, |plot_ui| {
                for (d, dataset) in self.series.datasets.iter().enumerate() {
                    let bars: Vec<Bar> = dataset
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &value)| {
                            let height = bar_height(value, self.series.max);
                            Bar::new(bar_x(i, d, bar_width), height)
                                .width(bar_width)
                                .fill(dataset.color.gamma_multiply(0.8))
                                .name(&self.series.categories[i])
                        })
                        .collect();
                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .name(&dataset.label)
                            .color(dataset.color),
                    );
                }
            });
    }
}

/// Bar values are held inside the fixed `[0, max]` value axis
fn bar_height(value: f64, max: f64) -> f64 {
    value.clamp(0.0, max.max(0.0))
}

/// Center of bar `d` in category `i`
fn bar_x(i: usize, d: usize, bar_width: f64) -> f64 {
    i as f64 - GROUP_WIDTH / 2.0 + bar_width * (d as f64 + 0.5)
}

// =============================================================================
// LINE
// =============================================================================

#[derive(Debug)]
pub struct LineChart {
    slot: ChartSlot,
    series: LineSeries,
}

impl LineChart {
    pub fn new(slot: ChartSlot, series: LineSeries) -> Self {
        Self { slot, series }
    }

    pub fn series(&self) -> &LineSeries {
        &self.series
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        let dataset = &self.series.dataset;
        let points: Vec<[f64; 2]> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect();
        let curve = smooth_curve(&points, self.series.tension, CURVE_SAMPLES);
        let categories = self.series.categories.clone();

        Plot::new(("chart", self.slot))
            .height(PLOT_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .include_x(-0.25)
            .include_x(points.len() as f64 - 0.75)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(curve)
                        .name(&dataset.label)
                        .color(dataset.color)
                        .width(2.0)
                        .fill(0.0),
                );
                plot_ui.points(Points::new(points).radius(4.0).color(dataset.color));
            });
    }
}

/// Cardinal spline through `points`. Tension 0 returns the points unchanged;
/// the curve always passes through every input point.
pub(crate) fn smooth_curve(points: &[[f64; 2]], tension: f64, samples: usize) -> Vec<[f64; 2]> {
    if points.len() < 3 || tension <= 0.0 || samples < 2 {
        return points.to_vec();
    }
    let n = points.len();
    let tangent = |i: usize| -> [f64; 2] {
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(n - 1)];
        [(next[0] - prev[0]) * tension, (next[1] - prev[1]) * tension]
    };

    let mut curve = Vec::with_capacity((n - 1) * samples + 1);
    for i in 0..n - 1 {
        let (p0, p1) = (points[i], points[i + 1]);
        let (m0, m1) = (tangent(i), tangent(i + 1));
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            curve.push([
                h00 * p0[0] + h10 * m0[0] + h01 * p1[0] + h11 * m1[0],
                h00 * p0[1] + h10 * m0[1] + h01 * p1[1] + h11 * m1[1],
            ]);
        }
    }
    curve.push(points[n - 1]);
    curve
}

/// Category name for integer ticks, blank elsewhere
fn category_label(categories: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    categories
        .get(index as usize)
        .cloned()
        .unwrap_or_default()
}

// =============================================================================
// LEGEND
// =============================================================================

/// Horizontal legend: color swatch + label per entry
pub fn legend_row<'a>(ui: &mut egui::Ui, entries: impl Iterator<Item = (&'a String, Color32)>) {
    ui.horizontal_wrapped(|ui| {
        for (label, color) in entries {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.label(RichText::new(label.as_str()).small());
            ui.add_space(8.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_only_on_integers() {
        let categories = vec!["a".to_string(), "b".to_string()];
        assert_eq!(category_label(&categories, 1.0), "b");
        assert_eq!(category_label(&categories, 0.5), "");
        assert_eq!(category_label(&categories, -1.0), "");
        assert_eq!(category_label(&categories, 7.0), "");
    }

    #[test]
    fn test_bars_centered_in_group() {
        let width = GROUP_WIDTH / 2.0;
        let left = bar_x(1, 0, width);
        let right = bar_x(1, 1, width);
        assert!((left - 0.8).abs() < 1e-9);
        assert!((right - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_bar_height_stays_on_axis() {
        assert_eq!(bar_height(42.5, 100.0), 42.5);
        assert_eq!(bar_height(130.0, 100.0), 100.0);
        assert_eq!(bar_height(-5.0, 100.0), 0.0);
        assert_eq!(bar_height(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_smooth_curve_passes_through_points() {
        let points = [[0.0, 1.0], [1.0, 4.0], [2.0, 2.0], [3.0, 5.0]];
        let curve = smooth_curve(&points, 0.4, 8);
        assert_eq!(curve.len(), 3 * 8 + 1);
        for (i, p) in points.iter().enumerate() {
            let c = curve[i * 8];
            assert!((c[0] - p[0]).abs() < 1e-9 && (c[1] - p[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_tension_is_polyline() {
        let points = [[0.0, 1.0], [1.0, 4.0], [2.0, 2.0]];
        assert_eq!(smooth_curve(&points, 0.0, 8), points.to_vec());
    }
}
