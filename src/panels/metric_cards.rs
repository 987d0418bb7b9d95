//! Summary cards and chart frames

use egui::{Color32, Frame, Margin, RichText, Rounding, Stroke, Ui};

use crate::charts::{ChartRegistry, ChartSlot};
use crate::error::ProjectionError;
use crate::metrics::DisplayMetric;

const CARD_WIDTH: f32 = 150.0;
const DELTA_COLOR: Color32 = Color32::from_rgb(46, 125, 50);

fn card_frame(ui: &Ui) -> Frame {
    let border = ui.visuals().widgets.noninteractive.bg_stroke.color;
    Frame::none()
        .fill(ui.visuals().extreme_bg_color)
        .stroke(Stroke::new(1.0, border))
        .rounding(Rounding::same(8.0))
        .inner_margin(Margin::same(10.0))
}

/// Row of metric cards, wrapping as needed
pub fn metric_cards(ui: &mut Ui, metrics: &[DisplayMetric]) {
    ui.horizontal_wrapped(|ui| {
        for metric in metrics {
            card_frame(ui).show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(metric.title).small().weak());
                    ui.label(RichText::new(&metric.value).size(22.0).strong());
                    if let Some(ref delta) = metric.delta {
                        ui.label(RichText::new(delta).color(DELTA_COLOR));
                    }
                });
            });
        }
    });
}

/// One chart in its frame, or a note when the slot is empty
pub fn chart_card(ui: &mut Ui, charts: &ChartRegistry, slot: ChartSlot) {
    card_frame(ui).show(ui, |ui| {
        ui.label(RichText::new(slot.title()).strong());
        match charts.get(slot) {
            Some(chart) => chart.ui(ui),
            None => {
                ui.label(RichText::new("تعذر إنشاء الرسم البياني").weak());
            }
        }
    });
}

/// Shown instead of cards and charts when the metrics cannot be projected
pub fn projection_placeholder(ui: &mut Ui, error: &ProjectionError) {
    card_frame(ui).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(
            RichText::new("تعذر عرض مؤشرات هذه المحافظة")
                .strong()
                .color(Color32::from_rgb(230, 81, 0)),
        );
        ui.label(RichText::new(error.to_string()).small().weak());
    });
}
