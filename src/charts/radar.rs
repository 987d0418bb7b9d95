//! Radar chart painted directly with egui::Painter

use std::f32::consts::{PI, TAU};

use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};

use super::{ChartSlot, RadarSeries};

const CHART_HEIGHT: f32 = 280.0;
/// Room for axis labels around the outer ring
const LABEL_MARGIN: f32 = 48.0;
const RINGS: usize = 5;
const GRID_COLOR: Color32 = Color32::from_gray(210);

#[derive(Debug)]
pub struct RadarChart {
    slot: ChartSlot,
    series: RadarSeries,
}

impl RadarChart {
    pub fn new(slot: ChartSlot, series: RadarSeries) -> Self {
        Self { slot, series }
    }

    pub fn series(&self) -> &RadarSeries {
        &self.series
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        super::plots::legend_row(ui, self.series.datasets.iter().map(|d| (&d.label, d.color)));

        let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = (rect.width().min(rect.height()) / 2.0 - LABEL_MARGIN).max(10.0);
        let axes = self.series.axes.len();
        if axes < 3 {
            return;
        }

        // Grid rings and spokes
        for ring in 1..=RINGS {
            let r = radius * ring as f32 / RINGS as f32;
            let points: Vec<Pos2> = (0..axes)
                .map(|i| polar(center, r, axis_angle(i, axes)))
                .collect();
            painter.add(Shape::closed_line(points, Stroke::new(1.0, GRID_COLOR)));
        }
        for i in 0..axes {
            let angle = axis_angle(i, axes);
            painter.line_segment(
                [center, polar(center, radius, angle)],
                Stroke::new(1.0, GRID_COLOR),
            );
            let label_pos = polar(center, radius + 12.0, angle);
            painter.text(
                label_pos,
                label_anchor(angle),
                &self.series.axes[i],
                FontId::proportional(11.0),
                ui.visuals().text_color(),
            );
        }

        // Datasets
        for dataset in &self.series.datasets {
            let points: Vec<Pos2> = dataset
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    polar(
                        center,
                        radius * scaled(v, self.series.max),
                        axis_angle(i, axes),
                    )
                })
                .collect();

            let fill = fan_mesh(center, &points, dataset.color.gamma_multiply(0.2));
            let outline = Stroke::new(2.0, dataset.color);
            painter.add(Shape::mesh(fill));
            painter.add(Shape::closed_line(points.clone(), outline));
            for p in points {
                painter.circle_filled(p, 3.0, dataset.color);
            }
        }

        if let Some(pointer) = response.hover_pos() {
            if (pointer - center).length() <= radius {
                let rows: Vec<String> = self
                    .series
                    .datasets
                    .iter()
                    .map(|d| {
                        let values: Vec<String> =
                            d.values.iter().map(|v| format!("{:.1}", v)).collect();
                        format!("{}: {}", d.label, values.join(" / "))
                    })
                    .collect();
                response.on_hover_text_at_pointer(rows.join("\n"));
            }
        }

        tracing::trace!(slot = ?self.slot, "painted radar chart");
    }
}

/// Axis `i` of `n`, starting at the top and going clockwise
pub(crate) fn axis_angle(i: usize, n: usize) -> f32 {
    -PI / 2.0 + TAU * i as f32 / n as f32
}

fn polar(center: Pos2, r: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * r
}

/// Value as a fraction of the scale, clamped to [0, 1]
pub(crate) fn scaled(value: f64, max: f64) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0) as f32
}

fn label_anchor(angle: f32) -> Align2 {
    let dir = Vec2::angled(angle);
    let h = if dir.x > 0.3 {
        egui::Align::Min
    } else if dir.x < -0.3 {
        egui::Align::Max
    } else {
        egui::Align::Center
    };
    let v = if dir.y > 0.3 {
        egui::Align::Min
    } else if dir.y < -0.3 {
        egui::Align::Max
    } else {
        egui::Align::Center
    };
    Align2([h, v])
}

/// Filled polygon as a triangle fan from `center`. Radar polygons are
/// star-shaped around the center, so the fan covers them exactly.
fn fan_mesh(center: Pos2, points: &[Pos2], fill: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    let n = points.len() as u32;
    mesh.colored_vertex(center, fill);
    for &p in points {
        mesh.colored_vertex(p, fill);
    }
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}
