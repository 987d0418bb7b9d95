//! Doughnut chart painted with egui::Painter

use std::f32::consts::{PI, TAU};

use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Vec2};

use super::{palette_color, ChartSlot, DoughnutSeries};

const CHART_HEIGHT: f32 = 240.0;
/// Inner radius as a fraction of the outer radius
const CUTOUT: f32 = 0.5;
const EMPTY_RING: Color32 = Color32::from_gray(225);
/// Max angular step of a sector's outline, radians
const SEGMENT_STEP: f32 = 0.05;

#[derive(Debug)]
pub struct DoughnutChart {
    slot: ChartSlot,
    series: DoughnutSeries,
}

impl DoughnutChart {
    pub fn new(slot: ChartSlot, series: DoughnutSeries) -> Self {
        Self { slot, series }
    }

    pub fn series(&self) -> &DoughnutSeries {
        &self.series
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let outer = (rect.width().min(rect.height()) / 2.0 - 8.0).max(10.0);
        let inner = outer * CUTOUT;

        if self.series.is_empty() {
            painter.circle_stroke(
                center,
                (outer + inner) / 2.0,
                Stroke::new(outer - inner, EMPTY_RING),
            );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "لا توجد بيانات",
                FontId::proportional(13.0),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        let sectors = sector_angles(&self.series);
        for (i, &(start, end)) in sectors.iter().enumerate() {
            if end <= start {
                continue;
            }
            let color = palette_color(i).gamma_multiply(0.8);
            let sector = annulus_sector(center, inner, outer, start, end, color);
            painter.add(Shape::mesh(sector));
            // sector border
            painter.line_segment(
                [
                    center + Vec2::angled(start) * inner,
                    center + Vec2::angled(start) * outer,
                ],
                Stroke::new(2.0, Color32::WHITE),
            );
        }

        if let Some(pointer) = response.hover_pos() {
            let offset = pointer - center;
            let distance = offset.length();
            if distance >= inner && distance <= outer {
                if let Some(index) = sector_at(&sectors, offset.angle()) {
                    let slice = &self.series.slices[index];
                    let share = slice.value / self.series.total() * 100.0;
                    response.on_hover_text_at_pointer(format!(
                        "{}: {} ({:.1}%)",
                        slice.label, slice.value, share
                    ));
                }
            }
        }

        super::plots::legend_row(
            ui,
            self.series
                .slices
                .iter()
                .enumerate()
                .map(|(i, s)| (&s.label, palette_color(i))),
        );

        tracing::trace!(slot = ?self.slot, slices = sectors.len(), "painted doughnut chart");
    }
}

/// Start/end angle of every slice, clockwise from the top. Negative values
/// get an empty sector.
pub(crate) fn sector_angles(series: &DoughnutSeries) -> Vec<(f32, f32)> {
    let total = series.total();
    let mut angle = -PI / 2.0;
    series
        .slices
        .iter()
        .map(|slice| {
            let sweep = if total > 0.0 {
                (slice.value.max(0.0) / total) as f32 * TAU
            } else {
                0.0
            };
            let sector = (angle, angle + sweep);
            angle += sweep;
            sector
        })
        .collect()
}

/// Index of the sector containing `angle` (any branch of atan2)
fn sector_at(sectors: &[(f32, f32)], angle: f32) -> Option<usize> {
    let start = sectors.first()?.0;
    let normalized = start + (angle - start).rem_euclid(TAU);
    sectors
        .iter()
        .position(|&(a, b)| normalized >= a && normalized < b)
}

fn annulus_sector(
    center: Pos2,
    inner: f32,
    outer: f32,
    start: f32,
    end: f32,
    color: Color32,
) -> Mesh {
    let steps = (((end - start) / SEGMENT_STEP).ceil() as u32).max(1);
    let mut mesh = Mesh::default();
    for s in 0..=steps {
        let angle = start + (end - start) * s as f32 / steps as f32;
        let dir = Vec2::angled(angle);
        mesh.colored_vertex(center + dir * inner, color);
        mesh.colored_vertex(center + dir * outer, color);
    }
    for s in 0..steps {
        let i = s * 2;
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::Slice;

    fn series(values: &[f64]) -> DoughnutSeries {
        DoughnutSeries {
            slices: values
                .iter()
                .enumerate()
                .map(|(i, &value)| Slice {
                    label: format!("s{i}"),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_sectors_cover_full_circle() {
        let sectors = sector_angles(&series(&[1.0, 1.0, 2.0]));
        assert_eq!(sectors.len(), 3);
        assert!((sectors[0].0 + PI / 2.0).abs() < 1e-6);
        assert!((sectors[2].1 - sectors[0].0 - TAU).abs() < 1e-4);
        assert!(((sectors[2].1 - sectors[2].0) - PI).abs() < 1e-4);
    }

    #[test]
    fn test_empty_series() {
        let empty = DoughnutSeries::default();
        assert!(empty.is_empty());
        assert!(sector_angles(&empty).is_empty());
        assert!(series(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn test_sector_hit() {
        let sectors = sector_angles(&series(&[1.0, 1.0]));
        // right half of the ring (pointing +x) belongs to the first slice
        assert_eq!(sector_at(&sectors, 0.0), Some(0));
        // left half
        assert_eq!(sector_at(&sectors, PI * 0.99), Some(1));
    }

    #[test]
    fn test_annulus_mesh() {
        let mesh = annulus_sector(Pos2::ZERO, 5.0, 10.0, 0.0, 0.21, Color32::RED);
        // ceil(0.21 / 0.05) = 5 steps
        assert_eq!(mesh.vertices.len(), 2 * (5 + 1));
        assert_eq!(mesh.indices.len(), 5 * 6);
    }
}
