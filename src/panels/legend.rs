//! Legend for node and link styles

use bi_network_graph::graph::colors::{link_color, node_fill, node_stroke};
use bi_network_types::NodeType;
use egui::{RichText, Sense, Stroke, Ui, Vec2};

/// Link types the dataset uses, with their display names
pub const LINK_LEGEND: [(&str, &str); 3] = [
    ("governance", "حوكمة"),
    ("belongs_to", "انتماء للقطاع"),
    ("data_flow", "تدفق البيانات"),
];

pub fn legend(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for &node_type in NodeType::all() {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
            ui.painter().circle(
                rect.center(),
                6.0,
                node_fill(node_type),
                Stroke::new(1.5, node_stroke(node_type)),
            );
            ui.label(RichText::new(node_type.display_name()).small());
            ui.add_space(10.0);
        }

        ui.separator();

        for (link_type, name) in LINK_LEGEND {
            let (rect, _) = ui.allocate_exact_size(Vec2::new(22.0, 14.0), Sense::hover());
            ui.painter().line_segment(
                [rect.left_center(), rect.right_center()],
                Stroke::new(3.0, link_color(link_type)),
            );
            ui.label(RichText::new(name).small());
            ui.add_space(10.0);
        }
    });
}
