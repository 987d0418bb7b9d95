//! Hover tooltip for network nodes

use bi_network_types::Node;
use egui::{Pos2, RichText, Vec2};

/// Offset from the pointer to the tooltip's top-left corner
const POINTER_OFFSET: Vec2 = Vec2::new(10.0, -10.0);

/// Tooltip rows: label, localized type, then whichever optional fields the
/// node carries.
pub fn tooltip_lines(node: &Node) -> Vec<String> {
    let mut lines = vec![
        node.display_label().to_string(),
        format!("النوع: {}", node.node_type.display_name()),
    ];
    if let Some(ref industry) = node.industry {
        lines.push(format!("الصناعة: {}", industry));
    }
    if let Some(agility) = node.agility {
        lines.push(format!("المرونة: {:.1}", agility));
    }
    if let Some(efficiency) = node.efficiency {
        lines.push(format!("الكفاءة: {:.1}", efficiency));
    }
    if let Some(count) = node.company_count {
        lines.push(format!("عدد الشركات: {}", count));
    }
    lines
}

/// Show the tooltip next to the pointer for this frame
pub fn show_node_tooltip(ctx: &egui::Context, pointer: Pos2, node: &Node) {
    let lines = tooltip_lines(node);
    egui::Area::new(egui::Id::new("network_node_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(pointer + POINTER_OFFSET)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let mut rows = lines.iter();
                if let Some(title) = rows.next() {
                    ui.label(RichText::new(title).strong());
                }
                for row in rows {
                    ui.label(row);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use bi_network_types::NodeType;

    #[test]
    fn test_company_tooltip() {
        let mut node = Node::new("company_9", NodeType::DataSource, 18.0).with_label("Company 9");
        node.industry = Some("Finance".into());
        node.agility = Some(6.24);
        node.efficiency = Some(71.0);

        let lines = tooltip_lines(&node);
        assert_eq!(
            lines,
            vec![
                "Company 9".to_string(),
                "النوع: مصدر بيانات".to_string(),
                "الصناعة: Finance".to_string(),
                "المرونة: 6.2".to_string(),
                "الكفاءة: 71.0".to_string(),
            ]
        );
    }

    #[test]
    fn test_industry_tooltip_shows_company_count() {
        let mut node = Node::new("Cairo_Retail", NodeType::Process, 40.0);
        node.company_count = Some(5);

        let lines = tooltip_lines(&node);
        assert_eq!(lines[0], "Cairo_Retail");
        assert_eq!(lines[1], "النوع: عملية/قسم");
        assert_eq!(lines.last().unwrap(), "عدد الشركات: 5");
        assert_eq!(lines.len(), 3);
    }
}
