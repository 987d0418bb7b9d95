//! Top toolbar: region selector, view mode, layout/zoom/export buttons

use bi_network_types::ViewMode;
use egui::{Color32, RichText, Ui};

/// Data needed to render the toolbar (extracted before render)
pub struct ToolbarData {
    /// `(region name, selector label)` in display order
    pub regions: Vec<(String, String)>,
    pub selected_region: Option<String>,
    pub view_mode: ViewMode,
    /// BI adoption years of the selected region
    pub bi_years: Option<Vec<i64>>,
    pub is_loading: bool,
    /// Last error (load failure, export result, ...)
    pub last_error: Option<String>,
    /// Last successful export path
    pub last_export: Option<String>,
}

/// Actions that can be triggered from the toolbar
#[derive(Debug, Default, PartialEq)]
pub struct ToolbarAction {
    pub select_region: Option<String>,
    pub change_view_mode: Option<ViewMode>,
    pub reset_layout: bool,
    pub reset_zoom: bool,
    pub export: bool,
    pub dismiss_message: bool,
}

pub fn toolbar(ui: &mut Ui, data: &ToolbarData) -> ToolbarAction {
    let mut action = ToolbarAction::default();

    ui.horizontal_wrapped(|ui| {
        ui.set_min_height(28.0);

        // Region selector
        ui.label("المحافظة:");
        let selected_label = data
            .selected_region
            .as_ref()
            .and_then(|name| data.regions.iter().find(|(n, _)| n == name))
            .map(|(_, label)| label.as_str())
            .unwrap_or("اختر محافظة");
        egui::ComboBox::from_id_salt("region_select")
            .selected_text(selected_label)
            .width(220.0)
            .show_ui(ui, |ui| {
                for (name, label) in &data.regions {
                    let is_selected = data.selected_region.as_deref() == Some(name.as_str());
                    if ui.selectable_label(is_selected, label.as_str()).clicked() && !is_selected {
                        action.select_region = Some(name.clone());
                    }
                }
            });

        ui.separator();

        // View mode selector
        ui.label("العرض:");
        egui::ComboBox::from_id_salt("view_mode_select")
            .selected_text(data.view_mode.display_name())
            .show_ui(ui, |ui| {
                for &mode in ViewMode::all() {
                    if ui
                        .selectable_label(data.view_mode == mode, mode.display_name())
                        .clicked()
                        && data.view_mode != mode
                    {
                        action.change_view_mode = Some(mode);
                    }
                }
            });

        // Toggle buttons mirror the selector
        for &mode in ViewMode::all() {
            if ui
                .selectable_label(data.view_mode == mode, mode.display_name())
                .clicked()
                && data.view_mode != mode
            {
                action.change_view_mode = Some(mode);
            }
        }

        ui.separator();

        if ui.button("إعادة ترتيب الشبكة").clicked() {
            action.reset_layout = true;
        }
        if ui.button("إعادة ضبط التكبير").clicked() {
            action.reset_zoom = true;
        }
        if ui.button("تصدير البيانات").clicked() {
            action.export = true;
        }

        if let Some(years) = data.bi_years.as_ref().filter(|y| !y.is_empty()) {
            ui.separator();
            let years = format!("سنوات تطبيق BI: {}", years_range(years));
            ui.label(RichText::new(years).small());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if data.is_loading {
                ui.spinner();
            }

            if let Some(ref error) = data.last_error {
                if ui
                    .small_button(RichText::new("X").color(Color32::RED))
                    .clicked()
                {
                    action.dismiss_message = true;
                }
                ui.label(RichText::new(error).color(Color32::RED).small());
            } else if let Some(ref path) = data.last_export {
                if ui.small_button("X").clicked() {
                    action.dismiss_message = true;
                }
                ui.label(
                    RichText::new(format!("تم التصدير: {}", path))
                        .color(Color32::from_rgb(46, 125, 50))
                        .small(),
                );
            }
        });
    });

    action
}

/// `2019` or `2019 - 2023`
fn years_range(years: &[i64]) -> String {
    let min = years.iter().min();
    let max = years.iter().max();
    match (min, max) {
        (Some(a), Some(b)) if a != b => format!("{} - {}", a, b),
        (Some(a), _) => a.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_range() {
        assert_eq!(years_range(&[2021, 2019, 2023]), "2019 - 2023");
        assert_eq!(years_range(&[2020]), "2020");
        assert_eq!(years_range(&[]), "");
    }
}
