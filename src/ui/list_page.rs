//! Employee listing with department filter and Excel export.

use eframe::egui::{self, Key, RichText, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_XLS, FUNNEL};

use super::app::App;
use super::components::{back_button, button_with_icon, employee_table, panel_header, primary_button};

/// Show the list page.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "List Employees");

    ui.horizontal(|ui| {
        ui.label("Department:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.list_department)
                .desired_width(200.0)
                .hint_text("All departments"),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        ui.add_space(10.0);
        if primary_button(ui, FUNNEL, "Apply", !app.is_loading).clicked() || submitted {
            app.load_employees();
        }

        ui.add_space(10.0);
        if button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_employees();
        }

        ui.add_space(10.0);
        let can_export = !app.employees.is_empty();
        if ui
            .add_enabled(can_export, egui::Button::new(format!("{FILE_XLS} Export to Excel")))
            .clicked()
        {
            app.export_employees();
        }
    });

    ui.add_space(15.0);

    if !app.list_loaded {
        ui.label(RichText::new("Not loaded yet").weak());
        return go_back;
    }

    if app.employees.is_empty() {
        ui.label(RichText::new("No employees found").weak());
        return go_back;
    }

    ui.label(format!("{} employees, newest first", app.employees.len()));
    ui.add_space(10.0);
    employee_table(ui, "employee_list", &app.employees);

    go_back
}
