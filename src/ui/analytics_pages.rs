//! Salary and skill analytics pages.

use eframe::egui::{self, Key, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_XLS, MAGNIFYING_GLASS};

use super::app::App;
use super::components::{back_button, button_with_icon, employee_table, panel_header, primary_button};
use crate::models::SkillSearch;

/// Show average salary per department.
///
/// Returns `true` if the back button was clicked.
pub fn show_average_salary(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Average Salary by Department");

    ui.horizontal(|ui| {
        if button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_salary_report();
        }
        ui.add_space(10.0);
        let can_export = app.salary_report.as_ref().is_some_and(|r| r.count > 0);
        if ui
            .add_enabled(can_export, egui::Button::new(format!("{FILE_XLS} Export to Excel")))
            .clicked()
        {
            app.export_salary_report();
        }
    });

    ui.add_space(15.0);

    let Some(report) = &app.salary_report else {
        ui.label(RichText::new("Not loaded yet").weak());
        return go_back;
    };

    if report.departments.is_empty() {
        ui.label(RichText::new("No employees on record").weak());
        return go_back;
    }

    ui.label(format!("{} departments", report.count));
    ui.add_space(10.0);

    egui::Grid::new("salary_grid")
        .num_columns(3)
        .striped(true)
        .spacing([30.0, 8.0])
        .show(ui, |ui| {
            ui.strong("Department");
            ui.strong("Employees");
            ui.strong("Average Salary");
            ui.end_row();

            for group in &report.departments {
                ui.label(&group.department);
                ui.label(group.employee_count.to_string());
                ui.label(format!("{:.2}", group.avg_salary));
                ui.end_row();
            }
        });

    go_back
}

/// Show skill search. An empty query lists every skill on record.
///
/// Returns `true` if the back button was clicked.
pub fn show_skill_search(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Skill Search");

    ui.horizontal(|ui| {
        ui.label("Skill:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.skill_query)
                .desired_width(200.0)
                .hint_text("Leave empty to list all skills"),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

        ui.add_space(10.0);
        if primary_button(ui, MAGNIFYING_GLASS, "Search", !app.is_loading).clicked() || submitted {
            app.search_skill();
        }
    });

    ui.add_space(15.0);

    match &app.skill_result {
        None => {}
        Some(SkillSearch::Employees { count, employees }) => {
            ui.label(format!("{count} matching employees"));
            ui.add_space(10.0);
            employee_table(ui, "skill_matches", employees);
        }
        Some(SkillSearch::Skills { count, skills }) => {
            ui.label(format!("{count} distinct skills"));
            ui.add_space(10.0);
            ScrollArea::vertical().id_salt("skill_list").show(ui, |ui| {
                if skills.is_empty() {
                    ui.label(RichText::new("No skills on record").weak());
                }
                for skill in skills {
                    ui.label(skill);
                }
            });
        }
    }

    go_back
}
