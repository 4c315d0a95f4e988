//! Add, find, update and delete pages.
//!
//! Each `show_*` returns `true` if the back button was clicked.

use eframe::egui::{self, Key, RichText, Ui};
use egui_extras::DatePickerButton;
use egui_phosphor::regular::{ARROW_CLOCKWISE, FLOPPY_DISK, MAGNIFYING_GLASS, TRASH, USER_PLUS};

use super::app::App;
use super::components::{
    back_button, button_with_icon, colors, danger_button, date_row, employee_details, form_row, panel_header,
    primary_button,
};

fn submitted(ui: &Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
}

pub fn show_add(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Add Employee");

    egui::Grid::new("add_form_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            form_row(ui, "Employee ID:", &mut app.add_form.employee_id, "e.g. E1001");
            form_row(ui, "Name:", &mut app.add_form.name, "Full name");
            form_row(ui, "Department:", &mut app.add_form.department, "Optional");
            form_row(ui, "Salary:", &mut app.add_form.salary, "Whole number");

            ui.label("Joining Date:");
            ui.add(DatePickerButton::new(&mut app.add_form.joining_date).id_salt("add_joining_date"));
            ui.end_row();

            form_row(ui, "Skills:", &mut app.add_form.skills, "Comma separated");
        });

    ui.add_space(15.0);
    ui.horizontal(|ui| {
        if primary_button(ui, USER_PLUS, "Create", !app.is_loading).clicked() {
            app.create_employee();
        }
        ui.add_space(10.0);
        if button_with_icon(ui, ARROW_CLOCKWISE, "Clear").clicked() {
            app.add_form.reset();
        }
    });

    if let Some((employee_id, record_id)) = &app.last_inserted {
        ui.add_space(15.0);
        ui.colored_label(colors::SUCCESS, format!("Last created: {employee_id}"));
        ui.label(RichText::new(format!("Record ID: {record_id}")).weak());
    }

    go_back
}

pub fn show_find(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Find Employee");

    ui.horizontal(|ui| {
        ui.label("Employee ID:");
        let response = ui.add(egui::TextEdit::singleline(&mut app.find_id).desired_width(200.0));
        ui.add_space(10.0);
        let clicked = primary_button(ui, MAGNIFYING_GLASS, "Find", !app.is_loading).clicked();
        if clicked || submitted(ui, &response) {
            app.find_employee();
        }
    });

    ui.add_space(20.0);

    if let Some(employee) = &app.found {
        employee_details(ui, "find_details", employee);
    }

    go_back
}

pub fn show_update(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Update Employee");

    ui.horizontal(|ui| {
        ui.label("Employee ID:");
        let response = ui.add(egui::TextEdit::singleline(&mut app.update_form.employee_id).desired_width(200.0));
        ui.add_space(10.0);
        let clicked = button_with_icon(ui, MAGNIFYING_GLASS, "Load").clicked();
        if clicked || submitted(ui, &response) {
            app.load_for_update();
        }
    });

    ui.add_space(10.0);
    if app.update_form.loaded_for_target().is_some() {
        ui.label(RichText::new("Edit the fields to change. Untouched fields are kept.").weak());
    } else {
        ui.label(RichText::new("Load a record, or fill only the fields to change.").weak());
    }
    ui.add_space(10.0);

    egui::Grid::new("update_form_grid")
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, |ui| {
            form_row(ui, "Name:", &mut app.update_form.name, "");
            form_row(ui, "Department:", &mut app.update_form.department, "");
            form_row(ui, "Salary:", &mut app.update_form.salary, "");
            date_row(ui, "Joining Date:", &mut app.update_form.joining_date);
            form_row(ui, "Skills:", &mut app.update_form.skills, "Comma separated");
        });

    ui.add_space(15.0);
    ui.horizontal(|ui| {
        if primary_button(ui, FLOPPY_DISK, "Save", !app.is_loading).clicked() {
            app.update_employee();
        }
        ui.add_space(10.0);
        if button_with_icon(ui, ARROW_CLOCKWISE, "Clear").clicked() {
            app.update_form.reset();
        }
    });

    go_back
}

pub fn show_delete(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Delete Employee");

    ui.horizontal(|ui| {
        ui.label("Employee ID:");
        ui.add(egui::TextEdit::singleline(&mut app.delete_id).desired_width(200.0));
        ui.add_space(10.0);
        if danger_button(ui, TRASH, "Delete", !app.is_loading).clicked() {
            app.request_delete();
        }
    });

    ui.add_space(10.0);
    ui.colored_label(colors::WARNING, "Deleting is permanent.");

    go_back
}
