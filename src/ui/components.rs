//! Shared UI components and form parsing helpers.

use chrono::NaiveDate;
use eframe::egui::{self, Button, Color32, Response, RichText, ScrollArea, Sense, StrokeKind, Ui};

use crate::models::Employee;

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(68, 114, 196);
}

/// Render a clickable navigation tile with an icon above the title.
pub fn nav_tile(ui: &mut Ui, icon: &str, title: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let painter = ui.painter();

        painter.rect_filled(rect, 8.0, visuals.bg_fill);
        painter.rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);
        painter.text(
            egui::pos2(rect.center().x, rect.top() + size.y * 0.38),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(size.y * 0.3),
            visuals.text_color(),
        );
        painter.text(
            egui::pos2(rect.center().x, rect.bottom() - size.y * 0.22),
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(15.0),
            visuals.text_color(),
        );
    }

    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new(format!("{} Back to Menu", egui_phosphor::regular::ARROW_LEFT)).size(14.0))
        .clicked()
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Button with an icon prefix.
pub fn button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.add(Button::new(format!("{icon} {label}")).min_size(egui::vec2(0.0, 28.0)))
}

/// Filled primary button with an icon prefix, disabled while `enabled` is false.
pub fn primary_button(ui: &mut Ui, icon: &str, label: &str, enabled: bool) -> Response {
    let button = Button::new(RichText::new(format!("{icon} {label}")).color(Color32::WHITE))
        .fill(colors::PRIMARY)
        .min_size(egui::vec2(0.0, 28.0));
    ui.add_enabled(enabled, button)
}

/// Red-filled button for destructive actions.
pub fn danger_button(ui: &mut Ui, icon: &str, label: &str, enabled: bool) -> Response {
    let button = Button::new(RichText::new(format!("{icon} {label}")).color(Color32::WHITE))
        .fill(Color32::from_rgb(200, 60, 60))
        .min_size(egui::vec2(0.0, 28.0));
    ui.add_enabled(enabled, button)
}

/// Labelled single-line text field inside a two-column grid.
pub fn form_row(ui: &mut Ui, label: &str, value: &mut String, hint: &str) -> Response {
    ui.label(label);
    let response = ui.add(egui::TextEdit::singleline(value).desired_width(260.0).hint_text(hint));
    ui.end_row();
    response
}

/// Date field that accepts typed input, painting it red while unparseable.
pub fn date_row(ui: &mut Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.vertical(|ui| {
        let is_valid = value.trim().is_empty() || parse_flexible_date(value).is_some();
        let text_color = if is_valid {
            ui.visuals().text_color()
        } else {
            colors::ERROR
        };
        ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(120.0)
                .hint_text("YYYY-MM-DD")
                .text_color(text_color),
        );
        if is_valid {
            ui.weak("Format: YYYY-MM-DD");
        } else {
            ui.colored_label(colors::ERROR, "Invalid date format");
        }
    });
    ui.end_row();
}

/// Key/value grid showing one employee.
pub fn employee_details(ui: &mut Ui, id_salt: &str, employee: &Employee) {
    egui::Grid::new(id_salt)
        .num_columns(2)
        .spacing([20.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            let rows = [
                ("Employee ID", employee.employee_id.clone()),
                ("Name", employee.name.clone()),
                ("Department", employee.department.clone()),
                ("Salary", employee.salary.to_string()),
                ("Joining Date", employee.joining_date.format("%Y-%m-%d").to_string()),
                ("Skills", display_skills(&employee.skills)),
                ("Record ID", employee.record_id.clone()),
            ];
            for (label, value) in rows {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            }
        });
}

/// Striped table of employees.
pub fn employee_table(ui: &mut Ui, id_salt: &str, employees: &[Employee]) {
    ScrollArea::vertical().id_salt(format!("{id_salt}_scroll")).show(ui, |ui| {
        egui::Grid::new(id_salt)
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Employee ID");
                ui.strong("Name");
                ui.strong("Department");
                ui.strong("Salary");
                ui.strong("Joining Date");
                ui.strong("Skills");
                ui.end_row();

                for emp in employees {
                    ui.label(&emp.employee_id);
                    ui.label(&emp.name);
                    ui.label(if emp.department.is_empty() { "-" } else { emp.department.as_str() });
                    ui.label(emp.salary.to_string());
                    ui.label(emp.joining_date.format("%Y-%m-%d").to_string());
                    ui.label(display_skills(&emp.skills));
                    ui.end_row();
                }
            });
    });
}

fn display_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        "-".to_string()
    } else {
        skills.join(", ")
    }
}

/// Parse date input flexibly, accepting multiple formats.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d-%m-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Split comma-separated skills, dropping blanks.
pub fn parse_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a whole-number salary, tolerating thousands separators.
pub fn parse_salary(input: &str) -> Option<i64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned.parse().ok()
}
