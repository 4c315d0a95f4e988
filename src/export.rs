//! Excel export functionality.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};

use crate::models::{Employee, SalaryReport};

const EMPLOYEE_COLUMNS: [(&str, f64); 6] = [
    ("Employee ID", 15.0),
    ("Name", 30.0),
    ("Department", 25.0),
    ("Salary", 14.0),
    ("Joining Date", 14.0),
    ("Skills", 40.0),
];

const SALARY_COLUMNS: [(&str, f64); 3] = [("Department", 25.0), ("Employees", 12.0), ("Average Salary", 16.0)];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

/// Write the header row, size the columns and freeze the top row.
fn write_header(worksheet: &mut Worksheet, columns: &[(&str, f64)]) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, (title, width)) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &format)?;
        worksheet.set_column_width(col as u16, *width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Export an employee listing to an Excel file.
pub fn export_employees_to_excel(employees: &[Employee], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Employees")?;
    write_header(worksheet, &EMPLOYEE_COLUMNS)?;

    let salary_format = Format::new().set_num_format("#,##0");

    for (idx, emp) in employees.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &emp.employee_id)?;
        worksheet.write_string(row, 1, &emp.name)?;
        worksheet.write_string(row, 2, &emp.department)?;
        worksheet.write_number_with_format(row, 3, emp.salary as f64, &salary_format)?;
        worksheet.write_string(row, 4, emp.joining_date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 5, emp.skills.join(", "))?;
    }

    if !employees.is_empty() {
        worksheet.autofilter(0, 0, employees.len() as u32, (EMPLOYEE_COLUMNS.len() - 1) as u16)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Export the per-department salary report to an Excel file.
pub fn export_salary_report_to_excel(report: &SalaryReport, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Average Salary")?;
    write_header(worksheet, &SALARY_COLUMNS)?;

    let amount_format = Format::new().set_num_format("#,##0.00");

    for (idx, group) in report.departments.iter().enumerate() {
        let row = (idx + 1) as u32;

        worksheet.write_string(row, 0, &group.department)?;
        worksheet.write_number(row, 1, group.employee_count as f64)?;
        worksheet.write_number_with_format(row, 2, group.avg_salary, &amount_format)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("Excel Files", &["xlsx"])
        .save_file()
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}
