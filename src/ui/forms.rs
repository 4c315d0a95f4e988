//! Form state for the add and update pages.

use chrono::{Local, NaiveDate};

use super::components::{parse_flexible_date, parse_salary, parse_skills};
use crate::models::{CreateEmployee, Employee, UpdateEmployee};

/// Add-employee form.
#[derive(Clone)]
pub struct EmployeeForm {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub salary: String,
    pub joining_date: NaiveDate,
    pub skills: String,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            employee_id: String::new(),
            name: String::new(),
            department: String::new(),
            salary: String::new(),
            joining_date: Local::now().date_naive(),
            skills: String::new(),
        }
    }
}

impl EmployeeForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the inputs and build the create payload.
    pub fn to_create(&self) -> Result<CreateEmployee, String> {
        let employee_id = self.employee_id.trim();
        if employee_id.is_empty() {
            return Err("Employee ID is required".to_string());
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let salary = parse_salary(&self.salary).ok_or_else(|| format!("Invalid salary: '{}'", self.salary.trim()))?;

        Ok(CreateEmployee {
            employee_id: employee_id.to_string(),
            name: name.to_string(),
            department: self.department.trim().to_string(),
            salary,
            joining_date: self.joining_date,
            skills: parse_skills(&self.skills),
        })
    }
}

/// Update form. Fields start from the loaded record; only edited ones are sent.
#[derive(Default, Clone)]
pub struct UpdateForm {
    pub employee_id: String,
    pub loaded: Option<Employee>,
    pub name: String,
    pub department: String,
    pub salary: String,
    pub joining_date: String,
    pub skills: String,
}

impl UpdateForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fill the editable fields from a fetched record.
    pub fn load(&mut self, employee: Employee) {
        self.employee_id = employee.employee_id.clone();
        self.name = employee.name.clone();
        self.department = employee.department.clone();
        self.salary = employee.salary.to_string();
        self.joining_date = employee.joining_date.format("%Y-%m-%d").to_string();
        self.skills = employee.skills.join(", ");
        self.loaded = Some(employee);
    }

    /// Build the partial update from fields that differ from the loaded record.
    ///
    /// Without a loaded record every non-blank field is sent. The same holds
    /// once `employee_id` is edited away from the loaded record.
    pub fn to_changes(&self) -> Result<UpdateEmployee, String> {
        let current = self.loaded_for_target();
        let mut changes = UpdateEmployee::default();

        let name = self.name.trim();
        if !name.is_empty() && current.is_none_or(|e| e.name != name) {
            changes.name = Some(name.to_string());
        }

        let department = self.department.trim();
        let department_changed = match current {
            Some(e) => e.department != department,
            None => !department.is_empty(),
        };
        if department_changed {
            changes.department = Some(department.to_string());
        }

        if !self.salary.trim().is_empty() {
            let salary =
                parse_salary(&self.salary).ok_or_else(|| format!("Invalid salary: '{}'", self.salary.trim()))?;
            if current.is_none_or(|e| e.salary != salary) {
                changes.salary = Some(salary);
            }
        }

        if !self.joining_date.trim().is_empty() {
            let date = parse_flexible_date(&self.joining_date)
                .ok_or_else(|| format!("Invalid joining date: '{}'", self.joining_date.trim()))?;
            if current.is_none_or(|e| e.joining_date != date) {
                changes.joining_date = Some(date);
            }
        }

        let skills = parse_skills(&self.skills);
        let skills_changed = match current {
            Some(e) => e.skills != skills,
            None => !skills.is_empty(),
        };
        if skills_changed {
            changes.skills = Some(skills);
        }

        Ok(changes)
    }

    /// The loaded record, if it is still the one `employee_id` points at.
    pub fn loaded_for_target(&self) -> Option<&Employee> {
        self.loaded
            .as_ref()
            .filter(|e| e.employee_id == self.employee_id.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Employee {
        Employee {
            record_id: "r1".to_string(),
            employee_id: "E1".to_string(),
            name: "Ada".to_string(),
            department: "Eng".to_string(),
            salary: 100,
            joining_date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            skills: vec!["Rust".to_string()],
        }
    }

    #[test]
    fn test_create_requires_id_and_name() {
        let form = EmployeeForm {
            name: "Ada".to_string(),
            salary: "10".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_create().unwrap_err(), "Employee ID is required");

        let form = EmployeeForm {
            employee_id: "E1".to_string(),
            salary: "10".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_create().unwrap_err(), "Name is required");
    }

    #[test]
    fn test_create_parses_fields() {
        let form = EmployeeForm {
            employee_id: " E1 ".to_string(),
            name: "Ada".to_string(),
            department: "Eng".to_string(),
            salary: "120,000".to_string(),
            joining_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            skills: "Rust, SQL".to_string(),
        };
        let create = form.to_create().unwrap();
        assert_eq!(create.employee_id, "E1");
        assert_eq!(create.salary, 120_000);
        assert_eq!(create.skills, vec!["Rust", "SQL"]);

        let bad = EmployeeForm {
            salary: "lots".to_string(),
            ..form
        };
        assert!(bad.to_create().is_err());
    }

    #[test]
    fn test_unchanged_form_sends_nothing() {
        let mut form = UpdateForm::default();
        form.load(loaded());
        assert!(form.to_changes().unwrap().is_empty());
    }

    #[test]
    fn test_only_edited_fields_are_sent() {
        let mut form = UpdateForm::default();
        form.load(loaded());
        form.salary = "150".to_string();
        form.skills = "Rust, Go".to_string();

        let changes = form.to_changes().unwrap();
        assert_eq!(changes.salary, Some(150));
        assert_eq!(changes.skills, Some(vec!["Rust".to_string(), "Go".to_string()]));
        assert_eq!(changes.name, None);
        assert_eq!(changes.joining_date, None);
    }

    #[test]
    fn test_clearing_department_and_skills() {
        let mut form = UpdateForm::default();
        form.load(loaded());
        form.department.clear();
        form.skills.clear();

        let changes = form.to_changes().unwrap();
        assert_eq!(changes.department, Some(String::new()));
        assert_eq!(changes.skills, Some(Vec::new()));
    }

    #[test]
    fn test_without_loaded_record_sends_non_blank() {
        let form = UpdateForm {
            employee_id: "E1".to_string(),
            joining_date: "2024/05/06".to_string(),
            ..Default::default()
        };
        let changes = form.to_changes().unwrap();
        assert_eq!(changes.joining_date, NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(changes.name, None);
        assert_eq!(changes.department, None);
        assert_eq!(changes.skills, None);
    }

    #[test]
    fn test_edited_employee_id_ignores_loaded_record() {
        let mut form = UpdateForm::default();
        form.load(loaded());
        form.employee_id = "E2".to_string();
        assert!(form.loaded_for_target().is_none());

        let changes = form.to_changes().unwrap();
        assert_eq!(changes.name, Some("Ada".to_string()));
        assert_eq!(changes.department, Some("Eng".to_string()));
        assert_eq!(changes.salary, Some(100));
        assert_eq!(changes.joining_date, NaiveDate::from_ymd_opt(2023, 4, 1));
        assert_eq!(changes.skills, Some(vec!["Rust".to_string()]));
    }

    #[test]
    fn test_padded_employee_id_keeps_loaded_record() {
        let mut form = UpdateForm::default();
        form.load(loaded());
        form.employee_id = " E1 ".to_string();
        assert!(form.to_changes().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let form = UpdateForm {
            joining_date: "someday".to_string(),
            ..Default::default()
        };
        assert!(form.to_changes().is_err());
    }
}
