//! Analytic result shapes: salary report and skill search.

use serde::{Deserialize, Serialize};

use super::employee::Employee;

/// Label used for records with an empty department.
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Raw grouped row produced by the store aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSalaryRow {
    pub department: Option<String>,
    pub avg_salary: Option<f64>,
    pub employee_count: i64,
}

/// Average salary for one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSalary {
    pub department: String,
    pub avg_salary: f64,
    pub employee_count: i64,
}

impl From<DepartmentSalaryRow> for DepartmentSalary {
    fn from(row: DepartmentSalaryRow) -> Self {
        let department = match row.department {
            Some(name) if !name.is_empty() => name,
            _ => UNASSIGNED_DEPARTMENT.to_string(),
        };
        Self {
            department,
            avg_salary: round_salary(row.avg_salary),
            employee_count: row.employee_count,
        }
    }
}

/// Round to two decimals, reporting 0 for a missing or degenerate mean.
pub fn round_salary(avg: Option<f64>) -> f64 {
    match avg {
        Some(value) if value.is_finite() && value != 0.0 => (value * 100.0).round() / 100.0,
        _ => 0.0,
    }
}

/// Average salary per department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryReport {
    pub count: usize,
    pub departments: Vec<DepartmentSalary>,
}

impl SalaryReport {
    pub fn new(departments: Vec<DepartmentSalary>) -> Self {
        Self {
            count: departments.len(),
            departments,
        }
    }
}

/// Skill search outcome.
///
/// Without a skill argument the search lists every distinct skill; with one
/// it returns the matching employees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillSearch {
    Employees { count: usize, employees: Vec<Employee> },
    Skills { count: usize, skills: Vec<String> },
}

impl SkillSearch {
    pub fn employees(employees: Vec<Employee>) -> Self {
        Self::Employees {
            count: employees.len(),
            employees,
        }
    }

    pub fn skills(skills: Vec<String>) -> Self {
        Self::Skills {
            count: skills.len(),
            skills,
        }
    }

    /// Number of entries in the result.
    pub fn count(&self) -> usize {
        match self {
            Self::Employees { count, .. } | Self::Skills { count, .. } => *count,
        }
    }
}
