//! Data models for employee records and analytic results.

pub mod analytics;
pub mod employee;

pub use analytics::{DepartmentSalary, DepartmentSalaryRow, SalaryReport, SkillSearch, UNASSIGNED_DEPARTMENT};
pub use employee::{CreateEmployee, DeleteConfirmation, Employee, InsertedId, ServiceInfo, UpdateEmployee};
