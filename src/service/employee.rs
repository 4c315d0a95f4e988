//! Employee lifecycle and analytic operations.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::models::{
    CreateEmployee, DeleteConfirmation, DepartmentSalary, Employee, InsertedId, SalaryReport, ServiceInfo,
    SkillSearch, UpdateEmployee,
};
use crate::store::{EmployeeFilter, EmployeeStore, StoreError};

const EMPLOYEE_NOT_FOUND: &str = "Employee not found";

/// Validates requests and orchestrates them against an [`EmployeeStore`].
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Create a new employee and return its generated record id.
    pub async fn create(&self, input: CreateEmployee) -> Result<InsertedId> {
        if input.employee_id.trim().is_empty() {
            return Err(AppError::invalid_request("Employee ID cannot be empty"));
        }

        if self.store.find_one(&input.employee_id).await?.is_some() {
            return Err(AppError::conflict("Employee ID already exists"));
        }

        let employee_id = input.employee_id.clone();
        match self.store.insert(input).await {
            Ok(record_id) => {
                info!("Created employee {employee_id}");
                Ok(InsertedId { inserted_id: record_id })
            }
            Err(StoreError::Duplicate(_)) => {
                warn!("Concurrent create for employee {employee_id}");
                Err(AppError::conflict("Employee ID already exists"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a single employee by employee id.
    pub async fn get(&self, employee_id: &str) -> Result<Employee> {
        self.store
            .find_one(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found(EMPLOYEE_NOT_FOUND))
    }

    /// Apply a partial update and return the updated record.
    pub async fn update(&self, employee_id: &str, changes: UpdateEmployee) -> Result<Employee> {
        if self.store.find_one(employee_id).await?.is_none() {
            return Err(AppError::not_found(EMPLOYEE_NOT_FOUND));
        }

        if changes.is_empty() {
            return Err(AppError::invalid_request("No fields provided for update"));
        }

        let updated = self
            .store
            .update_fields(employee_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(EMPLOYEE_NOT_FOUND))?;

        info!("Updated employee {employee_id}");
        Ok(updated)
    }

    /// Permanently delete an employee.
    pub async fn delete(&self, employee_id: &str) -> Result<DeleteConfirmation> {
        if self.store.find_one(employee_id).await?.is_none() {
            return Err(AppError::not_found(EMPLOYEE_NOT_FOUND));
        }

        let deleted = self.store.delete(employee_id).await?;
        if deleted != 1 {
            error!("Delete of employee {employee_id} affected {deleted} records");
            return Err(AppError::internal("Failed to delete employee"));
        }

        info!("Deleted employee {employee_id}");
        Ok(DeleteConfirmation {
            message: format!("Employee {employee_id} deleted successfully."),
        })
    }

    /// List employees, newest joiners first, optionally restricted to one department.
    ///
    /// An empty result is returned as an empty list.
    pub async fn list(&self, department: Option<&str>) -> Result<Vec<Employee>> {
        let filter = match department {
            Some(department) if !department.is_empty() => EmployeeFilter::department(department),
            _ => EmployeeFilter::default(),
        };

        let employees = self.store.find_many(&filter).await?;
        debug!("Listed {} employees (filter: {:?})", employees.len(), filter.department);
        Ok(employees)
    }

    /// Average salary and headcount per department.
    pub async fn average_salary_by_department(&self) -> Result<SalaryReport> {
        let rows = self
            .store
            .salary_by_department()
            .await
            .map_err(|e| AppError::internal(format!("Error calculating average salary: {e}")))?;

        let departments: Vec<DepartmentSalary> = rows.into_iter().map(DepartmentSalary::from).collect();
        Ok(SalaryReport::new(departments))
    }

    /// Search employees by skill, or list every distinct skill when `skill` is `None`.
    ///
    /// The skill list is sorted by byte order on every backend.
    /// Matching is a case-insensitive substring test against each skill.
    pub async fn search_by_skill(&self, skill: Option<&str>) -> Result<SkillSearch> {
        let Some(skill) = skill else {
            let mut skills = self
                .store
                .distinct_skills()
                .await
                .map_err(|e| AppError::internal(format!("Error listing skills: {e}")))?;
            // Byte order, whatever collation the store sorted with.
            skills.sort_unstable();
            skills.dedup();
            return Ok(SkillSearch::skills(skills));
        };

        let needle = skill.trim();
        if needle.is_empty() {
            return Err(AppError::invalid_request("Skill cannot be empty"));
        }

        let employees = self
            .store
            .find_many(&EmployeeFilter::skill(needle))
            .await
            .map_err(|e| AppError::internal(format!("Error searching employees: {e}")))?;

        if employees.is_empty() {
            return Err(AppError::not_found(format!("No employees found with skill '{needle}'")));
        }

        Ok(SkillSearch::employees(employees))
    }

    /// Liveness check listing the store's collections.
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        let collections = self.store.collection_names().await?;
        Ok(ServiceInfo {
            message: "Employee records service is running".to_string(),
            collections,
        })
    }
}
