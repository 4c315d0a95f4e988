//! Record store adapter: primitive operations over the employee collection.
//!
//! The service layer only talks to [`EmployeeStore`]. [`PgEmployeeStore`]
//! keeps the collection in a PostgreSQL table; [`MemoryStore`] keeps it in
//! process for tests and local development.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CreateEmployee, DepartmentSalaryRow, Employee, UpdateEmployee};

pub use memory::MemoryStore;
pub use postgres::PgEmployeeStore;

/// Errors raised by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Unique key already taken (employee_id)
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// Database driver error
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Filter for [`EmployeeStore::find_many`]. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Exact department match.
    pub department: Option<String>,
    /// Case-insensitive substring match against any skill.
    pub skill: Option<String>,
}

impl EmployeeFilter {
    pub fn department(department: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            ..Default::default()
        }
    }

    pub fn skill(skill: impl Into<String>) -> Self {
        Self {
            skill: Some(skill.into()),
            ..Default::default()
        }
    }

    /// Evaluate the filter against a record in memory.
    pub fn matches(&self, employee: &Employee) -> bool {
        let department_match = self
            .department
            .as_ref()
            .is_none_or(|department| employee.department == *department);

        let skill_match = self.skill.as_ref().is_none_or(|skill| {
            let needle = skill.to_lowercase();
            employee.skills.iter().any(|s| s.to_lowercase().contains(&needle))
        });

        department_match && skill_match
    }
}

/// Primitive operations over one employee collection.
///
/// Lookups are keyed by `employee_id`. Results of `find_many` are ordered
/// by `joining_date` descending, then `employee_id` ascending.
///
/// Case folding for the skill filter is backend specific. The PostgreSQL
/// store uses `ILIKE` under the database locale while [`MemoryStore`] uses
/// Unicode `to_lowercase`, so they can disagree outside ASCII.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert a record, returning the generated record id.
    ///
    /// Fails with [`StoreError::Duplicate`] if `employee_id` is taken.
    async fn insert(&self, record: CreateEmployee) -> StoreResult<String>;

    /// Find a single record by `employee_id`.
    async fn find_one(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// Find all records matching the filter.
    async fn find_many(&self, filter: &EmployeeFilter) -> StoreResult<Vec<Employee>>;

    /// Apply the present fields of `changes` in a single step.
    ///
    /// Returns the updated record, or `None` if nothing matched.
    async fn update_fields(&self, employee_id: &str, changes: &UpdateEmployee) -> StoreResult<Option<Employee>>;

    /// Delete by `employee_id`, returning the number of records removed.
    async fn delete(&self, employee_id: &str) -> StoreResult<u64>;

    /// Group by department with mean salary and count, ordered by department.
    async fn salary_by_department(&self) -> StoreResult<Vec<DepartmentSalaryRow>>;

    /// Distinct skill values across all records.
    ///
    /// Order follows the backend's collation; callers needing a stable
    /// order sort the result themselves.
    async fn distinct_skills(&self) -> StoreResult<Vec<String>>;

    /// Names of the collections visible to this store.
    async fn collection_names(&self) -> StoreResult<Vec<String>>;
}

/// Order records newest first, breaking ties by employee id.
pub(crate) fn sort_newest_first(employees: &mut [Employee]) {
    employees.sort_by(|a, b| {
        b.joining_date
            .cmp(&a.joining_date)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
}
