//! In-process employee collection.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EmployeeFilter, EmployeeStore, StoreError, StoreResult, sort_newest_first};
use crate::models::{CreateEmployee, DepartmentSalaryRow, Employee, UpdateEmployee};

/// Employee collection held in memory, keyed by `employee_id`.
pub struct MemoryStore {
    collection: String,
    records: RwLock<BTreeMap<String, Employee>>,
}

impl MemoryStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of records currently stored.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("employees")
    }
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn insert(&self, record: CreateEmployee) -> StoreResult<String> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.employee_id) {
            return Err(StoreError::Duplicate(record.employee_id));
        }

        let record_id = Uuid::new_v4().to_string();
        let employee = Employee {
            record_id: record_id.clone(),
            employee_id: record.employee_id.clone(),
            name: record.name,
            department: record.department,
            salary: record.salary,
            joining_date: record.joining_date,
            skills: record.skills,
        };
        records.insert(record.employee_id, employee);
        Ok(record_id)
    }

    async fn find_one(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.records.read().await.get(employee_id).cloned())
    }

    async fn find_many(&self, filter: &EmployeeFilter) -> StoreResult<Vec<Employee>> {
        let mut found: Vec<Employee> = self
            .records
            .read()
            .await
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        Ok(found)
    }

    async fn update_fields(&self, employee_id: &str, changes: &UpdateEmployee) -> StoreResult<Option<Employee>> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(employee_id).map(|employee| {
            changes.apply_to(employee);
            employee.clone()
        }))
    }

    async fn delete(&self, employee_id: &str) -> StoreResult<u64> {
        let removed = self.records.write().await.remove(employee_id);
        Ok(u64::from(removed.is_some()))
    }

    async fn salary_by_department(&self) -> StoreResult<Vec<DepartmentSalaryRow>> {
        let records = self.records.read().await;

        // department -> (sum, count)
        let mut groups: BTreeMap<&str, (i128, i64)> = BTreeMap::new();
        for employee in records.values() {
            let entry = groups.entry(employee.department.as_str()).or_default();
            entry.0 += i128::from(employee.salary);
            entry.1 += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(department, (sum, count))| DepartmentSalaryRow {
                department: Some(department.to_string()),
                avg_salary: Some(sum as f64 / count as f64),
                employee_count: count,
            })
            .collect())
    }

    async fn distinct_skills(&self) -> StoreResult<Vec<String>> {
        let records = self.records.read().await;
        let skills: BTreeSet<&String> = records.values().flat_map(|e| e.skills.iter()).collect();
        Ok(skills.into_iter().cloned().collect())
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(vec![self.collection.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_employee(id: &str, department: &str, salary: i64, skills: &[&str]) -> CreateEmployee {
        CreateEmployee {
            employee_id: id.to_string(),
            name: format!("Name {id}"),
            department: department.to_string(),
            salary,
            joining_date: NaiveDate::from_ymd_opt(2022, 6, 15).unwrap(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_generates_distinct_record_ids() {
        let store = MemoryStore::default();
        let first = store.insert(new_employee("E1", "Eng", 10, &[])).await.unwrap();
        let second = store.insert(new_employee("E2", "Eng", 10, &[])).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.find_one("E1").await.unwrap().unwrap().record_id, first);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_insert_duplicate_rejected() {
        let store = MemoryStore::default();
        store.insert(new_employee("E1", "Eng", 10, &[])).await.unwrap();

        let result = store.insert(new_employee("E1", "Sales", 20, &[])).await;
        assert!(matches!(result, Err(StoreError::Duplicate(id)) if id == "E1"));
        assert_eq!(store.find_one("E1").await.unwrap().unwrap().department, "Eng");
    }

    #[tokio::test]
    async fn test_update_fields_missing_returns_none() {
        let store = MemoryStore::default();
        let changes = UpdateEmployee {
            salary: Some(1),
            ..Default::default()
        };
        assert!(store.update_fields("nope", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_counts() {
        let store = MemoryStore::default();
        store.insert(new_employee("E1", "Eng", 10, &[])).await.unwrap();

        assert_eq!(store.delete("E1").await.unwrap(), 1);
        assert_eq!(store.delete("E1").await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_salary_by_department_groups() {
        let store = MemoryStore::default();
        store.insert(new_employee("E1", "Eng", 100, &[])).await.unwrap();
        store.insert(new_employee("E2", "Eng", 200, &[])).await.unwrap();
        store.insert(new_employee("E3", "Sales", 50, &[])).await.unwrap();

        let rows = store.salary_by_department().await.unwrap();
        assert_eq!(
            rows,
            vec![
                DepartmentSalaryRow {
                    department: Some("Eng".to_string()),
                    avg_salary: Some(150.0),
                    employee_count: 2,
                },
                DepartmentSalaryRow {
                    department: Some("Sales".to_string()),
                    avg_salary: Some(50.0),
                    employee_count: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_distinct_skills_sorted() {
        let store = MemoryStore::default();
        store.insert(new_employee("E1", "Eng", 1, &["Rust", "Go"])).await.unwrap();
        store.insert(new_employee("E2", "Eng", 1, &["Go", "AI"])).await.unwrap();

        assert_eq!(store.distinct_skills().await.unwrap(), ["AI", "Go", "Rust"]);
    }

    #[tokio::test]
    async fn test_collection_names() {
        let store = MemoryStore::new("staff");
        assert_eq!(store.collection_names().await.unwrap(), ["staff"]);
    }
}
