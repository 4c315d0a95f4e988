//! Unit tests for the employee service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::EmployeeService;
use crate::error::AppError;
use crate::models::{
    CreateEmployee, DepartmentSalary, DepartmentSalaryRow, Employee, SkillSearch, UNASSIGNED_DEPARTMENT,
    UpdateEmployee,
};
use crate::store::{EmployeeFilter, EmployeeStore, MemoryStore, StoreError, StoreResult};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_employee(id: &str, department: &str, salary: i64) -> CreateEmployee {
    CreateEmployee {
        employee_id: id.to_string(),
        name: format!("Employee {id}"),
        department: department.to_string(),
        salary,
        joining_date: date(2022, 1, 10),
        skills: vec!["Rust".to_string(), "SQL".to_string()],
    }
}

fn service() -> (EmployeeService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (EmployeeService::new(store.clone()), store)
}

#[tokio::test]
async fn test_create_then_get() {
    let (service, _) = service();

    let inserted = service.create(new_employee("E001", "Eng", 100)).await.unwrap();
    let employee = service.get("E001").await.unwrap();

    assert_eq!(employee.record_id, inserted.inserted_id);
    assert_eq!(employee.name, "Employee E001");
    assert_eq!(employee.skills, ["Rust", "SQL"]);
}

#[tokio::test]
async fn test_create_duplicate_conflicts_and_keeps_original() {
    let (service, store) = service();
    service.create(new_employee("E001", "Eng", 100)).await.unwrap();

    let err = service.create(new_employee("E001", "Sales", 999)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let original = service.get("E001").await.unwrap();
    assert_eq!(original.department, "Eng");
    assert_eq!(original.salary, 100);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_blank_employee_id_rejected() {
    let (service, store) = service();

    let err = service.create(new_employee("   ", "Eng", 1)).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRequest(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let (service, _) = service();
    let err = service.get("ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Employee not found"));
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let (service, _) = service();
    let changes = UpdateEmployee {
        salary: Some(10),
        ..Default::default()
    };

    let err = service.update("ghost", changes).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_missing_with_empty_payload_is_not_found() {
    let (service, _) = service();
    let err = service.update("ghost", UpdateEmployee::default()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_update_empty_payload_rejected_and_store_unchanged() {
    let (service, _) = service();
    service.create(new_employee("E001", "Eng", 100)).await.unwrap();
    let before = service.get("E001").await.unwrap();

    let err = service.update("E001", UpdateEmployee::default()).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRequest(ref msg) if msg == "No fields provided for update"));
    assert_eq!(service.get("E001").await.unwrap(), before);
}

#[tokio::test]
async fn test_update_salary_only_leaves_other_fields() {
    let (service, _) = service();
    service.create(new_employee("E001", "Eng", 100)).await.unwrap();
    let before = service.get("E001").await.unwrap();

    let changes = UpdateEmployee {
        salary: Some(4200),
        ..Default::default()
    };
    let updated = service.update("E001", changes).await.unwrap();

    assert_eq!(updated.salary, 4200);
    assert_eq!(updated.name, before.name);
    assert_eq!(updated.department, before.department);
    assert_eq!(updated.skills, before.skills);
    assert_eq!(updated.joining_date, before.joining_date);
    assert_eq!(updated.record_id, before.record_id);
    assert_eq!(service.get("E001").await.unwrap(), updated);
}

#[tokio::test]
async fn test_delete_is_permanent() {
    let (service, _) = service();
    service.create(new_employee("E001", "Eng", 100)).await.unwrap();

    let confirmation = service.delete("E001").await.unwrap();
    assert_eq!(confirmation.message, "Employee E001 deleted successfully.");

    assert!(matches!(service.get("E001").await, Err(AppError::NotFound(_))));
    assert!(matches!(service.delete("E001").await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_filters_department_exactly_newest_first() {
    let (service, _) = service();

    let mut old = new_employee("E1", "Eng", 100);
    old.joining_date = date(2018, 4, 1);
    let mut recent = new_employee("E2", "Eng", 100);
    recent.joining_date = date(2024, 2, 1);
    let mut middle = new_employee("E3", "Eng", 100);
    middle.joining_date = date(2021, 7, 1);

    service.create(old).await.unwrap();
    service.create(recent).await.unwrap();
    service.create(middle).await.unwrap();
    service.create(new_employee("E4", "Engineering", 1)).await.unwrap();
    service.create(new_employee("E5", "eng", 1)).await.unwrap();

    let listed = service.list(Some("Eng")).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|e| e.employee_id.as_str()).collect();
    assert_eq!(ids, ["E2", "E3", "E1"]);
    assert!(listed.iter().all(|e| e.department == "Eng"));
}

#[tokio::test]
async fn test_list_without_filter_returns_all() {
    let (service, _) = service();
    service.create(new_employee("E1", "Eng", 1)).await.unwrap();
    service.create(new_employee("E2", "Sales", 1)).await.unwrap();

    assert_eq!(service.list(None).await.unwrap().len(), 2);
    assert_eq!(service.list(Some("")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_no_match_is_empty() {
    let (service, _) = service();
    service.create(new_employee("E1", "Eng", 1)).await.unwrap();

    assert!(service.list(Some("Legal")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_average_salary_by_department() {
    let (service, _) = service();
    service.create(new_employee("E1", "Eng", 100)).await.unwrap();
    service.create(new_employee("E2", "Eng", 200)).await.unwrap();
    service.create(new_employee("E3", "Sales", 50)).await.unwrap();

    let report = service.average_salary_by_department().await.unwrap();
    assert_eq!(report.count, 2);
    assert_eq!(
        report.departments,
        vec![
            DepartmentSalary {
                department: "Eng".to_string(),
                avg_salary: 150.0,
                employee_count: 2,
            },
            DepartmentSalary {
                department: "Sales".to_string(),
                avg_salary: 50.0,
                employee_count: 1,
            },
        ]
    );
}

#[tokio::test]
async fn test_average_salary_rounding_and_unassigned() {
    let (service, _) = service();
    service.create(new_employee("E1", "", 10)).await.unwrap();
    service.create(new_employee("E2", "Ops", 10)).await.unwrap();
    service.create(new_employee("E3", "Ops", 10)).await.unwrap();
    service.create(new_employee("E4", "Ops", 11)).await.unwrap();
    service.create(new_employee("E5", "Interns", 0)).await.unwrap();

    let report = service.average_salary_by_department().await.unwrap();
    let find = |name: &str| report.departments.iter().find(|d| d.department == name).unwrap();

    assert_eq!(find(UNASSIGNED_DEPARTMENT).employee_count, 1);
    assert_eq!(find("Ops").avg_salary, 10.33);
    assert_eq!(find("Interns").avg_salary, 0.0);
}

#[tokio::test]
async fn test_average_salary_empty_collection() {
    let (service, _) = service();
    let report = service.average_salary_by_department().await.unwrap();
    assert_eq!(report.count, 0);
    assert!(report.departments.is_empty());
}

#[tokio::test]
async fn test_search_by_skill_case_insensitive_substring() {
    let (service, _) = service();
    let mut pythonista = new_employee("E1", "Eng", 1);
    pythonista.skills = vec!["Python".to_string()];
    let mut scientist = new_employee("E2", "Data", 1);
    scientist.skills = vec!["PySpark".to_string(), "python-pandas".to_string()];
    service.create(pythonista).await.unwrap();
    service.create(scientist).await.unwrap();
    service.create(new_employee("E3", "Eng", 1)).await.unwrap();

    let SkillSearch::Employees { count, employees } = service.search_by_skill(Some("python")).await.unwrap() else {
        panic!("expected employees");
    };
    assert_eq!(count, 2);
    let mut ids: Vec<_> = employees.iter().map(|e| e.employee_id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, ["E1", "E2"]);
}

#[tokio::test]
async fn test_search_by_skill_trims_argument() {
    let (service, _) = service();
    service.create(new_employee("E1", "Eng", 1)).await.unwrap();

    let result = service.search_by_skill(Some("  rust ")).await.unwrap();
    assert_eq!(result.count(), 1);
}

#[tokio::test]
async fn test_search_by_skill_empty_rejected() {
    let (service, _) = service();
    for skill in ["", "   "] {
        let err = service.search_by_skill(Some(skill)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(ref msg) if msg == "Skill cannot be empty"));
    }
}

#[tokio::test]
async fn test_search_by_skill_no_match_is_not_found() {
    let (service, _) = service();
    service.create(new_employee("E1", "Eng", 1)).await.unwrap();

    let err = service.search_by_skill(Some("COBOL")).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "No employees found with skill 'COBOL'"));
}

#[tokio::test]
async fn test_search_without_skill_lists_distinct_skills() {
    let (service, _) = service();
    let mut first = new_employee("E1", "Eng", 1);
    first.skills = vec!["Rust".to_string(), "Go".to_string()];
    let mut second = new_employee("E2", "Eng", 1);
    second.skills = vec!["Go".to_string()];
    service.create(first).await.unwrap();
    service.create(second).await.unwrap();

    let result = service.search_by_skill(None).await.unwrap();
    assert_eq!(result, SkillSearch::skills(vec!["Go".to_string(), "Rust".to_string()]));
}

#[tokio::test]
async fn test_record_ids_are_plain_strings() {
    let (service, _) = service();
    let inserted = service.create(new_employee("E1", "Eng", 1)).await.unwrap();

    let listed = service.list(None).await.unwrap();
    let json = serde_json::to_value(&listed).unwrap();
    assert_eq!(json[0]["record_id"], serde_json::Value::String(inserted.inserted_id));
}

#[tokio::test]
async fn test_service_info_lists_collection() {
    let store = Arc::new(MemoryStore::new("staff"));
    let service = EmployeeService::new(store);
    let info = service.service_info().await.unwrap();
    assert_eq!(info.collections, ["staff"]);
}

/// Store whose records exist but refuse to delete or aggregate.
struct BrokenStore {
    inner: MemoryStore,
}

#[async_trait]
impl EmployeeStore for BrokenStore {
    async fn insert(&self, record: CreateEmployee) -> StoreResult<String> {
        self.inner.insert(record).await
    }

    async fn find_one(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        self.inner.find_one(employee_id).await
    }

    async fn find_many(&self, _filter: &EmployeeFilter) -> StoreResult<Vec<Employee>> {
        Err(StoreError::Backend("connection reset".to_string()))
    }

    async fn update_fields(&self, _employee_id: &str, _changes: &UpdateEmployee) -> StoreResult<Option<Employee>> {
        Ok(None)
    }

    async fn delete(&self, _employee_id: &str) -> StoreResult<u64> {
        Ok(0)
    }

    async fn salary_by_department(&self) -> StoreResult<Vec<DepartmentSalaryRow>> {
        Err(StoreError::Backend("pipeline exploded".to_string()))
    }

    async fn distinct_skills(&self) -> StoreResult<Vec<String>> {
        self.inner.distinct_skills().await
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        self.inner.collection_names().await
    }
}

fn broken_service() -> EmployeeService {
    EmployeeService::new(Arc::new(BrokenStore {
        inner: MemoryStore::default(),
    }))
}

#[tokio::test]
async fn test_delete_zero_affected_is_internal_error() {
    let service = broken_service();
    service.create(new_employee("E1", "Eng", 1)).await.unwrap();

    let err = service.delete("E1").await.unwrap_err();
    assert!(matches!(err, AppError::Internal(ref msg) if msg == "Failed to delete employee"));
}

#[tokio::test]
async fn test_update_vanished_record_is_not_found() {
    let service = broken_service();
    service.create(new_employee("E1", "Eng", 1)).await.unwrap();

    let changes = UpdateEmployee {
        name: Some("New".to_string()),
        ..Default::default()
    };
    assert!(matches!(service.update("E1", changes).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_aggregation_failure_embeds_cause() {
    let err = broken_service().average_salary_by_department().await.unwrap_err();
    assert!(matches!(err, AppError::Internal(ref msg) if msg == "Error calculating average salary: pipeline exploded"));
}

#[tokio::test]
async fn test_search_failure_embeds_cause() {
    let err = broken_service().search_by_skill(Some("rust")).await.unwrap_err();
    assert!(matches!(err, AppError::Internal(ref msg) if msg.contains("connection reset")));
}

/// Store that misses a concurrent writer on lookup and then loses the insert.
struct ContendedStore;

#[async_trait]
impl EmployeeStore for ContendedStore {
    async fn insert(&self, record: CreateEmployee) -> StoreResult<String> {
        Err(StoreError::Duplicate(record.employee_id))
    }

    async fn find_one(&self, _employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(None)
    }

    async fn find_many(&self, _filter: &EmployeeFilter) -> StoreResult<Vec<Employee>> {
        Ok(Vec::new())
    }

    async fn update_fields(&self, _employee_id: &str, _changes: &UpdateEmployee) -> StoreResult<Option<Employee>> {
        Ok(None)
    }

    async fn delete(&self, _employee_id: &str) -> StoreResult<u64> {
        Ok(0)
    }

    async fn salary_by_department(&self) -> StoreResult<Vec<DepartmentSalaryRow>> {
        Ok(Vec::new())
    }

    async fn distinct_skills(&self) -> StoreResult<Vec<String>> {
        // Collation order from a database, not byte order.
        Ok(["rust", "Python", "Go", "C++", "Go"].map(String::from).to_vec())
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_create_duplicate_detected_by_store_conflicts() {
    let service = EmployeeService::new(Arc::new(ContendedStore));

    let err = service.create(new_employee("E1", "Eng", 1)).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(ref msg) if msg == "Employee ID already exists"));
}

#[tokio::test]
async fn test_distinct_skills_sorted_regardless_of_store_order() {
    let service = EmployeeService::new(Arc::new(ContendedStore));

    let result = service.search_by_skill(None).await.unwrap();
    assert_eq!(
        result,
        SkillSearch::skills(["C++", "Go", "Python", "rust"].map(String::from).to_vec())
    );
}
