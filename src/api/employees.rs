//! Employee API handlers.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | /employees | create |
//! | GET | /employees?department= | list |
//! | GET | /employees/avg-salary | average salary per department |
//! | GET | /employees/search?skill= | skill search |
//! | GET | /employees/{employee_id} | get |
//! | PUT | /employees/{employee_id} | partial update |
//! | DELETE | /employees/{employee_id} | delete |

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::extract::{ApiJson, ApiQuery};
use crate::error::Result;
use crate::models::{
    CreateEmployee, DeleteConfirmation, Employee, InsertedId, SalaryReport, ServiceInfo, SkillSearch, UpdateEmployee,
};
use crate::service::EmployeeService;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub skill: Option<String>,
}

/// Employee routes.
pub fn routes() -> Router<EmployeeService> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/avg-salary", get(average_salary))
        .route("/employees/search", get(search))
        .route("/employees/{employee_id}", get(get_by_id).put(update).delete(delete))
}

/// Liveness check with the store's collection listing
pub async fn home(State(service): State<EmployeeService>) -> Result<Json<ServiceInfo>> {
    Ok(Json(service.service_info().await?))
}

/// Create a new employee
pub async fn create(
    State(service): State<EmployeeService>,
    ApiJson(payload): ApiJson<CreateEmployee>,
) -> Result<(StatusCode, Json<InsertedId>)> {
    let inserted = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(inserted)))
}

/// Get employee by employee id
pub async fn get_by_id(
    State(service): State<EmployeeService>,
    Path(employee_id): Path<String>,
) -> Result<Json<Employee>> {
    Ok(Json(service.get(&employee_id).await?))
}

/// Partially update an employee
pub async fn update(
    State(service): State<EmployeeService>,
    Path(employee_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateEmployee>,
) -> Result<Json<Employee>> {
    Ok(Json(service.update(&employee_id, payload).await?))
}

/// Delete an employee
pub async fn delete(
    State(service): State<EmployeeService>,
    Path(employee_id): Path<String>,
) -> Result<Json<DeleteConfirmation>> {
    Ok(Json(service.delete(&employee_id).await?))
}

/// List employees, optionally by department
pub async fn list(
    State(service): State<EmployeeService>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Employee>>> {
    Ok(Json(service.list(params.department.as_deref()).await?))
}

/// Average salary grouped by department
pub async fn average_salary(State(service): State<EmployeeService>) -> Result<Json<SalaryReport>> {
    Ok(Json(service.average_salary_by_department().await?))
}

/// Search employees by skill
pub async fn search(
    State(service): State<EmployeeService>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<SkillSearch>> {
    Ok(Json(service.search_by_skill(params.skill.as_deref()).await?))
}
