//! HTTP client for the employee API.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::api::ErrorBody;
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::models::{
    CreateEmployee, DeleteConfirmation, Employee, InsertedId, SalaryReport, ServiceInfo, SkillSearch, UpdateEmployee,
};

/// Employee API client.
///
/// Each call maps a non-success response back to the [`AppError`] kind the
/// server reported, carrying the server's `detail` text.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` with a request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| AppError::config(format!("Invalid API URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!("Invalid API URL '{base_url}'")));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Service liveness and collection listing.
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        let response = self.client.get(self.endpoint(&[])?).send().await?;
        read_json(response).await
    }

    pub async fn create(&self, employee: &CreateEmployee) -> Result<InsertedId> {
        let response = self
            .client
            .post(self.endpoint(&["employees"])?)
            .json(employee)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn get(&self, employee_id: &str) -> Result<Employee> {
        let response = self
            .client
            .get(self.endpoint(&["employees", employee_id])?)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn update(&self, employee_id: &str, changes: &UpdateEmployee) -> Result<Employee> {
        let response = self
            .client
            .put(self.endpoint(&["employees", employee_id])?)
            .json(changes)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn delete(&self, employee_id: &str) -> Result<DeleteConfirmation> {
        let response = self
            .client
            .delete(self.endpoint(&["employees", employee_id])?)
            .send()
            .await?;
        read_json(response).await
    }

    /// List employees, newest first. An empty department lists everyone.
    pub async fn list(&self, department: Option<&str>) -> Result<Vec<Employee>> {
        let mut request = self.client.get(self.endpoint(&["employees"])?);
        if let Some(department) = department.filter(|d| !d.is_empty()) {
            request = request.query(&[("department", department)]);
        }
        read_json(request.send().await?).await
    }

    pub async fn average_salary(&self) -> Result<SalaryReport> {
        let response = self
            .client
            .get(self.endpoint(&["employees", "avg-salary"])?)
            .send()
            .await?;
        read_json(response).await
    }

    /// Search by skill, or list every distinct skill when `skill` is `None`.
    pub async fn search_skill(&self, skill: Option<&str>) -> Result<SkillSearch> {
        let mut request = self.client.get(self.endpoint(&["employees", "search"])?);
        if let Some(skill) = skill {
            request = request.query(&[("skill", skill)]);
        }
        read_json(request.send().await?).await
    }

    /// Build a URL under the base, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::config(format!("Invalid API URL '{}'", self.base_url)))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("Request failed");
    Err(error_from_body(status.as_u16(), &body, reason))
}

/// Map an error response to [`AppError`], preferring the server's `detail`.
fn error_from_body(status: u16, body: &str, reason: &str) -> AppError {
    let detail = match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => format!("{status} {reason}"),
    };
    AppError::from_status(status, detail)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::service::EmployeeService;
    use crate::store::MemoryStore;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["employees", "avg-salary"]).unwrap().as_str(),
            "http://localhost:8000/employees/avg-salary"
        );

        let api = client("http://localhost:8000/hr/");
        assert_eq!(
            api.endpoint(&["employees", "E1"]).unwrap().as_str(),
            "http://localhost:8000/hr/employees/E1"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let api = client("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["employees", "A/B 1"]).unwrap().as_str(),
            "http://localhost:8000/employees/A%2FB%201"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_error_from_body() {
        let err = error_from_body(404, r#"{"code":"NOT_FOUND","detail":"Employee not found"}"#, "Not Found");
        assert!(matches!(err, AppError::NotFound(ref d) if d == "Employee not found"));

        let err = error_from_body(409, r#"{"detail":"Employee ID already exists"}"#, "Conflict");
        assert!(matches!(err, AppError::Conflict(_)));

        let err = error_from_body(502, "upstream down", "Bad Gateway");
        assert!(matches!(err, AppError::Internal(ref d) if d == "upstream down"));

        let err = error_from_body(500, "", "Internal Server Error");
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_round_trip_against_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = crate::api::router(EmployeeService::new(Arc::new(MemoryStore::default())));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = client(&format!("http://{addr}"));
        let new_employee = CreateEmployee {
            employee_id: "E 7".to_string(),
            name: "Ada".to_string(),
            department: "Eng".to_string(),
            salary: 120,
            joining_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            skills: vec!["Rust".to_string()],
        };

        let inserted = api.create(&new_employee).await.unwrap();
        let fetched = api.get("E 7").await.unwrap();
        assert_eq!(fetched.record_id, inserted.inserted_id);

        let err = api.create(&new_employee).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref d) if d == "Employee ID already exists"));

        let changes = UpdateEmployee {
            salary: Some(130),
            ..Default::default()
        };
        assert_eq!(api.update("E 7", &changes).await.unwrap().salary, 130);

        assert_eq!(api.list(Some("Eng")).await.unwrap().len(), 1);
        assert!(api.list(Some("Sales")).await.unwrap().is_empty());
        assert_eq!(api.average_salary().await.unwrap().count, 1);
        assert_eq!(api.search_skill(Some("rust")).await.unwrap().count(), 1);
        assert!(matches!(
            api.search_skill(Some(" ")).await.unwrap_err(),
            AppError::InvalidRequest(_)
        ));
        assert_eq!(
            api.search_skill(None).await.unwrap(),
            SkillSearch::skills(vec!["Rust".to_string()])
        );

        let confirmation = api.delete("E 7").await.unwrap();
        assert_eq!(confirmation.message, "Employee E 7 deleted successfully.");
        assert!(matches!(api.get("E 7").await.unwrap_err(), AppError::NotFound(_)));
    }
}
