//! PostgreSQL employee collection.
//!
//! One row per employee in a table named after the configured collection.
//! `record_id` is a UUID generated by the database; `employee_id` carries a
//! unique constraint so concurrent creates cannot both succeed.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::prelude::Uuid;
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement, SimpleExpr};
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, DeriveIden, FromQueryResult, SqlErr, Statement,
};
use tracing::{debug, info};

use super::{EmployeeFilter, EmployeeStore, StoreError, StoreResult};
use crate::models::{CreateEmployee, DepartmentSalaryRow, Employee, UpdateEmployee};

const BACKEND: DatabaseBackend = DatabaseBackend::Postgres;

#[derive(DeriveIden, Clone, Copy)]
enum Column {
    RecordId,
    EmployeeId,
    Name,
    Department,
    Salary,
    JoiningDate,
    Skills,
}

const ALL_COLUMNS: [Column; 7] = [
    Column::RecordId,
    Column::EmployeeId,
    Column::Name,
    Column::Department,
    Column::Salary,
    Column::JoiningDate,
    Column::Skills,
];

/// Row shape of the employee table.
#[derive(Debug, FromQueryResult)]
struct EmployeeRow {
    record_id: Uuid,
    employee_id: String,
    name: String,
    department: String,
    salary: i64,
    joining_date: NaiveDate,
    skills: Vec<String>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            record_id: row.record_id.to_string(),
            employee_id: row.employee_id,
            name: row.name,
            department: row.department,
            salary: row.salary,
            joining_date: row.joining_date,
            skills: row.skills,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct SalaryGroupRow {
    department: Option<String>,
    avg_salary: Option<f64>,
    employee_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct SkillRow {
    skill: String,
}

#[derive(Debug, FromQueryResult)]
struct CollectionRow {
    name: String,
}

/// Employee collection stored in a PostgreSQL table.
#[derive(Clone)]
pub struct PgEmployeeStore {
    db: DatabaseConnection,
    table: String,
}

impl PgEmployeeStore {
    /// Wrap a connection. `table` must be a plain SQL identifier.
    pub fn new(db: DatabaseConnection, table: impl Into<String>) -> StoreResult<Self> {
        let table = table.into();
        if !is_valid_identifier(&table) {
            return Err(StoreError::Backend(format!("Invalid collection name: {table:?}")));
        }
        Ok(Self { db, table })
    }

    /// Create the table and its indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        let table = &self.table;
        let ddl = format!(
            r#"CREATE TABLE IF NOT EXISTS "{table}" (
                record_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                employee_id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                department TEXT NOT NULL,
                salary BIGINT NOT NULL,
                joining_date DATE NOT NULL,
                skills TEXT[] NOT NULL DEFAULT '{{}}'
            );
            CREATE INDEX IF NOT EXISTS "{table}_department_idx" ON "{table}" (department);
            CREATE INDEX IF NOT EXISTS "{table}_joining_date_idx" ON "{table}" (joining_date DESC);"#
        );
        self.db.execute_unprepared(&ddl).await?;
        info!("Collection '{table}' ready");
        Ok(())
    }

    /// Count records in the collection.
    pub async fn count(&self) -> StoreResult<i64> {
        let sql = format!(r#"SELECT COUNT(*) AS total FROM "{}""#, self.table);
        let row = self
            .db
            .query_one(Statement::from_string(BACKEND, sql))
            .await?;

        match row {
            Some(row) => Ok(row.try_get("", "total")?),
            None => Ok(0),
        }
    }

    fn table_ref(&self) -> Alias {
        Alias::new(self.table.as_str())
    }

    fn select_all(&self) -> SelectStatement {
        Query::select().columns(ALL_COLUMNS).from(self.table_ref()).to_owned()
    }

    fn insert_statement(&self, record: CreateEmployee) -> StoreResult<Statement> {
        let values: [SimpleExpr; 6] = [
            record.employee_id.into(),
            record.name.into(),
            record.department.into(),
            record.salary.into(),
            record.joining_date.into(),
            record.skills.into(),
        ];

        let mut insert = Query::insert();
        insert.into_table(self.table_ref()).columns([
            Column::EmployeeId,
            Column::Name,
            Column::Department,
            Column::Salary,
            Column::JoiningDate,
            Column::Skills,
        ]);
        insert
            .values(values)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        insert.returning_col(Column::RecordId);

        Ok(BACKEND.build(&insert))
    }

    fn find_one_statement(&self, employee_id: &str) -> Statement {
        let query = self
            .select_all()
            .and_where(Expr::col(Column::EmployeeId).eq(employee_id))
            .to_owned();
        BACKEND.build(&query)
    }

    fn find_many_statement(&self, filter: &EmployeeFilter) -> Statement {
        let mut query = self.select_all();

        if let Some(department) = &filter.department {
            query.and_where(Expr::col(Column::Department).eq(department.as_str()));
        }
        if let Some(skill) = &filter.skill {
            // `$1` is local to this fragment; the builder renumbers it.
            query.and_where(Expr::cust_with_values(
                r#"EXISTS (SELECT 1 FROM unnest("skills") AS skill WHERE skill ILIKE $1)"#,
                [format!("%{}%", escape_like(skill))],
            ));
        }
        query
            .order_by(Column::JoiningDate, Order::Desc)
            .order_by(Column::EmployeeId, Order::Asc);

        BACKEND.build(&query)
    }

    /// `None` when `changes` carries no fields.
    fn update_statement(&self, employee_id: &str, changes: &UpdateEmployee) -> Option<Statement> {
        let mut values: Vec<(Column, SimpleExpr)> = Vec::new();
        if let Some(name) = &changes.name {
            values.push((Column::Name, name.clone().into()));
        }
        if let Some(department) = &changes.department {
            values.push((Column::Department, department.clone().into()));
        }
        if let Some(salary) = changes.salary {
            values.push((Column::Salary, salary.into()));
        }
        if let Some(joining_date) = changes.joining_date {
            values.push((Column::JoiningDate, joining_date.into()));
        }
        if let Some(skills) = &changes.skills {
            values.push((Column::Skills, skills.clone().into()));
        }

        if values.is_empty() {
            return None;
        }

        let query = Query::update()
            .table(self.table_ref())
            .values(values)
            .and_where(Expr::col(Column::EmployeeId).eq(employee_id))
            .returning(Query::returning().columns(ALL_COLUMNS))
            .to_owned();
        Some(BACKEND.build(&query))
    }

    fn delete_statement(&self, employee_id: &str) -> Statement {
        let query = Query::delete()
            .from_table(self.table_ref())
            .and_where(Expr::col(Column::EmployeeId).eq(employee_id))
            .to_owned();
        BACKEND.build(&query)
    }

    fn salary_statement(&self) -> Statement {
        let query = Query::select()
            .column(Column::Department)
            .expr_as(
                Expr::cust(r#"CAST(AVG("salary") AS DOUBLE PRECISION)"#),
                Alias::new("avg_salary"),
            )
            .expr_as(Expr::cust("COUNT(*)"), Alias::new("employee_count"))
            .from(self.table_ref())
            .group_by_col(Column::Department)
            .order_by(Column::Department, Order::Asc)
            .to_owned();
        BACKEND.build(&query)
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn insert(&self, record: CreateEmployee) -> StoreResult<String> {
        let employee_id = record.employee_id.clone();
        let statement = self.insert_statement(record)?;

        let row = self
            .db
            .query_one(statement)
            .await
            .map_err(|e| duplicate_or(e, &employee_id))?
            .ok_or_else(|| StoreError::Backend("Insert returned no record id".to_string()))?;

        let record_id: Uuid = row.try_get("", "record_id")?;
        debug!("Inserted employee {employee_id} as {record_id}");
        Ok(record_id.to_string())
    }

    async fn find_one(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let row = EmployeeRow::find_by_statement(self.find_one_statement(employee_id))
            .one(&self.db)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_many(&self, filter: &EmployeeFilter) -> StoreResult<Vec<Employee>> {
        let rows = EmployeeRow::find_by_statement(self.find_many_statement(filter))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn update_fields(&self, employee_id: &str, changes: &UpdateEmployee) -> StoreResult<Option<Employee>> {
        let Some(statement) = self.update_statement(employee_id, changes) else {
            return self.find_one(employee_id).await;
        };

        let row = EmployeeRow::find_by_statement(statement)
            .one(&self.db)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn delete(&self, employee_id: &str) -> StoreResult<u64> {
        let result = self.db.execute(self.delete_statement(employee_id)).await?;
        Ok(result.rows_affected())
    }

    async fn salary_by_department(&self) -> StoreResult<Vec<DepartmentSalaryRow>> {
        let rows = SalaryGroupRow::find_by_statement(self.salary_statement())
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| DepartmentSalaryRow {
                department: row.department,
                avg_salary: row.avg_salary,
                employee_count: row.employee_count,
            })
            .collect())
    }

    async fn distinct_skills(&self) -> StoreResult<Vec<String>> {
        let sql = format!(
            r#"SELECT DISTINCT unnest("skills") AS skill FROM "{}" ORDER BY skill"#,
            self.table
        );
        let rows = SkillRow::find_by_statement(Statement::from_string(BACKEND, sql))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|r| r.skill).collect())
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        let sql = "SELECT tablename::text AS name FROM pg_catalog.pg_tables \
                   WHERE schemaname = current_schema() ORDER BY tablename";
        let rows = CollectionRow::find_by_statement(Statement::from_string(BACKEND, sql))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}

/// Map a unique violation on insert to [`StoreError::Duplicate`].
fn duplicate_or(err: DbErr, employee_id: &str) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Duplicate(employee_id.to_string()),
        _ => StoreError::Database(err),
    }
}

/// Escape `LIKE` metacharacters so the input matches literally.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Check that a collection name is a plain, unquoted SQL identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
