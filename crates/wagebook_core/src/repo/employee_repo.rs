//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `employees` table.
//! - Answer filter-conjunction queries (by id, by name, both, or neither)
//!   through one SQL builder instead of per-call-site string assembly.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the draft and re-derive `tax` from `salary`; a
//!   tax value is never accepted as input.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Each mutation is a single SQL statement, so a failed write leaves the
//!   store unchanged.

use crate::db::StoreError;
use crate::model::employee::{EmployeeDraft, EmployeeId, EmployeeRecord, EmployeeValidationError};
use crate::tax::{round_to_cents, ProgressiveTaxPolicy, TaxPolicy};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, salary, tax FROM employees";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "salary", "tax"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Store(StoreError),
    NotFound(EmployeeId),
    InvalidData(String),
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted employee data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; \
                 open the store through db::open_store"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(StoreError::Sqlite(value))
    }
}

/// Conjunctive query filter: present fields are ANDed together.
///
/// Both absent returns the whole table in stable insertion order. Name
/// matching is exact, not substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub id: Option<EmployeeId>,
    pub name: Option<String>,
}

impl EmployeeFilter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: EmployeeId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Repository interface for employee CRUD and query operations.
pub trait EmployeeRepository {
    /// Creates one record from a draft and returns the store-assigned id.
    fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId>;
    /// Replaces name/salary/tax of an existing record atomically.
    fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<()>;
    /// Removes the record; the id is retired and never reassigned.
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
    /// Gets one record by id.
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<EmployeeRecord>>;
    /// Returns records matching the filter conjunction, ordered by id.
    fn query_employees(&self, filter: &EmployeeFilter) -> RepoResult<Vec<EmployeeRecord>>;
}

/// SQLite-backed employee repository with a pluggable tax policy.
pub struct SqliteEmployeeRepository<'conn, P: TaxPolicy = ProgressiveTaxPolicy> {
    conn: &'conn Connection,
    policy: P,
}

impl<'conn> SqliteEmployeeRepository<'conn, ProgressiveTaxPolicy> {
    /// Constructs a repository with the default progressive tax policy.
    ///
    /// Rejects connections that were not opened through `db::open_store`,
    /// so later operations cannot fail on a half-prepared schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::try_with_policy(conn, ProgressiveTaxPolicy)
    }
}

impl<'conn, P: TaxPolicy> SqliteEmployeeRepository<'conn, P> {
    /// Constructs a repository with an explicit tax policy.
    pub fn try_with_policy(conn: &'conn Connection, policy: P) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn, policy })
    }

    fn derive_tax(&self, salary: f64) -> f64 {
        round_to_cents(self.policy.assess(salary))
    }
}

impl<P: TaxPolicy> EmployeeRepository for SqliteEmployeeRepository<'_, P> {
    fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId> {
        draft.validate()?;
        let tax = self.derive_tax(draft.salary);

        self.conn.execute(
            "INSERT INTO employees (name, salary, tax) VALUES (?1, ?2, ?3);",
            params![draft.name.as_str(), draft.salary, tax],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("event=employee_create module=repo status=ok id={id}");
        Ok(id)
    }

    fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<()> {
        draft.validate()?;
        let tax = self.derive_tax(draft.salary);

        let changed = self.conn.execute(
            "UPDATE employees SET name = ?1, salary = ?2, tax = ?3 WHERE id = ?4;",
            params![draft.name.as_str(), draft.salary, tax, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=employee_update module=repo status=ok id={id}");
        Ok(())
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        info!("event=employee_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<EmployeeRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn query_employees(&self, filter: &EmployeeFilter) -> RepoResult<Vec<EmployeeRecord>> {
        let mut sql = format!("{EMPLOYEE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(id) = filter.id {
            sql.push_str(" AND id = ?");
            bind_values.push(Value::Integer(id));
        }

        if let Some(name) = &filter.name {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        sql.push_str(" ORDER BY id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_employee_row(row)?);
        }

        Ok(records)
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<EmployeeRecord> {
    let record = EmployeeRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        salary: row.get("salary")?,
        tax: row.get("tax")?,
    };
    record
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("employee id {}: {err}", record.id)))?;
    Ok(record)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected = crate::db::migrations::latest_version();
    let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual != expected {
        return Err(RepoError::UninitializedConnection {
            expected_version: expected,
            actual_version: actual,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'employees'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("employees"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('employees');")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }

    for column in REQUIRED_COLUMNS.iter().copied() {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "employees",
                column,
            });
        }
    }

    Ok(())
}
