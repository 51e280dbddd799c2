//! Employee record model and write-side validation.
//!
//! # Responsibility
//! - Define the persisted employee record shape.
//! - Define the draft shape accepted by create/update operations.
//!
//! # Invariants
//! - `id` is assigned by the store, is unique, and is never reused.
//! - `name` is non-empty after trimming.
//! - `salary` is finite and non-negative.
//! - `tax` always equals the active policy's assessment of `salary` at the
//!   time of last write; drafts carry no tax field at all.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for one employee record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Canonical persisted record: one employee's name/salary/tax tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Store-assigned row id, monotonic and never reused after delete.
    pub id: EmployeeId,
    pub name: String,
    pub salary: f64,
    /// Derived from `salary` by the active tax policy, rounded to cents.
    pub tax: f64,
}

impl EmployeeRecord {
    /// Checks invariants on a record read back from storage.
    ///
    /// Read paths must reject invalid persisted state instead of masking it.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        check_name(&self.name)?;
        check_salary(self.salary)?;
        if !self.tax.is_finite() || self.tax < 0.0 {
            return Err(EmployeeValidationError::InvalidTax(self.tax));
        }
        Ok(())
    }
}

/// Write-side input for create/update operations.
///
/// The draft deliberately has no `tax` field: tax is recomputed from
/// `salary` on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub salary: f64,
}

impl EmployeeDraft {
    pub fn new(name: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            salary,
        }
    }

    /// Validates draft fields before any SQL mutation.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        check_name(&self.name)?;
        check_salary(self.salary)
    }
}

/// Field-level validation failure for employee input.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Salary is negative or not a finite number.
    InvalidSalary(f64),
    /// Persisted tax value is out of range (read-back check only).
    InvalidTax(f64),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "employee name must not be empty"),
            Self::InvalidSalary(value) => {
                write!(f, "salary must be a non-negative finite amount, got {value}")
            }
            Self::InvalidTax(value) => {
                write!(f, "stored tax must be a non-negative finite amount, got {value}")
            }
        }
    }
}

impl Error for EmployeeValidationError {}

fn check_name(name: &str) -> Result<(), EmployeeValidationError> {
    if name.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyName);
    }
    Ok(())
}

fn check_salary(salary: f64) -> Result<(), EmployeeValidationError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(EmployeeValidationError::InvalidSalary(salary));
    }
    Ok(())
}
