//! Core domain logic for WageBook.
//! This crate is the single source of truth for record and tax invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod tax;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{EmployeeDraft, EmployeeId, EmployeeRecord, EmployeeValidationError};
pub use repo::employee_repo::{
    EmployeeFilter, EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::input::{parse_id_filter, parse_name_filter, parse_salary, InputError};
pub use service::selection::{EmployeeSummary, SelectionController, SelectionError};
pub use tax::{round_to_cents, FlatTaxPolicy, ProgressiveTaxPolicy, TaxPolicy};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
