//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for employee records.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must validate drafts before persistence and must
//!   derive `tax` through the active policy.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors; nothing throws across the store boundary.

pub mod employee_repo;
