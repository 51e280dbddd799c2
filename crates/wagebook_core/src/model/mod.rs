//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record and the write-side input shape.
//! - Enforce field-level validation before anything reaches storage.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `EmployeeId`.
//! - `tax` is a derived value; no model type lets callers set it directly.

pub mod employee;
