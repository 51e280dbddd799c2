//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wagebook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use wagebook_core::db::open_store_in_memory;
use wagebook_core::{EmployeeDraft, EmployeeRepository, SqliteEmployeeRepository};

fn main() {
    println!("wagebook_core ping={}", wagebook_core::ping());
    println!("wagebook_core version={}", wagebook_core::core_version());

    // In-memory store round-trip to prove the persistence path links.
    match smoke_store() {
        Ok(tax) => println!("wagebook_core store=ok sample_tax={tax:.2}"),
        Err(err) => {
            eprintln!("wagebook_core store=error {err}");
            std::process::exit(1);
        }
    }
}

fn smoke_store() -> Result<f64, Box<dyn std::error::Error>> {
    let conn = open_store_in_memory()?;
    let repo = SqliteEmployeeRepository::try_new(&conn)?;
    let id = repo.create_employee(&EmployeeDraft::new("probe", 8000.0))?;
    let record = repo
        .get_employee(id)?
        .ok_or("created record missing on read-back")?;
    Ok(record.tax)
}
