use wagebook_core::db::migrations::latest_version;
use wagebook_core::db::open_store_in_memory;
use wagebook_core::{
    round_to_cents, EmployeeDraft, EmployeeFilter, EmployeeRepository, FlatTaxPolicy,
    ProgressiveTaxPolicy, RepoError, SqliteEmployeeRepository, TaxPolicy,
};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip_derives_tax() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&EmployeeDraft::new("Alice", 8000.0))
        .unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Alice");
    assert_eq!(loaded.salary, 8000.0);
    assert_eq!(
        loaded.tax,
        round_to_cents(ProgressiveTaxPolicy.assess(8000.0))
    );
}

#[test]
fn ids_are_assigned_monotonically() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .create_employee(&EmployeeDraft::new("Alice", 5000.0))
        .unwrap();
    let second = repo
        .create_employee(&EmployeeDraft::new("Bob", 7000.0))
        .unwrap();

    assert!(second > first);
}

#[test]
fn deleted_ids_are_never_reassigned() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let first = repo
        .create_employee(&EmployeeDraft::new("Alice", 5000.0))
        .unwrap();
    repo.delete_employee(first).unwrap();

    let second = repo
        .create_employee(&EmployeeDraft::new("Bob", 7000.0))
        .unwrap();
    assert!(second > first, "retired id {first} was handed out again");
}

#[test]
fn update_replaces_whole_record_and_recomputes_tax() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&EmployeeDraft::new("Bob", 7000.0))
        .unwrap();
    let before = repo.get_employee(id).unwrap().unwrap();

    repo.update_employee(id, &EmployeeDraft::new("Bob", 8000.0))
        .unwrap();

    let after = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(after.salary, 8000.0);
    assert_eq!(
        after.tax,
        round_to_cents(ProgressiveTaxPolicy.assess(8000.0))
    );
    assert_ne!(after.tax, before.tax, "tax must track the salary change");
}

#[test]
fn update_leaves_other_records_untouched() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let alice = repo
        .create_employee(&EmployeeDraft::new("Alice", 5000.0))
        .unwrap();
    let bob = repo
        .create_employee(&EmployeeDraft::new("Bob", 7000.0))
        .unwrap();

    repo.update_employee(bob, &EmployeeDraft::new("Bob", 9000.0))
        .unwrap();

    let untouched = repo.get_employee(alice).unwrap().unwrap();
    assert_eq!(untouched.name, "Alice");
    assert_eq!(untouched.salary, 5000.0);
}

#[test]
fn update_missing_id_returns_not_found() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo
        .update_employee(999, &EmployeeDraft::new("Ghost", 1000.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));
}

#[test]
fn delete_removes_record_and_second_delete_fails() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&EmployeeDraft::new("Alice", 5000.0))
        .unwrap();

    repo.delete_employee(id).unwrap();
    assert!(repo.get_employee(id).unwrap().is_none());

    let err = repo.delete_employee(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(deleted) if deleted == id));

    let err = repo
        .update_employee(id, &EmployeeDraft::new("Alice", 6000.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(deleted) if deleted == id));
}

#[test]
fn validation_failure_blocks_create_without_side_effects() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let err = repo
        .create_employee(&EmployeeDraft::new("", 5000.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = repo
        .create_employee(&EmployeeDraft::new("Alice", -5000.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert!(repo
        .query_employees(&EmployeeFilter::all())
        .unwrap()
        .is_empty());
}

#[test]
fn validation_failure_blocks_update_without_side_effects() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();

    let id = repo
        .create_employee(&EmployeeDraft::new("Alice", 5000.0))
        .unwrap();

    let err = repo
        .update_employee(id, &EmployeeDraft::new("   ", 6000.0))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let unchanged = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(unchanged.name, "Alice");
    assert_eq!(unchanged.salary, 5000.0);
}

#[test]
fn tax_follows_the_injected_policy() {
    let conn = open_store_in_memory().unwrap();
    let repo =
        SqliteEmployeeRepository::try_with_policy(&conn, FlatTaxPolicy { rate: 0.1 }).unwrap();

    let id = repo
        .create_employee(&EmployeeDraft::new("Alice", 5000.0))
        .unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded.tax, 500.0);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_employees_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("employees"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            salary REAL NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEmployeeRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "employees",
            column: "tax"
        })
    ));
}

#[test]
fn invalid_persisted_rows_are_rejected_on_read() {
    let conn = open_store_in_memory().unwrap();
    conn.execute(
        "INSERT INTO employees (name, salary, tax) VALUES ('', 5000.0, 90.0);",
        [],
    )
    .unwrap();

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let err = repo.query_employees(&EmployeeFilter::all()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
