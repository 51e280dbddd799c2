//! Selection-scoped editing over the employee roster.
//!
//! # Responsibility
//! - Keep an editable "current record" consistent with the displayed
//!   collection fetched by the last query.
//! - Route every mutation through the repository, then re-query instead of
//!   patching the display collection in place.
//!
//! # Invariants
//! - Only ids present in the display collection are selectable.
//! - The selection is cleared the moment its record disappears from the
//!   store or from a refreshed collection; it is never silently reused.
//! - Mutating operations require an active selection except `commit_add`.

use crate::model::employee::{EmployeeDraft, EmployeeId, EmployeeRecord, EmployeeValidationError};
use crate::repo::employee_repo::{EmployeeFilter, EmployeeRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display-collection row consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub salary: f64,
}

impl From<&EmployeeRecord> for EmployeeSummary {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            salary: record.salary,
        }
    }
}

/// Typed failure surfaced to the presentation layer.
///
/// Everything here is retryable from the caller's point of view; the fatal
/// storage-unavailable class is raised earlier, while opening the store.
#[derive(Debug)]
pub enum SelectionError {
    /// Mutating operation requires an active selection that is absent.
    NoSelection,
    /// Referenced id does not exist (in the store or in the collection).
    NotFound(EmployeeId),
    /// Draft input failed field validation.
    Validation(EmployeeValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSelection => write!(f, "no employee is selected"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SelectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SelectionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Mediates between the displayed collection and the single record bound to
/// editable fields.
///
/// Owns `current` explicitly instead of smuggling the selected id through
/// widget properties; the presentation layer only ever sees summaries and
/// full records.
pub struct SelectionController<R: EmployeeRepository> {
    repo: R,
    displayed: Vec<EmployeeSummary>,
    current: Option<EmployeeId>,
    active_filter: EmployeeFilter,
}

impl<R: EmployeeRepository> SelectionController<R> {
    /// Creates a controller with an empty display collection and no
    /// selection. Call [`refresh`](Self::refresh) to populate it.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            displayed: Vec::new(),
            current: None,
            active_filter: EmployeeFilter::all(),
        }
    }

    /// Currently selected id, if any.
    pub fn selection(&self) -> Option<EmployeeId> {
        self.current
    }

    /// Last-fetched display collection.
    pub fn displayed(&self) -> &[EmployeeSummary] {
        &self.displayed
    }

    /// Filter used by the last refresh; re-applied after every commit.
    pub fn active_filter(&self) -> &EmployeeFilter {
        &self.active_filter
    }

    /// Re-runs the query and replaces the display collection.
    ///
    /// Clears the selection when the selected id no longer appears in the
    /// new collection.
    pub fn refresh(&mut self, filter: EmployeeFilter) -> Result<&[EmployeeSummary], SelectionError> {
        let records = self.repo.query_employees(&filter)?;
        self.displayed = records.iter().map(EmployeeSummary::from).collect();
        self.active_filter = filter;

        if let Some(id) = self.current {
            if !self.displayed.iter().any(|summary| summary.id == id) {
                self.current = None;
            }
        }

        Ok(&self.displayed)
    }

    /// Selects one displayed record and fetches it in full for editing.
    ///
    /// Ids outside the display collection fail with `NotFound` and leave
    /// the previous selection unchanged.
    pub fn select(&mut self, id: EmployeeId) -> Result<EmployeeRecord, SelectionError> {
        if !self.displayed.iter().any(|summary| summary.id == id) {
            return Err(SelectionError::NotFound(id));
        }

        let record = self
            .repo
            .get_employee(id)?
            .ok_or(SelectionError::NotFound(id))?;
        self.current = Some(id);
        Ok(record)
    }

    /// Creates a record, then re-runs the active filter.
    ///
    /// The new record is not auto-selected; it becomes visible only if it
    /// matches the active filter.
    pub fn commit_add(&mut self, draft: &EmployeeDraft) -> Result<EmployeeId, SelectionError> {
        let id = self.repo.create_employee(draft)?;
        self.refresh(self.active_filter.clone())?;
        Ok(id)
    }

    /// Replaces the selected record's name/salary (tax re-derived), then
    /// re-runs the active filter.
    pub fn commit_update(&mut self, draft: &EmployeeDraft) -> Result<(), SelectionError> {
        let id = self.current.ok_or(SelectionError::NoSelection)?;
        if let Err(err) = self.repo.update_employee(id, draft) {
            // A missing row means the selection went stale; drop it.
            if matches!(err, RepoError::NotFound(_)) {
                self.current = None;
            }
            return Err(err.into());
        }
        self.refresh(self.active_filter.clone())?;
        Ok(())
    }

    /// Deletes the selected record, clears the selection, then re-runs the
    /// active filter.
    pub fn commit_delete(&mut self) -> Result<(), SelectionError> {
        let id = self.current.ok_or(SelectionError::NoSelection)?;
        let result = self.repo.delete_employee(id);
        // The selection never outlives its record, even on a failed delete
        // of an already-missing row.
        if matches!(result, Ok(()) | Err(RepoError::NotFound(_))) {
            self.current = None;
        }
        result?;
        self.refresh(self.active_filter.clone())?;
        Ok(())
    }
}
