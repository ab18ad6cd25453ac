//! Plan execution.
//!
//! The executor applies a plan's actions to the catalog and store. For
//! create actions it re-runs the conflict check as the store's admission
//! closure, inside the same write-lock critical section as the append, so
//! a plan built against a stale snapshot can never smuggle a conflicting
//! record past the store.

use crate::catalog::Catalog;
use crate::conflict::{book_conflict, table_conflict};
use crate::error::{Error, Result};
use crate::reservation::{BookReservation, TableReservation, DATE_FORMAT};
use crate::store::ReservationStore;

use super::plan::{OperationPlan, PlanAction};

/// The record a successful reservation execution committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commitment {
    /// A committed book reservation.
    Book(BookReservation),
    /// A committed table reservation.
    Table(TableReservation),
}

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The reservation record committed by a create action, if any.
    pub commitment: Option<Commitment>,

    /// Whether a cancel or delete action actually removed something.
    pub removed: bool,
}

impl ExecutionResult {
    fn success(plan: &OperationPlan, commitment: Option<Commitment>, removed: bool) -> Self {
        Self {
            success: true,
            dry_run: false,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            commitment,
            removed,
        }
    }

    fn dry_run(plan: &OperationPlan) -> Self {
        Self {
            success: true,
            dry_run: true,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            commitment: None,
            removed: false,
        }
    }
}

/// Executes operation plans against the catalog and store.
///
/// The executor can run in normal mode (applying changes) or dry-run mode
/// (validating without changes).
///
/// # Examples
///
/// ```
/// use resa::{
///     Catalog, MemoryStorage, PlanExecutor, ReservationStore, ReservePlan,
///     ReserveBookRequest, AdminConfig, UserDirectory,
/// };
///
/// let catalog = Catalog::open(
///     Box::new(MemoryStorage::new()),
///     Box::new(MemoryStorage::new()),
/// )
/// .unwrap();
/// catalog.add_book("Dune", "Frank Herbert").unwrap();
/// let store = ReservationStore::open(
///     Box::new(MemoryStorage::new()),
///     Box::new(MemoryStorage::new()),
/// )
/// .unwrap();
/// let users = UserDirectory::open(Box::new(MemoryStorage::new()), AdminConfig::default()).unwrap();
/// users.register("u100", "secret").unwrap();
/// let session = users.authenticate("u100", "secret").unwrap();
///
/// let planner = ReservePlan::for_today(14);
/// let date = planner.today().format("%Y-%m-%d").to_string();
/// let plan = planner
///     .build_book_plan(&ReserveBookRequest::new(session, "Dune", date), &catalog, &store)
///     .unwrap();
///
/// // Dry-run execution validates without writing.
/// let result = PlanExecutor::new(&catalog, &store).dry_run().execute(&plan).unwrap();
/// assert!(result.dry_run);
/// assert!(store.book_snapshot().is_empty());
///
/// // Normal execution commits.
/// let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
/// assert!(result.success);
/// assert_eq!(store.book_snapshot().len(), 1);
/// ```
pub struct PlanExecutor<'a> {
    catalog: &'a Catalog,
    store: &'a ReservationStore,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(catalog: &'a Catalog, store: &'a ReservationStore) -> Self {
        Self {
            catalog,
            store,
            dry_run: false,
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode the executor reports what the plan would do but
    /// touches neither the catalog nor the store.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conflict`] when a create action loses the
    /// commit-time admission re-check, and any storage error from a
    /// failed save.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run {
            return Ok(ExecutionResult::dry_run(plan));
        }

        let mut commitment = None;
        let mut removed = false;
        for action in &plan.actions {
            match self.execute_action(action)? {
                ActionOutcome::Committed(record) => commitment = Some(record),
                ActionOutcome::Removed(hit) => removed |= hit,
            }
        }
        Ok(ExecutionResult::success(plan, commitment, removed))
    }

    fn execute_action(&self, action: &PlanAction) -> Result<ActionOutcome> {
        match action {
            PlanAction::CreateBookReservation(candidate) => {
                let committed = self.store.commit_book(candidate.clone(), |existing| {
                    book_conflict(existing, candidate.book_title(), candidate.date()).is_none()
                })?;
                let Some(record) = committed else {
                    // Another caller won the slot between planning and
                    // execution.
                    return Err(Error::Conflict {
                        details: format!(
                            "book '{}' was reserved for {} by a concurrent request",
                            candidate.book_title(),
                            candidate.date().format(DATE_FORMAT)
                        ),
                    });
                };
                log::info!("committed {record}");
                Ok(ActionOutcome::Committed(Commitment::Book(record)))
            }
            PlanAction::CreateTableReservation(candidate) => {
                let committed = self.store.commit_table(candidate.clone(), |existing| {
                    table_conflict(
                        existing,
                        candidate.table_id(),
                        candidate.date(),
                        candidate.start(),
                        candidate.end(),
                    )
                    .is_none()
                })?;
                let Some(record) = committed else {
                    return Err(Error::Conflict {
                        details: format!(
                            "table {} was reserved in an overlapping slot on {} by a concurrent request",
                            candidate.table_id(),
                            candidate.date().format(DATE_FORMAT)
                        ),
                    });
                };
                log::info!("committed {record}");
                Ok(ActionOutcome::Committed(Commitment::Table(record)))
            }
            PlanAction::CancelBookReservation(id) => {
                Ok(ActionOutcome::Removed(self.store.remove_book(*id)?))
            }
            PlanAction::CancelTableReservation(id) => {
                Ok(ActionOutcome::Removed(self.store.remove_table(*id)?))
            }
            PlanAction::DeleteBook(title) => {
                Ok(ActionOutcome::Removed(self.catalog.delete_book(title)?))
            }
            PlanAction::DeleteTable(id) => {
                Ok(ActionOutcome::Removed(self.catalog.delete_table(*id)?))
            }
        }
    }
}

enum ActionOutcome {
    Committed(Commitment),
    Removed(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TableId;
    use crate::reservation::{parse_date, parse_time, ReservationId};
    use crate::store::MemoryStorage;

    fn fixture() -> (Catalog, ReservationStore) {
        let catalog = Catalog::open(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryStorage::new()),
        )
        .unwrap();
        catalog.add_book("Dune", "Frank Herbert").unwrap();
        catalog.add_table(4).unwrap();

        let store = ReservationStore::open(
            Box::new(MemoryStorage::new()),
            Box::new(MemoryStorage::new()),
        )
        .unwrap();
        (catalog, store)
    }

    fn book_candidate(user: &str, date: &str) -> BookReservation {
        BookReservation::new(user, "Dune", parse_date(date).unwrap()).unwrap()
    }

    #[test]
    fn test_execute_create_book() {
        let (catalog, store) = fixture();
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateBookReservation(book_candidate(
                "u100",
                "2024-06-10",
            )));

        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.dry_run);
        assert!(matches!(result.commitment, Some(Commitment::Book(_))));
        assert_eq!(store.book_snapshot().len(), 1);
    }

    #[test]
    fn test_commit_time_recheck_rejects_stale_plan() {
        let (catalog, store) = fixture();
        // Plan built while the slot was free.
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateBookReservation(book_candidate(
                "u100",
                "2024-06-10",
            )));

        // Slot taken between planning and execution.
        store
            .commit_book(book_candidate("u200", "2024-06-10"), |_| true)
            .unwrap();

        let err = PlanExecutor::new(&catalog, &store)
            .execute(&plan)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.book_snapshot().len(), 1);
    }

    #[test]
    fn test_dry_run_does_not_modify_store() {
        let (catalog, store) = fixture();
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateBookReservation(book_candidate(
                "u100",
                "2024-06-10",
            )));

        let result = PlanExecutor::new(&catalog, &store)
            .dry_run()
            .execute(&plan)
            .unwrap();
        assert!(result.dry_run);
        assert!(result.success);
        assert_eq!(result.actions_taken.len(), 1);
        assert!(store.book_snapshot().is_empty());
    }

    #[test]
    fn test_execute_cancel_reports_removed() {
        let (catalog, store) = fixture();
        let committed = store
            .commit_book(book_candidate("u100", "2024-06-10"), |_| true)
            .unwrap()
            .unwrap();

        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CancelBookReservation(committed.id()));
        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert!(result.removed);
        assert!(store.book_snapshot().is_empty());
    }

    #[test]
    fn test_execute_cancel_absent_id_not_removed() {
        let (catalog, store) = fixture();
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CancelBookReservation(ReservationId::new(999)));

        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.removed);
    }

    #[test]
    fn test_execute_table_create_and_delete() {
        let (catalog, store) = fixture();
        let candidate = TableReservation::new(
            "u100",
            TableId::from(1),
            parse_date("2024-06-10").unwrap(),
            parse_time("10:00").unwrap(),
            parse_time("12:00").unwrap(),
        )
        .unwrap();

        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateTableReservation(candidate));
        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert!(matches!(result.commitment, Some(Commitment::Table(_))));

        let plan = OperationPlan::new("Test").add_action(PlanAction::DeleteTable(TableId::from(1)));
        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert!(result.removed);
        assert!(!catalog.table_exists(TableId::from(1)));
    }

    #[test]
    fn test_execute_delete_book() {
        let (catalog, store) = fixture();
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::DeleteBook("Dune".to_string()));

        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert!(result.removed);
        assert!(!catalog.book_exists("Dune"));
    }

    #[test]
    fn test_execution_result_carries_warnings() {
        let (catalog, store) = fixture();
        let plan = OperationPlan::new("Test")
            .add_warning("Warning 1")
            .add_warning("Warning 2");

        let result = PlanExecutor::new(&catalog, &store).execute(&plan).unwrap();
        assert_eq!(result.warnings.len(), 2);
        assert!(result.success);
        assert!(result.commitment.is_none());
    }
}
