//! Plan types for reservation operations.
//!
//! Plans describe what a validated operation will do, without doing it.
//! The planning phase runs every check that can run against a snapshot;
//! the executor applies the actions and repeats the admission checks
//! under the store's write lock.

use crate::catalog::TableId;
use crate::reservation::{BookReservation, ReservationId, TableReservation};

/// A single action to be taken during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Commit a candidate book reservation.
    CreateBookReservation(BookReservation),

    /// Commit a candidate table reservation.
    CreateTableReservation(TableReservation),

    /// Remove a book reservation by id.
    CancelBookReservation(ReservationId),

    /// Remove a table reservation by id.
    CancelTableReservation(ReservationId),

    /// Remove a book from the catalog.
    DeleteBook(String),

    /// Remove a table from the catalog.
    DeleteTable(TableId),
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateBookReservation(r) => format!("Reserve {r}"),
            Self::CreateTableReservation(r) => format!("Reserve {r}"),
            Self::CancelBookReservation(id) => {
                format!("Cancel book reservation {id}")
            }
            Self::CancelTableReservation(id) => {
                format!("Cancel table reservation {id}")
            }
            Self::DeleteBook(title) => format!("Delete book '{title}' from the catalog"),
            Self::DeleteTable(id) => format!("Delete table {id} from the catalog"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
///
/// Plans are generated during the planning phase and can be inspected,
/// logged, or executed. They include a description, a sequence of actions,
/// and any warnings that should be communicated to the user.
#[derive(Debug, Clone)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use resa::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Reserve book 'Dune'");
    /// assert_eq!(plan.description, "Reserve book 'Dune'");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use resa::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Test").add_warning("nothing to do");
    /// assert_eq!(plan.warnings.len(), 1);
    /// ```
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::parse_date;

    fn candidate() -> BookReservation {
        BookReservation::new("u100", "Dune", parse_date("2024-06-10").unwrap()).unwrap()
    }

    #[test]
    fn test_plan_action_descriptions() {
        let create = PlanAction::CreateBookReservation(candidate());
        assert!(create.description().contains("Dune"));
        assert!(create.description().contains("2024-06-10"));

        let cancel = PlanAction::CancelTableReservation(ReservationId::new(7));
        assert!(cancel.description().contains('7'));

        let delete = PlanAction::DeleteTable(TableId::from(3));
        assert!(delete.description().contains("table 3"));
    }

    #[test]
    fn test_operation_plan_new() {
        let plan = OperationPlan::new("Test operation");
        assert_eq!(plan.description, "Test operation");
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_operation_plan_builder_pattern() {
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::CreateBookReservation(candidate()))
            .add_warning("Warning 1")
            .add_action(PlanAction::DeleteBook("Dune".to_string()))
            .add_warning("Warning 2");

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.warnings.len(), 2);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_actions_preserve_order() {
        let plan = OperationPlan::new("Test")
            .add_action(PlanAction::DeleteBook("Dune".to_string()))
            .add_action(PlanAction::CreateBookReservation(candidate()));

        assert!(matches!(plan.actions[0], PlanAction::DeleteBook(_)));
        assert!(matches!(plan.actions[1], PlanAction::CreateBookReservation(_)));
    }
}
