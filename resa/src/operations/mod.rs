//! Reservation operations: planning and execution.
//!
//! Every mutating operation follows the same two-phase shape. A planner
//! validates the request and produces an [`OperationPlan`] describing the
//! actions to take; the [`PlanExecutor`] applies them, re-running the
//! conflict admission checks under the store's write lock so that
//! check-and-commit is one atomic unit. Plans can also be executed in
//! dry-run mode to preview an operation.

pub mod admin;
pub mod cancel;
pub mod executor;
pub mod plan;
pub mod reserve;

pub use admin::AdminPlan;
pub use cancel::{CancelPlan, CancelRequest, ReservationKind};
pub use executor::{Commitment, ExecutionResult, PlanExecutor};
pub use plan::{OperationPlan, PlanAction};
pub use reserve::{ReserveBookRequest, ReservePlan, ReserveTableRequest};
