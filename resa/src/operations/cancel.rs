//! Cancellation planning.
//!
//! Cancellation is addressed by the synthetic reservation id and gated by
//! ownership: a member session may only cancel its own records, while an
//! admin session may cancel any. A non-owned or absent id plans to a
//! warning-only no-op rather than an error, so cancellation stays
//! best-effort idempotent.

use std::fmt;

use crate::error::Result;
use crate::identity::Session;
use crate::reservation::ReservationId;
use crate::store::ReservationStore;

use super::plan::{OperationPlan, PlanAction};

/// Which kind of reservation a cancellation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationKind {
    /// A book reservation.
    Book,
    /// A table reservation.
    Table,
}

impl fmt::Display for ReservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Book => write!(f, "book"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// A request to cancel one reservation by id.
#[derive(Debug, Clone)]
pub struct CancelRequest {
    /// The authenticated requester.
    pub session: Session,
    /// The kind of reservation being cancelled.
    pub kind: ReservationKind,
    /// The id of the reservation to cancel.
    pub id: ReservationId,
}

impl CancelRequest {
    /// Creates a cancellation request.
    #[must_use]
    pub const fn new(session: Session, kind: ReservationKind, id: ReservationId) -> Self {
        Self { session, kind, id }
    }
}

/// Plans cancellation requests.
pub struct CancelPlan;

impl CancelPlan {
    /// Builds a plan for a cancellation request.
    ///
    /// The record is looked up in the store; if it is absent, or the
    /// session neither owns it nor holds the admin capability, the plan
    /// carries a warning and no action.
    ///
    /// # Errors
    ///
    /// This planner itself does not fail; the `Result` mirrors the other
    /// planners so callers compose uniformly.
    pub fn build_plan(request: &CancelRequest, store: &ReservationStore) -> Result<OperationPlan> {
        let description = format!("Cancel {} reservation {}", request.kind, request.id);

        let owner = match request.kind {
            ReservationKind::Book => store.find_book(request.id).map(|r| r.user_id().to_string()),
            ReservationKind::Table => {
                store.find_table(request.id).map(|r| r.user_id().to_string())
            }
        };

        let Some(owner) = owner else {
            return Ok(OperationPlan::new(description).add_warning(format!(
                "no {} reservation with id {}",
                request.kind, request.id
            )));
        };

        if !request.session.is_admin() && owner != request.session.user_id() {
            log::warn!(
                "{} attempted to cancel {} reservation {} held by {}",
                request.session.user_id(),
                request.kind,
                request.id,
                owner
            );
            return Ok(OperationPlan::new(description).add_warning(format!(
                "{} reservation {} is not held by {}",
                request.kind, request.id, request.session.user_id()
            )));
        }

        let action = match request.kind {
            ReservationKind::Book => PlanAction::CancelBookReservation(request.id),
            ReservationKind::Table => PlanAction::CancelTableReservation(request.id),
        };
        Ok(OperationPlan::new(description).add_action(action))
    }
}
