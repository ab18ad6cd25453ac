//! Administrative catalog planning.
//!
//! Catalog deletions are admin-only. The capability check lives here at
//! the planning stage so no deletion action can be constructed from a
//! member session.

use crate::catalog::{Catalog, TableId};
use crate::error::{Error, Result};
use crate::identity::Session;

use super::plan::{OperationPlan, PlanAction};

/// Plans administrative catalog operations.
pub struct AdminPlan;

impl AdminPlan {
    fn require_admin(session: &Session) -> Result<()> {
        if session.is_admin() {
            Ok(())
        } else {
            log::warn!(
                "{} attempted an admin operation without the capability",
                session.user_id()
            );
            Err(Error::InvalidCredentials)
        }
    }

    /// Builds a plan deleting a book from the catalog.
    ///
    /// An absent title plans to a warning-only no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] unless the session holds the
    /// admin capability.
    pub fn delete_book_plan(
        session: &Session,
        title: &str,
        catalog: &Catalog,
    ) -> Result<OperationPlan> {
        Self::require_admin(session)?;
        let description = format!("Delete book '{title}'");
        if catalog.book_exists(title) {
            Ok(OperationPlan::new(description)
                .add_action(PlanAction::DeleteBook(title.to_string())))
        } else {
            Ok(OperationPlan::new(description)
                .add_warning(format!("book '{title}' is not in the catalog")))
        }
    }

    /// Builds a plan deleting a table from the catalog.
    ///
    /// An absent id plans to a warning-only no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredentials`] unless the session holds the
    /// admin capability.
    pub fn delete_table_plan(
        session: &Session,
        id: TableId,
        catalog: &Catalog,
    ) -> Result<OperationPlan> {
        Self::require_admin(session)?;
        let description = format!("Delete table {id}");
        if catalog.table_exists(id) {
            Ok(OperationPlan::new(description).add_action(PlanAction::DeleteTable(id)))
        } else {
            Ok(OperationPlan::new(description)
                .add_warning(format!("table {id} is not in the catalog")))
        }
    }
}
