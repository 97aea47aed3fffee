//! Custom actions for the Order actor.
//!
//! Handled by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action) in
//! [`entity`](super::entity). Clock ticks are not actions; they arrive as `Tick` requests.

use crate::model::{ErrandAmendment, Transition};

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order one step along its lifecycle. A no-op once delivered.
    Advance,
    /// Edit an errand that has not been accepted yet.
    ///
    /// # Errors
    /// Fails unless the order is an errand still in `Pending`.
    AmendErrand(ErrandAmendment),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    Advance(Transition),
    AmendErrand(()),
}
