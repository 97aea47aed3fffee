//! Error types for the Order actor.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Advancing a delivered order and ticking an order that is not out for delivery are not
/// errors; both are silent no-ops.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A route end point is outside the valid latitude/longitude ranges.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// An errand budget is negative or not a number.
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// Errand-only operation attempted on a marketplace order.
    #[error("Order {0} is not an errand")]
    NotAnErrand(String),

    /// The errand was already accepted and can no longer be edited.
    #[error("Order {id} can no longer be amended (status: {status})")]
    NotAmendable { id: String, status: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

