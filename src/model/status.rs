use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an order is in its delivery lifecycle.
///
/// The lifecycle is strictly linear: every order walks
/// `Pending → Accepted → ShoppingInProgress → OutForDelivery → Delivered`
/// one step at a time and never goes back. `Delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Accepted,
    ShoppingInProgress,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const SEQUENCE: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Accepted,
        OrderStatus::ShoppingInProgress,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// The status one step further along, or `None` at `Delivered`.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Accepted),
            OrderStatus::Accepted => Some(OrderStatus::ShoppingInProgress),
            OrderStatus::ShoppingInProgress => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Accepted => write!(f, "Accepted"),
            OrderStatus::ShoppingInProgress => write!(f, "Shopping in Progress"),
            OrderStatus::OutForDelivery => write!(f, "Out for Delivery"),
            OrderStatus::Delivered => write!(f, "Delivered"),
        }
    }
}
