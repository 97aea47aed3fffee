/// Represents a customer order and its delivery simulation.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// The lifecycle logic lives here as plain methods so it can be reasoned about and tested
/// without an actor: [`Order::advance`] moves the status one step, [`Order::tick`] moves the
/// rider while the order is out for delivery.
use crate::model::{GeoPoint, OrderStatus, Route};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Accumulated floating-point steps within this distance of 1.0 count as arrived.
const PROGRESS_EPSILON: f64 = 1e-9;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// The two order categories the app takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    /// Direct purchase from a vendor's catalog.
    Marketplace,
    /// Personal-shopping request: a rider buys from a free-form list.
    Errand,
}

impl Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderKind::Marketplace => write!(f, "Marketplace"),
            OrderKind::Errand => write!(f, "Errand"),
        }
    }
}

/// What the rider should buy on an errand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrandDetails {
    pub shopping_list: String,
    /// Photo of a handwritten list or receipt, as a data URL.
    pub receipt_image: Option<String>,
    pub budget_limit: Option<f64>,
}

/// A resubmitted errand form. Replaces the errand details and the delivery address as a
/// whole, so leaving the receipt image or budget empty removes it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrandAmendment {
    pub details: ErrandDetails,
    pub delivery_address: Option<String>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub kind: OrderKind,
    pub route: Route,
    pub total: f64,
    pub delivery_fee: f64,
    pub errand: Option<ErrandDetails>,
    pub delivery_address: Option<String>,
    /// Overrides the configured base ETA for this order kind.
    pub eta_minutes: Option<u32>,
}

impl OrderCreate {
    pub fn marketplace(total: f64, delivery_fee: f64) -> Self {
        Self {
            kind: OrderKind::Marketplace,
            route: Route::default(),
            total,
            delivery_fee,
            errand: None,
            delivery_address: None,
            eta_minutes: None,
        }
    }

    pub fn errand(details: ErrandDetails) -> Self {
        Self {
            kind: OrderKind::Errand,
            route: Route::default(),
            total: 0.0,
            delivery_fee: 0.0,
            errand: Some(details),
            delivery_address: None,
            eta_minutes: None,
        }
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn with_eta(mut self, minutes: u32) -> Self {
        self.eta_minutes = Some(minutes);
        self
    }

    pub fn deliver_to(mut self, address: impl Into<String>) -> Self {
        self.delivery_address = Some(address.into());
        self
    }
}

/// Result of [`Order::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Advanced { from: OrderStatus, to: OrderStatus },
    /// The order was already delivered; nothing changed.
    Terminal,
}

/// Result of [`Order::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The order is not out for delivery; nothing changed.
    Ignored { status: OrderStatus },
    Moved { progress: f64, eta_minutes: u32 },
    /// This tick brought the rider to the destination.
    Arrived,
    /// The rider was already at the destination; nothing changed.
    Saturated,
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub id: OrderId,
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub eta_minutes: u32,
    pub position: GeoPoint,
    pub progress: f64,
    pub arrived: bool,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
    pub route: Route,
    pub total: f64,
    pub delivery_fee: f64,
    pub errand: Option<ErrandDetails>,
    pub delivery_address: Option<String>,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    status: OrderStatus,
    eta_minutes: u32,
    departure_eta: Option<u32>,
    progress: f64,
    requested_eta: Option<u32>,
}

impl Order {
    /// Creates a `Pending` order with zero progress.
    ///
    /// # Notes
    /// The ETA starts at the payload's override or 0; the actor fills in the configured
    /// base ETA for the order kind when it stores the order.
    pub fn new(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        validate(&params)?;
        Ok(Self {
            id,
            kind: params.kind,
            route: params.route,
            total: params.total,
            delivery_fee: params.delivery_fee,
            errand: params.errand,
            delivery_address: params.delivery_address,
            placed_at: Utc::now(),
            status: OrderStatus::Pending,
            eta_minutes: params.eta_minutes.unwrap_or(0),
            departure_eta: None,
            progress: 0.0,
            requested_eta: params.eta_minutes,
        })
    }

    /// Applies the base ETA unless the order was created with its own. Never below one minute.
    pub(crate) fn set_base_eta(&mut self, minutes: u32) {
        if self.requested_eta.is_none() {
            self.eta_minutes = minutes.max(1);
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Remaining minutes until arrival; 0 once delivered.
    pub fn eta_minutes(&self) -> u32 {
        if self.status.is_terminal() {
            0
        } else {
            self.eta_minutes
        }
    }

    /// The ETA captured when the rider departed.
    pub fn departure_eta(&self) -> Option<u32> {
        self.departure_eta
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Rider position while out for delivery; the fixed destination in every other state.
    pub fn current_position(&self) -> GeoPoint {
        match self.status {
            OrderStatus::OutForDelivery => self.route.position_at(self.progress),
            _ => self.route.destination,
        }
    }

    pub fn has_arrived(&self) -> bool {
        self.status.is_terminal()
            || (self.status == OrderStatus::OutForDelivery && self.progress >= 1.0)
    }

    /// Moves the order exactly one step along the lifecycle. A no-op once delivered.
    ///
    /// Entering `OutForDelivery` resets progress and captures the current ETA as the
    /// departure ETA the interpolator counts down from.
    pub fn advance(&mut self) -> Transition {
        let Some(next) = self.status.next() else {
            return Transition::Terminal;
        };

        let from = self.status;
        self.status = next;
        if next == OrderStatus::OutForDelivery {
            self.progress = 0.0;
            self.departure_eta = Some(self.eta_minutes);
        }
        Transition::Advanced { from, to: next }
    }

    /// Moves the rider `step` of the way along the route.
    ///
    /// Only has an effect while `OutForDelivery` and before arrival. Arrival does not mark
    /// the order delivered; that stays an explicit [`Order::advance`].
    pub fn tick(&mut self, step: f64) -> TickOutcome {
        if self.status != OrderStatus::OutForDelivery {
            return TickOutcome::Ignored {
                status: self.status,
            };
        }
        if self.progress >= 1.0 {
            return TickOutcome::Saturated;
        }

        let next = self.progress + step.max(0.0);
        self.progress = if next >= 1.0 - PROGRESS_EPSILON {
            1.0
        } else {
            next
        };

        let initial = self.departure_eta.unwrap_or(self.eta_minutes);
        self.eta_minutes = remaining_eta(initial, self.progress);

        if self.progress >= 1.0 {
            TickOutcome::Arrived
        } else {
            TickOutcome::Moved {
                progress: self.progress,
                eta_minutes: self.eta_minutes,
            }
        }
    }

    /// Edits an errand. Only allowed while the order is still `Pending`.
    pub fn amend_errand(&mut self, amendment: ErrandAmendment) -> Result<(), OrderError> {
        if self.kind != OrderKind::Errand {
            return Err(OrderError::NotAnErrand(self.id.to_string()));
        }
        if self.status != OrderStatus::Pending {
            return Err(OrderError::NotAmendable {
                id: self.id.to_string(),
                status: self.status,
            });
        }
        if let Some(budget) = amendment.details.budget_limit {
            validate_budget(budget)?;
        }

        self.errand = Some(amendment.details);
        self.delivery_address = amendment.delivery_address;
        Ok(())
    }

    pub fn snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            id: self.id,
            kind: self.kind,
            status: self.status,
            eta_minutes: self.eta_minutes(),
            position: self.current_position(),
            progress: self.progress,
            arrived: self.has_arrived(),
            placed_at: self.placed_at,
        }
    }
}

/// `max(1, round(initial * (1 - progress)))`
fn remaining_eta(initial: u32, progress: f64) -> u32 {
    let remaining = (f64::from(initial) * (1.0 - progress)).round();
    remaining.max(1.0) as u32
}

fn validate(params: &OrderCreate) -> Result<(), OrderError> {
    for point in [params.route.origin, params.route.destination] {
        if !point.is_valid() {
            return Err(OrderError::InvalidCoordinates(point.to_string()));
        }
    }
    if params.eta_minutes == Some(0) {
        return Err(OrderError::ValidationError(
            "eta must be at least one minute".to_string(),
        ));
    }
    if !(params.total.is_finite() && params.total >= 0.0) {
        return Err(OrderError::ValidationError(format!(
            "total must be a non-negative amount, got {}",
            params.total
        )));
    }
    if !(params.delivery_fee.is_finite() && params.delivery_fee >= 0.0) {
        return Err(OrderError::ValidationError(format!(
            "delivery fee must be a non-negative amount, got {}",
            params.delivery_fee
        )));
    }
    match (params.kind, &params.errand) {
        (OrderKind::Errand, None) => Err(OrderError::ValidationError(
            "errand orders need errand details".to_string(),
        )),
        (OrderKind::Marketplace, Some(_)) => Err(OrderError::ValidationError(
            "marketplace orders cannot carry errand details".to_string(),
        )),
        (_, Some(details)) => match details.budget_limit {
            Some(budget) => validate_budget(budget),
            None => Ok(()),
        },
        (OrderKind::Marketplace, None) => Ok(()),
    }
}

fn validate_budget(budget: f64) -> Result<(), OrderError> {
    if budget.is_finite() && budget >= 0.0 {
        Ok(())
    } else {
        Err(OrderError::InvalidBudget(budget.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_DESTINATION, DEFAULT_ORIGIN};

    const STEP: f64 = 0.005;

    fn order_with_eta(eta: u32) -> Order {
        Order::new(OrderId(1), OrderCreate::marketplace(25.0, 5.0).with_eta(eta)).unwrap()
    }

    fn out_for_delivery(eta: u32) -> Order {
        let mut order = order_with_eta(eta);
        for _ in 0..3 {
            order.advance();
        }
        assert_eq!(order.status(), OrderStatus::OutForDelivery);
        order
    }

    #[test]
    fn test_new_order_is_pending_with_zero_progress() {
        let order = order_with_eta(20);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.progress(), 0.0);
        assert_eq!(order.eta_minutes(), 20);
        assert_eq!(order.departure_eta(), None);
    }

    #[test]
    fn test_five_advances_reach_delivered_and_sixth_is_noop() {
        let mut order = order_with_eta(20);
        let mut seen = vec![order.status()];
        for _ in 0..5 {
            match order.advance() {
                Transition::Advanced { from, to } => {
                    assert_eq!(from, *seen.last().unwrap());
                    assert_eq!(Some(to), from.next());
                    seen.push(to);
                }
                Transition::Terminal => {
                    assert_eq!(order.status(), OrderStatus::Delivered);
                }
            }
        }
        assert_eq!(seen, OrderStatus::SEQUENCE.to_vec());

        assert_eq!(order.advance(), Transition::Terminal);
        assert_eq!(order.advance(), Transition::Terminal);
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(order.eta_minutes(), 0);
    }

    #[test]
    fn test_tick_outside_delivery_changes_nothing() {
        let mut order = order_with_eta(20);
        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::ShoppingInProgress,
        ] {
            assert_eq!(order.status(), status);
            let before = order.snapshot();
            assert_eq!(order.tick(STEP), TickOutcome::Ignored { status });
            assert_eq!(order.snapshot(), before);
            order.advance();
        }

        order.advance();
        order.advance();
        assert_eq!(order.status(), OrderStatus::Delivered);
        let before = order.snapshot();
        assert!(matches!(order.tick(STEP), TickOutcome::Ignored { .. }));
        assert_eq!(order.snapshot(), before);
    }

    #[test]
    fn test_hundred_ticks_reach_midpoint() {
        let mut order = out_for_delivery(20);
        assert_eq!(order.current_position(), DEFAULT_ORIGIN);

        for _ in 0..100 {
            order.tick(STEP);
        }

        assert!((order.progress() - 0.5).abs() < 1e-9);
        assert!(order.current_position().distance_max(GeoPoint::new(5.60925, -0.18005)) < 1e-9);
        assert_eq!(order.eta_minutes(), 10);
    }

    #[test]
    fn test_three_hundred_ticks_saturate_at_destination() {
        let mut order = out_for_delivery(20);
        let mut arrivals = 0;
        for _ in 0..300 {
            if order.tick(STEP) == TickOutcome::Arrived {
                arrivals += 1;
            }
        }

        assert_eq!(arrivals, 1);
        assert_eq!(order.progress(), 1.0);
        assert_eq!(order.current_position(), DEFAULT_DESTINATION);
        assert_eq!(order.eta_minutes(), 1);
        assert!(order.has_arrived());
        // Arrival alone does not complete the order.
        assert_eq!(order.status(), OrderStatus::OutForDelivery);
        assert_eq!(order.tick(STEP), TickOutcome::Saturated);
    }

    #[test]
    fn test_eta_never_below_one_before_arrival() {
        let mut order = out_for_delivery(20);
        let mut last_eta = order.eta_minutes();
        while order.progress() < 1.0 {
            order.tick(STEP);
            if order.progress() < 1.0 {
                assert!(order.eta_minutes() >= 1);
            }
            assert!(order.eta_minutes() <= last_eta, "eta must not increase");
            last_eta = order.eta_minutes();
        }
    }

    #[test]
    fn test_departure_captures_eta_and_resets_progress() {
        let mut order = order_with_eta(35);
        order.advance();
        order.advance();
        assert_eq!(order.current_position(), DEFAULT_DESTINATION);
        order.advance();
        assert_eq!(order.departure_eta(), Some(35));
        assert_eq!(order.progress(), 0.0);
    }

    #[test]
    fn test_amend_errand_only_while_pending() {
        let details = ErrandDetails {
            shopping_list: "2 loaves of bread".to_string(),
            ..ErrandDetails::default()
        };
        let mut order = Order::new(OrderId(2), OrderCreate::errand(details)).unwrap();

        order
            .amend_errand(ErrandAmendment {
                details: ErrandDetails {
                    shopping_list: "bread, eggs".to_string(),
                    receipt_image: None,
                    budget_limit: Some(40.0),
                },
                delivery_address: Some("Office".to_string()),
            })
            .unwrap();
        let errand = order.errand.as_ref().unwrap();
        assert_eq!(errand.shopping_list, "bread, eggs");
        assert_eq!(errand.budget_limit, Some(40.0));
        assert_eq!(order.delivery_address.as_deref(), Some("Office"));

        order.advance();
        let err = order.amend_errand(ErrandAmendment::default()).unwrap_err();
        assert_eq!(
            err,
            OrderError::NotAmendable {
                id: "order_2".to_string(),
                status: OrderStatus::Accepted
            }
        );
    }

    #[test]
    fn test_amend_replaces_whole_errand() {
        let details = ErrandDetails {
            shopping_list: "milk".to_string(),
            receipt_image: Some("data:image/png;base64,AAAA".to_string()),
            budget_limit: Some(30.0),
        };
        let mut order = Order::new(
            OrderId(4),
            OrderCreate::errand(details).deliver_to("Home"),
        )
        .unwrap();

        order
            .amend_errand(ErrandAmendment {
                details: ErrandDetails {
                    shopping_list: "milk, sugar".to_string(),
                    receipt_image: None,
                    budget_limit: None,
                },
                delivery_address: Some("Home".to_string()),
            })
            .unwrap();

        let errand = order.errand.as_ref().unwrap();
        assert_eq!(errand.shopping_list, "milk, sugar");
        assert_eq!(errand.receipt_image, None);
        assert_eq!(errand.budget_limit, None);
        assert_eq!(order.delivery_address.as_deref(), Some("Home"));
    }

    #[test]
    fn test_zero_eta_is_rejected_and_base_eta_floored() {
        assert!(matches!(
            Order::new(OrderId(1), OrderCreate::marketplace(10.0, 5.0).with_eta(0)),
            Err(OrderError::ValidationError(_))
        ));

        let mut order = Order::new(OrderId(1), OrderCreate::marketplace(10.0, 5.0)).unwrap();
        order.set_base_eta(0);
        for _ in 0..3 {
            order.advance();
        }
        let departed = order.eta_minutes();
        assert_eq!(departed, 1);
        order.tick(STEP);
        assert!(order.eta_minutes() <= departed);
    }

    #[test]
    fn test_amend_rejects_marketplace_and_bad_budget() {
        let mut order = order_with_eta(20);
        assert!(matches!(
            order.amend_errand(ErrandAmendment::default()),
            Err(OrderError::NotAnErrand(_))
        ));

        let mut errand = Order::new(OrderId(3), OrderCreate::errand(ErrandDetails::default())).unwrap();
        assert!(matches!(
            errand.amend_errand(ErrandAmendment {
                details: ErrandDetails {
                    budget_limit: Some(-1.0),
                    ..ErrandDetails::default()
                },
                delivery_address: None,
            }),
            Err(OrderError::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_create_validation() {
        let bad_route = Route::new(GeoPoint::new(120.0, 0.0), DEFAULT_DESTINATION);
        assert!(matches!(
            Order::new(OrderId(1), OrderCreate::marketplace(10.0, 5.0).with_route(bad_route)),
            Err(OrderError::InvalidCoordinates(_))
        ));

        let mut errand_without_details = OrderCreate::errand(ErrandDetails::default());
        errand_without_details.errand = None;
        assert!(matches!(
            Order::new(OrderId(1), errand_without_details),
            Err(OrderError::ValidationError(_))
        ));

        assert!(matches!(
            Order::new(OrderId(1), OrderCreate::marketplace(-3.0, 5.0)),
            Err(OrderError::ValidationError(_))
        ));
    }
}
