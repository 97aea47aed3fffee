//! # Order Client
//!
//! High-level API for the `Order` actor, including the read model the presentation layer
//! polls: status, ETA, current rider position and a serializable snapshot.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    ErrandAmendment, GeoPoint, Order, OrderCreate, OrderId, OrderStatus, TrackingSnapshot,
    Transition,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(kind = %params.kind))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Move the order one lifecycle step. Returns [`Transition::Terminal`] once delivered.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId) -> Result<Transition, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::Advance)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Advance(transition) => Ok(transition),
            _ => unreachable!("Advance action must return Advance result"),
        }
    }

    #[instrument(skip(self, amendment))]
    pub async fn amend_errand(
        &self,
        id: OrderId,
        amendment: ErrandAmendment,
    ) -> Result<(), OrderError> {
        debug!(?amendment, "Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::AmendErrand(amendment))
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::AmendErrand(()) => Ok(()),
            _ => unreachable!("AmendErrand action must return AmendErrand result"),
        }
    }

    /// Fetch an order, treating absence as [`OrderError::NotFound`].
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Snapshots of every order, newest first.
    pub async fn orders(&self) -> Result<Vec<TrackingSnapshot>, OrderError> {
        let mut orders = self.inner.list().await.map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        Ok(orders.iter().map(Order::snapshot).collect())
    }

    pub async fn status(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        Ok(self.order(id).await?.status())
    }

    pub async fn eta_minutes(&self, id: OrderId) -> Result<u32, OrderError> {
        Ok(self.order(id).await?.eta_minutes())
    }

    /// Interpolated rider position while out for delivery, the destination otherwise.
    pub async fn current_position(&self, id: OrderId) -> Result<GeoPoint, OrderError> {
        Ok(self.order(id).await?.current_position())
    }

    pub async fn snapshot(&self, id: OrderId) -> Result<TrackingSnapshot, OrderError> {
        Ok(self.order(id).await?.snapshot())
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        if let Some(order_error) = e.entity_error::<OrderError>() {
            return order_error.clone();
        }
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};
    use crate::model::{ErrandDetails, DEFAULT_DESTINATION};

    #[tokio::test]
    async fn test_advance_returns_transition() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(client);

        let advance_task = tokio::spawn(async move { order_client.advance(OrderId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(1));
        assert!(matches!(action, OrderAction::Advance));

        let transition = Transition::Advanced {
            from: OrderStatus::Pending,
            to: OrderStatus::Accepted,
        };
        responder
            .send(Ok(OrderActionResult::Advance(transition)))
            .unwrap();

        assert_eq!(advance_task.await.unwrap().unwrap(), transition);
    }

    #[tokio::test]
    async fn test_entity_error_is_unwrapped() {
        let mut mock = MockClient::<Order>::new();
        let refused = OrderError::NotAmendable {
            id: "order_4".to_string(),
            status: OrderStatus::Accepted,
        };
        mock.expect_action(OrderId(4))
            .return_err(FrameworkError::EntityError(Box::new(refused.clone())));

        let order_client = OrderClient::new(mock.client());
        let result = order_client
            .amend_errand(OrderId(4), ErrandAmendment::default())
            .await;

        assert_eq!(result, Err(refused));
        mock.verify();
    }

    #[tokio::test]
    async fn test_read_model_on_missing_order() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(OrderId(9)).return_ok(None);
        mock.expect_get(OrderId(9)).return_err(FrameworkError::ActorClosed);

        let order_client = OrderClient::new(mock.client());
        assert_eq!(
            order_client.status(OrderId(9)).await,
            Err(OrderError::NotFound("order_9".to_string()))
        );
        assert!(matches!(
            order_client.eta_minutes(OrderId(9)).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_orders_are_newest_first() {
        let mut mock = MockClient::<Order>::new();
        let placed: Vec<Order> = [3, 1, 2]
            .into_iter()
            .map(|n| Order::new(OrderId(n), OrderCreate::marketplace(10.0, 5.0)).unwrap())
            .collect();
        mock.expect_list().return_ok(placed);

        let orders = OrderClient::new(mock.client()).orders().await.unwrap();

        let ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![OrderId(3), OrderId(2), OrderId(1)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_snapshot_of_pending_errand() {
        let mut mock = MockClient::<Order>::new();
        let order = Order::new(
            OrderId(2),
            OrderCreate::errand(ErrandDetails::default()).with_eta(35),
        )
        .unwrap();
        mock.expect_get(OrderId(2)).return_ok(Some(order));

        let snapshot = OrderClient::new(mock.client())
            .snapshot(OrderId(2))
            .await
            .unwrap();

        assert_eq!(snapshot.status, OrderStatus::Pending);
        assert_eq!(snapshot.eta_minutes, 35);
        assert_eq!(snapshot.position, DEFAULT_DESTINATION);
        assert!(!snapshot.arrived);
        mock.verify();
    }
}
