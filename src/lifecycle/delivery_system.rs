use crate::clients::OrderClient;
use crate::config::{ConfigError, SimulationConfig};
use crate::framework::{ActorClient, SimulationClock};
use crate::model::{
    ErrandAmendment, GeoPoint, Order, OrderCreate, OrderId, OrderStatus, TrackingSnapshot,
    Transition,
};
use crate::order_actor::OrderError;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Actor task failed: {0}")]
    ActorPanicked(String),
}

/// The runtime orchestrator for the delivery simulation.
///
/// `DeliverySystem` owns:
/// - the Order actor task, started with the [`SimulationConfig`] as its context
/// - the [`SimulationClock`] that moves riders of orders out for delivery
///
/// The Order client stays private: every lifecycle change goes through
/// [`DeliverySystem::advance`], so timers start when an order departs and stop when it is
/// delivered.
///
/// # Example
///
/// ```ignore
/// let mut system = DeliverySystem::new(SimulationConfig::default())?;
/// let id = system.place_order(OrderCreate::marketplace(30.0, 5.0)).await?;
/// for _ in 0..3 {
///     system.advance(id).await?; // Accepted, ShoppingInProgress, OutForDelivery
/// }
/// let snapshot = system.snapshot(id).await?;
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    order_client: OrderClient,
    config: SimulationConfig,
    clock: SimulationClock<Order>,
    handle: JoinHandle<()>,
}

impl DeliverySystem {
    /// Validates the config, then spawns the Order actor and builds its clock.
    /// Must be called within a Tokio runtime.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (order_actor, order_client) = crate::order_actor::new(config.mailbox_size);
        let clock = SimulationClock::new(order_client.inner().clone(), config.tick_period())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let handle = tokio::spawn(order_actor.run(config.clone()));

        info!(
            tick_period_ms = config.tick_period_ms,
            progress_step = config.progress_step,
            "Delivery system started"
        );

        Ok(Self {
            order_client,
            config,
            clock,
            handle,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        self.order_client.create_order(params).await
    }

    /// Moves the order one lifecycle step and keeps its timer in sync with the new status.
    #[instrument(skip(self))]
    pub async fn advance(&mut self, id: OrderId) -> Result<Transition, OrderError> {
        let transition = self.order_client.advance(id).await?;
        match transition {
            Transition::Advanced {
                to: OrderStatus::OutForDelivery,
                ..
            } => {
                self.clock.track(id);
            }
            Transition::Advanced {
                to: OrderStatus::Delivered,
                ..
            }
            | Transition::Terminal => {
                self.clock.untrack(&id);
            }
            Transition::Advanced { .. } => {}
        }
        Ok(transition)
    }

    /// Stops tracking the order and removes it.
    #[instrument(skip(self))]
    pub async fn discard(&mut self, id: OrderId) -> Result<(), OrderError> {
        self.clock.untrack(&id);
        self.order_client.delete(id).await
    }

    /// Edits a pending errand. See [`ErrandAmendment`].
    pub async fn amend_errand(
        &self,
        id: OrderId,
        amendment: ErrandAmendment,
    ) -> Result<(), OrderError> {
        self.order_client.amend_errand(id, amendment).await
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.order_client.order(id).await
    }

    /// Every order of the session, newest first.
    pub async fn orders(&self) -> Result<Vec<TrackingSnapshot>, OrderError> {
        self.order_client.orders().await
    }

    pub async fn status(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.order_client.status(id).await
    }

    pub async fn eta_minutes(&self, id: OrderId) -> Result<u32, OrderError> {
        self.order_client.eta_minutes(id).await
    }

    pub async fn current_position(&self, id: OrderId) -> Result<GeoPoint, OrderError> {
        self.order_client.current_position(id).await
    }

    pub async fn snapshot(&self, id: OrderId) -> Result<TrackingSnapshot, OrderError> {
        self.order_client.snapshot(id).await
    }

    pub fn is_tracking(&self, id: OrderId) -> bool {
        self.clock.is_tracking(&id)
    }

    /// Number of orders whose rider is currently being moved.
    pub fn tracked_orders(&self) -> usize {
        self.clock.active()
    }

    /// Gracefully shuts down the system.
    ///
    /// Timers are aborted first since each holds a client clone. Dropping the last client
    /// closes the channel and the actor exits its loop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down delivery system...");

        let Self {
            order_client,
            mut clock,
            handle,
            ..
        } = self;

        clock.stop_all();
        drop(clock);
        drop(order_client);

        if let Err(e) = handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(LifecycleError::ActorPanicked(e.to_string()));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
