//! ActorEntity trait implementation for the Order domain type.
//!
//! Wires the pure lifecycle methods on [`Order`] into the generic
//! [`ResourceActor`](crate::framework::ResourceActor). The actor's context is the
//! [`SimulationConfig`], which supplies the base ETA per order kind and the progress step
//! applied on each clock tick.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::config::SimulationConfig;
use crate::framework::{ActorEntity, TickReport};
use crate::model::{Order, OrderCreate, OrderId, TickOutcome};
use async_trait::async_trait;
use tracing::{debug, info};

impl TickReport for TickOutcome {
    fn is_final(&self) -> bool {
        !matches!(self, TickOutcome::Moved { .. })
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Tick = TickOutcome;
    type Context = SimulationConfig;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Order::new(id, params)
    }

    /// Fills in the configured base ETA for the order's kind.
    async fn on_create(&mut self, ctx: &SimulationConfig) -> Result<(), Self::Error> {
        self.set_base_eta(ctx.base_eta_minutes(self.kind));
        debug!(id = %self.id, kind = %self.kind, eta = self.eta_minutes(), "Order placed");
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &SimulationConfig,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Advance => Ok(OrderActionResult::Advance(self.advance())),
            OrderAction::AmendErrand(amendment) => {
                self.amend_errand(amendment)?;
                Ok(OrderActionResult::AmendErrand(()))
            }
        }
    }

    fn on_tick(&mut self, ctx: &SimulationConfig) -> TickOutcome {
        let outcome = self.tick(ctx.progress_step);
        if outcome == TickOutcome::Arrived {
            info!(id = %self.id, position = %self.current_position(), "Rider arrived");
        }
        outcome
    }
}
