//! # System Lifecycle & Orchestration
//!
//! Starts, wires and shuts down the delivery simulation.
//!
//! ## The DeliverySystem Pattern
//!
//! [`DeliverySystem::new`] validates the config, creates the Order actor, injects the [`SimulationConfig`](crate::config::SimulationConfig)
//! as its context and pairs it with a [`SimulationClock`](crate::framework::SimulationClock):
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(config.mailbox_size);
//! let clock = SimulationClock::new(order_client.inner().clone(), config.tick_period())?;
//! let handle = tokio::spawn(order_actor.run(config.clone()));
//! ```
//!
//! The clock is wired to the same channel as every other caller, so a tick and a manual
//! `advance` are never applied to an order at the same time.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop timers** - each timer task holds a client clone
//! 2. **Drop clients** - closes the sender side of the channel
//! 3. **Actor detects closure** - `receiver.recv()` returns `None`
//! 4. **Await completion** - a panicked actor surfaces as [`LifecycleError::ActorPanicked`]
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole system. See the
//! [`tracing`] module for the log levels used by the actor and the clock.

pub mod delivery_system;
pub mod tracing;

pub use self::delivery_system::*;
pub use self::tracing::setup_tracing;
