//! # Order Actor
//!
//! The Order resource actor: owns every order of the session and applies lifecycle
//! actions and clock ticks to them one at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use amana_rides::config::SimulationConfig;
//! use amana_rides::model::{OrderCreate, OrderStatus};
//! use amana_rides::order_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SimulationConfig::default();
//!     let (actor, client) = order_actor::new(config.mailbox_size);
//!     tokio::spawn(actor.run(config));
//!
//!     let id = client.create_order(OrderCreate::marketplace(25.0, 5.0)).await?;
//!     client.advance(id).await?;
//!     assert_eq!(client.status(id).await?, OrderStatus::Accepted);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
