//! Generic actor framework for resource management.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities and processes requests in order
//! - [`ResourceClient`] - Type-safe, cloneable handle for sending requests
//! - [`ActorClient`] - Default `get`/`delete` for resource-specific client wrappers
//! - [`SimulationClock`] - One periodic timer per tracked entity, feeding `Tick` requests
//! - [`FrameworkError`] - Errors raised by the plumbing
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod clock;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use clock::SimulationClock;
pub use entity::{ActorEntity, TickReport};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
