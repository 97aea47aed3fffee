//! # ActorEntity Trait
//!
//! The contract every resource managed by a [`ResourceActor`](crate::framework::ResourceActor)
//! must satisfy. Besides the creation DTO and the custom action enum, an entity declares how it
//! reacts to a clock tick, which is what lets the generic actor drive simulations such as a
//! rider moving towards a drop-off point.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// What a tick did to an entity, as far as the clock is concerned.
///
/// The clock keeps the timer for an entity alive while [`TickReport::is_final`] is `false`.
pub trait TickReport: Send + Sync + Debug {
    /// `true` when further ticks can no longer change the entity.
    fn is_final(&self) -> bool;
}

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await. The `Context` associated type is injected
/// into every hook by [`ResourceActor::run`](crate::framework::ResourceActor::run), which is how
/// runtime settings reach entities without being stored in each of them.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Advance`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The result of a single clock tick.
    type Tick: TickReport;

    /// The runtime context injected into the actor.
    type Context: Send + Sync;

    /// One error enum for the whole entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is constructed, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Clock ---

    /// Advance the entity by one clock period. Must be a no-op when there is nothing to advance.
    fn on_tick(&mut self, ctx: &Self::Context) -> Self::Tick;
}
