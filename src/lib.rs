#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Amana Rides
//!
//! > **Order progress simulation for a delivery and errand app.**
//!
//! An order moves through a fixed lifecycle, `Pending → Accepted → Shopping in Progress →
//! Out for Delivery → Delivered`, one explicit step at a time. While it is out for delivery,
//! a clock moves the rider from the pickup point toward the customer and counts the ETA down.
//!
//! ## 🏗️ Design
//!
//! ### One owner per order
//! Every order lives inside a single resource actor. Manual lifecycle steps and automatic
//! clock ticks are messages on the same channel, so they are applied strictly one after
//! the other and never race.
//!
//! ### Timers with an owner
//! The [`SimulationClock`](framework::SimulationClock) runs one timer per tracked order. Timers
//! end on arrival, on removal of the order, on [`shutdown`](lifecycle::DeliverySystem::shutdown)
//! and when the clock is dropped. A timer never keeps running for an order nobody watches.
//!
//! ### Arrival is not delivery
//! The rider reaching the destination saturates progress at 1.0 and the ETA at one minute.
//! Marking the order delivered stays an explicit [`advance`](lifecycle::DeliverySystem::advance).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>`, its clients, the tick-driving clock and the mock client.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor),
//!   [`SimulationClock`](framework::SimulationClock).
//!
//! ### 2. The Domain ([`model`], [`order_actor`])
//! - **Role**: [`Order`](model::Order) holds the status machine and the position/ETA interpolator
//!   as plain methods; [`order_actor`] plugs it into the framework.
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: [`OrderClient`](clients::OrderClient) exposes lifecycle commands and the read
//!   model (status, ETA, current position, snapshot).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: [`DeliverySystem`](lifecycle::DeliverySystem) spawns the actor, owns the clock
//!   and keeps tracking in step with status changes.
//!
//! ### 5. Supporting pieces ([`config`], [`checkout`])
//! Runtime settings from JSON or `AMANA_*` variables, and cart arithmetic that produces
//! order payloads.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs and a fast clock
//! RUST_LOG=info AMANA_TICK_PERIOD_MS=20 cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
