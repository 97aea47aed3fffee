//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); the actor tags
//! its lines with `entity_type` instead. Levels come from the `RUST_LOG` environment variable.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle events only
//! RUST_LOG=info cargo run
//!
//! # Full payloads and tracking decisions
//! RUST_LOG=debug cargo run
//!
//! # Every clock tick
//! RUST_LOG=trace cargo run
//!
//! # Only the clock
//! RUST_LOG=amana_rides::framework::clock=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! | Level | Events |
//! |-------|--------|
//! | `info` | `Actor started`, `Created`, `Action ok`, `Tracking started`, `Rider arrived`, `Shutdown` |
//! | `debug` | request payloads (`?params`, `?action`), `Get`, `Timer finished` |
//! | `trace` | each `Tick` with its outcome |
//! | `warn` | failed creates and actions, `Not found`, a timer stopped by a closed actor |
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**, a marketplace order through to delivery:
//!
//! ```text
//! INFO Delivery system started tick_period_ms=1000 progress_step=0.005
//! INFO Actor started entity_type="Order"
//! INFO create_order{kind=Marketplace}: Sending create_order to actor
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO advance{id=OrderId(1)}: Action ok entity_type="Order" id=order_1 outcome=Advance(Advanced { from: ShoppingInProgress, to: OutForDelivery })
//! INFO advance{id=OrderId(1)}: Tracking started id=order_1 period_ms=1000
//! INFO Rider arrived id=order_1 position=(5.61480, -0.17310)
//! INFO Shutdown entity_type="Order" size=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "advance{id=OrderId(1)}")
        .init();
}
