//! Pure data structures and lifecycle logic for orders.

pub mod geo;
pub mod order;
pub mod status;

pub use geo::*;
pub use order::*;
pub use status::*;
