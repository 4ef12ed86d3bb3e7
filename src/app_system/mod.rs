//! System wiring, startup, and tracing configuration.

pub mod stock_system;
pub mod tracing;

pub use stock_system::*;
pub use self::tracing::*;
