//! Turning fired signals into submitted orders.

pub mod gateway;
pub mod sizer;

pub use gateway::{ExecutionError, ExecutionGateway, ExecutionOutcome};
pub use sizer::PositionSizer;
