//! Signal evaluation entry point.

pub mod engine;

pub use engine::SignalEngine;
