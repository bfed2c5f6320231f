//! Periodic multi-strategy trading loop.
//!
//! Polls market data for a small set of instruments, evaluates a strategy per
//! asset class, sizes and submits an order when a signal fires and alerts an
//! operator about every trade and lifecycle event.

pub mod common;
pub mod config;
pub mod core;
pub mod execution;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;
