//! Stateless indicator math over oldest-first close series.

pub mod momentum;
pub mod trend;
pub mod volatility;
