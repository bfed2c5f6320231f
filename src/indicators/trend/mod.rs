//! Trend indicators: kernel regression

pub mod kernel_regression;

pub use kernel_regression::*;
