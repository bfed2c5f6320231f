//! Shared data models spanning the engine layers.

pub mod account;
pub mod observation;
pub mod order;
pub mod signal;

pub use account::AccountSnapshot;
pub use observation::{closes, Observation};
pub use order::{OrderAck, OrderIntent, OrderRequest};
pub use signal::{Direction, OptionType, Signal};
