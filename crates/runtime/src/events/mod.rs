//! Topic-based event bus for board changes and substrate change signals.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{GameEvent, StorageEvent};
