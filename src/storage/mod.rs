//! Storage layer: crash-consistent page persistence.

mod durable;

pub use durable::{persist, persist_node};
