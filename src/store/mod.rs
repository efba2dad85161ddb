//! Per-entity view state and the actions that drive it.

pub mod entity;
pub mod mvi;

pub use entity::{BusyFlag, EntityIntent, EntityReducer, EntityState, EntityStore};
