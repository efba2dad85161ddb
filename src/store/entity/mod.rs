mod intent;
mod reducer;
mod state;
mod store;

pub use intent::{BusyFlag, EntityIntent};
pub use reducer::EntityReducer;
pub use state::EntityState;
pub use store::EntityStore;
