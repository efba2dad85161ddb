//! Model-View-Intent primitives.
//!
//! ```text
//! store action ──→ Intent ──→ Reducer ──→ State ──→ state() snapshot
//!      ↑                                    │
//!      └──────────── service call ←─────────┘
//! ```

/// Input of a [`Reducer`]: a request the store issued, a service outcome,
/// or a local edit such as a filter change.
pub trait Intent: Send + 'static {}

/// State owned by a store. Callers only ever see clones.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// `(State, Intent) -> State`, with no I/O. The only place state changes.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
