//! Client-side orchestration for the observation / article workflow backend.
//!
//! ```text
//! CLI ──→ EntityStore ──→ EntityService ──→ ApiClient ──→ REST backend
//!            │  ↑
//!            ↓  │
//!        EntityReducer
//! ```
//!
//! The backend owns validation, persistence and workflow; this crate holds
//! view state, normalizes responses into [`api::Envelope`] and handles
//! attachment encoding.

pub mod api;
pub mod attachment;
pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
