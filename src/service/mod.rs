//! Per-entity service layer.
//!
//! One generic HTTP service, parameterized by an [`EndpointMap`], serves
//! every entity type.

mod endpoints;
mod http;
mod traits;

pub use endpoints::{EndpointMap, TransitionBody, TransitionKind, TransitionRequest};
pub use http::HttpEntityService;
pub use traits::EntityService;
