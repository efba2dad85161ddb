//! Client-side form validation. A form with errors is never sent.

mod recommendation;
mod record;
mod rules;

pub use recommendation::{Recommendation, RecommendationDraft, RecommendationList};
pub use record::validate_record;
pub use rules::FieldErrors;
