//! Order totals and pre-submission checks.

pub mod summary;
pub mod validate;

pub use summary::{OrderSummary, aggregate};
pub use validate::{Selection, SubmissionConstraints, ValidationError, validate_for_submission};
