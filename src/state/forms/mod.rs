//! Form domain layer
//!
//! Type-safe handling of the user entry form: raw field values, the
//! validation rules, and the submission lifecycle.

mod field;
mod form_state;
mod validation;

pub use field::{FormField, UnknownField, UserField};
pub use form_state::{Form, PendingSubmission, SubmissionState, SubmitError, UserForm};
pub use validation::{ErrorSet, FieldError};
