//! Field validation shared by the form presenter and the backend services.
//!
//! The same `ValidationRules` constants are used to validate user input in the
//! browser and to re-validate DTOs on the server, so both sides report the
//! same messages.

mod validation;

pub use validation::{parse_date, FieldError, ValidationErrors, ValidationRules};
