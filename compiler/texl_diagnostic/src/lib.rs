//! Diagnostics for call-site type checking.
//!
//! A diagnostic names:
//! - an error code (stable number plus the message-template resource key the
//!   host localizes, e.g. `ErrBadArity`)
//! - a severity (`Severe` blocks lowering, `Warning` and `Suggestion` do not)
//! - the offending node and its span
//! - the template arguments, in order
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained from a severe diagnostic. An
//! invalid call-site result carries one, so "invalid but nothing reported"
//! cannot be represented.

mod diagnostic;
mod error_code;
mod guarantee;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::{ErrorCode, Phase};
pub use guarantee::ErrorGuaranteed;
