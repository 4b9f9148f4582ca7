//! Diagnostics produced while evaluating a document.
//!
//! The evaluator never prints. It appends [`Diagnostic`]s to a
//! [`DiagnosticLog`] and keeps going; the embedding driver decides how to
//! render them once the unit is finished.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained by logging an error, so a
//! function returning it proves that the failure was reported.

mod diagnostic;
mod error_code;
mod guarantee;
mod log;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use log::{DiagnosticConfig, DiagnosticLog};
