//! Diagnostics for the Java-to-IDL mapping.
//!
//! - [`Constraint`]: the fixed, numbered table of mapping rules. The number
//!   is the stable identity of a failure; the message is not.
//! - [`ConstraintFailure`]: which rule failed, for which entity, and the
//!   classification context it failed in.
//! - [`Diagnostic`] and [`DiagnosticQueue`]: batch-level reporting.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained by recording an error, so a
//! driver returning `Result<_, ErrorGuaranteed>` cannot fail silently.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn generate(...) -> Result<Vec<OutputFile>, ErrorGuaranteed> { ... }
//! ```

mod constraint;
mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use constraint::{Constraint, ConstraintFailure};
pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::DiagnosticQueue;
