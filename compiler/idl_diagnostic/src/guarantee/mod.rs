//! Proof that at least one error was reported.

use std::fmt;

/// Zero-sized proof that an error has been emitted.
///
/// Only [`crate::DiagnosticQueue`] and [`ErrorGuaranteed::from_error_count`]
/// construct it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) const fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// `Some` when `count` errors were reported and `count > 0`.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
