//! Diagnostic queue for a batch run.
//!
//! Features:
//! - Deduplication: a closure shared by several roots reports its failure
//!   once per distinct (code, subject, context)
//! - Error limit to keep batch output readable
//! - `ErrorGuaranteed` proof that errors were emitted

use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop repeats of an already queued diagnostic.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 100,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No limits, no deduplication (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Identity used for deduplication; messages are derived from the code.
type DedupKey = (ErrorCode, String, Vec<String>);

#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<DedupKey>,
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Queue a diagnostic. Returns `false` when it was dropped as a
    /// duplicate or because the error limit was reached.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if self.config.deduplicate {
            let key = (
                diagnostic.code,
                diagnostic.subject.clone(),
                diagnostic.context.clone(),
            );
            if !self.seen.insert(key) {
                return false;
            }
        }
        if diagnostic.is_error() {
            // Errors past the limit still count toward the guarantee.
            self.error_count += 1;
            if self.limit_reached() {
                return false;
            }
        }
        self.diagnostics.push(diagnostic);
        true
    }

    /// Queue an error and return proof of it.
    pub fn emit_error(&mut self, diagnostic: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diagnostic.is_error());
        self.push(diagnostic);
        // A deduplicated error was already counted when first queued.
        ErrorGuaranteed::new()
    }

    fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count > self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Proof of errors, if any were queued.
    pub fn guarantee(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take the queued diagnostics, errors first, otherwise in arrival order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(|diagnostic| !diagnostic.is_error());
        diagnostics
    }
}
